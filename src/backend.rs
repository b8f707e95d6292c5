use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};
use tokio::sync::RwLock;
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_CONTACT_MAX_MESSAGE_BYTES: usize = 4_096;
const DEFAULT_CONTACT_LOG_CAPACITY: usize = 256;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const CONTACT_MAX_MESSAGE_BYTES_BOUNDS: (usize, usize) = (256, 65_536);
const CONTACT_LOG_CAPACITY_BOUNDS: (usize, usize) = (1, 10_000);
const CONTACT_MAX_FIELD_BYTES: usize = 256;
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone)]
struct RuntimeConfig {
    max_message_bytes: usize,
    log_capacity: usize,
    log_level: LogLevel,
}

impl RuntimeConfig {
    fn from_env() -> Self {
        let max_message_bytes = parse_env_usize_with_bounds(
            "CONTACT_MAX_MESSAGE_BYTES",
            DEFAULT_CONTACT_MAX_MESSAGE_BYTES,
            CONTACT_MAX_MESSAGE_BYTES_BOUNDS,
        );
        let log_capacity = parse_env_usize_with_bounds(
            "CONTACT_LOG_CAPACITY",
            DEFAULT_CONTACT_LOG_CAPACITY,
            CONTACT_LOG_CAPACITY_BOUNDS,
        );
        let log_level = parse_log_level("LOG_LEVEL", DEFAULT_LOG_LEVEL);

        Self {
            max_message_bytes,
            log_capacity,
            log_level,
        }
    }
}

#[derive(Clone)]
struct AppState {
    submissions: Arc<RwLock<Vec<StoredSubmission>>>,
    config: RuntimeConfig,
}

#[derive(Deserialize)]
struct ContactSubmission {
    name: String,
    email: String,
    message: String,
}

/// A validated submission held in the bounded in-memory log.
#[derive(Clone, Serialize)]
struct StoredSubmission {
    name: String,
    email: String,
    message: String,
    received_at: u64,
}

#[derive(Clone, Serialize)]
struct ContactPayload {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ContactPayload {
    fn accepted() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn error(message: &str) -> Self {
        Self {
            ok: false,
            error: Some(message.to_string()),
        }
    }
}

struct CleanSubmission {
    name: String,
    email: String,
    message: String,
}

fn validate_submission(
    submission: &ContactSubmission,
    max_message_bytes: usize,
) -> Result<CleanSubmission, &'static str> {
    let name = submission.name.trim();
    let email = submission.email.trim();
    let message = submission.message.trim();

    if name.is_empty() {
        return Err("name must not be empty");
    }
    if name.len() > CONTACT_MAX_FIELD_BYTES {
        return Err("name is too long");
    }
    if email.is_empty() {
        return Err("email must not be empty");
    }
    if email.len() > CONTACT_MAX_FIELD_BYTES {
        return Err("email is too long");
    }
    if !email.contains('@') || email.chars().any(char::is_whitespace) {
        return Err("email does not look deliverable");
    }
    if message.is_empty() {
        return Err("message must not be empty");
    }
    if message.len() > max_message_bytes {
        return Err("message is too long");
    }

    Ok(CleanSubmission {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// Appends to the in-memory log, dropping the oldest entry at capacity.
/// Returns the retained count.
async fn record_submission(state: &AppState, submission: StoredSubmission) -> usize {
    let mut submissions = state.submissions.write().await;

    if submissions.len() >= state.config.log_capacity {
        submissions.remove(0);
    }
    submissions.push(submission);
    submissions.len()
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let bind_address = format!("0.0.0.0:{port}");
    let config = RuntimeConfig::from_env();

    let state = AppState {
        submissions: Arc::new(RwLock::new(Vec::new())),
        config,
    };

    let static_service = ServeDir::new("dist").not_found_service(ServeFile::new("dist/index.html"));

    let app = Router::new()
        .route("/api/contact", post(post_contact))
        .fallback_service(static_service)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    println!("server listening on http://127.0.0.1:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn post_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(submission): Json<ContactSubmission>,
) -> impl IntoResponse {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(&headers);

    log_event(
        &state.config,
        LogLevel::Info,
        "contact_request_start",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "name_bytes": submission.name.len(),
            "message_bytes": submission.message.len(),
        }),
    );

    let clean = match validate_submission(&submission, state.config.max_message_bytes) {
        Ok(clean) => clean,
        Err(error_message) => {
            log_event(
                &state.config,
                LogLevel::Info,
                "contact_request_failed",
                serde_json::json!({
                    "request_id": request_id.as_str(),
                    "error_class": "invalid_submission",
                    "message": error_message,
                    "duration_ms": request_started_at.elapsed().as_millis(),
                }),
            );
            return json_response(
                StatusCode::BAD_REQUEST,
                ContactPayload::error(error_message),
                &request_id,
            );
        }
    };

    let stored = StoredSubmission {
        name: clean.name,
        email: clean.email,
        message: clean.message,
        received_at: now_unix_seconds(),
    };
    let retained = record_submission(&state, stored).await;

    log_event(
        &state.config,
        LogLevel::Info,
        "contact_request_complete",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "status": StatusCode::OK.as_u16(),
            "duration_ms": request_started_at.elapsed().as_millis(),
            "retained_submissions": retained,
        }),
    );

    json_response(StatusCode::OK, ContactPayload::accepted(), &request_id)
}

fn json_response(
    status: StatusCode,
    payload: ContactPayload,
    request_id: &str,
) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Ok(request_id_header) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }

    (status, headers, Json(payload)).into_response()
}

fn parse_env_usize_with_bounds(name: &str, default: usize, bounds: (usize, usize)) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(name: &str, default: LogLevel) -> LogLevel {
    match parse_env_non_empty_string(name)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn log_event(config: &RuntimeConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_string()),
    );
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_runtime_config() -> RuntimeConfig {
        RuntimeConfig {
            max_message_bytes: DEFAULT_CONTACT_MAX_MESSAGE_BYTES,
            log_capacity: DEFAULT_CONTACT_LOG_CAPACITY,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn valid_submission_is_trimmed() {
        let clean = validate_submission(
            &submission("  Ada Lovelace ", " ada@example.com ", " Hello there. "),
            DEFAULT_CONTACT_MAX_MESSAGE_BYTES,
        )
        .expect("submission should validate");

        assert_eq!(clean.name, "Ada Lovelace");
        assert_eq!(clean.email, "ada@example.com");
        assert_eq!(clean.message, "Hello there.");
    }

    #[test]
    fn blank_fields_are_rejected() {
        let result = validate_submission(
            &submission("   ", "ada@example.com", "Hello"),
            DEFAULT_CONTACT_MAX_MESSAGE_BYTES,
        );
        assert_eq!(result.err(), Some("name must not be empty"));

        let result = validate_submission(
            &submission("Ada", "ada@example.com", "   "),
            DEFAULT_CONTACT_MAX_MESSAGE_BYTES,
        );
        assert_eq!(result.err(), Some("message must not be empty"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let result = validate_submission(
            &submission("Ada", "ada.example.com", "Hello"),
            DEFAULT_CONTACT_MAX_MESSAGE_BYTES,
        );
        assert_eq!(result.err(), Some("email does not look deliverable"));

        let result = validate_submission(
            &submission("Ada", "ada lovelace@example.com", "Hello"),
            DEFAULT_CONTACT_MAX_MESSAGE_BYTES,
        );
        assert_eq!(result.err(), Some("email does not look deliverable"));
    }

    #[test]
    fn message_length_boundary_is_enforced() {
        let at_limit = "x".repeat(CONTACT_MAX_MESSAGE_BYTES_BOUNDS.0);
        let result = validate_submission(
            &submission("Ada", "ada@example.com", &at_limit),
            CONTACT_MAX_MESSAGE_BYTES_BOUNDS.0,
        );
        assert!(result.is_ok());

        let over_limit = "x".repeat(CONTACT_MAX_MESSAGE_BYTES_BOUNDS.0 + 1);
        let result = validate_submission(
            &submission("Ada", "ada@example.com", &over_limit),
            CONTACT_MAX_MESSAGE_BYTES_BOUNDS.0,
        );
        assert_eq!(result.err(), Some("message is too long"));
    }

    #[tokio::test]
    async fn submission_log_drops_oldest_at_capacity() {
        let state = AppState {
            submissions: Arc::new(RwLock::new(Vec::new())),
            config: RuntimeConfig {
                log_capacity: 2,
                ..test_runtime_config()
            },
        };

        for index in 0..3 {
            let stored = StoredSubmission {
                name: format!("sender-{index}"),
                email: format!("sender-{index}@example.com"),
                message: "Hello".to_string(),
                received_at: index,
            };
            record_submission(&state, stored).await;
        }

        let submissions = state.submissions.read().await;
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].name, "sender-1");
        assert_eq!(submissions[1].name, "sender-2");
    }

    #[test]
    fn request_id_header_is_preferred_over_generated() {
        let mut headers = HeaderMap::new();
        headers.insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_static("req-from-client"),
        );
        assert_eq!(resolve_request_id(&headers), "req-from-client");

        let generated = resolve_request_id(&HeaderMap::new());
        assert!(generated.starts_with("req-"));
    }

    #[test]
    fn debug_level_sorts_below_info() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert_eq!(LogLevel::Info.as_str(), "info");
    }
}
