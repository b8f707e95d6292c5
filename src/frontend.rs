use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions,
};
use yew::prelude::*;

use crate::content::{
    Project, Skill, BACKEND_SKILLS, CONTACT_INFO, FRAMEWORKS, PROGRAMMING_LANGUAGES, PROJECTS,
    TOOLS,
};
use crate::state::{
    generate_particles, Section, ViewMsg, ViewState, NAVBAR_OFFSET_PX, SCROLL_DEFER_MS,
    SKILL_BARS_DELAY_MS, SKILL_BAR_STAGGER_SECS,
};

const SECTION_ROOT_MARGIN: &str = "-50px 0px -50px 0px";
const SECTION_VISIBILITY_THRESHOLD: f64 = 0.3;

impl Reducible for ViewState {
    type Action = ViewMsg;

    fn reduce(self: Rc<Self>, action: ViewMsg) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

fn scroll_offset() -> f64 {
    window().and_then(|win| win.scroll_y().ok()).unwrap_or(0.0)
}

fn viewport_width() -> Option<f64> {
    window()?.inner_width().ok()?.as_f64()
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Smooth-scrolls the viewport so the section sits just below the fixed
/// navigation bar. A missing target element leaves the viewport untouched.
fn scroll_to_section(section: Section) {
    let Some(win) = window() else {
        return;
    };
    let Some(element) = win
        .document()
        .and_then(|document| document.get_element_by_id(section.as_str()))
    else {
        return;
    };

    let page_offset = win.page_y_offset().unwrap_or(0.0);
    let target = element.get_bounding_client_rect().top() + page_offset - NAVBAR_OFFSET_PX;

    let options = ScrollToOptions::new();
    options.set_top(target);
    options.set_behavior(if prefers_reduced_motion() {
        ScrollBehavior::Auto
    } else {
        ScrollBehavior::Smooth
    });
    win.scroll_to_with_scroll_to_options(&options);
}

/// Staggered reveal pass over the skill progress bars, applied directly to
/// the live elements. Re-entering the skills section schedules this again;
/// re-applying the same animation value leaves settled bars in place.
fn animate_skill_bars() {
    let Some(document) = window().and_then(|win| win.document()) else {
        return;
    };
    let Ok(bars) = document.query_selector_all(".progress-fill") else {
        return;
    };

    for index in 0..bars.length() {
        let Some(element) = bars
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };

        let animation = format!(
            "progress-reveal 1.5s ease-out {:.1}s forwards",
            index as f64 * SKILL_BAR_STAGGER_SECS
        );
        let _ = element.style().set_property("animation", &animation);
    }
}

/// A window event listener that detaches on teardown.
struct WindowListener {
    event: &'static str,
    callback: Closure<dyn FnMut()>,
}

impl WindowListener {
    fn attach(event: &'static str, handler: impl FnMut() + 'static) -> Option<Self> {
        let callback = Closure::<dyn FnMut()>::new(handler);
        window()?
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self { event, callback })
    }

    fn detach(self) {
        if let Some(win) = window() {
            let _ = win.remove_event_listener_with_callback(
                self.event,
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Watches the page sections and reports each one that crosses the
/// visibility threshold. Within one notification batch the entries are
/// processed in callback order, so the last intersecting section wins.
struct SectionObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl SectionObserver {
    fn watch(on_enter: Callback<Section>) -> Option<Self> {
        let document = window()?.document()?;

        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                if let Some(section) = Section::from_id(&entry.target().id()) {
                    on_enter.emit(section);
                }
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_root_margin(SECTION_ROOT_MARGIN);
        options.set_threshold(&JsValue::from_f64(SECTION_VISIBILITY_THRESHOLD));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .ok()?;

        let sections = document.query_selector_all(".page-section").ok()?;
        for index in 0..sections.length() {
            if let Some(element) = sections
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            {
                observer.observe(&element);
            }
        }

        Some(Self {
            observer,
            _callback: callback,
        })
    }

    fn disconnect(self) {
        self.observer.disconnect();
    }
}

#[derive(Properties, PartialEq)]
struct NavBarProps {
    active: Option<Section>,
    menu_open: bool,
    scrolled: bool,
    on_navigate: Callback<Section>,
    on_toggle_menu: Callback<()>,
}

#[function_component(NavBar)]
fn nav_bar(props: &NavBarProps) -> Html {
    let on_toggle = {
        let on_toggle_menu = props.on_toggle_menu.clone();
        Callback::from(move |_: MouseEvent| on_toggle_menu.emit(()))
    };

    let on_brand_click = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            on_navigate.emit(Section::Home);
        })
    };

    html! {
        <nav class={classes!("navbar", props.scrolled.then_some("scrolled"))}>
            <div class="nav-inner">
                <a class="nav-brand" href="#home" onclick={on_brand_click}>{"Arjun Mehta"}</a>
                <button
                    class="nav-toggle"
                    type="button"
                    aria-label="Toggle navigation menu"
                    aria-expanded={props.menu_open.to_string()}
                    onclick={on_toggle}
                >
                    <span class="nav-toggle-bar" aria-hidden="true"></span>
                    <span class="nav-toggle-bar" aria-hidden="true"></span>
                    <span class="nav-toggle-bar" aria-hidden="true"></span>
                </button>
                <ul class={classes!("nav-links", props.menu_open.then_some("open"))}>
                    { for Section::ALL.iter().map(|&section| {
                        let onclick = {
                            let on_navigate = props.on_navigate.clone();
                            Callback::from(move |event: MouseEvent| {
                                event.prevent_default();
                                on_navigate.emit(section);
                            })
                        };
                        let is_active = props.active == Some(section);

                        html! {
                            <li key={section.as_str()}>
                                <a
                                    class={classes!("nav-link", is_active.then_some("active"))}
                                    href={format!("#{}", section.as_str())}
                                    onclick={onclick}
                                >
                                    { section.label() }
                                </a>
                            </li>
                        }
                    }) }
                </ul>
            </div>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct SkillGroupProps {
    title: AttrValue,
    skills: &'static [Skill],
}

#[function_component(SkillGroup)]
fn skill_group(props: &SkillGroupProps) -> Html {
    html! {
        <div class="skill-group">
            <h3>{props.title.clone()}</h3>
            { for props.skills.iter().map(|skill| html! {
                <div class="skill" key={skill.name}>
                    <div class="skill-heading">
                        <span class="skill-name">{skill.name}</span>
                        <span class="skill-percentage">{format!("{}%", skill.percentage)}</span>
                    </div>
                    <div class="progress-track">
                        <div
                            class="progress-fill"
                            style={format!("--progress: {}%;", skill.percentage)}
                        ></div>
                    </div>
                </div>
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: &'static Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = props.project;

    html! {
        <article class="project-card">
            <img class="project-image" src={project.image} alt={project.title} loading="lazy" />
            <div class="project-body">
                <h3>{project.title}</h3>
                <p>{project.description}</p>
                <ul class="tag-list">
                    { for project.tags.iter().map(|tag| html! {
                        <li class="tag" key={*tag}>{*tag}</li>
                    }) }
                </ul>
            </div>
        </article>
    }
}

#[derive(Serialize)]
struct ContactSubmission {
    name: String,
    email: String,
    message: String,
}

#[derive(Deserialize)]
struct ContactResponse {
    ok: bool,
}

async fn send_submission(submission: &ContactSubmission) -> Option<ContactResponse> {
    let request = Request::post("/api/contact").json(submission).ok()?;
    let response = request.send().await.ok()?;
    response.json::<ContactResponse>().await.ok()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SubmitStatus {
    Idle,
    Invalid,
    Sending,
    Sent,
    Failed,
}

impl SubmitStatus {
    fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Invalid => Some("Please fill in every field and use a valid email address."),
            Self::Sending => Some("Sending your message..."),
            Self::Sent => Some("Thanks! Your message is on its way."),
            Self::Failed => Some("Something went wrong. Please try again or email me directly."),
        }
    }
}

#[function_component(ContactForm)]
fn contact_form() -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let message = use_state(String::new);
    let status = use_state(|| SubmitStatus::Idle);

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |event: InputEvent| {
            name.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            email.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_message_input = {
        let message = message.clone();
        Callback::from(move |event: InputEvent| {
            message.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let message = message.clone();
        let status = status.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let submission = ContactSubmission {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                message: message.trim().to_string(),
            };

            if submission.name.is_empty()
                || submission.message.is_empty()
                || !submission.email.contains('@')
            {
                status.set(SubmitStatus::Invalid);
                return;
            }

            status.set(SubmitStatus::Sending);

            let name = name.clone();
            let email = email.clone();
            let message = message.clone();
            let status = status.clone();
            spawn_local(async move {
                match send_submission(&submission).await {
                    Some(response) if response.ok => {
                        name.set(String::new());
                        email.set(String::new());
                        message.set(String::new());
                        status.set(SubmitStatus::Sent);
                    }
                    _ => status.set(SubmitStatus::Failed),
                }
            });
        })
    };

    html! {
        <form class="contact-form" onsubmit={onsubmit}>
            <label for="contact-name">{"Name"}</label>
            <input
                id="contact-name"
                name="name"
                type="text"
                autocomplete="name"
                value={(*name).clone()}
                oninput={on_name_input}
            />

            <label for="contact-email">{"Email"}</label>
            <input
                id="contact-email"
                name="email"
                type="email"
                autocomplete="email"
                value={(*email).clone()}
                oninput={on_email_input}
            />

            <label for="contact-message">{"Message"}</label>
            <textarea
                id="contact-message"
                name="message"
                rows="6"
                value={(*message).clone()}
                oninput={on_message_input}
            />

            <button
                class="button primary"
                type="submit"
                disabled={*status == SubmitStatus::Sending}
            >
                {"Send message"}
            </button>

            if let Some(text) = status.message() {
                <p class="form-status" role="status">{text}</p>
            }
        </form>
    }
}

#[function_component(App)]
fn app() -> Html {
    let view = use_reducer(ViewState::default);

    {
        let view = view.clone();
        use_effect_with((), move |_| {
            let dispatcher = view.dispatcher();

            dispatcher.dispatch(ViewMsg::ScrollChanged(scroll_offset()));
            if let Some(width) = viewport_width() {
                dispatcher.dispatch(ViewMsg::ParticlesReplaced(generate_particles(
                    width,
                    &mut fastrand::Rng::new(),
                )));
            }

            let scroll_listener = WindowListener::attach("scroll", {
                let dispatcher = dispatcher.clone();
                move || dispatcher.dispatch(ViewMsg::ScrollChanged(scroll_offset()))
            });

            let resize_listener = WindowListener::attach("resize", {
                let dispatcher = dispatcher.clone();
                move || {
                    if let Some(width) = viewport_width() {
                        dispatcher.dispatch(ViewMsg::ParticlesReplaced(generate_particles(
                            width,
                            &mut fastrand::Rng::new(),
                        )));
                    }
                }
            });

            let observer = SectionObserver::watch(Callback::from(move |section: Section| {
                dispatcher.dispatch(ViewMsg::SectionEntered(section));
                if section == Section::Skills {
                    Timeout::new(SKILL_BARS_DELAY_MS, animate_skill_bars).forget();
                }
            }));

            move || {
                if let Some(listener) = scroll_listener {
                    listener.detach();
                }
                if let Some(listener) = resize_listener {
                    listener.detach();
                }
                if let Some(observer) = observer {
                    observer.disconnect();
                }
            }
        });
    }

    let on_navigate = {
        let view = view.clone();
        Callback::from(move |section: Section| {
            view.dispatch(ViewMsg::NavigateTo(section));
            Timeout::new(SCROLL_DEFER_MS, move || scroll_to_section(section)).forget();
        })
    };

    let on_toggle_menu = {
        let view = view.clone();
        Callback::from(move |_| view.dispatch(ViewMsg::MenuToggled))
    };

    let go_to_projects = {
        let on_navigate = on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Section::Projects))
    };

    let go_to_contact = {
        let on_navigate = on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Section::Contact))
    };

    html! {
        <>
            <NavBar
                active={view.active_section}
                menu_open={view.menu_open}
                scrolled={view.scrolled}
                on_navigate={on_navigate.clone()}
                on_toggle_menu={on_toggle_menu}
            />

            <main>
                <section id="home" class="page-section hero">
                    <div class="particles" aria-hidden="true">
                        { for view.particles.iter().map(|particle| html! {
                            <span
                                class="particle"
                                style={format!(
                                    "left: {:.2}px; width: {:.2}px; height: {:.2}px; animation-delay: {:.2}s;",
                                    particle.x, particle.size, particle.size, particle.delay
                                )}
                            />
                        }) }
                    </div>
                    <div class="hero-content">
                        <p class="hero-eyebrow">{"Hi, I'm"}</p>
                        <h1>{"Arjun Mehta"}</h1>
                        <p class="hero-subtitle">
                            {"Senior iOS engineer crafting native apps people rely on every day."}
                        </p>
                        <div class="hero-actions">
                            <button class="button primary" type="button" onclick={go_to_projects}>
                                {"View my work"}
                            </button>
                            <button class="button ghost" type="button" onclick={go_to_contact}>
                                {"Get in touch"}
                            </button>
                        </div>
                    </div>
                </section>

                <section id="about" class="page-section" aria-labelledby="about-heading">
                    <h2 id="about-heading">{"About"}</h2>
                    <p>
                        {"I build iOS applications for a living: eight years of shipping to the \
                          App Store, from scrappy prototypes to apps with millions of monthly \
                          users. My happy place is the layer where product decisions meet \
                          performance budgets."}
                    </p>
                    <p>
                        {"Day to day that means Swift with UIKit or SwiftUI up front, a \
                          pragmatic amount of Node.js behind it, and an unreasonable fondness \
                          for Instruments traces."}
                    </p>
                </section>

                <section id="skills" class="page-section" aria-labelledby="skills-heading">
                    <h2 id="skills-heading">{"Skills"}</h2>
                    <div class="skills-grid">
                        <SkillGroup title="Programming Languages" skills={PROGRAMMING_LANGUAGES} />
                        <SkillGroup title="Frameworks" skills={FRAMEWORKS} />
                        <SkillGroup title="Tools" skills={TOOLS} />
                    </div>
                    <div class="backend-skills">
                        <h3>{"Also comfortable with"}</h3>
                        <ul class="chip-list">
                            { for BACKEND_SKILLS.iter().map(|skill| html! {
                                <li class="chip" key={*skill}>{*skill}</li>
                            }) }
                        </ul>
                    </div>
                </section>

                <section id="projects" class="page-section" aria-labelledby="projects-heading">
                    <h2 id="projects-heading">{"Projects"}</h2>
                    <div class="project-grid">
                        { for PROJECTS.iter().map(|project| html! {
                            <ProjectCard key={project.title} project={project} />
                        }) }
                    </div>
                </section>

                <section id="contact" class="page-section" aria-labelledby="contact-heading">
                    <h2 id="contact-heading">{"Get in touch"}</h2>
                    <div class="contact-grid">
                        <ul class="contact-cards">
                            { for CONTACT_INFO.iter().map(|entry| html! {
                                <li class="contact-card" key={entry.title}>
                                    <i class={entry.icon} aria-hidden="true"></i>
                                    <div class="contact-card-body">
                                        <span class="contact-card-title">{entry.title}</span>
                                        <a
                                            href={entry.link}
                                            target={entry.target}
                                            rel={entry.target.map(|_| "noopener noreferrer")}
                                        >
                                            {entry.value}
                                            if entry.target.is_some() {
                                                <span class="sr-only">{" (opens in a new tab)"}</span>
                                            }
                                        </a>
                                    </div>
                                </li>
                            }) }
                        </ul>
                        <ContactForm />
                    </div>
                </section>
            </main>

            <footer class="site-footer">
                <p>{"Arjun Mehta. Built with Rust and Yew."}</p>
            </footer>
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
