//! View state for the single-page layout.
//!
//! All scroll/menu/section bookkeeping lives in one owned record that is only
//! mutated through [`ViewState::apply`], so the update rules stay testable
//! without a live document. The frontend wires browser events to messages and
//! renders purely from the resulting state.

/// Vertical scroll offset past which the navigation bar switches style.
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;
/// Fixed navigation bar height subtracted when scrolling to a section.
pub const NAVBAR_OFFSET_PX: f64 = 100.0;
/// Deferral before computing a navigation target's document position.
pub const SCROLL_DEFER_MS: u32 = 1;
/// Deferral before the skill-bar reveal pass runs.
pub const SKILL_BARS_DELAY_MS: u32 = 200;
/// Per-bar increment for the staggered reveal.
pub const SKILL_BAR_STAGGER_SECS: f64 = 0.1;

/// Hard cap on decorative particles.
pub const MAX_PARTICLES: usize = 50;
/// One particle per this many pixels of viewport width.
pub const PARTICLE_SPACING_PX: f64 = 20.0;
/// Animation delays are sampled from `[0, this)` seconds.
pub const PARTICLE_MAX_DELAY_SECS: f64 = 15.0;
/// Particle sizes are sampled from `[MIN, MIN + SPREAD)` pixels.
pub const PARTICLE_MIN_SIZE_PX: f64 = 2.0;
pub const PARTICLE_SIZE_SPREAD_PX: f64 = 4.0;

/// The five page sections, in document order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Section {
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ];

    /// Element id of the section, also used as the nav target.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        match value {
            "home" => Some(Self::Home),
            "about" => Some(Self::About),
            "skills" => Some(Self::Skills),
            "projects" => Some(Self::Projects),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }

    /// Link text shown in the navigation bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }
}

/// A decorative floating particle. Regeneration replaces the whole set; no
/// particle keeps its identity across a resize.
#[derive(Clone, PartialEq, Debug)]
pub struct Particle {
    pub x: f64,
    pub delay: f64,
    pub size: f64,
}

/// Number of particles for a viewport width: one per 20px, capped at 50.
pub fn particle_count(width: f64) -> usize {
    if !width.is_finite() || width <= 0.0 {
        return 0;
    }

    MAX_PARTICLES.min((width / PARTICLE_SPACING_PX) as usize)
}

/// Sample a fresh particle set for the given viewport width.
pub fn generate_particles(width: f64, rng: &mut fastrand::Rng) -> Vec<Particle> {
    (0..particle_count(width))
        .map(|_| Particle {
            x: rng.f64() * width,
            delay: rng.f64() * PARTICLE_MAX_DELAY_SECS,
            size: PARTICLE_MIN_SIZE_PX + rng.f64() * PARTICLE_SIZE_SPREAD_PX,
        })
        .collect()
}

/// True once the page has scrolled past the navigation-bar threshold.
pub fn scrolled_past_threshold(offset: f64) -> bool {
    offset > SCROLL_THRESHOLD_PX
}

#[derive(Clone, PartialEq, Debug)]
pub enum ViewMsg {
    /// Window scroll offset changed.
    ScrollChanged(f64),
    /// A section crossed the visibility threshold.
    SectionEntered(Section),
    /// A navigation link was activated.
    NavigateTo(Section),
    /// The mobile menu button was pressed.
    MenuToggled,
    /// The particle set was regenerated for a new viewport width.
    ParticlesReplaced(Vec<Particle>),
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct ViewState {
    pub active_section: Option<Section>,
    pub menu_open: bool,
    pub scrolled: bool,
    pub particles: Vec<Particle>,
}

impl ViewState {
    /// Apply one message and produce the next state. Navigation sets the
    /// active section optimistically, ahead of the scroll completing, and
    /// closes the mobile menu if it was open.
    pub fn apply(&self, msg: ViewMsg) -> ViewState {
        let mut next = self.clone();

        match msg {
            ViewMsg::ScrollChanged(offset) => {
                next.scrolled = scrolled_past_threshold(offset);
            }
            ViewMsg::SectionEntered(section) => {
                next.active_section = Some(section);
            }
            ViewMsg::NavigateTo(section) => {
                next.active_section = Some(section);
                next.menu_open = false;
            }
            ViewMsg::MenuToggled => {
                next.menu_open = !next.menu_open;
            }
            ViewMsg::ParticlesReplaced(particles) => {
                next.particles = particles;
            }
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_count_scales_with_width_and_caps_at_fifty() {
        assert_eq!(particle_count(800.0), 40);
        assert_eq!(particle_count(1200.0), 50);
        assert_eq!(particle_count(19.0), 0);
        assert_eq!(particle_count(0.0), 0);
        assert_eq!(particle_count(-300.0), 0);
        assert_eq!(particle_count(f64::NAN), 0);
    }

    #[test]
    fn generated_particles_stay_within_sampling_ranges() {
        let width = 800.0;
        let mut rng = fastrand::Rng::with_seed(7);
        let particles = generate_particles(width, &mut rng);

        assert_eq!(particles.len(), 40);
        for particle in &particles {
            assert!((0.0..width).contains(&particle.x));
            assert!((0.0..PARTICLE_MAX_DELAY_SECS).contains(&particle.delay));
            assert!(
                (PARTICLE_MIN_SIZE_PX..PARTICLE_MIN_SIZE_PX + PARTICLE_SIZE_SPREAD_PX)
                    .contains(&particle.size)
            );
        }
    }

    #[test]
    fn regeneration_at_the_same_width_keeps_the_count() {
        let mut rng = fastrand::Rng::with_seed(42);
        let first = generate_particles(1024.0, &mut rng);
        let second = generate_particles(1024.0, &mut rng);

        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn scrolled_flag_flips_strictly_past_the_threshold() {
        assert!(!scrolled_past_threshold(49.0));
        assert!(!scrolled_past_threshold(50.0));
        assert!(scrolled_past_threshold(51.0));
    }

    #[test]
    fn scroll_message_updates_the_flag_in_both_directions() {
        let state = ViewState::default().apply(ViewMsg::ScrollChanged(120.0));
        assert!(state.scrolled);

        let state = state.apply(ViewMsg::ScrollChanged(0.0));
        assert!(!state.scrolled);
    }

    #[test]
    fn toggling_the_menu_twice_restores_it() {
        let initial = ViewState::default();
        let toggled = initial.apply(ViewMsg::MenuToggled);
        assert!(toggled.menu_open);

        let restored = toggled.apply(ViewMsg::MenuToggled);
        assert_eq!(restored.menu_open, initial.menu_open);
    }

    #[test]
    fn navigating_with_the_menu_open_activates_and_closes() {
        let state = ViewState::default().apply(ViewMsg::MenuToggled);
        assert!(state.menu_open);

        let state = state.apply(ViewMsg::NavigateTo(Section::Skills));
        assert_eq!(state.active_section, Some(Section::Skills));
        assert!(!state.menu_open);
    }

    #[test]
    fn last_section_entered_in_a_batch_wins() {
        let state = ViewState::default()
            .apply(ViewMsg::SectionEntered(Section::About))
            .apply(ViewMsg::SectionEntered(Section::Skills));

        assert_eq!(state.active_section, Some(Section::Skills));
    }

    #[test]
    fn replacing_particles_discards_the_previous_set() {
        let mut rng = fastrand::Rng::with_seed(9);
        let state = ViewState::default()
            .apply(ViewMsg::ParticlesReplaced(generate_particles(1200.0, &mut rng)));
        assert_eq!(state.particles.len(), 50);

        let state = state.apply(ViewMsg::ParticlesReplaced(generate_particles(400.0, &mut rng)));
        assert_eq!(state.particles.len(), 20);
    }

    #[test]
    fn section_ids_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_id(section.as_str()), Some(section));
        }
        assert_eq!(Section::from_id("footer"), None);
    }
}
