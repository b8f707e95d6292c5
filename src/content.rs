//! Static page content: skill ratings, project cards, contact entries.
//!
//! Everything here is fixed at compile time and never mutated. The frontend
//! reads these tables when rendering; nothing else writes to them.

#[derive(PartialEq)]
pub struct Skill {
    pub name: &'static str,
    pub percentage: u8,
}

#[derive(PartialEq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(PartialEq)]
pub struct ContactEntry {
    pub title: &'static str,
    pub value: &'static str,
    pub icon: &'static str,
    pub link: &'static str,
    /// Browsing context for the link, e.g. `_blank` for external profiles.
    pub target: Option<&'static str>,
}

pub const PROGRAMMING_LANGUAGES: &[Skill] = &[
    Skill { name: "Swift", percentage: 95 },
    Skill { name: "Objective-C", percentage: 75 },
    Skill { name: "Java", percentage: 80 },
    Skill { name: "JavaScript", percentage: 85 },
];

pub const FRAMEWORKS: &[Skill] = &[
    Skill { name: "UIKit", percentage: 95 },
    Skill { name: "SwiftUI", percentage: 90 },
    Skill { name: "Combine", percentage: 85 },
    Skill { name: "Core Data", percentage: 80 },
    Skill { name: "Firebase", percentage: 85 },
    Skill { name: "MapKit", percentage: 75 },
];

pub const TOOLS: &[Skill] = &[
    Skill { name: "Xcode", percentage: 95 },
    Skill { name: "Git", percentage: 90 },
    Skill { name: "SourceTree", percentage: 85 },
    Skill { name: "Instruments", percentage: 80 },
    Skill { name: "TestFlight", percentage: 85 },
    Skill { name: "App Store Connect", percentage: 90 },
];

pub const BACKEND_SKILLS: &[&str] = &[
    "Node.js",
    "Express",
    "Fastify",
    "Prisma",
    "MongoDB",
    "PostgreSQL",
    "REST APIs",
    "GraphQL",
];

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Food Network Kitchen",
        description: "A comprehensive iOS app featuring server-side driven UI \
                      architecture and live cooking classes. Built with advanced \
                      Swift patterns and real-time streaming capabilities.",
        image: "/images/food-network-kitchen.svg",
        tags: &[
            "Swift",
            "UIKit",
            "Combine",
            "Server-driven UI",
            "WebRTC",
            "AVFoundation",
        ],
    },
    Project {
        title: "Dekoder News App",
        description: "Modern news application built entirely with SwiftUI, \
                      featuring clean MVVM architecture, offline reading, and \
                      personalized content recommendations.",
        image: "/images/dekoder-news.svg",
        tags: &[
            "SwiftUI",
            "MVVM",
            "Combine",
            "Core Data",
            "REST API",
            "Push Notifications",
        ],
    },
    Project {
        title: "HealthTracker Pro",
        description: "Comprehensive health and fitness tracking app with HealthKit \
                      integration, custom workout plans, and detailed analytics \
                      dashboard.",
        image: "/images/healthtracker-pro.svg",
        tags: &["SwiftUI", "HealthKit", "Charts", "Core ML", "CloudKit", "WatchOS"],
    },
];

pub const CONTACT_INFO: &[ContactEntry] = &[
    ContactEntry {
        title: "Email",
        value: "arjun.mehta.dev@gmail.com",
        icon: "fas fa-envelope",
        link: "mailto:arjun.mehta.dev@gmail.com",
        target: None,
    },
    ContactEntry {
        title: "LinkedIn",
        value: "Arjun Mehta",
        icon: "fab fa-linkedin",
        link: "https://linkedin.com/in/arjun-mehta-ios",
        target: Some("_blank"),
    },
    ContactEntry {
        title: "GitHub",
        value: "arjunmehta-ios",
        icon: "fab fa-github",
        link: "https://github.com/arjunmehta-ios",
        target: Some("_blank"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_percentages_stay_within_scale() {
        for skill in PROGRAMMING_LANGUAGES
            .iter()
            .chain(FRAMEWORKS)
            .chain(TOOLS)
        {
            assert!(
                skill.percentage <= 100,
                "{} exceeds the 0-100 scale",
                skill.name
            );
        }
    }

    #[test]
    fn content_tables_are_populated() {
        assert!(!PROGRAMMING_LANGUAGES.is_empty());
        assert!(!FRAMEWORKS.is_empty());
        assert!(!TOOLS.is_empty());
        assert!(!BACKEND_SKILLS.is_empty());
        assert_eq!(PROJECTS.len(), 3);
        assert!(!CONTACT_INFO.is_empty());
    }

    #[test]
    fn external_contact_links_open_in_new_tab() {
        for entry in CONTACT_INFO {
            if entry.link.starts_with("https://") {
                assert_eq!(entry.target, Some("_blank"), "{}", entry.title);
            } else {
                assert!(entry.link.starts_with("mailto:"), "{}", entry.link);
                assert_eq!(entry.target, None);
            }
        }
    }

    #[test]
    fn every_project_carries_tags_and_an_image() {
        for project in PROJECTS {
            assert!(!project.tags.is_empty(), "{}", project.title);
            assert!(project.image.starts_with("/images/"), "{}", project.image);
        }
    }
}
