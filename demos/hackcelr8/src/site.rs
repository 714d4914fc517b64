use pitlane_engine::{PageConfig, Site};

const SECTIONS: [&str; 6] = [
    ".hero",
    ".about",
    ".tracks",
    ".sponsors",
    ".judges",
    ".register-contact",
];

const REVEALED: [&str; 4] = [
    ".track-card",
    ".feature",
    ".sponsor-placeholder",
    ".judge-placeholder",
];

pub struct Hackcelr8;

impl Hackcelr8 {
    pub fn new() -> Self {
        Self
    }
}

impl Site for Hackcelr8 {
    fn config(&self) -> PageConfig {
        let mut config = PageConfig::default();
        config.parallax.sections = SECTIONS.iter().map(|s| s.to_string()).collect();
        config.reveal.selectors = REVEALED.iter().map(|s| s.to_string()).collect();
        config.hover.selector = ".track-card".into();
        config.contact.recipient = "studentchapterieee@gmail.com".into();
        config.contact.subject_prefix = "HACKCELR8 Contact Form - Message from ".into();
        config
    }

    fn name(&self) -> &str {
        "hackcelr8"
    }
}
