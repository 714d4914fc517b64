use super::config::PageConfig;

/// The contract a concrete site fulfills.
///
/// A site only supplies configuration; all behavior lives in the engine.
pub trait Site {
    /// Return page configuration. Called once before the page is built.
    fn config(&self) -> PageConfig {
        PageConfig::default()
    }

    /// Name used in log messages.
    fn name(&self) -> &str {
        "site"
    }
}
