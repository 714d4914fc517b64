use std::fmt;
use thiserror::Error;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum PageError {
    /// Config JSON could not be parsed.
    #[error("failed to parse page config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A config value is outside the range the controllers rely on.
    #[error("invalid page config: {0}")]
    InvalidConfig(String),

    /// A required contact form field was empty after trimming.
    #[error("required field `{0}` is empty")]
    MissingField(ContactField),
}

/// The three required contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        };
        f.write_str(name)
    }
}
