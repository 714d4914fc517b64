use crate::api::config::ContactConfig;
use crate::api::error::{ContactField, PageError};
use crate::api::types::ElementId;
use crate::host::traits::Host;

/// A validated contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Trim all three fields and reject any that end up empty.
    pub fn validate(name: &str, email: &str, message: &str) -> Result<Self, PageError> {
        let name = required(name, ContactField::Name)?;
        let email = required(email, ContactField::Email)?;
        let message = required(message, ContactField::Message)?;
        Ok(Self { name, email, message })
    }

    pub fn subject(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.name)
    }

    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }

    /// `mailto:` URI with percent-encoded subject and body.
    pub fn mailto_uri(&self, recipient: &str, subject_prefix: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            urlencoding::encode(&self.subject(subject_prefix)),
            urlencoding::encode(&self.body()),
        )
    }
}

fn required(value: &str, field: ContactField) -> Result<String, PageError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PageError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Client-side contact form that hands off to the user's mail client.
/// Nothing is ever sent over the network.
pub struct ContactForm {
    form: ElementId,
    config: ContactConfig,
}

impl ContactForm {
    /// Build the handler when the form exists and a recipient is configured.
    pub fn find<H: Host>(host: &mut H, config: &ContactConfig) -> Option<Self> {
        if config.recipient.is_empty() {
            log::warn!("contact: no recipient configured, form handler disabled");
            return None;
        }
        let form = host.query(&config.form)?;
        Some(Self { form, config: config.clone() })
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    /// Read the fields and build a message.
    pub fn read<H: Host>(&self, host: &mut H) -> Result<ContactMessage, PageError> {
        let mut field = |selector: &str| host.field_value(self.form, selector).unwrap_or_default();
        let name = field(&self.config.name_field);
        let email = field(&self.config.email_field);
        let message = field(&self.config.message_field);
        ContactMessage::validate(&name, &email, &message)
    }

    /// Handle a submit. Returns the handoff URI on success.
    pub fn submit<H: Host>(&self, host: &mut H) -> Option<String> {
        let message = match self.read(host) {
            Ok(message) => message,
            Err(err) => {
                log::info!("contact: {err}");
                host.notify(&self.config.missing_fields_notice);
                return None;
            }
        };

        let uri = message.mailto_uri(&self.config.recipient, &self.config.subject_prefix);
        host.navigate(&uri);
        host.notify(&self.config.handoff_notice);
        host.reset_form(self.form);
        Some(uri)
    }
}
