//! Contact form state and its submission flow.

use crate::analytics::DataLayer;
use crate::contact::{ContactClient, ContactFormPayload};
use crate::i18n::Translator;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{error, info};

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// Localized message to show next to the form
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error("email address is not valid: {0}")]
    InvalidEmail(String),

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("unknown form field: {0}")]
    UnknownField(String),
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update a field by its input name.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), FormError> {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "company" => &mut self.company,
            "message" => &mut self.message,
            other => return Err(FormError::UnknownField(other.to_string())),
        };
        *slot = value.into();
        Ok(())
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// The submit control is disabled while a submission is in flight.
    pub fn is_submit_disabled(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Clear a stuck `Submitting` state left by an abandoned submission.
    pub fn reset_status(&mut self) {
        self.status = FormStatus::Idle;
    }

    /// Check the fields and build the payload.
    ///
    /// Name, email and message are required; company is optional and an
    /// empty company is omitted.
    pub fn validate(&self) -> Result<ContactFormPayload, FormError> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        let message = required("message", &self.message)?;

        let regex = EMAIL_REGEX
            .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
        if !regex.is_match(email) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }

        let company = self.company.trim();
        Ok(ContactFormPayload {
            name: name.to_string(),
            email: email.to_string(),
            company: (!company.is_empty()).then(|| company.to_string()),
            message: message.to_string(),
        })
    }

    /// Validate and submit the form.
    ///
    /// Validation problems are returned as errors and leave the form
    /// untouched. Delivery outcomes end up in `status()`: on success the
    /// fields are cleared and a `contact_submission` event is tracked.
    pub async fn submit(
        &mut self,
        client: &ContactClient,
        translator: &Translator<'_>,
        analytics: &mut DataLayer,
    ) -> Result<(), FormError> {
        if self.is_submit_disabled() {
            return Err(FormError::AlreadySubmitting);
        }
        let payload = self.validate()?;

        self.status = FormStatus::Submitting;
        match client.submit(&payload).await {
            Ok(result) => {
                info!("Contact form submitted ({})", result.status);
                analytics.track_contact_submission("contact_form");
                self.name.clear();
                self.email.clear();
                self.company.clear();
                self.message.clear();
                self.status = FormStatus::Succeeded;
            }
            Err(e) => {
                error!("Webhook submission failed: {}", e);
                self.status = FormStatus::Failed(translator.t("contact.form.error"));
            }
        }
        Ok(())
    }

    /// The localized message for the current status, if any.
    pub fn status_message(&self, translator: &Translator<'_>) -> Option<String> {
        match &self.status {
            FormStatus::Succeeded => Some(translator.t("contact.form.success")),
            FormStatus::Failed(message) => Some(message.clone()),
            FormStatus::Idle | FormStatus::Submitting => None,
        }
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(value)
    }
}
