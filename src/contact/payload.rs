use crate::config::Config;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Fields the visitor fills in on the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormPayload {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
}

/// Where a submission comes from.
///
/// Both fields are only known when running on behalf of a browser; a
/// present-but-empty referrer means a direct visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientEnvironment {
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl ClientEnvironment {
    pub fn from_config(config: &Config) -> Self {
        Self {
            user_agent: config.client_user_agent.clone(),
            referrer: config.client_referrer.clone(),
        }
    }
}

/// Metadata captured at the moment of submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionMetadata {
    /// ISO-8601 UTC timestamp with millisecond precision
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

impl SubmissionMetadata {
    pub fn capture(environment: &ClientEnvironment) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent: environment.user_agent.clone(),
            referrer: environment.referrer.clone(),
        }
    }
}

/// The JSON body sent to the webhook: form fields plus metadata, flattened.
#[derive(Debug, Serialize)]
pub struct EnrichedPayload<'a> {
    #[serde(flatten)]
    pub form: &'a ContactFormPayload,
    #[serde(flatten)]
    pub metadata: SubmissionMetadata,
}

/// Body returned by the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

/// Outcome of a submission that the webhook (or the fallback) accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub ok: bool,
    pub status: u16,
    pub body: Option<ResponseBody>,
}
