use crate::config::Config;
use crate::contact::{
    ClientEnvironment, ContactFormPayload, EnrichedPayload, FallbackDispatcher, ResponseBody,
    SpawnedDispatcher, SubmissionMetadata, SubmissionResult,
};
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The webhook answered with a non-success status
    #[error("webhook submission failed with status {status}")]
    Rejected {
        status: u16,
        body: Option<ResponseBody>,
    },

    /// The request could not complete and no fallback accepted it
    #[error("webhook request could not be completed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SubmissionError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Rejected { status, .. } => Some(*status),
            SubmissionError::Network(e) => e.status().map(|s| s.as_u16()),
            SubmissionError::Encode(_) => None,
        }
    }
}

/// Posts contact-form submissions to the webhook.
#[derive(Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    endpoint: String,
    environment: ClientEnvironment,
    fallback: Option<Arc<dyn FallbackDispatcher>>,
}

impl ContactClient {
    /// Client for `endpoint` with the background fallback dispatcher enabled.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::new();
        Self {
            fallback: Some(Arc::new(SpawnedDispatcher::new(http.clone()))),
            http,
            endpoint: endpoint.into(),
            environment: ClientEnvironment::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.webhook_url.clone())
            .with_environment(ClientEnvironment::from_config(config))
    }

    pub fn with_environment(mut self, environment: ClientEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_fallback(mut self, dispatcher: Arc<dyn FallbackDispatcher>) -> Self {
        self.fallback = Some(dispatcher);
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit the form, enriched with metadata captured now.
    ///
    /// A request that cannot complete is handed to the fallback dispatcher;
    /// if it accepts, the submission counts as `204 No Content`.
    pub async fn submit(
        &self,
        payload: &ContactFormPayload,
    ) -> Result<SubmissionResult, SubmissionError> {
        let enriched = EnrichedPayload {
            form: payload,
            metadata: SubmissionMetadata::capture(&self.environment),
        };
        let body = serde_json::to_vec(&enriched)?;

        debug!("Posting contact submission to {}", self.endpoint);
        let response = match self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .body(body.clone())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return self.dispatch_fallback(body, e),
        };

        let status = response.status();
        let parsed = read_body(response).await;

        if !status.is_success() {
            warn!("Webhook rejected submission ({})", status);
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body: parsed,
            });
        }

        info!("Contact submission accepted ({})", status);
        Ok(SubmissionResult {
            ok: true,
            status: status.as_u16(),
            body: parsed,
        })
    }

    fn dispatch_fallback(
        &self,
        body: Vec<u8>,
        error: reqwest::Error,
    ) -> Result<SubmissionResult, SubmissionError> {
        warn!("Webhook request failed ({}), trying fallback dispatch", error);

        match &self.fallback {
            Some(dispatcher) if dispatcher.dispatch(&self.endpoint, body) => {
                info!("Contact submission handed to fallback dispatch");
                Ok(SubmissionResult {
                    ok: true,
                    status: StatusCode::NO_CONTENT.as_u16(),
                    body: None,
                })
            }
            Some(_) => {
                warn!("Fallback dispatch refused the submission");
                Err(SubmissionError::Network(error))
            }
            None => Err(SubmissionError::Network(error)),
        }
    }
}

/// Read the body as JSON when the content type says so, otherwise as text.
///
/// A body that cannot be read or parsed is logged and dropped.
async fn read_body(response: reqwest::Response) -> Option<ResponseBody> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!("Unable to read webhook response body: {}", e);
            return None;
        }
    };

    if !is_json {
        return Some(ResponseBody::Text(text));
    }

    match serde_json::from_str(&text) {
        Ok(value) => Some(ResponseBody::Json(value)),
        Err(e) => {
            warn!("Unable to parse webhook response body: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Helper Functions ====================

    /// Dispatcher that records what it was given
    struct RecordingDispatcher {
        accept: bool,
        calls: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl RecordingDispatcher {
        fn new(accept: bool) -> Arc<Self> {
            Arc::new(Self {
                accept,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, Vec<u8>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl FallbackDispatcher for RecordingDispatcher {
        fn dispatch(&self, url: &str, body: Vec<u8>) -> bool {
            self.calls.lock().unwrap().push((url.to_string(), body));
            self.accept
        }
    }

    fn payload() -> ContactFormPayload {
        ContactFormPayload {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            company: Some("Acme".to_string()),
            message: "Please call me back".to_string(),
        }
    }

    /// An address nothing listens on
    const UNREACHABLE: &str = "http://127.0.0.1:1/hook";

    // ==================== Primary Transport Tests ====================

    #[tokio::test]
    async fn test_submit_json_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("Content-Type", "application/json"))
            .and(header("Accept", "application/json"))
            .and(header("Cache-Control", "no-store"))
            .and(body_partial_json(json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "company": "Acme",
                "message": "Please call me back",
                "userAgent": "Mozilla/5.0",
                "referrer": "https://nordlys.dev/"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accepted": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ContactClient::new(format!("{}/hook", mock_server.uri()))
            .with_environment(ClientEnvironment {
                user_agent: Some("Mozilla/5.0".to_string()),
                referrer: Some("https://nordlys.dev/".to_string()),
            });

        let result = client.submit(&payload()).await.expect("should succeed");
        assert!(result.ok);
        assert_eq!(result.status, 200);
        assert_eq!(result.body, Some(ResponseBody::Json(json!({"accepted": true}))));
    }

    #[tokio::test]
    async fn test_submit_text_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Accepted"))
            .mount(&mock_server)
            .await;

        let client = ContactClient::new(format!("{}/hook", mock_server.uri()));
        let result = client.submit(&payload()).await.unwrap();

        assert_eq!(result.body, Some(ResponseBody::Text("Accepted".to_string())));
    }

    #[tokio::test]
    async fn test_submit_malformed_json_is_not_fatal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{ not json", "application/json"))
            .mount(&mock_server)
            .await;

        let client = ContactClient::new(format!("{}/hook", mock_server.uri()));
        let result = client.submit(&payload()).await.unwrap();

        assert!(result.ok);
        assert_eq!(result.status, 200);
        assert_eq!(result.body, None);
    }

    #[tokio::test]
    async fn test_submit_server_error_is_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "scenario failed"})),
            )
            .mount(&mock_server)
            .await;

        let dispatcher = RecordingDispatcher::new(true);
        let client = ContactClient::new(format!("{}/hook", mock_server.uri()))
            .with_fallback(dispatcher.clone());

        let err = client.submit(&payload()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        match err {
            SubmissionError::Rejected { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(
                    body,
                    Some(ResponseBody::Json(json!({"error": "scenario failed"})))
                );
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        // A response, even a failing one, never triggers the fallback
        assert!(dispatcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_client_error_carries_text_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(410).set_body_string("There is no scenario"))
            .mount(&mock_server)
            .await;

        let client = ContactClient::new(format!("{}/hook", mock_server.uri()));
        let err = client.submit(&payload()).await.unwrap_err();

        assert!(err.to_string().contains("410"));
        assert!(matches!(
            err,
            SubmissionError::Rejected { status: 410, body: Some(ResponseBody::Text(ref t)) }
                if t == "There is no scenario"
        ));
    }

    // ==================== Fallback Tests ====================

    #[tokio::test]
    async fn test_network_failure_with_accepting_fallback() {
        let dispatcher = RecordingDispatcher::new(true);
        let client = ContactClient::new(UNREACHABLE).with_fallback(dispatcher.clone());

        let result = client.submit(&payload()).await.expect("fallback should succeed");
        assert!(result.ok);
        assert_eq!(result.status, 204);
        assert_eq!(result.body, None);

        let calls = dispatcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, UNREACHABLE);
        let sent: serde_json::Value = serde_json::from_slice(&calls[0].1).unwrap();
        assert_eq!(sent["name"], "Jane Doe");
        assert!(sent["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_network_failure_with_refusing_fallback() {
        let dispatcher = RecordingDispatcher::new(false);
        let client = ContactClient::new(UNREACHABLE).with_fallback(dispatcher.clone());

        let err = client.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Network(_)));
        assert_eq!(dispatcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_without_fallback() {
        let client = ContactClient::new(UNREACHABLE).without_fallback();

        let err = client.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Network(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_from_config_uses_webhook_and_environment() {
        let config = Config {
            environment: "test".to_string(),
            webhook_url: "https://hooks.example.com/contact".to_string(),
            default_language: "en".to_string(),
            locales_dir: None,
            client_user_agent: Some("landing-kit".to_string()),
            client_referrer: None,
        };

        let client = ContactClient::from_config(&config);
        assert_eq!(client.endpoint(), "https://hooks.example.com/contact");
        assert_eq!(client.environment.user_agent.as_deref(), Some("landing-kit"));
        assert!(client.fallback.is_some());
    }
}
