//! Best-effort delivery used when the webhook request cannot complete.

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

/// Fire-and-forget transport.
///
/// `dispatch` hands the body off and returns immediately; `true` means the
/// transport accepted it for delivery, not that it was delivered.
pub trait FallbackDispatcher: Send + Sync {
    fn dispatch(&self, url: &str, body: Vec<u8>) -> bool;
}

/// Sends the request from a detached tokio task, so delivery continues after
/// the caller has moved on. Refuses when no runtime is running.
#[derive(Debug, Clone, Default)]
pub struct SpawnedDispatcher {
    http: reqwest::Client,
}

impl SpawnedDispatcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl FallbackDispatcher for SpawnedDispatcher {
    fn dispatch(&self, url: &str, body: Vec<u8>) -> bool {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No async runtime available for fallback dispatch");
            return false;
        };

        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        handle.spawn(async move {
            match request.send().await {
                Ok(response) => debug!("Fallback dispatch delivered ({})", response.status()),
                Err(e) => warn!("Fallback dispatch failed: {}", e),
            }
        });

        true
    }
}
