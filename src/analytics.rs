//! Analytics data layer.
//!
//! Events are flat JSON objects, `{"event": name, ...properties}`, appended
//! in the order they happen. Outside production each event is also logged.

use crate::config::Config;
use serde_json::{Map, Value};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct AnalyticsEvent {
    pub name: String,
    pub properties: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Flatten into the pushed object. Properties are applied after the
    /// name, so a property called `event` wins.
    fn to_entry(&self) -> Value {
        let mut entry = Map::new();
        entry.insert("event".to_string(), Value::String(self.name.clone()));
        for (key, value) in &self.properties {
            entry.insert(key.clone(), value.clone());
        }
        Value::Object(entry)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataLayer {
    events: Vec<Value>,
    log_events: bool,
}

impl DataLayer {
    pub fn new(log_events: bool) -> Self {
        Self {
            events: Vec::new(),
            log_events,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(!config.is_production())
    }

    pub fn track(&mut self, event: AnalyticsEvent) {
        let entry = event.to_entry();
        if self.log_events {
            info!("[analytics] {}", entry);
        }
        self.events.push(entry);
    }

    pub fn track_cta_click(&mut self, location: &str, label: &str) {
        self.track(
            AnalyticsEvent::new("cta_click")
                .with("location", location)
                .with("label", label),
        );
    }

    pub fn track_navigation(&mut self, location: &str, target: &str) {
        self.track(
            AnalyticsEvent::new("navigation_click")
                .with("location", location)
                .with("target", target),
        );
    }

    pub fn track_contact_submission(&mut self, method: &str) {
        self.track(AnalyticsEvent::new("contact_submission").with("method", method));
    }

    pub fn track_social_click(&mut self, platform: &str) {
        self.track(AnalyticsEvent::new("social_click").with("platform", platform));
    }

    pub fn events(&self) -> &[Value] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
