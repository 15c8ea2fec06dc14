//! Translation lookup metrics.
//!
//! Counts how often a lookup found a string, fell back to a caller-supplied
//! default, or echoed the key because nothing was available.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

#[derive(Debug, Default)]
pub struct LookupMetrics {
    hits: AtomicUsize,
    default_fallbacks: AtomicUsize,
    key_echoes: AtomicUsize,
}

static METRICS: OnceLock<LookupMetrics> = OnceLock::new();

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide metrics instance used by translators.
    pub fn global() -> &'static LookupMetrics {
        METRICS.get_or_init(LookupMetrics::new)
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_default_fallback(&self) {
        self.default_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_key_echo(&self) {
        self.key_echoes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn default_fallbacks(&self) -> usize {
        self.default_fallbacks.load(Ordering::Relaxed)
    }

    pub fn key_echoes(&self) -> usize {
        self.key_echoes.load(Ordering::Relaxed)
    }

    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let default_fallbacks = self.default_fallbacks();
        let key_echoes = self.key_echoes();
        let total = hits + default_fallbacks + key_echoes;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            hits,
            default_fallbacks,
            key_echoes,
            hit_rate,
        }
    }
}

/// Snapshot of the lookup counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub hits: usize,
    pub default_fallbacks: usize,
    pub key_echoes: usize,

    /// Share of lookups answered by the catalog, as a percentage (0-100)
    pub hit_rate: f64,
}
