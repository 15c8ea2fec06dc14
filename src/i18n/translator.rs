//! Language-bound translation lookups.

use crate::i18n::{resolve, Catalog, CatalogSet, Language, LookupMetrics};
use tracing::debug;

/// A catalog bound to the language it was selected for.
///
/// `t` never fails: a missing key renders as the key itself.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    language: Language,
    catalog: &'a Catalog,
    metrics: &'a LookupMetrics,
}

impl<'a> Translator<'a> {
    pub fn new(language: Language, catalog: &'a Catalog) -> Self {
        Self {
            language,
            catalog,
            metrics: LookupMetrics::global(),
        }
    }

    /// Select the catalog for a requested language code.
    ///
    /// Unsupported codes silently use the canonical language.
    pub fn for_code(catalogs: &'a CatalogSet, code: &str) -> Self {
        let language = Language::resolve_or_default(code);
        Self::new(language, catalogs.get(language))
    }

    /// Record lookups into `metrics` instead of the process-wide counters.
    pub fn with_metrics(mut self, metrics: &'a LookupMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn t(&self, key: &str) -> String {
        self.lookup(key, None)
    }

    pub fn t_or(&self, key: &str, default: &str) -> String {
        self.lookup(key, Some(default))
    }

    fn lookup(&self, key: &str, default: Option<&str>) -> String {
        match (self.catalog.lookup(key), default) {
            (Some(_), _) => self.metrics.record_hit(),
            (None, Some(_)) => self.metrics.record_default_fallback(),
            (None, None) => {
                self.metrics.record_key_echo();
                debug!("Missing translation '{}' for '{}'", key, self.language);
            }
        }
        resolve(self.catalog, key, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_resolves_in_selected_language() {
        let catalogs = CatalogSet::embedded().unwrap();
        let metrics = LookupMetrics::new();
        let translator = Translator::for_code(&catalogs, "es").with_metrics(&metrics);

        assert_eq!(translator.language(), Language::SPANISH);
        assert_eq!(translator.t("contact.form.submit"), "Enviar mensaje");
        assert_eq!(metrics.hits(), 1);
    }

    #[test]
    fn test_unsupported_language_uses_default() {
        let catalogs = CatalogSet::embedded().unwrap();
        let translator = Translator::for_code(&catalogs, "fr");

        assert_eq!(translator.language(), Language::ENGLISH);
        assert_eq!(translator.t("contact.form.name.label"), "Full Name");
    }

    #[test]
    fn test_missing_key_echoes_and_counts() {
        let catalogs = CatalogSet::embedded().unwrap();
        let metrics = LookupMetrics::new();
        let translator = Translator::for_code(&catalogs, "en").with_metrics(&metrics);

        assert_eq!(translator.t("hero.missing"), "hero.missing");
        assert_eq!(translator.t_or("hero.missing", "Welcome"), "Welcome");
        assert_eq!(metrics.key_echoes(), 1);
        assert_eq!(metrics.default_fallbacks(), 1);
        assert_eq!(metrics.hits(), 0);
    }

    #[test]
    fn test_report_reflects_lookups() {
        let catalogs = CatalogSet::embedded().unwrap();
        let metrics = LookupMetrics::new();
        let translator = Translator::for_code(&catalogs, "en").with_metrics(&metrics);

        translator.t("hero.cta");
        translator.t("hero.cta");
        translator.t_or("hero.missing", "Welcome");
        translator.t("hero.missing");

        let report = metrics.report();
        assert_eq!(report.hits, 2);
        assert_eq!(report.default_fallbacks, 1);
        assert_eq!(report.key_echoes, 1);
        assert_eq!(report.hit_rate, 50.0);
    }

    #[test]
    fn test_default_translator_records_globally() {
        let catalogs = CatalogSet::embedded().unwrap();
        let translator = Translator::for_code(&catalogs, "en");
        let before = LookupMetrics::global().report();

        translator.t("hero.cta");
        translator.t("hero.missing");

        // Other tests share the global counters, so only lower bounds hold
        let after = LookupMetrics::global().report();
        assert!(after.hits >= before.hits + 1);
        assert!(after.key_echoes >= before.key_echoes + 1);
    }

    #[test]
    fn test_t_or_prefers_catalog_value() {
        let catalogs = CatalogSet::embedded().unwrap();
        let translator = Translator::for_code(&catalogs, "en");

        assert_eq!(translator.t_or("hero.cta", "ignored"), "Start a project");
    }
}
