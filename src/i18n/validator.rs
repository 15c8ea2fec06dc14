//! Catalog validation.
//!
//! Compares a translated catalog with the canonical one: every canonical key
//! must be translated, and values that carry addresses (emails, URLs,
//! `{placeholders}`) must keep them intact.

use crate::i18n::{Catalog, CatalogSet, Language, LanguageRegistry};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Problems that make the catalog incomplete
    pub errors: Vec<String>,

    /// Suspicious entries that still render
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

pub struct CatalogValidator;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Validate `translated` against `canonical`.
    ///
    /// - keys missing from the translation are errors
    /// - keys unknown to the canonical catalog are warnings
    /// - blank values are warnings
    /// - emails, URLs and `{placeholders}` that differ are warnings
    pub fn compare(canonical: &Catalog, translated: &Catalog) -> ValidationReport {
        let mut report = ValidationReport::new();

        let canonical_entries: BTreeMap<String, &str> = canonical.entries().into_iter().collect();
        let translated_entries: BTreeMap<String, &str> =
            translated.entries().into_iter().collect();

        for (key, original) in &canonical_entries {
            match translated_entries.get(key) {
                None => report.errors.push(format!("Missing key: {}", key)),
                Some(value) => Self::check_value(key, original, value, &mut report),
            }
        }

        for key in translated_entries.keys() {
            if !canonical_entries.contains_key(key) {
                report
                    .warnings
                    .push(format!("Key not in canonical catalog: {}", key));
            }
        }

        report
    }

    /// Validate a catalog on its own (used for the canonical catalog).
    pub fn check(catalog: &Catalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        for (key, value) in catalog.entries() {
            if value.trim().is_empty() {
                report.warnings.push(format!("Blank value: {}", key));
            }
        }
        report
    }

    /// Validate every enabled language in `set`, canonical first.
    ///
    /// A non-canonical language without a catalog of its own is an error:
    /// it would silently render the canonical text.
    pub fn check_set(set: &CatalogSet) -> Vec<(Language, ValidationReport)> {
        let canonical = set.canonical();
        let mut languages: Vec<Language> = LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .filter_map(|config| Language::from_code(config.code).ok())
            .collect();
        languages.sort_by_key(|language| (!language.is_canonical(), language.code()));

        languages
            .into_iter()
            .map(|language| {
                let report = if language.is_canonical() {
                    Self::check(canonical)
                } else if set.has_own_catalog(language) {
                    Self::compare(canonical, set.get(language))
                } else {
                    ValidationReport {
                        errors: vec![format!("No catalog for '{}'", language.code())],
                        warnings: Vec::new(),
                    }
                };
                (language, report)
            })
            .collect()
    }

    fn check_value(key: &str, original: &str, translated: &str, report: &mut ValidationReport) {
        if translated.trim().is_empty() {
            report.warnings.push(format!("Blank value: {}", key));
            return;
        }

        let emails = (Self::extract_emails(original), Self::extract_emails(translated));
        if emails.0 != emails.1 {
            report.warnings.push(format!(
                "Email mismatch at {}: canonical has {:?}, translation has {:?}",
                key, emails.0, emails.1
            ));
        }

        let urls = (Self::extract_urls(original), Self::extract_urls(translated));
        if urls.0 != urls.1 {
            report.warnings.push(format!(
                "URL mismatch at {}: canonical has {} URLs, translation has {} URLs",
                key,
                urls.0.len(),
                urls.1.len()
            ));
        }

        let mut placeholders = (
            Self::extract_placeholders(original),
            Self::extract_placeholders(translated),
        );
        // Word order may change between languages
        placeholders.0.sort();
        placeholders.1.sort();
        if placeholders.0 != placeholders.1 {
            report.warnings.push(format!(
                "Placeholder mismatch at {}: canonical has {:?}, translation has {:?}",
                key, placeholders.0, placeholders.1
            ));
        }
    }

    fn extract_emails(text: &str) -> Vec<String> {
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap()
        });

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex =
            PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{[A-Za-z_][A-Za-z0-9_]*\}").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
