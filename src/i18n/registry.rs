//! Language registry: the fixed set of languages the site ships catalogs for.
//!
//! Initialised once on first access through `OnceLock` and immutable
//! thereafter.

use std::sync::OnceLock;

/// Metadata for one supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "es")
    pub code: &'static str,

    /// English name of the language
    pub name: &'static str,

    /// Native name of the language (shown in the language switcher)
    pub native_name: &'static str,

    /// Whether this is the canonical language other catalogs are checked against
    pub is_canonical: bool,

    /// Whether this language can be selected
    pub enabled: bool,
}

pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// Codes are matched case-insensitively, and a region suffix such as
    /// `en-GB` or `es_MX` matches its base language.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        let base = code
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or(code)
            .trim()
            .to_ascii_lowercase();
        self.languages.iter().find(|lang| lang.code == base)
    }

    /// Get all enabled languages.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one canonical language.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_canonical: false,
            enabled: true,
        },
    ]
}
