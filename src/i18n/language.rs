//! Validated language handle.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use tracing::debug;

/// A language that exists in the registry and is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const SPANISH: Language = Language { code: "es" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Pick the language for a request, never failing.
    ///
    /// Unsupported or disabled codes resolve to the canonical language.
    pub fn resolve_or_default(code: &str) -> Language {
        match Language::from_code(code) {
            Ok(language) => language,
            Err(e) => {
                let fallback = Language::canonical();
                debug!("{}; using '{}' instead", e, fallback.code());
                fallback
            }
        }
    }

    /// The canonical language all other catalogs are compared against.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for values built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}
