//! Internationalization (i18n) for the landing page.
//!
//! # Architecture
//!
//! - `registry`: the fixed set of supported languages
//! - `language`: validated `Language` handle with silent fallback to the default
//! - `catalog`: nested string catalogs and the dotted-key `resolve` function
//! - `translator`: a catalog bound to the active language
//! - `validator`: consistency checks between a translation and the canonical catalog
//! - `metrics`: lookup counters (hits, default fallbacks, key echoes)
//!
//! # Example
//!
//! ```rust,ignore
//! use landing_kit::i18n::{CatalogSet, Translator};
//!
//! let catalogs = CatalogSet::embedded()?;
//! let t = Translator::for_code(&catalogs, "es");
//! let label = t.t("contact.form.name.label");
//! ```

mod catalog;
mod language;
mod metrics;
mod registry;
mod translator;
mod validator;

pub use catalog::{resolve, Catalog, CatalogError, CatalogNode, CatalogSet};
pub use language::Language;
pub use metrics::{LookupMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use translator::Translator;
pub use validator::{CatalogValidator, ValidationReport};
