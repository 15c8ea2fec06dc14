//! Translation catalogs and the dotted-key resolver.
//!
//! A catalog is an immutable tree of string leaves. Keys address leaves with
//! dot-separated segments (`"contact.form.name.label"`); list entries are
//! addressed by their decimal position (`"services.items.0.title"`).

use crate::i18n::Language;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Catalogs compiled into the binary, keyed by language code.
const EMBEDDED_CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("es", include_str!("../../locales/es.json")),
];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog root must be a JSON object")]
    NotAnObject,

    #[error("unsupported {kind} value at '{path}': catalog leaves must be strings")]
    InvalidLeaf { path: String, kind: &'static str },

    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no catalog found for the canonical language '{0}'")]
    MissingCanonical(&'static str),
}

/// One node of a catalog tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    Text(String),
    Table(BTreeMap<String, CatalogNode>),
    List(Vec<CatalogNode>),
}

impl CatalogNode {
    fn from_value(value: Value, path: &str) -> Result<Self, CatalogError> {
        match value {
            Value::String(text) => Ok(CatalogNode::Text(text)),
            Value::Object(map) => {
                let mut children = BTreeMap::new();
                for (key, child) in map {
                    let child_path = join_path(path, &key);
                    children.insert(key, CatalogNode::from_value(child, &child_path)?);
                }
                Ok(CatalogNode::Table(children))
            }
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    CatalogNode::from_value(item, &join_path(path, &index.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(CatalogNode::List),
            Value::Null => Err(invalid_leaf(path, "null")),
            Value::Bool(_) => Err(invalid_leaf(path, "boolean")),
            Value::Number(_) => Err(invalid_leaf(path, "number")),
        }
    }

    fn child(&self, segment: &str) -> Option<&CatalogNode> {
        match self {
            CatalogNode::Table(children) => children.get(segment),
            CatalogNode::List(items) => items.get(parse_index(segment)?),
            CatalogNode::Text(_) => None,
        }
    }

    fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        match self {
            CatalogNode::Text(text) => out.push((prefix.to_string(), text.as_str())),
            CatalogNode::Table(children) => {
                for (key, child) in children {
                    child.collect_leaves(&join_path(prefix, key), out);
                }
            }
            CatalogNode::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    item.collect_leaves(&join_path(prefix, &index.to_string()), out);
                }
            }
        }
    }
}

/// All translations for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    root: BTreeMap<String, CatalogNode>,
}

impl Catalog {
    /// Parse a catalog from its JSON source.
    ///
    /// The root must be an object and every leaf must be a string.
    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        match CatalogNode::from_value(value, "")? {
            CatalogNode::Table(root) => Ok(Self { root }),
            _ => Err(CatalogError::NotAnObject),
        }
    }

    /// Walk `key` through the tree, returning the string leaf it names.
    ///
    /// Returns `None` when a segment is missing or the path ends on a
    /// table or list.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = node.child(segment)?;
        }

        match node {
            CatalogNode::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Every string leaf with its dotted key, in key order.
    pub fn entries(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        for (key, node) in &self.root {
            node.collect_leaves(key, &mut out);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Resolve a dotted key against a catalog.
///
/// Returns the stored string, else `fallback`, else the key itself so a
/// missing translation stays visible on the page.
pub fn resolve(catalog: &Catalog, key: &str, fallback: Option<&str>) -> String {
    catalog.lookup(key).or(fallback).unwrap_or(key).to_string()
}

/// The catalogs of every supported language.
///
/// The canonical catalog is mandatory; any other language without a catalog
/// is served from the canonical one.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    canonical: Catalog,
    translations: HashMap<&'static str, Catalog>,
}

impl CatalogSet {
    /// Build the set from the catalogs compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_sources(|code| {
            Ok(EMBEDDED_CATALOGS
                .iter()
                .find(|(embedded_code, _)| *embedded_code == code)
                .map(|(_, source)| source.to_string()))
        })
    }

    /// Load `<code>.json` for every enabled language from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        Self::from_sources(|code| {
            let path = dir.join(format!("{}.json", code));
            match std::fs::read_to_string(&path) {
                Ok(source) => Ok(Some(source)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(source) => Err(CatalogError::Io { path, source }),
            }
        })
    }

    /// Load from `dir` when given, otherwise use the embedded catalogs.
    pub fn load(dir: Option<&str>) -> Result<Self, CatalogError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    fn from_sources<F>(mut load: F) -> Result<Self, CatalogError>
    where
        F: FnMut(&'static str) -> Result<Option<String>, CatalogError>,
    {
        let canonical_code = Language::canonical().code();
        let canonical = match load(canonical_code)? {
            Some(source) => Catalog::from_json_str(&source)?,
            None => return Err(CatalogError::MissingCanonical(canonical_code)),
        };

        let mut translations = HashMap::new();
        for config in crate::i18n::LanguageRegistry::get().list_enabled() {
            if config.is_canonical {
                continue;
            }
            match load(config.code)? {
                Some(source) => {
                    translations.insert(config.code, Catalog::from_json_str(&source)?);
                }
                None => debug!(
                    "No catalog for '{}', serving '{}' instead",
                    config.code, canonical_code
                ),
            }
        }

        info!("Loaded {} translation catalog(s)", translations.len() + 1);
        Ok(Self {
            canonical,
            translations,
        })
    }

    /// The catalog for `language`, or the canonical one if it has none.
    pub fn get(&self, language: Language) -> &Catalog {
        if language.is_canonical() {
            return &self.canonical;
        }
        self.translations
            .get(language.code())
            .unwrap_or(&self.canonical)
    }

    pub fn canonical(&self) -> &Catalog {
        &self.canonical
    }

    /// Whether `language` is served from a catalog of its own rather than
    /// borrowing the canonical one.
    pub fn has_own_catalog(&self, language: Language) -> bool {
        language.is_canonical() || self.translations.contains_key(language.code())
    }

    /// Languages that have their own catalog, canonical first.
    pub fn languages(&self) -> Vec<Language> {
        let mut languages = vec![Language::canonical()];
        let mut others: Vec<Language> = self
            .translations
            .keys()
            .filter_map(|code| Language::from_code(code).ok())
            .collect();
        others.sort_by_key(|language| language.code());
        languages.extend(others);
        languages
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

fn invalid_leaf(path: &str, kind: &'static str) -> CatalogError {
    CatalogError::InvalidLeaf {
        path: path.to_string(),
        kind,
    }
}

/// Parse a list position; only plain decimal indexes without leading zeros.
fn parse_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}
