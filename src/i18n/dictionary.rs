//! Translated string catalogs (serde_json)
//!
//! One JSON object per locale, loaded once at startup. Keys are dotted
//! paths into the object (`signin.title`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::Locale;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("no dictionary loaded for locale '{0}'")]
    Missing(Locale),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: dictionary root must be a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
}

/// Strings for a single locale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    root: Map<String, Value>,
}

impl Dictionary {
    /// Returns `None` when the value is not a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            _ => None,
        }
    }

    /// Look up a dotted key. Only string leaves count as hits.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut node = self.root.get(first)?;
        for part in parts {
            node = node.as_object()?.get(part)?;
        }
        node.as_str()
    }

    /// Like [`get`](Self::get), but a missing key renders as the key itself.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Dictionaries for every locale that has one
#[derive(Debug, Clone, Default)]
pub struct Dictionaries {
    by_locale: HashMap<Locale, Dictionary>,
}

impl Dictionaries {
    /// Load `<dir>/<code>.json` for each supported locale.
    ///
    /// A locale without a file is skipped here and reported as
    /// [`DictionaryError::Missing`] when a request actually resolves to it.
    pub fn load_dir(dir: &Path) -> Result<Self, DictionaryError> {
        let mut dictionaries = Self::default();

        for locale in Locale::ALL {
            let path = dir.join(format!("{}.json", locale.as_str()));
            if !path.is_file() {
                warn!(locale = %locale, path = %path.display(), "dictionary file not found");
                continue;
            }
            let dictionary = load_file(&path)?;
            debug!(locale = %locale, path = %path.display(), "loaded dictionary");
            dictionaries.insert(locale, dictionary);
        }

        Ok(dictionaries)
    }

    pub fn insert(&mut self, locale: Locale, dictionary: Dictionary) {
        self.by_locale.insert(locale, dictionary);
    }

    pub fn get(&self, locale: Locale) -> Result<&Dictionary, DictionaryError> {
        self.by_locale
            .get(&locale)
            .ok_or(DictionaryError::Missing(locale))
    }

    pub fn contains(&self, locale: Locale) -> bool {
        self.by_locale.contains_key(&locale)
    }
}

fn load_file(path: &Path) -> Result<Dictionary, DictionaryError> {
    let content = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Parse dictionary JSON; `origin` only labels errors.
pub fn parse(content: &str, origin: &Path) -> Result<Dictionary, DictionaryError> {
    let value: Value = serde_json::from_str(content).map_err(|source| DictionaryError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    Dictionary::from_value(value).ok_or_else(|| DictionaryError::NotAnObject {
        path: origin.to_path_buf(),
    })
}
