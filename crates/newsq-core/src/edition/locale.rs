//! Country key to language tag resolution.

use std::collections::BTreeMap;

use super::CountryKey;

/// Language tag used when a key has no entry in the table.
pub const DEFAULT_LANGUAGE_TAG: &str = "en";

/// Resolved locale for one country key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Upper-case two-letter region (`CA` for `ca_fr`).
    pub region2: String,
    /// Full language tag from the table (`fr-CA`), or `en`.
    pub language_tag: String,
    /// Primary subtag of `language_tag` (`fr`).
    pub base_language: String,
}

/// Static code to language-tag mapping.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    tags: BTreeMap<String, String>,
}

impl LocaleTable {
    pub fn new(tags: BTreeMap<String, String>) -> Self {
        Self { tags }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.tags.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Never fails: unknown keys resolve to the English default.
    pub fn resolve(&self, key: &CountryKey) -> Locale {
        let language_tag = self
            .get(key.as_str())
            .filter(|tag| !tag.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE_TAG)
            .to_string();
        let base_language = base_language(&language_tag).to_string();
        Locale {
            region2: key.region2(),
            language_tag,
            base_language,
        }
    }
}

impl FromIterator<(String, String)> for LocaleTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Primary language subtag (`fr` from `fr-CA`).
pub fn base_language(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}
