//! Static edition tables: country catalog, locale mapping and strict sets.
//!
//! Shipped as `data/editions.toml` and embedded at compile time. Loaded once
//! at startup and handed to the resolver, policy and builder; tests can load
//! their own TOML through [`EditionTables::from_toml_str`].

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

use crate::catalog::{Catalog, CountryEntry, CountryGroup};
use crate::edition::{EditionPolicy, LocaleTable, NewsUrlBuilder, StrictSets};

const EMBEDDED_TABLES: &str = include_str!("../data/editions.toml");

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("invalid edition tables: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate country code in edition tables: {0}")]
    DuplicateCode(String),
    #[error("country code must not be empty (region {0})")]
    EmptyCode(String),
}

#[derive(Debug, Deserialize)]
struct RawTables {
    #[serde(default)]
    strict: StrictSets,
    #[serde(default)]
    regions: Vec<RawRegion>,
}

#[derive(Debug, Deserialize)]
struct RawRegion {
    name: String,
    #[serde(default)]
    countries: Vec<RawCountry>,
}

#[derive(Debug, Deserialize)]
struct RawCountry {
    code: String,
    name: String,
    lang: Option<String>,
}

/// All static data the edition logic depends on.
#[derive(Debug, Clone)]
pub struct EditionTables {
    pub catalog: Catalog,
    pub locales: LocaleTable,
    pub strict: StrictSets,
}

impl EditionTables {
    /// Tables compiled into the binary.
    pub fn embedded() -> Result<Self, TableError> {
        Self::from_toml_str(EMBEDDED_TABLES)
    }

    /// Parse and validate tables. Codes must be non-empty and unique across
    /// the whole catalog; countries without `lang` fall back to the default
    /// language at resolve time.
    pub fn from_toml_str(data: &str) -> Result<Self, TableError> {
        let raw: RawTables = toml::from_str(data)?;

        let mut seen = HashSet::new();
        let mut tags = BTreeMap::new();
        let mut groups = Vec::with_capacity(raw.regions.len());

        for region in raw.regions {
            let mut countries = Vec::with_capacity(region.countries.len());
            for country in region.countries {
                let code = country.code.trim().to_string();
                if code.is_empty() {
                    return Err(TableError::EmptyCode(region.name));
                }
                if !seen.insert(code.clone()) {
                    return Err(TableError::DuplicateCode(code));
                }
                if let Some(lang) = country.lang.filter(|l| !l.trim().is_empty()) {
                    tags.insert(code.clone(), lang.trim().to_string());
                }
                countries.push(CountryEntry {
                    code,
                    name: country.name,
                    region: region.name.clone(),
                });
            }
            groups.push(CountryGroup {
                region: region.name,
                countries,
            });
        }

        Ok(Self {
            catalog: Catalog::new(groups),
            locales: LocaleTable::new(tags),
            strict: raw.strict.normalized(),
        })
    }

    /// Builder using these tables; `strict_local` is the global switch.
    pub fn url_builder(&self, strict_local: bool) -> NewsUrlBuilder<'_> {
        NewsUrlBuilder::new(
            &self.locales,
            EditionPolicy::new(self.strict.clone(), strict_local),
        )
    }
}
