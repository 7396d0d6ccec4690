//! Country catalog grouped by world region.

mod filter;

pub use filter::{tokens_from_query, CURRENT_REGION};

use serde::{Deserialize, Serialize};

/// One selectable edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub code: String,
    pub name: String,
    /// Grouping label, e.g. `Asia-Pacific`.
    pub region: String,
}

impl CountryEntry {
    /// Label used in history records: `Canada (Français) (ca_fr)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryGroup {
    pub region: String,
    pub countries: Vec<CountryEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    groups: Vec<CountryGroup>,
}

impl Catalog {
    /// Builds the catalog; each group's entries are sorted by name,
    /// case-insensitively. Group order is kept.
    pub fn new(mut groups: Vec<CountryGroup>) -> Self {
        for group in &mut groups {
            group
                .countries
                .sort_by_cached_key(|entry| entry.name.to_lowercase());
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[CountryGroup] {
        &self.groups
    }

    pub fn entries(&self) -> impl Iterator<Item = &CountryEntry> {
        self.groups.iter().flat_map(|g| g.countries.iter())
    }

    pub fn find(&self, code: &str) -> Option<&CountryEntry> {
        self.entries().find(|entry| entry.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
