//! Strict-local edition policy.
//!
//! Region codes alone are ambiguous for multilingual countries (Canada,
//! Belgium, Switzerland), so each language family is checked against both the
//! region and the resolved base language. French additionally honours the
//! key's own `_fr` variant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::CountryKey;

/// Language families that have a strict-eligible region set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFamily {
    English,
    French,
    Spanish,
    Arabic,
    Chinese,
}

impl LanguageFamily {
    pub const ALL: [LanguageFamily; 5] = [
        LanguageFamily::English,
        LanguageFamily::French,
        LanguageFamily::Spanish,
        LanguageFamily::Arabic,
        LanguageFamily::Chinese,
    ];

    /// Base language code of the family.
    pub fn code(self) -> &'static str {
        match self {
            LanguageFamily::English => "en",
            LanguageFamily::French => "fr",
            LanguageFamily::Spanish => "es",
            LanguageFamily::Arabic => "ar",
            LanguageFamily::Chinese => "zh",
        }
    }
}

/// Per-family sets of lower-case region codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrictSets {
    #[serde(default)]
    pub en: BTreeSet<String>,
    #[serde(default)]
    pub fr: BTreeSet<String>,
    #[serde(default)]
    pub es: BTreeSet<String>,
    #[serde(default)]
    pub ar: BTreeSet<String>,
    #[serde(default)]
    pub zh: BTreeSet<String>,
}

impl StrictSets {
    pub fn get(&self, family: LanguageFamily) -> &BTreeSet<String> {
        match family {
            LanguageFamily::English => &self.en,
            LanguageFamily::French => &self.fr,
            LanguageFamily::Spanish => &self.es,
            LanguageFamily::Arabic => &self.ar,
            LanguageFamily::Chinese => &self.zh,
        }
    }

    /// Lower-cases every code so lookups can use `region2.to_lowercase()`.
    pub fn normalized(self) -> Self {
        fn lower(set: BTreeSet<String>) -> BTreeSet<String> {
            set.into_iter()
                .map(|c| c.trim().to_ascii_lowercase())
                .filter(|c| !c.is_empty())
                .collect()
        }
        Self {
            en: lower(self.en),
            fr: lower(self.fr),
            es: lower(self.es),
            ar: lower(self.ar),
            zh: lower(self.zh),
        }
    }

    fn contains(&self, family: LanguageFamily, region: &str) -> bool {
        self.get(family).contains(region)
    }
}

/// Decides between the strict surface and the default news surface.
#[derive(Debug, Clone)]
pub struct EditionPolicy {
    sets: StrictSets,
    enabled: bool,
}

impl EditionPolicy {
    pub fn new(sets: StrictSets, enabled: bool) -> Self {
        Self { sets, enabled }
    }

    /// True when the edition should use the strict surface.
    pub fn classify(&self, key: &CountryKey, region2: &str, base_language: &str) -> bool {
        self.enabled && self.strict_family(key, region2, base_language).is_some()
    }

    /// First language family whose strict rule matches, ignoring the global
    /// switch.
    pub fn strict_family(
        &self,
        key: &CountryKey,
        region2: &str,
        base_language: &str,
    ) -> Option<LanguageFamily> {
        let region = region2.to_lowercase();
        LanguageFamily::ALL
            .into_iter()
            .find(|&family| self.family_matches(family, key, &region, base_language))
    }

    fn family_matches(
        &self,
        family: LanguageFamily,
        key: &CountryKey,
        region: &str,
        base_language: &str,
    ) -> bool {
        let in_set = self.sets.contains(family, region);
        match family {
            LanguageFamily::English => in_set && !key.is_french_canadian(),
            LanguageFamily::French => {
                key.is_french_canadian()
                    || (in_set && (base_language == family.code() || key.has_french_variant()))
            }
            LanguageFamily::Spanish | LanguageFamily::Arabic | LanguageFamily::Chinese => {
                in_set && base_language == family.code()
            }
        }
    }
}
