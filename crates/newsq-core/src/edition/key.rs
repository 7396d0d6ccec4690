//! Country keys as selected by the user.

use std::fmt;

/// Separator between the base region and a language variant (`ca_fr`).
pub const VARIANT_SEPARATOR: char = '_';

/// The French-speaking Canadian edition; the only key that overrides the
/// English classification of its region.
pub const FRENCH_CANADIAN: &str = "ca_fr";

/// A parsed country key.
///
/// Most keys are a bare region (`us`, `jp`). Multilingual countries use a
/// variant suffix (`be_nl`, `ch_it`). The raw string is kept because the locale
/// table is keyed by the full code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryKey {
    raw: String,
    base_region: String,
    variant: Option<String>,
}

impl CountryKey {
    pub fn parse(key: &str) -> Self {
        let (base_region, variant) = match key.split_once(VARIANT_SEPARATOR) {
            Some((base, variant)) => (base.to_string(), Some(variant.to_string())),
            None => (key.to_string(), None),
        };
        Self {
            raw: key.to_string(),
            base_region,
            variant,
        }
    }

    /// Full key as stored in the catalog.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn base_region(&self) -> &str {
        &self.base_region
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Upper-case region code sent as `gl`.
    pub fn region2(&self) -> String {
        self.base_region.to_uppercase()
    }

    pub fn is_french_canadian(&self) -> bool {
        self.raw == FRENCH_CANADIAN
    }

    /// True for keys such as `be_fr` or `ch_fr`.
    pub fn has_french_variant(&self) -> bool {
        self.variant() == Some("fr")
    }
}

impl fmt::Display for CountryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
