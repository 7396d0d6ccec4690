//! Edition resolution and search URL construction.
//!
//! A country key resolves to a locale (`region2`, language tag, base
//! language), the policy decides whether that edition is searched on the
//! strict surface, and the builder assembles the final URL. Everything here is
//! pure; the tables are injected by the caller (see [`crate::tables`]).

mod builder;
mod key;
mod locale;
mod policy;

pub use builder::{
    assemble_query, quote_term, BuiltUrl, NewsUrlBuilder, Surface, NEWS_SEARCH_URL,
    STRICT_SEARCH_URL,
};
pub use key::{CountryKey, FRENCH_CANADIAN, VARIANT_SEPARATOR};
pub use locale::{base_language, Locale, LocaleTable, DEFAULT_LANGUAGE_TAG};
pub use policy::{EditionPolicy, LanguageFamily, StrictSets};
