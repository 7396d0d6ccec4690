//! Search URL construction for the two news surfaces.

use std::borrow::Cow;
use std::fmt;

use url::form_urlencoded;

use super::{CountryKey, EditionPolicy, Locale, LocaleTable};

/// Web search restricted to the news vertical.
pub const STRICT_SEARCH_URL: &str = "https://www.google.com/search";
/// Dedicated news search.
pub const NEWS_SEARCH_URL: &str = "https://news.google.com/search";

/// Target search surface for an edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Web search with `tbm=nws` plus country and language restrictions.
    Strict,
    /// News search with a `ceid` edition identifier.
    Default,
}

impl Surface {
    pub fn base_url(self) -> &'static str {
        match self {
            Surface::Strict => STRICT_SEARCH_URL,
            Surface::Default => NEWS_SEARCH_URL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Strict => "strict",
            Surface::Default => "default",
        }
    }
}

/// A constructed search URL together with the decisions behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltUrl {
    pub surface: Surface,
    pub locale: Locale,
    /// Assembled search expression (before encoding).
    pub query: String,
    url: String,
}

impl BuiltUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for BuiltUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl From<BuiltUrl> for String {
    fn from(built: BuiltUrl) -> Self {
        built.url
    }
}

/// Wraps whitespace-bearing terms in double quotes (exact phrase).
pub fn quote_term(term: &str) -> Cow<'_, str> {
    if term.chars().any(char::is_whitespace) {
        Cow::Owned(format!("\"{term}\""))
    } else {
        Cow::Borrowed(term)
    }
}

/// Quoted terms followed by `after:` / `before:` tokens, space-joined.
///
/// A space join is an implicit AND on both surfaces.
pub fn assemble_query<S: AsRef<str>>(
    terms: &[S],
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> String {
    let mut tokens: Vec<Cow<'_, str>> = terms.iter().map(|t| quote_term(t.as_ref())).collect();
    if let Some(start) = start_date {
        tokens.push(Cow::Owned(format!("after:{start}")));
    }
    if let Some(end) = end_date {
        tokens.push(Cow::Owned(format!("before:{end}")));
    }
    tokens.join(" ")
}

/// Builds search URLs from injected locale and policy tables.
#[derive(Debug, Clone)]
pub struct NewsUrlBuilder<'t> {
    locales: &'t LocaleTable,
    policy: EditionPolicy,
}

impl<'t> NewsUrlBuilder<'t> {
    pub fn new(locales: &'t LocaleTable, policy: EditionPolicy) -> Self {
        Self { locales, policy }
    }

    /// Total and deterministic. Callers validate non-empty terms and date
    /// order beforehand (see [`crate::query::SearchQuery`]).
    pub fn build<S: AsRef<str>>(
        &self,
        terms: &[S],
        key: &CountryKey,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> BuiltUrl {
        let query = assemble_query(terms, start_date, end_date);
        let locale = self.locales.resolve(key);
        let strict = self
            .policy
            .classify(key, &locale.region2, &locale.base_language);
        let surface = if strict { Surface::Strict } else { Surface::Default };

        let mut params = form_urlencoded::Serializer::new(String::new());
        match surface {
            Surface::Strict => {
                params
                    .append_pair("tbm", "nws")
                    .append_pair("q", &query)
                    .append_pair("hl", &locale.language_tag)
                    .append_pair("gl", &locale.region2)
                    .append_pair("cr", &format!("country{}", locale.region2))
                    .append_pair("lr", &format!("lang_{}", locale.base_language));
            }
            Surface::Default => {
                params
                    .append_pair("q", &query)
                    .append_pair("hl", &locale.language_tag)
                    .append_pair("gl", &locale.region2)
                    .append_pair(
                        "ceid",
                        &format!("{}:{}", locale.region2, locale.base_language),
                    );
            }
        }
        let url = format!("{}?{}", surface.base_url(), params.finish());

        tracing::debug!(
            country = %key,
            surface = surface.as_str(),
            hl = %locale.language_tag,
            "built news search url"
        );

        BuiltUrl {
            surface,
            locale,
            query,
            url,
        }
    }

    /// Convenience for a validated query.
    pub fn build_query(&self, query: &crate::query::SearchQuery) -> BuiltUrl {
        let start = query.start_date_str();
        let end = query.end_date_str();
        self.build(query.terms(), query.country(), start.as_deref(), end.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edition::StrictSets;
    use std::collections::HashMap;

    fn locales() -> LocaleTable {
        [
            ("us", "en-US"),
            ("jp", "ja-JP"),
            ("ca", "en-CA"),
            ("ca_fr", "fr-CA"),
            ("de", "de-DE"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn strict_sets() -> StrictSets {
        StrictSets {
            en: ["us", "ca"].iter().map(|s| s.to_string()).collect(),
            fr: ["ca", "fr"].iter().map(|s| s.to_string()).collect(),
            ..StrictSets::default()
        }
    }

    fn params(url: &str) -> HashMap<String, String> {
        url::Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn quoting_only_applies_to_whitespace_terms() {
        assert_eq!(quote_term("election"), "election");
        assert_eq!(quote_term("climate policy"), "\"climate policy\"");
        assert_eq!(quote_term("tab\tseparated"), "\"tab\tseparated\"");
    }

    #[test]
    fn assemble_without_whitespace_is_plain_join() {
        assert_eq!(assemble_query(&["a", "b", "c"], None, None), "a b c");
    }

    #[test]
    fn assemble_appends_date_tokens_in_order() {
        assert_eq!(
            assemble_query(&["rates", "central bank"], Some("2024-01-01"), Some("2024-02-01")),
            "rates \"central bank\" after:2024-01-01 before:2024-02-01"
        );
        assert_eq!(
            assemble_query(&["x"], None, Some("2024-02-01")),
            "x before:2024-02-01"
        );
    }

    #[test]
    fn strict_surface_parameters() {
        let locales = locales();
        let builder = NewsUrlBuilder::new(&locales, EditionPolicy::new(strict_sets(), true));
        let built = builder.build(&["climate policy"], &CountryKey::parse("us"), None, None);
        assert_eq!(built.surface, Surface::Strict);
        assert!(built.as_str().starts_with("https://www.google.com/search?tbm=nws&q="));
        assert!(built.as_str().contains("q=%22climate+policy%22"));
        let p = params(built.as_str());
        assert_eq!(p["tbm"], "nws");
        assert_eq!(p["q"], "\"climate policy\"");
        assert_eq!(p["hl"], "en-US");
        assert_eq!(p["gl"], "US");
        assert_eq!(p["cr"], "countryUS");
        assert_eq!(p["lr"], "lang_en");
        assert!(!p.contains_key("ceid"));
    }

    #[test]
    fn default_surface_parameters() {
        let locales = locales();
        let builder = NewsUrlBuilder::new(&locales, EditionPolicy::new(strict_sets(), true));
        let built = builder.build(
            &["election"],
            &CountryKey::parse("jp"),
            Some("2024-01-01"),
            Some("2024-02-01"),
        );
        assert_eq!(built.surface, Surface::Default);
        assert_eq!(
            built.as_str(),
            "https://news.google.com/search?q=election+after%3A2024-01-01+before%3A2024-02-01&hl=ja-JP&gl=JP&ceid=JP%3Aja"
        );
    }

    #[test]
    fn french_canadian_uses_strict_surface_with_french_locale() {
        let locales = locales();
        let builder = NewsUrlBuilder::new(&locales, EditionPolicy::new(strict_sets(), true));
        let built = builder.build(&["budget"], &CountryKey::parse("ca_fr"), None, None);
        assert_eq!(built.surface, Surface::Strict);
        let p = params(built.as_str());
        assert_eq!(p["hl"], "fr-CA");
        assert_eq!(p["gl"], "CA");
        assert_eq!(p["lr"], "lang_fr");
    }

    #[test]
    fn unknown_country_falls_back_to_english_default_surface() {
        let locales = locales();
        let builder = NewsUrlBuilder::new(&locales, EditionPolicy::new(strict_sets(), true));
        let built = builder.build(&["a", "b"], &CountryKey::parse("xx"), None, None);
        assert_eq!(built.surface, Surface::Default);
        let p = params(built.as_str());
        assert_eq!(p["q"], "a b");
        assert_eq!(p["gl"], "XX");
        assert_eq!(p["hl"], "en");
        assert_eq!(p["ceid"], "XX:en");
    }

    #[test]
    fn switch_off_routes_strict_editions_to_news_surface() {
        let locales = locales();
        let builder = NewsUrlBuilder::new(&locales, EditionPolicy::new(strict_sets(), false));
        let built = builder.build(&["x"], &CountryKey::parse("us"), None, None);
        assert_eq!(built.surface, Surface::Default);
        assert_eq!(params(built.as_str())["ceid"], "US:en");
    }

    #[test]
    fn build_is_idempotent() {
        let locales = locales();
        let builder = NewsUrlBuilder::new(&locales, EditionPolicy::new(strict_sets(), true));
        let key = CountryKey::parse("de");
        let a = builder.build(&["a b", "c&d"], &key, Some("2024-03-01"), None);
        let b = builder.build(&["a b", "c&d"], &key, Some("2024-03-01"), None);
        assert_eq!(a.as_str(), b.as_str());
        assert!(a.as_str().contains("c%26d"));
    }
}
