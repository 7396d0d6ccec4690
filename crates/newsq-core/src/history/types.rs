//! History record types.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::query::SearchQuery;

/// History entry identifier (milliseconds since the epoch at creation).
pub type EntryId = i64;

/// A stored search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    /// RFC 3339 creation time.
    pub timestamp: String,
    /// Terms joined with ` AND `.
    pub query: String,
    /// `"<name> (<code>)"`.
    pub country: String,
    /// Empty when the search had no dates.
    #[serde(default)]
    pub date_range: String,
    pub news_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Everything about a search except the id and timestamp, which are
/// assigned when it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub query: String,
    pub country: String,
    pub date_range: String,
    pub news_url: String,
    pub ai_summary: Option<String>,
    pub terms: Vec<String>,
    pub country_code: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl NewHistoryEntry {
    /// Record for a validated search and the URL built from it.
    ///
    /// Codes missing from the catalog are labelled with the upper-case
    /// region, e.g. `XX (xx)`.
    pub fn from_search(query: &SearchQuery, catalog: &Catalog, news_url: &str) -> Self {
        let code = query.country().as_str();
        let country = match catalog.find(code) {
            Some(entry) => entry.label(),
            None => format!("{} ({})", query.country().region2(), code),
        };
        Self {
            query: query.display_query(),
            country,
            date_range: query.date_range_display(),
            news_url: news_url.to_string(),
            ai_summary: None,
            terms: query.terms().to_vec(),
            country_code: code.to_string(),
            start_date: query.start_date_str(),
            end_date: query.end_date_str(),
        }
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.ai_summary = summary;
        self
    }

    pub(crate) fn into_entry(self, id: EntryId, timestamp: String) -> HistoryEntry {
        HistoryEntry {
            id,
            timestamp,
            query: self.query,
            country: self.country,
            date_range: self.date_range,
            news_url: self.news_url,
            ai_summary: self.ai_summary,
            terms: self.terms,
            country_code: self.country_code,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

impl HistoryEntry {
    /// Terms for re-running this search. Entries written without structured
    /// terms fall back to splitting the display query.
    pub fn search_terms(&self) -> Vec<String> {
        if !self.terms.is_empty() {
            return self.terms.clone();
        }
        self.query
            .split(" AND ")
            .map(|t| t.replace('"', ""))
            .filter(|t| !t.trim().is_empty())
            .collect()
    }

    /// Date bounds for re-running. Entries written without structured dates
    /// fall back to parsing the display range (`"<s> to <e>"`, `"from <s>"`,
    /// `"until <e>"`).
    pub fn search_dates(&self) -> (Option<String>, Option<String>) {
        if self.start_date.is_some() || self.end_date.is_some() {
            return (self.start_date.clone(), self.end_date.clone());
        }
        let range = self.date_range.trim();
        let owned = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        if let Some((start, end)) = range.split_once(" to ") {
            return (owned(start), owned(end));
        }
        if let Some(start) = range.strip_prefix("from ") {
            return (owned(start), None);
        }
        if let Some(end) = range.strip_prefix("until ") {
            return (None, owned(end));
        }
        (None, None)
    }

    /// Country code for re-running; older entries carry it only inside the
    /// label's trailing parentheses.
    pub fn search_country(&self) -> Option<&str> {
        if !self.country_code.is_empty() {
            return Some(&self.country_code);
        }
        let open = self.country.rfind('(')?;
        let rest = &self.country[open + 1..];
        let code = &rest[..rest.find(')')?];
        (!code.is_empty()).then_some(code)
    }
}
