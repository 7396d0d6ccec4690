//! Validated search input.
//!
//! Validation happens here, before any URL is built or any collaborator
//! (history, recents, summary) is touched.

use chrono::NaiveDate;

use crate::edition::CountryKey;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("please enter a search term")]
    EmptyQuery,
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("start date {start} must not be after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// One user-initiated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
    country: CountryKey,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl SearchQuery {
    /// Trims terms and drops blank ones. Blank date strings count as absent.
    pub fn new<I, S>(
        raw_terms: I,
        country: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = raw_terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if terms.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let start_date = parse_date(start_date)?;
        let end_date = parse_date(end_date)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(SearchError::InvalidDateRange { start, end });
            }
        }

        Ok(Self {
            terms,
            country: CountryKey::parse(country.trim()),
            start_date,
            end_date,
        })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn country(&self) -> &CountryKey {
        &self.country
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn start_date_str(&self) -> Option<String> {
        self.start_date.map(format_date)
    }

    pub fn end_date_str(&self) -> Option<String> {
        self.end_date.map(format_date)
    }

    /// Terms joined with ` AND ` for history display.
    pub fn display_query(&self) -> String {
        self.terms.join(" AND ")
    }

    /// `"<s> to <e>"`, `"from <s>"`, `"until <e>"`, or empty.
    pub fn date_range_display(&self) -> String {
        date_range_display(self.start_date_str().as_deref(), self.end_date_str().as_deref())
    }
}

pub fn date_range_display(start: Option<&str>, end: Option<&str>) -> String {
    match (start, end) {
        (Some(s), Some(e)) => format!("{s} to {e}"),
        (Some(s), None) => format!("from {s}"),
        (None, Some(e)) => format!("until {e}"),
        (None, None) => String::new(),
    }
}

/// Strict `YYYY-MM-DD`; the string is sent to the search engine verbatim, so
/// shorter forms such as `2024-1-5` are rejected rather than reformatted.
fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, SearchError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if raw.len() != 10 {
        return Err(SearchError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| SearchError::InvalidDate(raw.to_string()))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_blank_terms() {
        let q = SearchQuery::new(["  climate policy ", "", "   ", "eu"], "us", None, None).unwrap();
        assert_eq!(q.terms(), ["climate policy", "eu"]);
        assert_eq!(q.country().as_str(), "us");
        assert_eq!(q.display_query(), "climate policy AND eu");
    }

    #[test]
    fn empty_terms_are_rejected() {
        assert_eq!(
            SearchQuery::new(Vec::<String>::new(), "us", None, None),
            Err(SearchError::EmptyQuery)
        );
        assert_eq!(
            SearchQuery::new([" ", "\t"], "us", None, None),
            Err(SearchError::EmptyQuery)
        );
    }

    #[test]
    fn start_after_end_is_rejected() {
        let err = SearchQuery::new(["x"], "us", Some("2024-03-02"), Some("2024-03-01")).unwrap_err();
        assert!(matches!(err, SearchError::InvalidDateRange { .. }));
        assert_eq!(
            err.to_string(),
            "start date 2024-03-02 must not be after end date 2024-03-01"
        );
    }

    #[test]
    fn same_day_range_is_valid() {
        let q = SearchQuery::new(["x"], "us", Some("2024-03-01"), Some("2024-03-01")).unwrap();
        assert_eq!(q.start_date_str().as_deref(), Some("2024-03-01"));
        assert_eq!(q.end_date_str().as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for bad in ["2024-1-5", "2024/01/05", "2024-02-30", "yesterday"] {
            assert_eq!(
                SearchQuery::new(["x"], "us", Some(bad), None),
                Err(SearchError::InvalidDate(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn blank_dates_are_absent() {
        let q = SearchQuery::new(["x"], "us", Some(""), Some("  ")).unwrap();
        assert!(q.start_date().is_none());
        assert!(q.end_date().is_none());
        assert_eq!(q.date_range_display(), "");
    }

    #[test]
    fn date_range_display_forms() {
        assert_eq!(
            date_range_display(Some("2024-01-01"), Some("2024-02-01")),
            "2024-01-01 to 2024-02-01"
        );
        assert_eq!(date_range_display(Some("2024-01-01"), None), "from 2024-01-01");
        assert_eq!(date_range_display(None, Some("2024-02-01")), "until 2024-02-01");
    }
}
