//! Token filtering and suggestions over the catalog.

use std::collections::HashSet;

use super::{Catalog, CountryEntry, CountryGroup};

/// Region label given to recently used countries.
pub const CURRENT_REGION: &str = "Current";

/// Lower-case whitespace-separated tokens of a filter string.
pub fn tokens_from_query(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Every token must occur in `"<name> <code>"`, lower-cased.
fn matches(entry: &CountryEntry, tokens: &[String]) -> bool {
    let haystack = format!("{} {}", entry.name, entry.code).to_lowercase();
    tokens.iter().all(|t| haystack.contains(t.as_str()))
}

impl Catalog {
    /// Groups whose entries match `query`; empty groups are dropped. A blank
    /// query returns every group.
    pub fn filter_groups(&self, query: &str) -> Vec<CountryGroup> {
        let tokens = tokens_from_query(query);
        self.groups
            .iter()
            .map(|group| CountryGroup {
                region: group.region.clone(),
                countries: group
                    .countries
                    .iter()
                    .filter(|entry| matches(entry, &tokens))
                    .cloned()
                    .collect(),
            })
            .filter(|group| !group.countries.is_empty())
            .collect()
    }

    /// Recently used countries, in order, as a `Current` group. Unknown codes
    /// are skipped.
    pub fn current_group(&self, recents: &[String]) -> Option<CountryGroup> {
        let countries: Vec<CountryEntry> = recents
            .iter()
            .filter_map(|code| self.find(code))
            .map(|entry| CountryEntry {
                region: CURRENT_REGION.to_string(),
                ..entry.clone()
            })
            .collect();
        (!countries.is_empty()).then(|| CountryGroup {
            region: CURRENT_REGION.to_string(),
            countries,
        })
    }

    /// Flat suggestion list for a filter string: matching recents first,
    /// then matching catalog entries, de-duplicated by code and truncated to
    /// `limit`. A blank query yields nothing.
    pub fn suggestions(&self, query: &str, recents: &[String], limit: usize) -> Vec<CountryEntry> {
        let tokens = tokens_from_query(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let current = self
            .current_group(recents)
            .map(|g| g.countries)
            .unwrap_or_default();
        let rest = self.filter_groups(query).into_iter().flat_map(|g| g.countries);

        let mut seen = HashSet::new();
        current
            .into_iter()
            .filter(|entry| matches(entry, &tokens))
            .chain(rest)
            .filter(|entry| seen.insert(entry.code.clone()))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::entry;
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CountryGroup {
                region: "Americas".to_string(),
                countries: vec![
                    entry("ca", "Canada (English)", "Americas"),
                    entry("ca_fr", "Canada (Français)", "Americas"),
                    entry("us", "United States", "Americas"),
                ],
            },
            CountryGroup {
                region: "Europe".to_string(),
                countries: vec![
                    entry("fr", "France", "Europe"),
                    entry("gb", "United Kingdom", "Europe"),
                ],
            },
        ])
    }

    #[test]
    fn tokens_are_lowercased_and_split() {
        assert_eq!(tokens_from_query("  United  KING "), ["united", "king"]);
        assert!(tokens_from_query("   ").is_empty());
    }

    #[test]
    fn blank_filter_keeps_all_groups() {
        let groups = catalog().filter_groups("");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].countries.len(), 3);
    }

    #[test]
    fn filter_requires_every_token_and_drops_empty_groups() {
        let groups = catalog().filter_groups("united states");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].countries.len(), 1);
        assert_eq!(groups[0].countries[0].code, "us");
    }

    #[test]
    fn filter_matches_codes() {
        let groups = catalog().filter_groups("ca_fr");
        assert_eq!(groups[0].countries[0].name, "Canada (Français)");
    }

    #[test]
    fn current_group_skips_unknown_codes() {
        let recents = vec!["gb".to_string(), "zz".to_string(), "us".to_string()];
        let current = catalog().current_group(&recents).unwrap();
        let codes: Vec<_> = current.countries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["gb", "us"]);
        assert!(current.countries.iter().all(|e| e.region == CURRENT_REGION));
        assert!(catalog().current_group(&[]).is_none());
    }

    #[test]
    fn suggestions_put_matching_recents_first_without_duplicates() {
        let recents = vec!["gb".to_string(), "fr".to_string()];
        let got = catalog().suggestions("united", &recents, 20);
        let codes: Vec<_> = got.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["gb", "us"]);
        assert_eq!(got[0].region, CURRENT_REGION);
        assert_eq!(got[1].region, "Americas");
    }

    #[test]
    fn suggestions_respect_limit_and_blank_query() {
        assert_eq!(catalog().suggestions("a", &[], 2).len(), 2);
        assert!(catalog().suggestions(" ", &["us".to_string()], 20).is_empty());
    }
}
