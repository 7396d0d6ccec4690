//! `newsq search` and `newsq history rerun`.

use anyhow::{bail, Result};
use newsq_core::config::NewsqConfig;
use newsq_core::history::{NewHistoryEntry, SearchHistory};
use newsq_core::recents::RecentCountries;
use newsq_core::store::Store;
use newsq_core::summary::{GeminiClient, Summarizer, SummaryRequest};
use newsq_core::tables::EditionTables;

use crate::cli::open::open_url;
use crate::cli::QueryArgs;

#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub open: bool,
    pub summary: bool,
    pub record: bool,
}

/// Validates, builds the URL, then runs the collaborators. None of them can
/// stop the URL from being printed: store and summary failures are reported
/// and skipped.
pub async fn run_search(
    tables: &EditionTables,
    cfg: &NewsqConfig,
    store: Option<&Store>,
    args: &QueryArgs,
    opts: SearchOptions,
) -> Result<()> {
    let summarizer = cfg
        .summary_api_key()
        .filter(|_| opts.summary)
        .map(GeminiClient::new);
    search_with(tables, cfg, store, args, opts, summarizer).await
}

async fn search_with<S>(
    tables: &EditionTables,
    cfg: &NewsqConfig,
    store: Option<&Store>,
    args: &QueryArgs,
    opts: SearchOptions,
    summarizer: Option<S>,
) -> Result<()>
where
    S: Summarizer + Send + 'static,
{
    let query = args.to_query()?;
    let built = tables.url_builder(cfg.strict_local).build_query(&query);
    tracing::info!(
        country = %query.country(),
        surface = built.surface.as_str(),
        "search built"
    );

    if let Some(store) = store {
        let recents = RecentCountries::new(store.clone(), cfg.max_recents);
        if let Err(e) = recents.upsert(query.country().as_str(), &tables.catalog).await {
            tracing::warn!("could not record recent country: {:#}", e);
        }
    }

    let entry = NewHistoryEntry::from_search(&query, &tables.catalog, built.as_str());
    let request = summary_request(&entry);

    let history = store
        .filter(|_| opts.record)
        .map(|store| SearchHistory::new(store.clone(), cfg.max_history));
    let mut recorded = None;
    if let Some(history) = &history {
        match history.add(entry).await {
            Ok(stored) => recorded = Some(stored.id),
            Err(e) => tracing::warn!("could not record search in history: {:#}", e),
        }
    }

    if let Some(summarizer) = summarizer {
        if let Some(summary) = request_summary(summarizer, request).await {
            println!("{summary}\n");
            if let (Some(history), Some(id)) = (&history, recorded) {
                if let Err(e) = history.set_summary(id, &summary).await {
                    tracing::warn!(id, "could not attach summary to history: {:#}", e);
                }
            }
        }
    }

    println!("{built}");

    if opts.open {
        if let Err(e) = open_url(built.as_str()) {
            tracing::warn!("could not open browser: {:#}", e);
            eprintln!("Could not open a browser: {e:#}");
        }
    }
    Ok(())
}

fn summary_request(entry: &NewHistoryEntry) -> SummaryRequest {
    SummaryRequest {
        query: entry.query.clone(),
        country: entry.country.clone(),
        date_range: Some(entry.date_range.clone()).filter(|d| !d.is_empty()),
    }
}

/// Asks the summarizer on a blocking thread. Failures print a notice and
/// yield `None`.
async fn request_summary<S>(summarizer: S, request: SummaryRequest) -> Option<String>
where
    S: Summarizer + Send + 'static,
{
    match tokio::task::spawn_blocking(move || summarizer.summarize(&request)).await {
        Ok(Ok(summary)) => Some(summary),
        Ok(Err(e)) => {
            tracing::warn!("summary failed: {}", e);
            eprintln!("Summary unavailable: {e}");
            None
        }
        Err(e) => {
            tracing::warn!("summary task failed: {}", e);
            eprintln!("Summary unavailable: {e}");
            None
        }
    }
}

/// Re-run a stored search with the current tables and settings.
pub async fn run_rerun(
    tables: &EditionTables,
    cfg: &NewsqConfig,
    store: &Store,
    id: i64,
    open: bool,
) -> Result<()> {
    let history = SearchHistory::new(store.clone(), cfg.max_history);
    let Some(entry) = history.get(id).await? else {
        bail!("no history entry with id {id}");
    };
    let Some(country) = entry.search_country() else {
        bail!("history entry {id} has no country code");
    };
    let (from, to) = entry.search_dates();
    let args = QueryArgs {
        terms: entry.search_terms(),
        country: country.to_string(),
        from,
        to,
    };
    let opts = SearchOptions {
        open,
        summary: true,
        record: true,
    };
    run_search(tables, cfg, Some(store), &args, opts).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsq_core::summary::SummaryError;

    struct Fixed(Result<String, ()>);

    impl Summarizer for Fixed {
        fn summarize(&self, _request: &SummaryRequest) -> Result<String, SummaryError> {
            self.0.clone().map_err(|_| SummaryError::Empty)
        }
    }

    fn entry(date_range: &str) -> NewHistoryEntry {
        NewHistoryEntry {
            query: "q".to_string(),
            country: "Japan (jp)".to_string(),
            date_range: date_range.to_string(),
            news_url: "u".to_string(),
            ai_summary: None,
            terms: vec!["q".to_string()],
            country_code: "jp".to_string(),
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn summary_request_omits_empty_range() {
        assert_eq!(summary_request(&entry("")).date_range, None);
        assert_eq!(
            summary_request(&entry("from 2024-01-01")).date_range.as_deref(),
            Some("from 2024-01-01")
        );
    }

    #[tokio::test]
    async fn summary_success_is_returned() {
        let got = request_summary(Fixed(Ok("ok".to_string())), summary_request(&entry(""))).await;
        assert_eq!(got.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn summary_failure_degrades_to_none() {
        let request = summary_request(&entry("from 2024-01-01"));
        assert!(request_summary(Fixed(Err(())), request).await.is_none());
    }

    #[tokio::test]
    async fn summary_is_attached_to_recorded_search() {
        let tables = EditionTables::embedded().unwrap();
        let cfg = NewsqConfig::default();
        let store = Store::open_in_memory().await.unwrap();
        let args = QueryArgs {
            terms: vec!["election".to_string()],
            country: "jp".to_string(),
            from: None,
            to: None,
        };
        let opts = SearchOptions {
            open: false,
            summary: true,
            record: true,
        };
        let summarizer = Some(Fixed(Ok("three points".to_string())));
        search_with(&tables, &cfg, Some(&store), &args, opts, summarizer)
            .await
            .unwrap();

        let all = SearchHistory::new(store, 50).list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].ai_summary.as_deref(), Some("three points"));
    }

    #[tokio::test]
    async fn failed_summary_still_records_search() {
        let tables = EditionTables::embedded().unwrap();
        let cfg = NewsqConfig::default();
        let store = Store::open_in_memory().await.unwrap();
        let args = QueryArgs {
            terms: vec!["election".to_string()],
            country: "jp".to_string(),
            from: None,
            to: None,
        };
        let opts = SearchOptions {
            open: false,
            summary: true,
            record: true,
        };
        search_with(&tables, &cfg, Some(&store), &args, opts, Some(Fixed(Err(()))))
            .await
            .unwrap();

        let all = SearchHistory::new(store, 50).list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].ai_summary.is_none());
    }

    #[tokio::test]
    async fn search_without_store_still_succeeds() {
        let tables = EditionTables::embedded().unwrap();
        let cfg = NewsqConfig::default();
        let args = QueryArgs {
            terms: vec!["election".to_string()],
            country: "JP".to_string(),
            from: None,
            to: None,
        };
        let opts = SearchOptions {
            open: false,
            summary: true,
            record: true,
        };
        run_search(&tables, &cfg, None, &args, opts).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_range_records_nothing() {
        let tables = EditionTables::embedded().unwrap();
        let cfg = NewsqConfig::default();
        let store = Store::open_in_memory().await.unwrap();
        let args = QueryArgs {
            terms: vec!["x".to_string()],
            country: "us".to_string(),
            from: Some("2024-02-01".to_string()),
            to: Some("2024-01-01".to_string()),
        };
        let opts = SearchOptions {
            open: false,
            summary: false,
            record: true,
        };
        assert!(run_search(&tables, &cfg, Some(&store), &args, opts).await.is_err());
        let history = SearchHistory::new(store.clone(), 50);
        assert!(history.list().await.unwrap().is_empty());
        let recents = RecentCountries::new(store, 5);
        assert!(recents.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rerun_records_a_new_entry() {
        let tables = EditionTables::embedded().unwrap();
        let cfg = NewsqConfig::default();
        let store = Store::open_in_memory().await.unwrap();
        let args = QueryArgs {
            terms: vec!["budget".to_string()],
            country: "ca_fr".to_string(),
            from: Some("2024-01-01".to_string()),
            to: None,
        };
        let opts = SearchOptions {
            open: false,
            summary: false,
            record: true,
        };
        run_search(&tables, &cfg, Some(&store), &args, opts).await.unwrap();

        let history = SearchHistory::new(store.clone(), 50);
        let first = history.list().await.unwrap().remove(0);
        run_rerun(&tables, &cfg, &store, first.id, false).await.unwrap();

        let all = history.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].news_url, first.news_url);
        assert_eq!(all[0].country_code, "ca_fr");
        assert!(run_rerun(&tables, &cfg, &store, 1, false).await.is_err());
    }
}
