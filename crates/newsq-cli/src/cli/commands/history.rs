//! `newsq history` – list, show, delete, clear and export past searches.

use anyhow::{bail, Result};
use newsq_core::config::NewsqConfig;
use newsq_core::history::{export_json, HistoryEntry, SearchHistory};
use newsq_core::store::Store;
use newsq_core::tables::EditionTables;

use super::search::run_rerun;
use crate::cli::HistoryCommand;

pub async fn run_history(
    tables: &EditionTables,
    cfg: &NewsqConfig,
    store: &Store,
    action: HistoryCommand,
) -> Result<()> {
    let history = SearchHistory::new(store.clone(), cfg.max_history);
    match action {
        HistoryCommand::List => {
            let entries = history.list().await?;
            if entries.is_empty() {
                println!("No searches in history.");
            } else {
                println!("{:<14} {:<25} {:<28} {}", "ID", "TIME", "COUNTRY", "QUERY");
                for e in &entries {
                    println!("{}", list_row(e));
                }
            }
        }
        HistoryCommand::Show { id } => {
            let Some(entry) = history.get(id).await? else {
                bail!("no history entry with id {id}");
            };
            print_entry(&entry);
        }
        HistoryCommand::Delete { id } => {
            if !history.delete(id).await? {
                bail!("no history entry with id {id}");
            }
            println!("Deleted search {id}");
        }
        HistoryCommand::Clear => {
            history.clear().await?;
            println!("History cleared");
        }
        HistoryCommand::Export { path } => {
            let entries = history.list().await?;
            let n = export_json(&entries, &path)?;
            tracing::info!(path = %path.display(), rows = n, "exported history");
            println!("Exported {n} searches to {}", path.display());
        }
        HistoryCommand::Rerun { id, open } => run_rerun(tables, cfg, store, id, open).await?,
    }
    Ok(())
}

fn list_row(e: &HistoryEntry) -> String {
    let mut query = e.query.clone();
    if !e.date_range.is_empty() {
        query = format!("{query} [{}]", e.date_range);
    }
    format!("{:<14} {:<25} {:<28} {}", e.id, e.timestamp, e.country, query)
}

fn print_entry(e: &HistoryEntry) {
    println!("id:         {}", e.id);
    println!("time:       {}", e.timestamp);
    println!("query:      {}", e.query);
    println!("country:    {}", e.country);
    if !e.date_range.is_empty() {
        println!("date range: {}", e.date_range);
    }
    println!("url:        {}", e.news_url);
    if let Some(summary) = &e.ai_summary {
        println!("\n{summary}");
    }
}
