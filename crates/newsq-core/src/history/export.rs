//! History export as a JSON array of display rows.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::Path;

use super::HistoryEntry;

const NOT_AVAILABLE: &str = "N/A";

/// One exported row, with spreadsheet-style column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Search Query")]
    pub query: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Date Range")]
    pub date_range: String,
    #[serde(rename = "AI Summary")]
    pub ai_summary: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Google News URL")]
    pub news_url: String,
}

impl From<&HistoryEntry> for ExportRow {
    fn from(entry: &HistoryEntry) -> Self {
        fn or_na(s: Option<&str>) -> String {
            s.filter(|s| !s.is_empty()).unwrap_or(NOT_AVAILABLE).to_string()
        }
        Self {
            query: entry.query.clone(),
            country: entry.country.clone(),
            date_range: or_na(Some(&entry.date_range)),
            ai_summary: or_na(entry.ai_summary.as_deref()),
            timestamp: entry.timestamp.clone(),
            news_url: entry.news_url.clone(),
        }
    }
}

/// Write `entries` to `path`. Exporting nothing is an error.
pub fn export_json(entries: &[HistoryEntry], path: &Path) -> Result<usize> {
    if entries.is_empty() {
        bail!("no data to export");
    }
    let rows: Vec<ExportRow> = entries.iter().map(ExportRow::from).collect();
    let json = serde_json::to_string_pretty(&rows).context("serialize history export")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create dir: {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("write export: {}", path.display()))?;
    Ok(rows.len())
}
