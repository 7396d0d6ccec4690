//! Search history kept in the local store.
//!
//! Newest entries first, capped at a configurable size. The whole list is
//! stored as one JSON value under [`keys::HISTORY`].

mod export;
mod types;

pub use export::{export_json, ExportRow};
pub use types::{EntryId, HistoryEntry, NewHistoryEntry};

use anyhow::Result;
use chrono::{SecondsFormat, Utc};

use crate::store::{keys, Store};

/// Default number of entries kept.
pub const DEFAULT_MAX_HISTORY: usize = 50;

#[derive(Clone)]
pub struct SearchHistory {
    store: Store,
    max_entries: usize,
}

impl SearchHistory {
    pub fn new(store: Store, max_entries: usize) -> Self {
        Self {
            store,
            max_entries: max_entries.max(1),
        }
    }

    /// All entries, newest first.
    pub async fn list(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.store.get(keys::HISTORY).await?.unwrap_or_default())
    }

    pub async fn get(&self, id: EntryId) -> Result<Option<HistoryEntry>> {
        Ok(self.list().await?.into_iter().find(|e| e.id == id))
    }

    /// Record a search at the front of the list and return it with its id
    /// and timestamp. Ids are unique even when two searches land in the same
    /// millisecond or run concurrently.
    pub async fn add(&self, new_entry: NewHistoryEntry) -> Result<HistoryEntry> {
        let max_entries = self.max_entries;
        let entry = self
            .store
            .update(keys::HISTORY, |entries: &mut Vec<HistoryEntry>| {
                let now = Utc::now();
                let newest = entries.iter().map(|e| e.id).max().unwrap_or(0);
                let id = now.timestamp_millis().max(newest + 1);
                let entry =
                    new_entry.into_entry(id, now.to_rfc3339_opts(SecondsFormat::Millis, true));
                entries.insert(0, entry.clone());
                entries.truncate(max_entries);
                entry
            })
            .await?;

        tracing::info!(id = entry.id, query = %entry.query, "recorded search in history");
        Ok(entry)
    }

    /// Attach (or replace) the summary of an existing entry. Returns whether
    /// the entry exists.
    pub async fn set_summary(&self, id: EntryId, summary: &str) -> Result<bool> {
        self.store
            .update(keys::HISTORY, |entries: &mut Vec<HistoryEntry>| {
                match entries.iter_mut().find(|e| e.id == id) {
                    Some(entry) => {
                        entry.ai_summary = Some(summary.to_string());
                        true
                    }
                    None => false,
                }
            })
            .await
    }

    /// Returns whether the entry existed.
    pub async fn delete(&self, id: EntryId) -> Result<bool> {
        self.store
            .update(keys::HISTORY, |entries: &mut Vec<HistoryEntry>| {
                let before = entries.len();
                entries.retain(|e| e.id != id);
                entries.len() != before
            })
            .await
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(keys::HISTORY).await?;
        Ok(())
    }
}
