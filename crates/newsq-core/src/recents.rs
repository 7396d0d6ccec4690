//! Recently used countries, most recent first.

use anyhow::Result;

use crate::catalog::Catalog;
use crate::store::{keys, Store};

/// Default number of recent countries kept.
pub const DEFAULT_MAX_RECENTS: usize = 5;

#[derive(Clone)]
pub struct RecentCountries {
    store: Store,
    max_entries: usize,
}

impl RecentCountries {
    pub fn new(store: Store, max_entries: usize) -> Self {
        Self {
            store,
            max_entries: max_entries.max(1),
        }
    }

    pub async fn load(&self) -> Result<Vec<String>> {
        Ok(self.store.get(keys::RECENTS).await?.unwrap_or_default())
    }

    /// Move `code` to the front. Empty codes and codes missing from the
    /// catalog are ignored.
    pub async fn upsert(&self, code: &str, catalog: &Catalog) -> Result<()> {
        if code.is_empty() || !catalog.contains(code) {
            tracing::debug!(code, "not recording unknown country as recent");
            return Ok(());
        }
        let max_entries = self.max_entries;
        self.store
            .update(keys::RECENTS, |list: &mut Vec<String>| {
                push_front(list, code, max_entries)
            })
            .await
    }
}

fn push_front(list: &mut Vec<String>, code: &str, max: usize) {
    list.retain(|c| c != code);
    list.insert(0, code.to_string());
    list.truncate(max);
}
