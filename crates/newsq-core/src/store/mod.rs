//! Persistent local store (SQLite via sqlx).
//!
//! Holds search history and recently used countries as JSON values under
//! fixed keys.

pub mod db;

pub use db::Store;

/// Keys used in the store.
pub mod keys {
    pub const HISTORY: &str = "search_history";
    pub const RECENTS: &str = "recent_countries";
}

#[cfg(test)]
mod tests;
