//! SQLite-backed key-value store.
//!
//! Values are JSON documents keyed by name, the same get/set/remove contract a
//! browser's local storage offers.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnection, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the local store.
///
/// The database file lives under the XDG state directory:
/// `~/.local/state/newsq/newsq.db` on Debian.
#[derive(Clone)]
pub struct Store {
    pub(crate) pool: Pool<Sqlite>,
}

impl Store {
    /// Open (or create) the default store and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("newsq")?;
        let db_path = xdg_dirs
            .place_state_file("newsq.db")
            .context("create state directory")?;
        Self::open_at(db_path).await
    }

    /// Open (or create) the store at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await
            .with_context(|| format!("open store: {}", path.display()))?;
        let store = Store { pool };
        store.migrate().await?;
        tracing::debug!(path = %path.display(), "store opened");
        Ok(store)
    }

    /// In-memory store (nothing persisted); used by tests.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Store { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Read and decode a value. A missing key or a value that no longer
    /// decodes as `T` yields `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.pool.acquire().await?;
        Ok(read_value(&mut conn, key).await?.and_then(|raw| decode(key, &raw)))
    }

    /// Insert or replace a value.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).with_context(|| format!("serialize {key}"))?;
        let mut conn = self.pool.acquire().await?;
        write_value(&mut conn, key, &json).await
    }

    /// Read-modify-write of one value under an immediate (write-locking)
    /// transaction, so concurrent updaters in this or another process never
    /// overwrite each other. A missing or undecodable value starts from
    /// `T::default()`.
    pub async fn update<T, R, F>(&self, key: &str, f: F) -> Result<R>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> R,
    {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let result = async {
            let mut value: T = read_value(&mut conn, key)
                .await?
                .and_then(|raw| decode(key, &raw))
                .unwrap_or_default();
            let out = f(&mut value);
            let json = serde_json::to_string(&value).with_context(|| format!("serialize {key}"))?;
            write_value(&mut conn, key, &json).await?;
            Ok::<_, anyhow::Error>(out)
        }
        .await;

        match result {
            Ok(out) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                Ok(out)
            }
            Err(e) => {
                if let Err(rollback) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                    tracing::warn!(key, "rollback failed: {}", rollback);
                }
                Err(e)
            }
        }
    }

    /// Delete a key. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        let r = sqlx::query(
            r#"
            DELETE FROM kv
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await?;
        Ok(r.rows_affected() > 0)
    }
}

async fn read_value(conn: &mut SqliteConnection, key: &str) -> Result<Option<String>> {
    let row = sqlx::query(
        r#"
        SELECT value FROM kv
        WHERE key = ?1
        "#,
    )
    .bind(key)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.map(|r| r.get("value")))
}

async fn write_value(conn: &mut SqliteConnection, key: &str, json: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO kv (key, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(json)
    .bind(unix_timestamp())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, "ignoring undecodable stored value: {}", e);
            None
        }
    }
}

/// Current time as Unix seconds.
fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
