//! SQLite-backed entry store.
//!
//! # Design
//! `EntryStore` wraps a `SqlitePool` and is cheap to clone, so one handle is
//! opened at startup and handed to the router as state. Tests open their own
//! isolated in-memory handle.
//!
//! Every operation is a single statement against the pool, `update` included:
//! the merge happens inside SQLite so no read lock is ever upgraded to a write.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteExecutor, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::entry::{decode_tags, encode_tags, Entry, EntryId, EntryPatch, NewEntry};
use crate::error::StoreResult;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    note TEXT NOT NULL,
    mood TEXT NOT NULL,
    tags TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
"#;

const LIST_ENTRIES: &str = "SELECT id, title, note, mood, tags, created_at FROM entries \
     ORDER BY julianday(created_at) DESC, id DESC";

const GET_ENTRY: &str = "SELECT id, title, note, mood, tags, created_at FROM entries WHERE id = ?1";

/// Merge in a single statement: a NULL parameter keeps the stored column.
const MERGE_ENTRY: &str = r#"
UPDATE entries SET
    title = COALESCE(?1, title),
    note = COALESCE(?2, note),
    mood = COALESCE(?3, mood),
    tags = COALESCE(?4, tags)
WHERE id = ?5
RETURNING id, title, note, mood, tags, created_at
"#;

#[derive(Debug, Clone)]
pub struct EntryStore {
    pool: SqlitePool,
}

impl EntryStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        info!(path = %path.display(), "entry store opened");
        Ok(store)
    }

    /// Open a private in-memory database. The pool holds exactly one
    /// connection for its whole lifetime; the data lives as long as it does.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<std::time::Duration>)
            .max_lifetime(None::<std::time::Duration>)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All entries, most recent first.
    pub async fn list(&self) -> StoreResult<Vec<Entry>> {
        let rows = sqlx::query(LIST_ENTRIES).fetch_all(&self.pool).await?;

        rows.iter().map(map_entry_row).collect()
    }

    pub async fn get(&self, id: EntryId) -> StoreResult<Option<Entry>> {
        let row = sqlx::query(GET_ENTRY)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_entry_row).transpose()
    }

    /// Insert a new row stamped with the current time and return its id.
    pub async fn create(&self, entry: &NewEntry) -> StoreResult<EntryId> {
        let id = insert_row(&self.pool, entry, &format_timestamp(Utc::now())).await?;
        debug!(id, mood = %entry.mood, tags = entry.tags.len(), "entry created");
        Ok(id)
    }

    /// Merge `patch` into the stored row.
    ///
    /// Returns `Ok(None)` when no row has this id. `created_at` is never touched.
    /// The merge is one `UPDATE`, so concurrent updates queue on SQLite's write
    /// lock instead of failing a read-to-write upgrade.
    pub async fn update(&self, id: EntryId, patch: &EntryPatch) -> StoreResult<Option<Entry>> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let tags = patch.tags.as_deref().map(encode_tags).transpose()?;
        let row = sqlx::query(MERGE_ENTRY)
            .bind(patch.title.as_deref())
            .bind(patch.note.as_deref())
            .bind(patch.mood.as_deref())
            .bind(tags)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let updated = row.as_ref().map(map_entry_row).transpose()?;
        debug!(id, found = updated.is_some(), "entry update");
        Ok(updated)
    }

    /// Hard delete. Returns whether a row was removed.
    pub async fn remove(&self, id: EntryId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        let removed = result.rows_affected() > 0;
        debug!(id, removed, "entry delete");
        Ok(removed)
    }

    pub async fn count(&self) -> StoreResult<i64> {
        count_rows(&self.pool).await
    }
}

pub(crate) async fn insert_row<'e, E>(
    executor: E,
    entry: &NewEntry,
    created_at: &str,
) -> StoreResult<EntryId>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "INSERT INTO entries (title, note, mood, tags, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&entry.title)
    .bind(&entry.note)
    .bind(&entry.mood)
    .bind(encode_tags(&entry.tags)?)
    .bind(created_at)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub(crate) async fn count_rows<'e, E>(executor: E) -> StoreResult<i64>
where
    E: SqliteExecutor<'e>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM entries")
        .fetch_one(executor)
        .await?;
    Ok(count)
}

/// RFC 3339, UTC, millisecond precision. Lexical order matches time order.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn map_entry_row(row: &SqliteRow) -> StoreResult<Entry> {
    let tags: Option<String> = row.try_get("tags")?;
    Ok(Entry {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        note: row.try_get("note")?,
        mood: row.try_get("mood")?,
        tags: decode_tags(tags.as_deref()),
        created_at: row.try_get("created_at")?,
    })
}
