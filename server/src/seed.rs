//! Sample data for a fresh journal.
//!
//! Both operations run as one transaction: a reader sees either no seed rows or
//! all of them.

use chrono::{Duration, Utc};
use tracing::info;

use crate::entry::NewEntry;
use crate::error::StoreResult;
use crate::store::{count_rows, format_timestamp, insert_row, EntryStore};

/// Sample entries, newest first, with their age relative to seeding time.
fn sample_entries() -> Vec<(NewEntry, Duration)> {
    vec![
        (
            NewEntry::new(
                "Sunrise walk",
                "Caught the first light and felt calm. Need to do this more often.",
                "energized",
            )
            .with_tags(["outdoors", "morning"]),
            Duration::zero(),
        ),
        (
            NewEntry::new(
                "Helped a teammate",
                "Pairing session unblocked a friend. Felt useful and connected.",
                "grateful",
            )
            .with_tags(["work", "people"]),
            Duration::hours(1),
        ),
        (
            NewEntry::new(
                "Slow coffee",
                "Took 10 minutes away from the screen. Anxiety dropped a notch.",
                "calm",
            )
            .with_tags(["ritual", "self-care"]),
            Duration::hours(2),
        ),
    ]
}

/// Insert the sample entries if the store holds no rows.
///
/// Returns the number of rows inserted; zero when the store already had data.
pub async fn seed_if_empty(store: &EntryStore) -> StoreResult<usize> {
    let mut tx = store.pool().begin().await?;

    let existing = count_rows(&mut *tx).await?;
    if existing > 0 {
        info!(existing, "entry store already populated; skipping seed");
        return Ok(0);
    }

    let inserted = insert_samples(&mut tx).await?;
    tx.commit().await?;

    info!(inserted, "seeded entry store");
    Ok(inserted)
}

/// Delete every entry and reinsert the sample set.
pub async fn reset(store: &EntryStore) -> StoreResult<usize> {
    let mut tx = store.pool().begin().await?;

    let deleted = sqlx::query("DELETE FROM entries")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let inserted = insert_samples(&mut tx).await?;
    tx.commit().await?;

    info!(deleted, inserted, "entry store reset");
    Ok(inserted)
}

async fn insert_samples(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>) -> StoreResult<usize> {
    let now = Utc::now();
    let samples = sample_entries();
    for (entry, age) in &samples {
        insert_row(&mut **tx, entry, &format_timestamp(now - *age)).await?;
    }
    Ok(samples.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_empty_store_once() {
        let store = EntryStore::in_memory().await.expect("store");

        assert_eq!(seed_if_empty(&store).await.expect("seed"), 3);
        assert_eq!(store.count().await.expect("count"), 3);

        assert_eq!(seed_if_empty(&store).await.expect("second seed"), 0);
        assert_eq!(store.count().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn leaves_existing_data_alone() {
        let store = EntryStore::in_memory().await.expect("store");
        store
            .create(&NewEntry::new("Mine", "my own note", "curious"))
            .await
            .expect("create");

        assert_eq!(seed_if_empty(&store).await.expect("seed"), 0);
        let entries = store.list().await.expect("list");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Mine");
    }

    #[tokio::test]
    async fn seeded_entries_are_well_formed_and_newest_first() {
        let store = EntryStore::in_memory().await.expect("store");
        seed_if_empty(&store).await.expect("seed");

        let entries = store.list().await.expect("list");
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Sunrise walk", "Helped a teammate", "Slow coffee"]);
        for entry in &entries {
            assert!(!entry.title.is_empty());
            assert!(!entry.note.is_empty());
            assert!(!entry.mood.is_empty());
            assert!(!entry.created_at.is_empty());
            assert_eq!(entry.tags.len(), 2);
        }
    }

    #[tokio::test]
    async fn reset_replaces_user_data_with_samples() {
        let store = EntryStore::in_memory().await.expect("store");
        seed_if_empty(&store).await.expect("seed");
        store
            .create(&NewEntry::new("Extra", "one more", "optimistic"))
            .await
            .expect("create");
        assert_eq!(store.count().await.expect("count"), 4);

        assert_eq!(reset(&store).await.expect("reset"), 3);
        let entries = store.list().await.expect("list");
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.title != "Extra"));
    }
}
