//! File-backed store behavior across reopen.

use moodlog_server::{seed, EntryPatch, EntryStore, NewEntry};

#[tokio::test]
async fn entries_survive_reopen_and_seed_does_not_repeat() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("journal.db");

    let id = {
        let store = EntryStore::open(&path).await.unwrap();
        assert_eq!(seed::seed_if_empty(&store).await.unwrap(), 3);
        store
            .create(&NewEntry::new("Late night", "Could not sleep", "curious").with_tags(["night"]))
            .await
            .unwrap()
    };
    assert!(path.exists());

    let store = EntryStore::open(&path).await.unwrap();
    assert_eq!(seed::seed_if_empty(&store).await.unwrap(), 0);
    assert_eq!(store.count().await.unwrap(), 4);

    let entry = store.get(id).await.unwrap().unwrap();
    assert_eq!(entry.tags, vec!["night"]);

    let patch = EntryPatch {
        mood: Some("grateful".to_string()),
        ..EntryPatch::default()
    };
    let updated = store.update(id, &patch).await.unwrap().unwrap();
    assert_eq!(updated.title, "Late night");
    assert_eq!(updated.mood, "grateful");
    assert_eq!(updated.created_at, entry.created_at);
}

#[tokio::test]
async fn reset_restores_samples_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");

    let store = EntryStore::open(&path).await.unwrap();
    store
        .create(&NewEntry::new("Scratch", "to be wiped", "calm"))
        .await
        .unwrap();

    assert_eq!(seed::reset(&store).await.unwrap(), 3);
    let titles: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Sunrise walk", "Helped a teammate", "Slow coffee"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_on_file_store_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let store = EntryStore::open(dir.path().join("journal.db")).await.unwrap();

    let mut ids = Vec::new();
    for n in 0..8 {
        let id = store
            .create(&NewEntry::new(format!("entry {n}"), "note", "calm"))
            .await
            .unwrap();
        ids.push(id);
    }

    let mut handles = Vec::new();
    for round in 0..200 {
        let store = store.clone();
        let id = ids[round % ids.len()];
        handles.push(tokio::spawn(async move {
            let patch = EntryPatch {
                title: Some(format!("r{round}")),
                ..EntryPatch::default()
            };
            store.update(id, &patch).await
        }));
    }

    let mut failures = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(Some(entry)) => assert_eq!(entry.mood, "calm"),
            Ok(None) => panic!("entry vanished during concurrent updates"),
            Err(_) => failures += 1,
        }
    }
    assert_eq!(failures, 0, "concurrent updates returned storage errors");

    for entry in store.list().await.unwrap() {
        assert!(entry.title.starts_with('r'));
        assert_eq!(entry.note, "note");
    }
}
