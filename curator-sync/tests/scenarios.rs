//! End-to-end sync scenarios: one authoring checkout publishing through a
//! shared store to independently evolving project checkouts.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use curator_core::{HistoryEntry, Manifest};
use curator_sync::{files_root, hasher, manifest_path, ApplyOutcome, SyncEngine};

fn open(project: &TempDir, store: &TempDir) -> SyncEngine {
    SyncEngine::open(project.path(), store.path()).expect("open engine")
}

fn history(store: &TempDir, file: &str) -> Vec<HistoryEntry> {
    let manifest = Manifest::load(&manifest_path(store.path())).expect("load manifest");
    manifest.get(file).expect("tracked").to_vec()
}

fn read(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join(file)).expect("read")
}

#[test]
fn authoring_edit_propagates_to_second_checkout() {
    let author = TempDir::new().expect("author");
    let store = TempDir::new().expect("store");

    // Scenario 1: track a.txt with content "hello".
    fs::write(author.path().join("a.txt"), "hello").unwrap();
    let mut engine = open(&author, &store);
    engine.track("a.txt").expect("track");

    let h0 = hasher::hash_bytes(b"hello");
    assert_eq!(history(&store, "a.txt"), vec![HistoryEntry::Hash(h0.clone())]);
    assert_eq!(read(&files_root(store.path()), "a.txt"), "hello");

    // Scenario 2: author edits to "world", refresh absorbs it.
    fs::write(author.path().join("a.txt"), "world").unwrap();
    engine.refresh().expect("refresh");

    let h1 = hasher::hash_bytes(b"world");
    assert_eq!(
        history(&store, "a.txt"),
        vec![HistoryEntry::Hash(h0), HistoryEntry::Hash(h1)]
    );
    assert_eq!(read(&files_root(store.path()), "a.txt"), "world");

    // Scenario 3: a second checkout still on "hello" advances to "world".
    let second = TempDir::new().expect("second");
    fs::write(second.path().join("a.txt"), "hello").unwrap();
    let report = open(&second, &store).apply_updates().expect("apply");
    assert!(matches!(report.outcomes[0], ApplyOutcome::Advanced { .. }));
    assert_eq!(read(second.path(), "a.txt"), "world");
}

#[test]
fn hand_edited_checkout_is_never_clobbered() {
    let author = TempDir::new().expect("author");
    let store = TempDir::new().expect("store");

    fs::write(author.path().join("a.txt"), "hello").unwrap();
    let mut engine = open(&author, &store);
    engine.track("a.txt").expect("track");
    fs::write(author.path().join("a.txt"), "world").unwrap();
    engine.refresh().expect("refresh");

    // Scenario 4: a third checkout carries a hand edit unknown to history.
    let third = TempDir::new().expect("third");
    fs::write(third.path().join("a.txt"), "custom").unwrap();
    let report = open(&third, &store).apply_updates().expect("apply");

    assert!(report.has_conflicts());
    match &report.outcomes[0] {
        ApplyOutcome::Conflict { path, hash } => {
            assert!(path.ends_with("a.txt"));
            assert_eq!(hash, &hasher::hash_bytes(b"custom"));
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(read(third.path(), "a.txt"), "custom");
    // History is untouched by a conflicting apply.
    assert_eq!(history(&store, "a.txt").len(), 2);
}

#[test]
fn deletion_propagates_and_is_not_resurrected() {
    let author = TempDir::new().expect("author");
    let store = TempDir::new().expect("store");

    fs::write(author.path().join("a.txt"), "hello").unwrap();
    let mut engine = open(&author, &store);
    engine.track("a.txt").expect("track");
    fs::write(author.path().join("a.txt"), "world").unwrap();
    engine.refresh().expect("refresh");

    // Scenario 5: author deletes a.txt; refresh records the sentinel and
    // removes the store copy.
    fs::remove_file(author.path().join("a.txt")).unwrap();
    engine.refresh().expect("refresh after delete");

    let h = history(&store, "a.txt");
    assert_eq!(h.len(), 3);
    assert_eq!(h.last(), Some(&HistoryEntry::Deleted));
    assert!(!files_root(store.path()).join("a.txt").exists());

    // A subsequent apply skips the file entirely.
    let report = engine.apply_updates().expect("apply");
    assert!(matches!(
        report.outcomes[0],
        ApplyOutcome::SkippedDeleted { .. }
    ));
    assert!(!author.path().join("a.txt").exists());
}

#[test]
fn batch_covers_independent_files_without_interference() {
    let author = TempDir::new().expect("author");
    let store = TempDir::new().expect("store");

    fs::create_dir_all(author.path().join("scripts")).unwrap();
    fs::write(author.path().join("scripts/boot.rb"), "boot v1").unwrap();
    fs::write(author.path().join("readme.txt"), "readme v1").unwrap();

    let mut engine = open(&author, &store);
    engine.track("scripts/boot.rb").expect("track boot");
    engine.track("readme.txt").expect("track readme");

    // One file edited, one deleted, in a single refresh batch.
    fs::write(author.path().join("scripts/boot.rb"), "boot v2").unwrap();
    fs::remove_file(author.path().join("readme.txt")).unwrap();
    let report = engine.refresh().expect("refresh");
    assert_eq!(report.changed(), 2);

    assert_eq!(history(&store, "scripts/boot.rb").len(), 2);
    assert_eq!(
        history(&store, "readme.txt").last(),
        Some(&HistoryEntry::Deleted)
    );

    // A fresh checkout receives the edit but not the deleted file.
    let fresh = TempDir::new().expect("fresh");
    let report = open(&fresh, &store).apply_updates().expect("apply");
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(read(fresh.path(), "scripts/boot.rb"), "boot v2");
    assert!(!fresh.path().join("readme.txt").exists());
}

#[test]
fn manifest_on_disk_matches_documented_format() {
    let author = TempDir::new().expect("author");
    let store = TempDir::new().expect("store");

    fs::write(author.path().join("a.txt"), "hello").unwrap();
    let mut engine = open(&author, &store);
    engine.track("a.txt").expect("track");
    fs::remove_file(author.path().join("a.txt")).unwrap();
    engine.refresh().expect("refresh");

    let contents = fs::read_to_string(manifest_path(store.path())).expect("read manifest");
    let h0 = hasher::hash_bytes(b"hello");
    assert_eq!(contents, format!("a.txt:{h0}:deleted\n"));
}
