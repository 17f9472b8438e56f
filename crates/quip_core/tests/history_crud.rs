use quip_core::{Entry, EntryRepository, RepoError, SaveStatus, SqliteEntryRepository};
use std::path::PathBuf;
use tempfile::TempDir;

fn temp_store() -> (TempDir, SqliteEntryRepository) {
    let dir = TempDir::new().expect("temp dir should be created");
    let repo = SqliteEntryRepository::new(dir.path().join("quip.db"));
    (dir, repo)
}

fn entry(phrase: &str, stamp: i64) -> Entry {
    Entry::new(phrase, "", "", stamp)
}

#[test]
fn save_writes_back_sequential_ids_and_lists_in_insertion_order() {
    let (_dir, repo) = temp_store();

    let mut entries = vec![entry("alpha", 1_000), entry("beta", 2_000)];
    let status = repo.save_history(&mut entries).unwrap();

    assert_eq!(status, SaveStatus::Saved);
    assert_eq!(entries[0].id, 1);
    assert_eq!(entries[1].id, 2);

    let listed = repo.get_all_history().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].phrase, "alpha");
    assert_eq!(listed[1].phrase, "beta");
    assert_eq!(listed[0].created_at, 1_000);
    assert_eq!(listed[0].updated_at, 1_000);
}

#[test]
fn save_with_empty_input_is_a_noop() {
    let (_dir, repo) = temp_store();

    let mut entries: Vec<Entry> = Vec::new();
    let status = repo.save_history(&mut entries).unwrap();

    assert_eq!(status, SaveStatus::Nothing);
    assert!(repo.get_all_history().unwrap().is_empty());
}

#[test]
fn save_rejects_blank_phrase_before_touching_the_store() {
    let (_dir, repo) = temp_store();

    let mut entries = vec![entry("valid", 1), entry("   ", 2)];
    let err = repo.save_history(&mut entries).unwrap_err();

    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.get_all_history().unwrap().is_empty());
}

#[test]
fn save_preserves_prefix_and_suffix_components() {
    let (_dir, repo) = temp_store();

    let mut entries = vec![Entry::new("mighty mongoose", "mighty", "mongoose", 7_000)];
    repo.save_history(&mut entries).unwrap();

    let listed = repo.get_all_history().unwrap();
    assert_eq!(listed[0].prefix, "mighty");
    assert_eq!(listed[0].suffix, "mongoose");
    assert!(!listed[0].is_favorite);
}

#[test]
fn newest_n_returns_largest_ids_in_ascending_order() {
    let (_dir, repo) = temp_store();

    let mut entries: Vec<Entry> = (1..=5)
        .map(|i| entry(&format!("phrase {i}"), i * 100))
        .collect();
    repo.save_history(&mut entries).unwrap();

    let newest = repo.get_history_with_number(3).unwrap();
    let ids: Vec<i64> = newest.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 4, 5]);
}

#[test]
fn newest_n_caps_at_store_size() {
    let (_dir, repo) = temp_store();

    let mut entries = vec![entry("only", 1)];
    repo.save_history(&mut entries).unwrap();

    let newest = repo.get_history_with_number(10).unwrap();
    assert_eq!(newest.len(), 1);
}

#[test]
fn newest_n_with_non_positive_number_is_empty() {
    let (_dir, repo) = temp_store();

    let mut entries = vec![entry("present", 1)];
    repo.save_history(&mut entries).unwrap();

    assert!(repo.get_history_with_number(0).unwrap().is_empty());
    assert!(repo.get_history_with_number(-3).unwrap().is_empty());
}

#[test]
fn reads_on_fresh_path_create_the_store_and_return_empty() {
    let dir = TempDir::new().expect("temp dir should be created");
    let db_path: PathBuf = dir.path().join("fresh.db");
    let repo = SqliteEntryRepository::new(&db_path);

    assert!(repo.get_all_history().unwrap().is_empty());
    assert!(repo.get_all_favorite().unwrap().is_empty());
    assert!(db_path.exists());
}

#[test]
fn saves_across_calls_keep_assigning_increasing_ids() {
    let (_dir, repo) = temp_store();

    let mut first = vec![entry("one", 1)];
    repo.save_history(&mut first).unwrap();
    let mut second = vec![entry("two", 2), entry("three", 3)];
    repo.save_history(&mut second).unwrap();

    assert_eq!(first[0].id, 1);
    assert_eq!(second[0].id, 2);
    assert_eq!(second[1].id, 3);
}
