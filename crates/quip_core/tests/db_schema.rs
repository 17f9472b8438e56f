use quip_core::db::schema::ensure_schema;
use quip_core::{open_db, open_db_in_memory, Entry, EntryRepository, SqliteEntryRepository};
use tempfile::TempDir;

#[test]
fn schema_step_is_idempotent_on_the_same_connection() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    ensure_schema(&conn).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn open_db_creates_the_entries_table() {
    let dir = TempDir::new().expect("temp dir should be created");
    let conn = open_db(dir.path().join("quip.db")).unwrap();

    let table: String = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'entries';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(table, "entries");
}

#[test]
fn reopening_the_same_path_preserves_saved_entries() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("quip.db");

    let repo = SqliteEntryRepository::new(&path);
    let mut entries = vec![Entry::new("durable", "", "", 5)];
    repo.save_history(&mut entries).unwrap();
    drop(repo);

    let reopened = SqliteEntryRepository::new(&path);
    let listed = reopened.get_all_history().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].phrase, "durable");
}
