//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the history/favorites persistence API over the `entries` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Entry::validate()` before SQL mutations.
//! - Dynamic ID/keyword lists only ever contribute placeholder tokens to
//!   the query text; values are bound through the parameter API.
//! - Each public operation opens its own connection and closes it before
//!   returning; a close failure after success surfaces as
//!   `RepoError::Cleanup`, while a primary failure always dominates.

use crate::db::{open_db, DbError};
use crate::model::entry::{Entry, EntryValidationError};
use crate::repo::status::{AddStatus, RemoveStatus, SaveStatus};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    phrase,
    prefix,
    suffix,
    is_favorite,
    created_at,
    updated_at
FROM entries";

const ENTRY_INSERT_SQL: &str = "INSERT INTO entries (
    phrase,
    prefix,
    suffix,
    is_favorite,
    created_at,
    updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6);";

const SEQUENCE_RESET_SQL: &str = "DELETE FROM sqlite_sequence WHERE name = 'entries';";

// Favorite toggles stamp the row; created_at is never touched after insert.
const TOUCH_UPDATED_AT_SQL: &str = "updated_at = (strftime('%s', 'now') * 1000)";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    InvalidData(String),
    /// Connection close failed after the operation itself succeeded.
    Cleanup(rusqlite::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
            Self::Cleanup(err) => write!(f, "connection close failed after success: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Cleanup(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// How multiple search keywords combine into one predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every keyword must appear in the phrase.
    All,
    /// At least one keyword must appear in the phrase.
    Any,
}

/// Repository interface for phrase history and favorites.
///
/// Keyword matching uses SQLite `LIKE` with `%keyword%` binding, so it is
/// substring containment, case-insensitive for ASCII letters.
pub trait EntryRepository {
    fn save_history(&self, entries: &mut [Entry]) -> RepoResult<SaveStatus>;
    fn get_all_history(&self) -> RepoResult<Vec<Entry>>;
    fn get_history_with_number(&self, number: i64) -> RepoResult<Vec<Entry>>;
    fn search_all_history(&self, keywords: &[String], mode: MatchMode) -> RepoResult<Vec<Entry>>;
    fn search_history_with_number(
        &self,
        number: i64,
        keywords: &[String],
        mode: MatchMode,
    ) -> RepoResult<Vec<Entry>>;
    fn remove_history_by_ids(&self, ids: &[i64], force: bool) -> RepoResult<RemoveStatus>;
    fn remove_history_all(&self, force: bool) -> RepoResult<RemoveStatus>;
    fn get_all_favorite(&self) -> RepoResult<Vec<Entry>>;
    fn get_favorite_with_number(&self, number: i64) -> RepoResult<Vec<Entry>>;
    fn search_all_favorite(&self, keywords: &[String], mode: MatchMode) -> RepoResult<Vec<Entry>>;
    fn search_favorite_with_number(
        &self,
        number: i64,
        keywords: &[String],
        mode: MatchMode,
    ) -> RepoResult<Vec<Entry>>;
    fn add_favorite_by_ids(&self, ids: &[i64]) -> RepoResult<AddStatus>;
    fn remove_favorite_by_ids(&self, ids: &[i64]) -> RepoResult<RemoveStatus>;
    fn remove_favorite_all(&self) -> RepoResult<RemoveStatus>;
}

/// SQLite-backed entry repository bound to one store file.
///
/// Every operation opens and closes its own connection against `path`,
/// running the schema step first, so a fresh path is always usable.
/// In-process concurrent callers against the same file must serialize
/// externally; cross-process sharing is unsupported.
pub struct SqliteEntryRepository {
    path: PathBuf,
}

impl SqliteEntryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> RepoResult<Connection> {
        Ok(open_db(&self.path)?)
    }

    fn list_all(&self, favorites_only: bool) -> RepoResult<Vec<Entry>> {
        let conn = self.open()?;
        let mut sql = String::from(ENTRY_SELECT_SQL);
        if favorites_only {
            sql.push_str(" WHERE is_favorite = 1");
        }
        sql.push_str(" ORDER BY id ASC;");

        let entries = fetch_entries(&conn, &sql, Vec::new())?;
        close_connection(conn)?;
        Ok(entries)
    }

    fn list_newest(&self, number: i64, favorites_only: bool) -> RepoResult<Vec<Entry>> {
        let conn = self.open()?;
        if number <= 0 {
            close_connection(conn)?;
            return Ok(Vec::new());
        }

        let mut sql = String::from(ENTRY_SELECT_SQL);
        if favorites_only {
            sql.push_str(" WHERE is_favorite = 1");
        }
        sql.push_str(" ORDER BY id DESC LIMIT ?;");

        let mut entries = fetch_entries(&conn, &sql, vec![Value::Integer(number)])?;
        close_connection(conn)?;
        // The query yields the newest rows in descending ID order; callers
        // expect them chronologically.
        entries.sort_by_key(|entry| entry.id);
        Ok(entries)
    }

    fn search_all(
        &self,
        keywords: &[String],
        mode: MatchMode,
        favorites_only: bool,
    ) -> RepoResult<Vec<Entry>> {
        let conn = self.open()?;
        if keywords.is_empty() {
            close_connection(conn)?;
            return Ok(Vec::new());
        }

        let mut sql = format!(
            "{ENTRY_SELECT_SQL} WHERE ({})",
            keyword_predicate(keywords.len(), mode)
        );
        if favorites_only {
            sql.push_str(" AND is_favorite = 1");
        }
        sql.push_str(" ORDER BY id ASC;");

        let entries = fetch_entries(&conn, &sql, keyword_params(keywords))?;
        close_connection(conn)?;
        Ok(entries)
    }

    fn search_newest(
        &self,
        number: i64,
        keywords: &[String],
        mode: MatchMode,
        favorites_only: bool,
    ) -> RepoResult<Vec<Entry>> {
        let conn = self.open()?;
        if number <= 0 || keywords.is_empty() {
            close_connection(conn)?;
            return Ok(Vec::new());
        }

        let mut sql = format!(
            "{ENTRY_SELECT_SQL} WHERE ({})",
            keyword_predicate(keywords.len(), mode)
        );
        if favorites_only {
            sql.push_str(" AND is_favorite = 1");
        }
        sql.push_str(" ORDER BY id DESC LIMIT ?;");

        let mut bind_values = keyword_params(keywords);
        bind_values.push(Value::Integer(number));

        let mut entries = fetch_entries(&conn, &sql, bind_values)?;
        close_connection(conn)?;
        entries.sort_by_key(|entry| entry.id);
        Ok(entries)
    }
}

impl EntryRepository for SqliteEntryRepository {
    fn save_history(&self, entries: &mut [Entry]) -> RepoResult<SaveStatus> {
        for entry in entries.iter() {
            entry.validate()?;
        }

        let mut conn = self.open()?;
        if entries.is_empty() {
            close_connection(conn)?;
            return Ok(SaveStatus::Nothing);
        }

        let status = insert_entries(&mut conn, entries)?;
        close_connection(conn)?;
        Ok(status)
    }

    fn get_all_history(&self) -> RepoResult<Vec<Entry>> {
        self.list_all(false)
    }

    fn get_history_with_number(&self, number: i64) -> RepoResult<Vec<Entry>> {
        self.list_newest(number, false)
    }

    fn search_all_history(&self, keywords: &[String], mode: MatchMode) -> RepoResult<Vec<Entry>> {
        self.search_all(keywords, mode, false)
    }

    fn search_history_with_number(
        &self,
        number: i64,
        keywords: &[String],
        mode: MatchMode,
    ) -> RepoResult<Vec<Entry>> {
        self.search_newest(number, keywords, mode, false)
    }

    fn remove_history_by_ids(&self, ids: &[i64], force: bool) -> RepoResult<RemoveStatus> {
        let conn = self.open()?;
        if ids.is_empty() {
            close_connection(conn)?;
            return Ok(RemoveStatus::Nothing);
        }

        let mut sql = format!(
            "DELETE FROM entries WHERE id IN ({})",
            placeholders(ids.len())
        );
        if !force {
            sql.push_str(" AND is_favorite = 0");
        }
        sql.push(';');

        let affected = conn.execute(&sql, params_from_iter(id_params(ids)))?;
        close_connection(conn)?;
        Ok(remove_count_status(affected, ids.len()))
    }

    fn remove_history_all(&self, force: bool) -> RepoResult<RemoveStatus> {
        let mut conn = self.open()?;
        let status = delete_all_entries(&mut conn, force)?;
        close_connection(conn)?;
        Ok(status)
    }

    fn get_all_favorite(&self) -> RepoResult<Vec<Entry>> {
        self.list_all(true)
    }

    fn get_favorite_with_number(&self, number: i64) -> RepoResult<Vec<Entry>> {
        self.list_newest(number, true)
    }

    fn search_all_favorite(&self, keywords: &[String], mode: MatchMode) -> RepoResult<Vec<Entry>> {
        self.search_all(keywords, mode, true)
    }

    fn search_favorite_with_number(
        &self,
        number: i64,
        keywords: &[String],
        mode: MatchMode,
    ) -> RepoResult<Vec<Entry>> {
        self.search_newest(number, keywords, mode, true)
    }

    fn add_favorite_by_ids(&self, ids: &[i64]) -> RepoResult<AddStatus> {
        let conn = self.open()?;

        // No empty-input early return here: callers supply at least one ID,
        // and an empty list surfaces as a prepare error.
        let sql = format!(
            "UPDATE entries SET is_favorite = 1, {TOUCH_UPDATED_AT_SQL}
             WHERE is_favorite = 0 AND id IN ({});",
            placeholders(ids.len())
        );

        let affected = conn.execute(&sql, params_from_iter(id_params(ids)))?;
        close_connection(conn)?;
        Ok(match remove_count_status(affected, ids.len()) {
            RemoveStatus::Removed => AddStatus::Added,
            RemoveStatus::Partial => AddStatus::Partial,
            RemoveStatus::Nothing => AddStatus::Nothing,
        })
    }

    fn remove_favorite_by_ids(&self, ids: &[i64]) -> RepoResult<RemoveStatus> {
        let conn = self.open()?;

        let sql = format!(
            "UPDATE entries SET is_favorite = 0, {TOUCH_UPDATED_AT_SQL}
             WHERE is_favorite = 1 AND id IN ({});",
            placeholders(ids.len())
        );

        let affected = conn.execute(&sql, params_from_iter(id_params(ids)))?;
        close_connection(conn)?;
        Ok(remove_count_status(affected, ids.len()))
    }

    fn remove_favorite_all(&self) -> RepoResult<RemoveStatus> {
        let mut conn = self.open()?;
        let status = unmark_all_favorites(&mut conn)?;
        close_connection(conn)?;
        Ok(status)
    }
}

fn insert_entries(conn: &mut Connection, entries: &mut [Entry]) -> RepoResult<SaveStatus> {
    let tx = conn.transaction()?;
    let mut affected = 0usize;
    {
        let mut stmt = tx.prepare(ENTRY_INSERT_SQL)?;
        for entry in entries.iter_mut() {
            affected += stmt.execute(params![
                entry.phrase,
                entry.prefix,
                entry.suffix,
                bool_to_int(entry.is_favorite),
                entry.created_at,
                entry.updated_at,
            ])?;
            entry.id = tx.last_insert_rowid();
        }
    }
    tx.commit()?;

    if affected == entries.len() {
        Ok(SaveStatus::Saved)
    } else {
        Ok(SaveStatus::Partial)
    }
}

fn delete_all_entries(conn: &mut Connection, force: bool) -> RepoResult<RemoveStatus> {
    let tx = conn.transaction()?;
    let sql = if force {
        "DELETE FROM entries;"
    } else {
        "DELETE FROM entries WHERE is_favorite = 0;"
    };

    let affected = tx.execute(sql, [])?;
    if affected == 0 {
        // Transaction drops without commit; nothing changed.
        return Ok(RemoveStatus::Nothing);
    }

    let remaining: i64 = tx.query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get(0))?;
    if remaining == 0 {
        // Only reset the sequence when the table is verified empty, so the
        // next save starts at ID 1 without renumbering survivors.
        tx.execute(SEQUENCE_RESET_SQL, [])?;
    }

    tx.commit()?;
    Ok(RemoveStatus::Removed)
}

fn unmark_all_favorites(conn: &mut Connection) -> RepoResult<RemoveStatus> {
    let tx = conn.transaction()?;
    let affected = tx.execute(
        &format!("UPDATE entries SET is_favorite = 0, {TOUCH_UPDATED_AT_SQL} WHERE is_favorite = 1;"),
        [],
    )?;
    if affected == 0 {
        return Ok(RemoveStatus::Nothing);
    }
    tx.commit()?;
    Ok(RemoveStatus::Removed)
}

fn fetch_entries(conn: &Connection, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Entry>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut entries = Vec::new();

    while let Some(row) = rows.next()? {
        entries.push(parse_entry_row(row)?);
    }

    Ok(entries)
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let is_favorite = match row.get::<_, i64>("is_favorite")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_favorite value `{other}` in entries.is_favorite"
            )));
        }
    };

    Ok(Entry {
        id: row.get("id")?,
        phrase: row.get("phrase")?,
        prefix: row.get("prefix")?,
        suffix: row.get("suffix")?,
        is_favorite,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn close_connection(conn: Connection) -> RepoResult<()> {
    conn.close().map_err(|(_, err)| RepoError::Cleanup(err))
}

fn remove_count_status(affected: usize, requested: usize) -> RemoveStatus {
    if affected == 0 {
        RemoveStatus::Nothing
    } else if affected < requested {
        RemoveStatus::Partial
    } else {
        RemoveStatus::Removed
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn keyword_predicate(count: usize, mode: MatchMode) -> String {
    let joiner = match mode {
        MatchMode::All => " AND ",
        MatchMode::Any => " OR ",
    };
    vec!["phrase LIKE ?"; count].join(joiner)
}

fn keyword_params(keywords: &[String]) -> Vec<Value> {
    keywords
        .iter()
        .map(|keyword| Value::Text(format!("%{keyword}%")))
        .collect()
}

fn id_params(ids: &[i64]) -> Vec<Value> {
    ids.iter().map(|id| Value::Integer(*id)).collect()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::{
        keyword_predicate, placeholders, remove_count_status, MatchMode, RemoveStatus,
    };

    #[test]
    fn placeholders_builds_comma_separated_tokens() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
        assert_eq!(placeholders(0), "");
    }

    #[test]
    fn keyword_predicate_joins_by_mode() {
        assert_eq!(
            keyword_predicate(2, MatchMode::All),
            "phrase LIKE ? AND phrase LIKE ?"
        );
        assert_eq!(
            keyword_predicate(3, MatchMode::Any),
            "phrase LIKE ? OR phrase LIKE ? OR phrase LIKE ?"
        );
    }

    #[test]
    fn remove_count_status_maps_affected_against_requested() {
        assert_eq!(remove_count_status(0, 3), RemoveStatus::Nothing);
        assert_eq!(remove_count_status(2, 3), RemoveStatus::Partial);
        assert_eq!(remove_count_status(3, 3), RemoveStatus::Removed);
    }
}
