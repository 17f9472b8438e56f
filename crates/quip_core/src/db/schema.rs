//! Idempotent schema bootstrap.
//!
//! # Responsibility
//! - Create the single `entries` table when absent.
//!
//! # Invariants
//! - The statement is safe to run on every connection open.
//! - `id` uses AUTOINCREMENT so `sqlite_sequence` tracks the next ID and
//!   can be reset once the table is verified empty.

use super::DbResult;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the `entries` table if it does not exist yet.
///
/// Runs unconditionally at the start of every public operation; the
/// absence of the table is never an error.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
