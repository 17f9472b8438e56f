//! Persistence core for quip, a generated-phrase collection manager.
//! This crate is the single source of truth for storage invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{Entry, EntryValidationError};
pub use repo::entry_repo::{
    EntryRepository, MatchMode, RepoError, RepoResult, SqliteEntryRepository,
};
pub use repo::status::{AddStatus, RemoveStatus, SaveStatus};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
