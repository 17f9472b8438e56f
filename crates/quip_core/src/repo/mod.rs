//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract between the application and the
//!   embedded store.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repository writes must enforce `Entry::validate()` before persistence.
//! - Every public operation opens, uses and closes its own connection.

pub mod entry_repo;
pub mod status;
