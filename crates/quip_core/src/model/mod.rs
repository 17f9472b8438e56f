//! Domain models shared across the persistence core.
//!
//! # Responsibility
//! - Define the canonical entry record and its validation rules.
//!
//! # Invariants
//! - Models stay storage-agnostic; SQL shapes live in the repo layer.

pub mod entry;
