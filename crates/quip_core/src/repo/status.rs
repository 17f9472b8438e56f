//! Coarse outcome codes for mutating repository operations.
//!
//! # Responsibility
//! - Distinguish total success, partial success and no-op per operation
//!   family, separately from the error channel.
//!
//! # Invariants
//! - A failed operation is reported as `Err(RepoError)`, never as a status
//!   variant; callers switch on the status only after `?`/`match` on the
//!   `Result`.

/// Outcome of a `save_history` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Every input entry was inserted and the transaction committed.
    Saved,
    /// The transaction committed but fewer rows were affected than entries
    /// supplied.
    Partial,
    /// The input was empty; nothing to save.
    Nothing,
}

/// Outcome of removal operations (history rows or favorite marks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveStatus {
    /// Every targeted row was removed or unmarked.
    Removed,
    /// Some targeted rows were skipped, typically protected favorites.
    Partial,
    /// No row matched; nothing to remove.
    Nothing,
}

/// Outcome of `add_favorite_by_ids`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddStatus {
    /// Every listed entry is now favorited.
    Added,
    /// Some listed entries were missing or already favorited.
    Partial,
    /// No row changed; all listed entries were missing or already favorited.
    Nothing,
}
