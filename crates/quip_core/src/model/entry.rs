//! Entry domain model.
//!
//! # Responsibility
//! - Define the canonical record for one generated phrase.
//! - Provide construction and validation helpers used by write paths.
//!
//! # Invariants
//! - `id` is assigned by storage on insert; `0` marks an unsaved entry.
//! - `phrase` is never blank for a persisted entry.
//! - `created_at` is set once at save time and never modified afterwards.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One generated phrase record.
///
/// `prefix` and `suffix` hold the optional leading/trailing components the
/// generator combined into `phrase`; both may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Storage-assigned row ID. `0` until the entry has been saved.
    pub id: i64,
    /// The fully assembled phrase. Must not be blank.
    pub phrase: String,
    /// Optional leading component.
    pub prefix: String,
    /// Optional trailing component.
    pub suffix: String,
    /// Favorite mark. Favorited entries survive non-forced removal.
    pub is_favorite: bool,
    /// Unix epoch milliseconds, set by the caller at save time.
    pub created_at: i64,
    /// Unix epoch milliseconds. Updated when the favorite mark toggles.
    pub updated_at: i64,
}

impl Entry {
    /// Creates an unsaved entry with `updated_at` mirroring `created_at`.
    pub fn new(
        phrase: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        created_at_ms: i64,
    ) -> Self {
        Self {
            id: 0,
            phrase: phrase.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            is_favorite: false,
            created_at: created_at_ms,
            updated_at: created_at_ms,
        }
    }

    /// Validates entry fields before persistence.
    ///
    /// # Errors
    /// - `EmptyPhrase` when `phrase` is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.phrase.trim().is_empty() {
            return Err(EntryValidationError::EmptyPhrase);
        }
        Ok(())
    }
}

/// Validation failure for entry write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyPhrase,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPhrase => write!(f, "entry phrase must not be blank"),
        }
    }
}

impl Error for EntryValidationError {}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryValidationError};

    #[test]
    fn new_entry_starts_unsaved_and_unfavorited() {
        let entry = Entry::new("lucid lobster", "lucid", "lobster", 1_700_000_000_000);
        assert_eq!(entry.id, 0);
        assert!(!entry.is_favorite);
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[test]
    fn validate_rejects_blank_phrase() {
        let entry = Entry::new("   ", "", "", 0);
        assert_eq!(entry.validate(), Err(EntryValidationError::EmptyPhrase));
    }

    #[test]
    fn validate_accepts_phrase_without_components() {
        let entry = Entry::new("solo", "", "", 0);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn entry_serde_roundtrip() {
        let entry = Entry::new("quiet quartz", "quiet", "quartz", 42);
        let json = serde_json::to_string(&entry).expect("entry should serialize");
        let back: Entry = serde_json::from_str(&json).expect("entry should deserialize");
        assert_eq!(back, entry);
    }
}
