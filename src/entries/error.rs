//! Entry store error types
//!
//! Every condition here is local and recoverable: a failed operation leaves
//! the store exactly as it was.

use crate::entries::types::EntryId;
use thiserror::Error;

/// Errors that can occur while creating or mutating entries
#[derive(Error, Debug)]
pub enum EntryError {
    /// Update, delete or lookup of an id that is not in the store
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    /// Add with an id that is already present
    #[error("Duplicate entry id: {0}")]
    DuplicateId(EntryId),

    /// Personality trait outside [1, 5]
    #[error("Invalid {trait_name} value {value}: traits must be between 1 and 5")]
    InvalidRange { trait_name: &'static str, value: u8 },

    /// A builder flow was given an empty required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Character-only operation requested on a world entry
    #[error("Entry {0} is not a character")]
    NotACharacter(EntryId),

    /// The persistence collaborator rejected the new snapshot
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Errors raised while loading or saving entry snapshots
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Serialization(err.to_string())
    }
}

/// Result type alias for entry operations
pub type EntryResult<T> = Result<T, EntryError>;
