//! Loreweaver entry model
//!
//! - **types**: Entry records (ProjectEntry, world/character details, Personality)
//! - **store**: In-memory store with insertion order and snapshot hand-off
//! - **snapshot**: Persistence collaborator interface and JSON file implementation
//! - **builder**: World and character creation flows
//! - **error**: Error types
//!
//! # Lifecycle
//!
//! ```text
//! Draft → build (id, createdAt, analysis) → EntryStore::add → SnapshotSink
//!                                           EntryStore::update/delete → SnapshotSink
//! ```

pub mod builder;
pub mod error;
pub mod snapshot;
pub mod store;
pub mod types;

pub use builder::{CharacterDraft, WorldDraft};
pub use error::{EntryError, EntryResult, SnapshotError};
pub use snapshot::{JsonSnapshotFile, NullSink, SnapshotSink};
pub use store::EntryStore;
pub use types::{
    CharacterDetails, EntryDetails, EntryId, EntryKind, EntryPatch, Personality, ProjectEntry,
    Trait, WorldDetails, WorldType, TRAIT_MAX, TRAIT_MIN, TRAIT_NEUTRAL,
};
