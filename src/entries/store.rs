//! In-memory entry store
//!
//! Owns the project's entries in insertion order. Every successful mutation
//! hands the complete new entry list to the configured [`SnapshotSink`]
//! before it is committed, so a failed mutation leaves the store unchanged.

use crate::entries::error::{EntryError, EntryResult};
use crate::entries::snapshot::{NullSink, SnapshotSink};
use crate::entries::types::{EntryDetails, EntryId, EntryKind, EntryPatch, ProjectEntry};
use crate::personality::analyze_personality;

/// The single owner of a project's entries
pub struct EntryStore {
    entries: Vec<ProjectEntry>,
    sink: Box<dyn SnapshotSink>,
}

impl EntryStore {
    /// Empty store that does not persist anything
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            sink: Box::new(NullSink),
        }
    }

    /// Seed the store from a loaded snapshot.
    ///
    /// Records whose id was already seen, or whose traits fall outside
    /// [1, 5], are dropped so a hand-edited snapshot cannot break the
    /// store's invariants.
    pub fn from_snapshot(entries: Vec<ProjectEntry>, sink: Box<dyn SnapshotSink>) -> Self {
        let mut store = Self {
            entries: Vec::with_capacity(entries.len()),
            sink,
        };

        for entry in entries {
            if store.contains(&entry.id) {
                tracing::warn!(id = %entry.id, "Dropping duplicate entry from snapshot");
                continue;
            }
            if let Err(e) = entry.validate() {
                tracing::warn!(id = %entry.id, "Dropping invalid entry from snapshot: {}", e);
                continue;
            }
            store.entries.push(entry);
        }

        tracing::debug!(count = store.entries.len(), "Entry store seeded");
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.position(id).is_some()
    }

    /// All entries in insertion order
    pub fn list(&self) -> &[ProjectEntry] {
        &self.entries
    }

    /// Look up a single entry
    pub fn get(&self, id: &EntryId) -> EntryResult<&ProjectEntry> {
        self.position(id)
            .map(|idx| &self.entries[idx])
            .ok_or_else(|| EntryError::NotFound(id.clone()))
    }

    /// The `limit` most recently added entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<&ProjectEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Entries of one kind, in insertion order
    pub fn by_kind(&self, kind: EntryKind) -> Vec<&ProjectEntry> {
        self.entries.iter().filter(|e| e.kind() == kind).collect()
    }

    /// Add a new entry
    pub fn add(&mut self, entry: ProjectEntry) -> EntryResult<()> {
        if self.contains(&entry.id) {
            return Err(EntryError::DuplicateId(entry.id));
        }
        entry.validate()?;

        let id = entry.id.clone();
        let kind = entry.kind();

        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)?;

        tracing::info!(id = %id, kind = %kind, "Entry added");
        Ok(())
    }

    /// Merge `patch` over an existing entry.
    ///
    /// `id`, `type` and `createdAt` are never changed. The stored personality
    /// analysis is left as is even when the trait vector changes; call
    /// [`EntryStore::regenerate_analysis`] to refresh it.
    pub fn update(&mut self, id: &EntryId, patch: &EntryPatch) -> EntryResult<&ProjectEntry> {
        let idx = self
            .position(id)
            .ok_or_else(|| EntryError::NotFound(id.clone()))?;

        let mut updated = self.entries[idx].clone();
        let foreign = patch.foreign_fields(updated.kind());
        if !foreign.is_empty() {
            tracing::warn!(id = %id, fields = ?foreign, "Ignoring fields that do not apply to this entry");
        }
        patch.apply_to(&mut updated);
        updated.validate()?;

        let mut next = self.entries.clone();
        next[idx] = updated;
        self.commit(next)?;

        tracing::info!(id = %id, "Entry updated");
        Ok(&self.entries[idx])
    }

    /// Remove an entry, returning it
    pub fn delete(&mut self, id: &EntryId) -> EntryResult<ProjectEntry> {
        let idx = self
            .position(id)
            .ok_or_else(|| EntryError::NotFound(id.clone()))?;

        let mut next = self.entries.clone();
        let removed = next.remove(idx);
        self.commit(next)?;

        tracing::info!(id = %id, "Entry deleted");
        Ok(removed)
    }

    /// Recompute a character's stored personality analysis from its current traits
    pub fn regenerate_analysis(&mut self, id: &EntryId) -> EntryResult<&ProjectEntry> {
        let entry = self.get(id)?;
        let analysis = match &entry.details {
            EntryDetails::Character(c) => analyze_personality(&c.personality),
            EntryDetails::World(_) => return Err(EntryError::NotACharacter(id.clone())),
        };

        self.update(id, &EntryPatch::new().personality_analysis(analysis))
    }

    fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }

    fn commit(&mut self, next: Vec<ProjectEntry>) -> EntryResult<()> {
        if let Err(e) = self.sink.persist(&next) {
            tracing::error!("Failed to persist snapshot: {}", e);
            return Err(e.into());
        }
        self.entries = next;
        Ok(())
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}
