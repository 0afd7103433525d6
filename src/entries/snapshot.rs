//! Snapshot hand-off to durable storage
//!
//! The store never writes files itself. After each successful mutation it
//! hands the full entry list to a [`SnapshotSink`]; on startup it is seeded
//! from whatever the collaborator loaded.

use crate::entries::error::SnapshotError;
use crate::entries::types::ProjectEntry;
use std::path::{Path, PathBuf};

/// Receives the full entry list after every mutation
pub trait SnapshotSink: Send {
    fn persist(&mut self, entries: &[ProjectEntry]) -> Result<(), SnapshotError>;
}

/// Sink that discards snapshots, for in-memory use
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn persist(&mut self, _entries: &[ProjectEntry]) -> Result<(), SnapshotError> {
        Ok(())
    }
}

/// Snapshot stored as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonSnapshotFile {
    path: PathBuf,
}

impl JsonSnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored entries. A missing file is an empty project.
    pub fn load(&self) -> Result<Vec<ProjectEntry>, SnapshotError> {
        if !self.path.exists() {
            tracing::debug!(path = ?self.path, "No snapshot found, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<ProjectEntry> = serde_json::from_str(&content)?;
        tracing::debug!(path = ?self.path, count = entries.len(), "Loaded snapshot");
        Ok(entries)
    }

    /// Write the entries, creating parent directories as needed
    pub fn save(&self, entries: &[ProjectEntry]) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SnapshotSink for JsonSnapshotFile {
    fn persist(&mut self, entries: &[ProjectEntry]) -> Result<(), SnapshotError> {
        self.save(entries)
    }
}
