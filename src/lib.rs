//! # Loreweaver
//!
//! Creative project codex: record the worlds and characters of a story, then
//! derive personality sketches, rule-based writing advice, and project
//! statistics from them.
//!
//! ## Modules
//!
//! - [`entries`]: Entry model, in-memory store, snapshot persistence, builder flows
//! - [`personality`]: Big Five trait vector → character sketch
//! - [`search`]: Text and type filtering over entries
//! - [`advice`]: Keyword-driven advice synthesizer with response history
//! - [`analytics`]: Counts, distributions, trait averages and insights
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loreweaver::entries::*;
//! use loreweaver::{summarize, AdviceSynthesizer, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let file = JsonSnapshotFile::new(config.storage.resolved_snapshot_path());
//!     let mut store = EntryStore::from_snapshot(file.load()?, Box::new(file));
//!
//!     store.add(
//!         WorldDraft::new("Eldoria", WorldType::HighFantasy)
//!             .key_elements("ley lines, dragon pacts")
//!             .build()?,
//!     )?;
//!     store.add(
//!         CharacterDraft::new("Mira", "Smuggler")
//!             .motivation("Buy back her ship")
//!             .personality(Personality::new(4, 2, 4, 2, 3)?)
//!             .build()?,
//!     )?;
//!
//!     let mut advisor = AdviceSynthesizer::from_config(&config.advice);
//!     let advice = advisor.synthesize("What plot could unfold?", store.list()).await;
//!     println!("{}", advice);
//!
//!     let stats = summarize(store.list());
//!     println!("{} entries, {} insights", stats.total_entries, stats.insights.len());
//!
//!     Ok(())
//! }
//! ```

pub mod advice;
pub mod analytics;
pub mod config;
pub mod entries;
pub mod personality;
pub mod search;

// Re-export top-level types for convenience
pub use entries::{
    CharacterDraft, EntryError, EntryId, EntryKind, EntryPatch, EntryResult, EntryStore,
    JsonSnapshotFile, Personality, ProjectEntry, SnapshotError, SnapshotSink, WorldDraft,
    WorldType,
};

pub use personality::analyze_personality;

pub use search::{filter_entries, TypeFilter};

pub use advice::{AdviceKind, AdviceRecord, AdviceSynthesizer, SUGGESTED_QUERIES};

pub use analytics::{summarize, summarize_at, ProjectStats, TraitAverages};

pub use config::{generate_default_config, Config, ConfigError};
