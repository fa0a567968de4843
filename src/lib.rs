//! Event Checklist
//!
//! Tracks completion of a title's in-game objectives (item pickups, battles,
//! trades, story beats) against a snapshot of its saved progress flags.
//!
//! For each supported title the engine:
//! - picks the organizer that understands the title's flag storage
//! - loads the title's objective definitions (or enumerates them in code)
//! - evaluates every objective against the snapshot
//! - renders sorted reports: full checklist, missing-only list, raw flag dump
//!
//! Two storage shapes exist: a dense boolean flag array and a keyed store of
//! typed blocks. They are kept separate; each title uses exactly one.
//!
//! ```no_run
//! use event_checklist::{CheckerConfig, FlagsOrganizer, GameVersion, Snapshot};
//!
//! # fn main() -> event_checklist::Result<()> {
//! let config = CheckerConfig::default();
//! let registry = config.build_registry();
//! let writer = config.artifact_writer();
//!
//! let flags = vec![false; 0x2000];
//! if let Some(mut organizer) = registry.organize_flags(GameVersion::HGSS, Snapshot::dense(flags))? {
//!     organizer.export_missing(&writer)?;
//!     organizer.export_checklist(&writer)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod definitions;
pub mod error;
pub mod evaluator;
pub mod objective;
pub mod organizers;
pub mod report;
pub mod resources;
pub mod snapshot;
pub mod version;

// Re-export commonly used types
pub use config::CheckerConfig;
pub use error::{ChecklistError, Result};
pub use evaluator::{CompletionEvaluator, DenseEvaluator, KeyedEvaluator, SourceKind};
pub use objective::{Objective, ObjectiveCategory};
pub use organizers::{
    BoxedOrganizer, EvaluationMode, FlagsOrganizer, OrganizerFactory, OrganizerRegistry,
    TitleProfile,
};
pub use report::ChecklistSummary;
pub use resources::{ArtifactWriter, InMemoryResources, ResourceCache, ResourceLoader};
pub use snapshot::{BlockStore, BlockType, EventFlagArray, Snapshot, StorageModel};
pub use version::GameVersion;
