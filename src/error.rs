//! Error types for checklist construction and evaluation

use crate::snapshot::StorageModel;
use crate::version::GameVersion;

/// Result type for checklist operations
pub type Result<T> = std::result::Result<T, ChecklistError>;

/// Errors raised while loading, evaluating or exporting a checklist
#[derive(Debug, thiserror::Error)]
pub enum ChecklistError {
    /// A definition table line could not be parsed
    #[error("Malformed definition at line {line}: {reason}")]
    MalformedDefinition { line: usize, reason: String },

    /// A dense flag id lies outside the snapshot's flag array
    #[error("Flag 0x{flag_id:X} is out of range (snapshot holds {len} flags)")]
    IndexOutOfRange { flag_id: u32, len: usize },

    /// A keyed flag id has no block in the snapshot
    #[error("Flag 0x{flag_id:08X} has no block in the snapshot")]
    UnknownFlag { flag_id: u32 },

    /// The snapshot does not expose the storage model the title uses
    #[error("{title} expects a {expected} snapshot, got {found}")]
    StorageMismatch {
        title: GameVersion,
        expected: StorageModel,
        found: StorageModel,
    },

    /// An organizer operation ran before `initialize`
    #[error("Organizer used before initialize")]
    NotInitialized,

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("IO error on {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),
}

impl ChecklistError {
    /// Create a malformed definition error
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDefinition {
            line,
            reason: reason.into(),
        }
    }

    /// Create an IO error tagged with the resource or artifact name
    pub fn io(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            name: name.into(),
            source,
        }
    }
}
