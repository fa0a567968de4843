//! Completion predicates
//!
//! Answers "is this objective complete?" for a flag id against a snapshot.
//! Each storage shape gets its own evaluator; the organizer picks one when
//! it binds its snapshot and never re-checks the shape afterwards.

use crate::error::{ChecklistError, Result};
use crate::snapshot::{BlockStore, BlockType, EventFlagArray, Snapshot, StorageModel};

/// Sub-format of a keyed flag.
///
/// Keyed titles store progress in several kinds of blocks, not all of them
/// boolean. Only boolean blocks are evaluated; the rest report incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A boolean block whose type tag is the flag value
    BoolBlock,
    /// A sub-format that is not evaluated yet
    Unimplemented,
}

impl SourceKind {
    /// Parse the source column of a keyed definition table.
    ///
    /// `0` or blank is a boolean block. Every other token names a sub-format
    /// that is not evaluated.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "" | "0" => SourceKind::BoolBlock,
            _ => SourceKind::Unimplemented,
        }
    }
}

/// Evaluator over a dense flag array
pub struct DenseEvaluator<'a> {
    flags: &'a dyn EventFlagArray,
}

impl<'a> DenseEvaluator<'a> {
    pub fn new(flags: &'a dyn EventFlagArray) -> Self {
        Self { flags }
    }

    /// Flag value at `flag_id`.
    ///
    /// An id past the end of the array means the definition table does not
    /// belong to this snapshot.
    pub fn is_complete(&self, flag_id: u32) -> Result<bool> {
        let len = self.flags.len();
        match usize::try_from(flag_id) {
            Ok(index) if index < len => Ok(self.flags.get(index)),
            _ => Err(ChecklistError::IndexOutOfRange { flag_id, len }),
        }
    }
}

/// Evaluator over a keyed block store
pub struct KeyedEvaluator<'a> {
    blocks: &'a dyn BlockStore,
}

impl<'a> KeyedEvaluator<'a> {
    pub fn new(blocks: &'a dyn BlockStore) -> Self {
        Self { blocks }
    }

    /// Completion of block `flag_id` read as `source`.
    ///
    /// A boolean block is complete only when its tag is `Bool2`. A key that
    /// is missing from the store is an error rather than "incomplete".
    pub fn is_complete(&self, flag_id: u32, source: SourceKind) -> Result<bool> {
        match source {
            SourceKind::BoolBlock => match self.blocks.block_type(flag_id) {
                Some(block_type) => Ok(block_type == BlockType::Bool2),
                None => Err(ChecklistError::UnknownFlag { flag_id }),
            },
            SourceKind::Unimplemented => Ok(false),
        }
    }
}

/// Evaluator matching a snapshot's storage shape
pub enum CompletionEvaluator<'a> {
    Dense(DenseEvaluator<'a>),
    Keyed(KeyedEvaluator<'a>),
}

impl<'a> CompletionEvaluator<'a> {
    /// Build the evaluator for a snapshot
    pub fn for_snapshot(snapshot: &'a Snapshot) -> Self {
        match snapshot {
            Snapshot::Dense(flags) => CompletionEvaluator::Dense(DenseEvaluator::new(flags.as_ref())),
            Snapshot::Keyed(blocks) => CompletionEvaluator::Keyed(KeyedEvaluator::new(blocks.as_ref())),
        }
    }

    pub fn model(&self) -> StorageModel {
        match self {
            CompletionEvaluator::Dense(_) => StorageModel::Dense,
            CompletionEvaluator::Keyed(_) => StorageModel::Keyed,
        }
    }

    /// Evaluate a flag. Dense snapshots have a single sub-format, so `source`
    /// only matters for keyed ones.
    pub fn is_complete(&self, flag_id: u32, source: SourceKind) -> Result<bool> {
        match self {
            CompletionEvaluator::Dense(dense) => dense.is_complete(flag_id),
            CompletionEvaluator::Keyed(keyed) => keyed.is_complete(flag_id, source),
        }
    }
}
