//! Snapshot handles
//!
//! The host owns the save file and exposes its progress data in one of two
//! storage shapes. Older titles keep event flags in a dense bit array indexed
//! by flag number; newer ones keep a store of typed blocks keyed by a 32-bit
//! hash, where boolean flags are blocks whose *type* encodes the value.
//!
//! The two shapes are kept apart. A title uses exactly one of
//! them and the choice is made once, when its organizer is created.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Dense event flag array
pub trait EventFlagArray {
    /// Number of flags in the array
    fn len(&self) -> usize;

    /// Read flag `index`. Only called with `index < len()`.
    fn get(&self, index: usize) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type tag of a block in a keyed block store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// Boolean block holding false
    Bool1,
    /// Boolean block holding true
    Bool2,
    /// Any non-boolean block, with its raw type code
    Other(u8),
}

impl BlockType {
    /// Boolean value of the block, or `None` if it is not a boolean block
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BlockType::Bool1 => Some(false),
            BlockType::Bool2 => Some(true),
            BlockType::Other(_) => None,
        }
    }
}

/// Keyed store of typed blocks
pub trait BlockStore {
    /// Every key in the store
    fn keys(&self) -> Vec<u32>;

    /// Type of the block stored under `key`
    fn block_type(&self, key: u32) -> Option<BlockType>;
}

/// Which storage shape a snapshot exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageModel {
    Dense,
    Keyed,
}

impl fmt::Display for StorageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageModel::Dense => f.write_str("dense"),
            StorageModel::Keyed => f.write_str("keyed"),
        }
    }
}

/// Read-only handle to a title's progress data
pub enum Snapshot {
    Dense(Box<dyn EventFlagArray>),
    Keyed(Box<dyn BlockStore>),
}

impl Snapshot {
    /// Wrap a dense flag array
    pub fn dense(flags: impl EventFlagArray + 'static) -> Self {
        Snapshot::Dense(Box::new(flags))
    }

    /// Wrap a keyed block store
    pub fn keyed(blocks: impl BlockStore + 'static) -> Self {
        Snapshot::Keyed(Box::new(blocks))
    }

    /// Storage shape of this snapshot
    pub fn model(&self) -> StorageModel {
        match self {
            Snapshot::Dense(_) => StorageModel::Dense,
            Snapshot::Keyed(_) => StorageModel::Keyed,
        }
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::Dense(flags) => f.debug_struct("Dense").field("len", &flags.len()).finish(),
            Snapshot::Keyed(blocks) => f
                .debug_struct("Keyed")
                .field("blocks", &blocks.keys().len())
                .finish(),
        }
    }
}

// =============================================================================
// In-memory implementations
// =============================================================================

impl EventFlagArray for Vec<bool> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> bool {
        self[index]
    }
}

impl BlockStore for BTreeMap<u32, BlockType> {
    fn keys(&self) -> Vec<u32> {
        BTreeMap::keys(self).copied().collect()
    }

    fn block_type(&self, key: u32) -> Option<BlockType> {
        self.get(&key).copied()
    }
}

impl BlockStore for HashMap<u32, BlockType> {
    fn keys(&self) -> Vec<u32> {
        HashMap::keys(self).copied().collect()
    }

    fn block_type(&self, key: u32) -> Option<BlockType> {
        self.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_as_bool() {
        assert_eq!(BlockType::Bool1.as_bool(), Some(false));
        assert_eq!(BlockType::Bool2.as_bool(), Some(true));
        assert_eq!(BlockType::Other(8).as_bool(), None);
    }

    #[test]
    fn test_snapshot_model() {
        let dense = Snapshot::dense(vec![false; 4]);
        assert_eq!(dense.model(), StorageModel::Dense);

        let keyed = Snapshot::keyed(BTreeMap::from([(7u32, BlockType::Bool2)]));
        assert_eq!(keyed.model(), StorageModel::Keyed);
    }

    #[test]
    fn test_btree_store_keys_sorted() {
        let store = BTreeMap::from([
            (9u32, BlockType::Bool1),
            (3u32, BlockType::Other(4)),
            (5u32, BlockType::Bool2),
        ]);
        assert_eq!(BlockStore::keys(&store), vec![3, 5, 9]);
        assert_eq!(store.block_type(5), Some(BlockType::Bool2));
        assert_eq!(store.block_type(6), None);
    }

    #[test]
    fn test_vec_flag_array() {
        let flags = vec![true, false, true];
        assert_eq!(EventFlagArray::len(&flags), 3);
        assert!(EventFlagArray::get(&flags, 2));
        assert!(!EventFlagArray::is_empty(&flags));
    }
}
