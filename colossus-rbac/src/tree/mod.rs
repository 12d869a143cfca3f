//! Fixed-depth Merkle tree of role commitments.
//!
//! Leaves live at stable indices `0..2^depth`. A leaf that was never written
//! holds [`Configuration::empty_leaf_value`]; a written leaf holds
//! [`Configuration::hash_leaf`] of its commitment. Only nodes on written
//! paths are stored, every other node is the default hash of an empty
//! subtree at that level.
//!
//! ```text
//!                 root (level = depth)
//!               /                     \
//!          node                         node
//!        /      \                     /      \
//!    leaf 0   leaf 1   ...        leaf CAP-2  leaf CAP-1   (level 0)
//! ```

mod path;

pub use path::MerklePath;

use crate::{
    configuration::Configuration,
    crypto::Digest,
    errors::TreeError,
    types::Commitment,
    utils::capacity_for_depth,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    collections::{BTreeMap, HashMap},
    marker::PhantomData,
};
use subtle::ConstantTimeEq;

pub const MIN_TREE_DEPTH: u8 = 1;

pub const MAX_TREE_DEPTH: u8 = 32;

pub const DEFAULT_TREE_DEPTH: u8 = 10;

/// Position of a stored node: `(level, index within level)`.
type NodeKey = (u8, u64);

pub struct CommitmentTree<TC> {
    depth: u8,
    leaves: BTreeMap<u64, Commitment>,
    nodes: HashMap<NodeKey, Digest>,
    empty_hashes: Vec<Digest>,
    root: Digest,
    _tc: PhantomData<TC>,
}

impl<TC> Clone for CommitmentTree<TC> {
    fn clone(&self) -> Self {
        Self {
            depth: self.depth,
            leaves: self.leaves.clone(),
            nodes: self.nodes.clone(),
            empty_hashes: self.empty_hashes.clone(),
            root: self.root,
            _tc: PhantomData,
        }
    }
}

impl<TC> std::fmt::Debug for CommitmentTree<TC> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitmentTree")
            .field("depth", &self.depth)
            .field("leaves_written", &self.leaves.len())
            .field("root", &hex::encode(self.root))
            .finish()
    }
}

impl<TC: Configuration> CommitmentTree<TC> {
    pub fn new(depth: u8) -> Result<Self, TreeError> {
        if !(MIN_TREE_DEPTH..=MAX_TREE_DEPTH).contains(&depth) {
            return Err(TreeError::InvalidDepth {
                depth,
                min: MIN_TREE_DEPTH,
                max: MAX_TREE_DEPTH,
            });
        }

        let mut empty_hashes = Vec::with_capacity(depth as usize + 1);
        empty_hashes.push(TC::empty_leaf_value());
        for level in 0..depth as usize {
            let below = empty_hashes[level];
            empty_hashes.push(TC::compute_parent_hash_from_children(&below, &below));
        }
        let root = empty_hashes[depth as usize];

        Ok(Self {
            depth,
            leaves: BTreeMap::new(),
            nodes: HashMap::new(),
            empty_hashes,
            root,
            _tc: PhantomData,
        })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn capacity(&self) -> u64 {
        capacity_for_depth(self.depth)
    }

    /// Number of distinct indices that have ever been written.
    pub fn leaves_written(&self) -> usize {
        self.leaves.len()
    }

    fn check_index(&self, index: u64) -> Result<(), TreeError> {
        if index >= self.capacity() {
            return Err(TreeError::IndexOutOfRange { index, capacity: self.capacity() });
        }
        Ok(())
    }

    fn node(&self, level: u8, index: u64) -> Digest {
        self.nodes.get(&(level, index)).copied().unwrap_or(self.empty_hashes[level as usize])
    }

    /// Writes `commitment` at `index`, replacing whatever was there, and
    /// rehashes the path up to the root.
    pub fn insert(&mut self, index: u64, commitment: Commitment) -> Result<(), TreeError> {
        self.check_index(index)?;

        let mut position = index;
        let mut current = TC::hash_leaf(&commitment);
        self.nodes.insert((0, position), current);

        for level in 0..self.depth {
            let sibling = self.node(level, position ^ 1);
            current = if position & 1 == 0 {
                TC::compute_parent_hash_from_children(&current, &sibling)
            } else {
                TC::compute_parent_hash_from_children(&sibling, &current)
            };
            position >>= 1;
            self.nodes.insert((level + 1, position), current);
        }

        self.leaves.insert(index, commitment);
        self.root = current;
        Ok(())
    }

    pub fn root(&self) -> Digest {
        self.root
    }

    pub fn check_root(&self, candidate: &Digest) -> bool {
        self.root[..].ct_eq(&candidate[..]).into()
    }

    /// The commitment last written at `index`, if any. Revoked commitments
    /// stay here until the index is reused.
    pub fn leaf(&self, index: u64) -> Option<Commitment> {
        self.leaves.get(&index).copied()
    }

    pub fn leaves(&self) -> impl Iterator<Item = (u64, Commitment)> + '_ {
        self.leaves.iter().map(|(index, commitment)| (*index, *commitment))
    }

    pub fn find_path_for_leaf(&self, index: u64) -> Result<MerklePath, TreeError> {
        self.check_index(index)?;

        let mut position = index;
        let mut siblings = Vec::with_capacity(self.depth as usize);
        for level in 0..self.depth {
            siblings.push(self.node(level, position ^ 1));
            position >>= 1;
        }
        Ok(MerklePath { index, siblings })
    }

    /// Rebuilds the root from the leaves alone, ignoring cached nodes.
    pub fn recompute_root(&self) -> Digest {
        let mut level_nodes: BTreeMap<u64, Digest> = self
            .leaves
            .iter()
            .map(|(index, commitment)| (*index, TC::hash_leaf(commitment)))
            .collect();

        for level in 0..self.depth as usize {
            let empty = self.empty_hashes[level];
            let mut parents = BTreeMap::new();
            for position in level_nodes.keys() {
                let parent = position >> 1;
                if parents.contains_key(&parent) {
                    continue;
                }
                let left = level_nodes.get(&(parent << 1)).unwrap_or(&empty);
                let right = level_nodes.get(&((parent << 1) | 1)).unwrap_or(&empty);
                parents.insert(parent, TC::compute_parent_hash_from_children(left, right));
            }
            level_nodes = parents;
        }

        level_nodes.get(&0).copied().unwrap_or(self.empty_hashes[self.depth as usize])
    }

    fn from_record(record: TreeRecord) -> Result<Self, TreeError> {
        let mut tree = Self::new(record.depth)?;
        for (index, commitment) in record.leaves {
            tree.insert(index, commitment)?;
        }
        Ok(tree)
    }
}

/// Serialized form of a tree: its depth and written leaves. Internal nodes
/// are recomputed on load.
#[derive(Serialize, Deserialize)]
struct TreeRecord {
    depth: u8,
    leaves: Vec<(u64, Commitment)>,
}

impl<TC: Configuration> Serialize for CommitmentTree<TC> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TreeRecord { depth: self.depth, leaves: self.leaves().collect() }.serialize(serializer)
    }
}

impl<'de, TC: Configuration> Deserialize<'de> for CommitmentTree<TC> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = TreeRecord::deserialize(deserializer)?;
        Self::from_record(record).map_err(serde::de::Error::custom)
    }
}
