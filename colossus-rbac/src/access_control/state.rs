use crate::{
    configuration::Configuration,
    errors::{AccessControlError, TreeError},
    tree::CommitmentTree,
    types::Identity,
};
use serde::{Deserialize, Serialize};

/// The public half of the registry: everything a verifier may see.
///
/// `index` mirrors the allocator counter, the number of leaf indices ever
/// handed out. The free queue and the plaintext roles are deliberately not
/// part of this record.
#[derive(Serialize, Deserialize)]
#[serde(bound = "TC: Configuration")]
pub struct AccessControlState<TC> {
    pub admin: Option<Identity>,

    pub is_initialized: bool,

    pub index: u64,

    pub commitment_tree: CommitmentTree<TC>,
}

impl<TC: Configuration> AccessControlState<TC> {
    pub(crate) fn new(depth: u8) -> Result<Self, TreeError> {
        Ok(Self {
            admin: None,
            is_initialized: false,
            index: 0,
            commitment_tree: CommitmentTree::new(depth)?,
        })
    }

    pub fn root(&self) -> crate::crypto::Digest {
        self.commitment_tree.root()
    }

    pub fn to_json(&self) -> Result<String, AccessControlError> {
        serde_json::to_string(self).map_err(|e| AccessControlError::Restore(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, AccessControlError> {
        serde_json::from_str(json).map_err(|e| AccessControlError::Restore(e.to_string()))
    }
}

impl<TC> Clone for AccessControlState<TC> {
    fn clone(&self) -> Self {
        Self {
            admin: self.admin.clone(),
            is_initialized: self.is_initialized,
            index: self.index,
            commitment_tree: self.commitment_tree.clone(),
        }
    }
}

impl<TC> std::fmt::Debug for AccessControlState<TC> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessControlState")
            .field("admin", &self.admin)
            .field("is_initialized", &self.is_initialized)
            .field("index", &self.index)
            .field("commitment_tree", &self.commitment_tree)
            .finish()
    }
}
