//! Registry settings.
//!
//! ```json
//! { "tree_depth": 10 }
//! ```
//!
//! Missing fields fall back to their defaults; unknown fields are rejected.

use crate::{
    errors::SettingsError,
    tree::{DEFAULT_TREE_DEPTH, MAX_TREE_DEPTH, MIN_TREE_DEPTH},
    utils::capacity_for_depth,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// Depth of the commitment tree; capacity is `2^tree_depth` leaves.
    pub tree_depth: u8,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self { tree_depth: DEFAULT_TREE_DEPTH }
    }
}

impl RegistrySettings {
    pub fn with_depth(tree_depth: u8) -> Result<Self, SettingsError> {
        let settings = Self { tree_depth };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_TREE_DEPTH..=MAX_TREE_DEPTH).contains(&self.tree_depth) {
            return Err(SettingsError::InvalidDepth(self.tree_depth));
        }
        Ok(())
    }

    pub fn capacity(&self) -> u64 {
        capacity_for_depth(self.tree_depth)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
