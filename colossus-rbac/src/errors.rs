//! Error types for the registry.
//!
//! [`AccessControlError`] is what every public operation returns. The four
//! outcomes a caller is expected to handle (`Unauthorized`, `DuplicateRole`,
//! `TreeFull`, `NoSuchRole`) are plain variants; the others wrap failures of
//! the tree, the private store, settings, or a snapshot restore.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessControlError {
    /// The caller is not the registry admin
    #[error("caller is not authorized to perform this operation")]
    Unauthorized,

    /// The (identity, role) pair is already active
    #[error("role is already granted to this identity")]
    DuplicateRole,

    #[error("commitment tree is full and no index is free to reuse")]
    TreeFull,

    /// The leaf at the supplied index does not hold the (identity, role) commitment
    #[error("no such role at the supplied index")]
    NoSuchRole,

    #[error("registry has not been initialized")]
    NotInitialized,

    #[error("registry is already initialized")]
    AlreadyInitialized,

    /// A thread panicked while holding the registry lock
    #[error("registry lock poisoned")]
    LockPoisoned,

    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// A persisted snapshot is inconsistent and cannot be restored
    #[error("cannot restore snapshot: {0}")]
    Restore(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree depth {depth} outside supported range {min}..={max}")]
    InvalidDepth { depth: u8, min: u8, max: u8 },

    #[error("leaf index {index} out of range for capacity {capacity}")]
    IndexOutOfRange { index: u64, capacity: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    NotFound(String),

    Other(String),
}

impl std::error::Error for StorageError {}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound(inner) => {
                write!(f, "Data not found: {inner}")
            },
            StorageError::Other(inner) => {
                write!(f, "Other storage error: {inner}")
            },
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid tree depth {0}")]
    InvalidDepth(u8),

    #[error("failed to parse settings: {0}")]
    Parse(String),

    #[error("failed to read settings file: {0}")]
    Io(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_full_message() {
        assert_eq!(
            AccessControlError::TreeFull.to_string(),
            "commitment tree is full and no index is free to reuse"
        );
    }

    #[test]
    fn test_wrapped_errors() {
        let err: AccessControlError = TreeError::IndexOutOfRange { index: 9, capacity: 4 }.into();
        assert_eq!(err.to_string(), "tree error: leaf index 9 out of range for capacity 4");

        let err: AccessControlError = StorageError::Other("disk".to_string()).into();
        assert_eq!(err.to_string(), "storage error: Other storage error: disk");
    }
}
