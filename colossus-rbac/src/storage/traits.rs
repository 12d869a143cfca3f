use crate::{
    errors::StorageError,
    types::{Commitment, RoleValue},
};

/// Storage for the controller's `Commitment -> RoleValue` mapping.
///
/// The registry calls these methods while holding its write lock, so
/// implementations need no synchronization of their own and must not block
/// on outside work.
#[cfg_attr(test, mockall::automock)]
pub trait RoleStore: Send + Sync {
    fn get(&self, commitment: &Commitment) -> Result<Option<RoleValue>, StorageError>;

    fn put(&mut self, value: RoleValue) -> Result<(), StorageError>;

    /// Removes and returns the value, if present.
    fn remove(&mut self, commitment: &Commitment) -> Result<Option<RoleValue>, StorageError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored values ordered by leaf index.
    fn values(&self) -> Result<Vec<RoleValue>, StorageError>;
}
