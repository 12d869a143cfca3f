use super::traits::RoleStore;
use crate::{
    errors::StorageError,
    types::{Commitment, RoleValue},
};
use std::collections::HashMap;

#[derive(Default, Clone, Debug)]
pub struct InMemoryRoleStore {
    db: HashMap<Commitment, RoleValue>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoleStore for InMemoryRoleStore {
    fn get(&self, commitment: &Commitment) -> Result<Option<RoleValue>, StorageError> {
        Ok(self.db.get(commitment).copied())
    }

    fn put(&mut self, value: RoleValue) -> Result<(), StorageError> {
        self.db.insert(value.commitment, value);
        Ok(())
    }

    fn remove(&mut self, commitment: &Commitment) -> Result<Option<RoleValue>, StorageError> {
        Ok(self.db.remove(commitment))
    }

    fn len(&self) -> usize {
        self.db.len()
    }

    fn values(&self) -> Result<Vec<RoleValue>, StorageError> {
        let mut values: Vec<RoleValue> = self.db.values().copied().collect();
        values.sort_by_key(|value| value.index);
        Ok(values)
    }
}
