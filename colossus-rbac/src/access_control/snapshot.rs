use crate::{
    configuration::Configuration,
    errors::AccessControlError,
    types::RoleValue,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::state::AccessControlState;

/// The controller-private half of the registry.
///
/// Holds the plaintext role records and the free-index queue. Together
/// with an [`AccessControlState`] this is everything needed to rebuild an
/// [`AccessControl`](super::AccessControl).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    /// Released indices, front of the queue first.
    pub free_queue: Vec<u64>,

    /// Active roles, ordered by leaf index.
    pub roles: Vec<RoleValue>,
}

impl ControllerSnapshot {
    pub fn to_json(&self) -> Result<String, AccessControlError> {
        serde_json::to_string(self).map_err(|e| AccessControlError::Restore(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, AccessControlError> {
        serde_json::from_str(json).map_err(|e| AccessControlError::Restore(e.to_string()))
    }

    /// Checks that this snapshot and `public` describe one consistent
    /// registry.
    pub(crate) fn validate_against<TC: Configuration>(
        &self,
        public: &AccessControlState<TC>,
    ) -> Result<(), AccessControlError> {
        let tree = &public.commitment_tree;
        let counter = public.index;

        if counter > tree.capacity() {
            return Err(restore_error(format!(
                "counter {counter} exceeds capacity {}",
                tree.capacity()
            )));
        }
        if public.is_initialized != public.admin.is_some() {
            return Err(restore_error("admin must be present exactly when initialized"));
        }
        if !public.is_initialized && (counter != 0 || tree.leaves_written() != 0) {
            return Err(restore_error("uninitialized registry has allocated leaves"));
        }
        if let Some((index, _)) = tree.leaves().find(|(index, _)| *index >= counter) {
            return Err(restore_error(format!("leaf {index} written beyond counter {counter}")));
        }

        let mut free = HashSet::with_capacity(self.free_queue.len());
        for index in &self.free_queue {
            if *index >= counter {
                return Err(restore_error(format!("free index {index} was never allocated")));
            }
            if !free.insert(*index) {
                return Err(restore_error(format!("free index {index} queued twice")));
            }
        }

        let mut held: HashMap<u64, &RoleValue> = HashMap::with_capacity(self.roles.len());
        let mut commitments = HashSet::with_capacity(self.roles.len());
        for value in &self.roles {
            if value.index >= counter || free.contains(&value.index) {
                return Err(restore_error(format!("role at index {} is not allocated", value.index)));
            }
            if held.insert(value.index, value).is_some() {
                return Err(restore_error(format!("index {} held by two roles", value.index)));
            }
            if !commitments.insert(value.commitment) {
                return Err(restore_error(format!("commitment {} stored twice", value.commitment)));
            }
            let matches = tree.leaf(value.index).is_some_and(|leaf| leaf.ct_matches(&value.commitment));
            if !matches {
                return Err(restore_error(format!("leaf {} does not match its role", value.index)));
            }
        }

        if (held.len() + free.len()) as u64 != counter {
            return Err(restore_error(format!(
                "{} active and {} free indices do not account for counter {counter}",
                held.len(),
                free.len()
            )));
        }
        Ok(())
    }
}

fn restore_error(reason: impl Into<String>) -> AccessControlError {
    AccessControlError::Restore(reason.into())
}
