//! The role registry.
//!
//! [`AccessControl`] keeps two halves in step behind one lock:
//!
//! - the public [`AccessControlState`]: admin, occupancy counter and the
//!   commitment tree whose root is published
//! - the controller-private ledger: the [`RoleStore`] mapping commitments to
//!   [`RoleValue`]s and the free-index queue of the [`IndexAllocator`]
//!
//! The two are linked only through commitments. Every mutating operation
//! validates first and mutates second, so a rejected call leaves both halves
//! untouched.
//!
//! # Usage
//!
//! ```ignore
//! use colossus_rbac::prelude::*;
//!
//! let registry = AccessControl::<Blake3Configuration<ExampleLabel>>::new(RegistrySettings::default())?;
//! registry.initialize(admin.clone())?;
//!
//! let granted = registry.grant_role(&alice, Role::Trader, &admin)?;
//! let path = registry.query_membership_path(granted.index)?;
//! assert!(path.verify::<Blake3Configuration<ExampleLabel>>(&granted.commitment, &registry.query_root()?));
//!
//! registry.revoke_role(&alice, Role::Trader, granted.index, &admin)?;
//! ```

mod snapshot;
mod state;

pub use snapshot::ControllerSnapshot;
pub use state::AccessControlState;

use crate::{
    allocator::IndexAllocator,
    configuration::Configuration,
    crypto::Digest,
    errors::{AccessControlError, StorageError},
    log::{debug, info, warn},
    settings::RegistrySettings,
    storage::{InMemoryRoleStore, RoleStore},
    tree::MerklePath,
    types::{Commitment, Identity, Role, RoleValue},
};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Commitment of `identity` holding `role` under configuration `TC`.
pub fn commit<TC: Configuration>(identity: &Identity, role: Role) -> Commitment {
    TC::commit(identity, role)
}

/// Everything guarded by the registry lock.
struct Ledger<TC, S> {
    state: AccessControlState<TC>,
    allocator: IndexAllocator,
    store: S,
}

impl<TC: Configuration, S: RoleStore> Ledger<TC, S> {
    fn authorize(&self, caller: &Identity) -> Result<(), AccessControlError> {
        if !self.state.is_initialized {
            return Err(AccessControlError::NotInitialized);
        }
        match &self.state.admin {
            Some(admin) if admin.ct_matches(caller) => Ok(()),
            _ => Err(AccessControlError::Unauthorized),
        }
    }

    /// Stores `value`, writes its leaf and advances the allocator. The
    /// index in `value` must be the allocator's next index.
    fn occupy(&mut self, value: RoleValue) -> Result<(), AccessControlError> {
        self.store.put(value)?;
        if let Err(e) = self.state.commitment_tree.insert(value.index, value.commitment) {
            self.store.remove(&value.commitment)?;
            return Err(e.into());
        }
        let allocated = self.allocator.allocate()?;
        debug_assert_eq!(allocated, value.index);
        self.state.index = self.allocator.counter();
        Ok(())
    }

    fn initialize(&mut self, admin: Identity) -> Result<RoleValue, AccessControlError> {
        if self.state.is_initialized {
            return Err(AccessControlError::AlreadyInitialized);
        }
        let commitment = TC::commit(&admin, Role::Admin);
        let index = self.allocator.peek()?;
        let value = RoleValue { role: Role::Admin, commitment, index };
        self.occupy(value)?;

        self.state.admin = Some(admin);
        self.state.is_initialized = true;
        Ok(value)
    }

    fn grant(
        &mut self,
        target: &Identity,
        role: Role,
        caller: &Identity,
    ) -> Result<RoleValue, AccessControlError> {
        self.authorize(caller)?;

        let commitment = TC::commit(target, role);
        if self.store.get(&commitment)?.is_some() {
            return Err(AccessControlError::DuplicateRole);
        }
        let index = self.allocator.peek()?;
        let value = RoleValue { role, commitment, index };
        self.occupy(value)?;
        Ok(value)
    }

    fn revoke(
        &mut self,
        target: &Identity,
        role: Role,
        index: u64,
        caller: &Identity,
    ) -> Result<(), AccessControlError> {
        self.authorize(caller)?;

        let commitment = TC::commit(target, role);
        let leaf_matches = self
            .state
            .commitment_tree
            .leaf(index)
            .is_some_and(|leaf| leaf.ct_matches(&commitment));
        if !leaf_matches {
            return Err(AccessControlError::NoSuchRole);
        }
        // a revoked leaf keeps its commitment until reuse, so the store
        // decides whether the role is still active at this index
        match self.store.get(&commitment)? {
            Some(value) if value.index == index => {}
            _ => return Err(AccessControlError::NoSuchRole),
        }

        self.store.remove(&commitment)?;
        self.allocator.release(index);
        Ok(())
    }
}

/// A thread-safe role registry.
///
/// Mutating operations take the write lock for their whole duration, so
/// they are applied one at a time. Queries share the read lock.
pub struct AccessControl<TC, S = InMemoryRoleStore> {
    settings: RegistrySettings,
    ledger: RwLock<Ledger<TC, S>>,
}

impl<TC: Configuration> AccessControl<TC, InMemoryRoleStore> {
    pub fn new(settings: RegistrySettings) -> Result<Self, AccessControlError> {
        Self::with_store(settings, InMemoryRoleStore::new())
    }

    /// Rebuilds a registry from an exported public state and controller
    /// snapshot.
    pub fn restore(
        settings: RegistrySettings,
        public: AccessControlState<TC>,
        private: ControllerSnapshot,
    ) -> Result<Self, AccessControlError> {
        Self::restore_with_store(settings, public, private, InMemoryRoleStore::new())
    }
}

impl<TC: Configuration, S: RoleStore> AccessControl<TC, S> {
    /// Creates an uninitialized registry over `store`. The store must be
    /// empty.
    pub fn with_store(settings: RegistrySettings, store: S) -> Result<Self, AccessControlError> {
        settings.validate()?;
        if !store.is_empty() {
            return Err(StorageError::Other("role store is not empty".to_string()).into());
        }
        let state = AccessControlState::new(settings.tree_depth)?;
        let allocator = IndexAllocator::new(settings.capacity());
        info!(
            "Created {} role registry with depth {} (capacity {})",
            TC::name(),
            settings.tree_depth,
            settings.capacity()
        );
        Ok(Self { settings, ledger: RwLock::new(Ledger { state, allocator, store }) })
    }

    pub fn restore_with_store(
        settings: RegistrySettings,
        public: AccessControlState<TC>,
        private: ControllerSnapshot,
        mut store: S,
    ) -> Result<Self, AccessControlError> {
        settings.validate()?;
        if public.commitment_tree.depth() != settings.tree_depth {
            return Err(AccessControlError::Restore(format!(
                "tree depth {} does not match configured depth {}",
                public.commitment_tree.depth(),
                settings.tree_depth
            )));
        }
        if !store.is_empty() {
            return Err(AccessControlError::Restore("role store is not empty".to_string()));
        }
        private.validate_against(&public)?;

        for value in &private.roles {
            store.put(*value)?;
        }
        let allocator =
            IndexAllocator::from_parts(public.index, settings.capacity(), private.free_queue.into());
        info!(
            "Restored role registry: {} active roles, {} free indices, counter {}",
            private.roles.len(),
            allocator.free_len(),
            allocator.counter()
        );
        Ok(Self { settings, ledger: RwLock::new(Ledger { state: public, allocator, store }) })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger<TC, S>>, AccessControlError> {
        self.ledger.read().map_err(|_| AccessControlError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger<TC, S>>, AccessControlError> {
        self.ledger.write().map_err(|_| AccessControlError::LockPoisoned)
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Sets `admin` as the sole administrator and grants it [`Role::Admin`]
    /// at the first leaf index.
    #[tracing::instrument(skip_all)]
    pub fn initialize(&self, admin: Identity) -> Result<AccessControlState<TC>, AccessControlError> {
        let mut ledger = self.write()?;
        let value = ledger.initialize(admin)?;
        info!(
            "Initialized registry, admin role committed at index {} ({})",
            value.index, value.commitment
        );
        Ok(ledger.state.clone())
    }

    /// Commits `role` for `target` into the tree. Only the admin may grant.
    ///
    /// Freed indices are reused before fresh ones. Returns the stored record,
    /// whose `index` the caller needs to revoke the role later.
    #[tracing::instrument(skip_all, fields(role = %role))]
    pub fn grant_role(
        &self,
        target: &Identity,
        role: Role,
        caller: &Identity,
    ) -> Result<RoleValue, AccessControlError> {
        let mut ledger = self.write()?;
        match ledger.grant(target, role, caller) {
            Ok(value) => {
                info!(
                    "Granted {role} at index {} (counter {}): {}",
                    value.index, ledger.state.index, value.commitment
                );
                Ok(value)
            }
            Err(AccessControlError::Unauthorized) => {
                warn!("Rejected grant of {role} from non-admin caller");
                Err(AccessControlError::Unauthorized)
            }
            Err(e) => {
                debug!("Grant of {role} failed: {e}");
                Err(e)
            }
        }
    }

    /// Releases the index holding `target`'s `role`. The leaf itself is not
    /// cleared; it is overwritten when the index is reused.
    #[tracing::instrument(skip_all, fields(role = %role, index = index))]
    pub fn revoke_role(
        &self,
        target: &Identity,
        role: Role,
        index: u64,
        caller: &Identity,
    ) -> Result<(), AccessControlError> {
        let mut ledger = self.write()?;
        match ledger.revoke(target, role, index, caller) {
            Ok(()) => {
                info!("Revoked {role} at index {index}, {} indices free", ledger.allocator.free_len());
                Ok(())
            }
            Err(AccessControlError::Unauthorized) => {
                warn!("Rejected revoke of {role} from non-admin caller");
                Err(AccessControlError::Unauthorized)
            }
            Err(e) => {
                debug!("Revoke of {role} at index {index} failed: {e}");
                Err(e)
            }
        }
    }

    pub fn query_root(&self) -> Result<Digest, AccessControlError> {
        Ok(self.read()?.state.commitment_tree.root())
    }

    /// True iff every index has been handed out at least once. A full
    /// tree may still accept grants while freed indices remain.
    pub fn query_is_full(&self) -> Result<bool, AccessControlError> {
        Ok(self.read()?.allocator.is_exhausted())
    }

    pub fn query_membership_path(&self, index: u64) -> Result<MerklePath, AccessControlError> {
        Ok(self.read()?.state.commitment_tree.find_path_for_leaf(index)?)
    }

    pub fn check_root(&self, candidate: &Digest) -> Result<bool, AccessControlError> {
        Ok(self.read()?.state.commitment_tree.check_root(candidate))
    }

    /// The active record for `identity` holding `role`, if any.
    pub fn query_role(
        &self,
        identity: &Identity,
        role: Role,
    ) -> Result<Option<RoleValue>, AccessControlError> {
        let commitment = TC::commit(identity, role);
        Ok(self.read()?.store.get(&commitment)?)
    }

    pub fn public_state(&self) -> Result<AccessControlState<TC>, AccessControlError> {
        Ok(self.read()?.state.clone())
    }

    pub fn admin(&self) -> Result<Option<Identity>, AccessControlError> {
        Ok(self.read()?.state.admin.clone())
    }

    pub fn is_initialized(&self) -> Result<bool, AccessControlError> {
        Ok(self.read()?.state.is_initialized)
    }

    pub fn counter(&self) -> Result<u64, AccessControlError> {
        Ok(self.read()?.allocator.counter())
    }

    pub fn free_indices(&self) -> Result<Vec<u64>, AccessControlError> {
        Ok(self.read()?.allocator.free_indices().collect())
    }

    pub fn active_roles(&self) -> Result<Vec<RoleValue>, AccessControlError> {
        Ok(self.read()?.store.values()?)
    }

    /// Both halves of the registry, taken under one read lock.
    pub fn export(&self) -> Result<(AccessControlState<TC>, ControllerSnapshot), AccessControlError> {
        let ledger = self.read()?;
        let private = ControllerSnapshot {
            free_queue: ledger.allocator.free_indices().collect(),
            roles: ledger.store.values()?,
        };
        Ok((ledger.state.clone(), private))
    }
}
