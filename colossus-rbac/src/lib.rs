//! # Colossus RBAC
//!
//! A role registry that publishes only commitments.
//!
//! Each (identity, role) pair is bound into a 32-byte commitment and written
//! at a stable leaf of a fixed-depth Merkle tree. The tree root is public; the
//! plaintext role records stay with the controller. Revoked leaves are
//! recycled through a FIFO queue, so the tree never grows past its capacity.
//!
//! # Quick Start
//!
//! ```ignore
//! use colossus_rbac::prelude::*;
//!
//! type TC = Blake3Configuration<ExampleLabel>;
//!
//! let registry = AccessControl::<TC>::new(RegistrySettings::default())?;
//! registry.initialize(Identity::from("admin"))?;
//!
//! let lp = registry.grant_role(&Identity::from("alice"), Role::Lp, &Identity::from("admin"))?;
//! let path = registry.query_membership_path(lp.index)?;
//! assert!(path.verify::<TC>(&lp.commitment, &registry.query_root()?));
//! ```
//!
//! # Modules
//!
//! - [`access_control`]: the registry and its grant, revoke and query operations
//! - [`tree`]: the bounded commitment tree and membership paths
//! - [`allocator`]: leaf index allocation with FIFO reuse
//! - [`storage`]: the controller-private commitment store
//! - [`configuration`]: hashing rules shared by prover and verifier

extern crate alloc;

pub mod access_control;

/// Monotonic leaf counter plus a queue of released indices
pub mod allocator;

pub mod configuration;

/// Hash providers (BLAKE3, SHA3-256) used by the configurations
pub mod crypto;

pub mod errors;

pub mod settings;

pub mod storage;

pub mod tree;

pub mod types;

pub mod utils;

/// Re-exported logging macros from tracing
pub mod log {
    pub use tracing::{debug, error, info, trace, warn};
}

/// Prelude module for convenient imports.
///
/// ```ignore
/// use colossus_rbac::prelude::*;
/// ```
pub mod prelude {
    pub use crate::access_control::{
        AccessControl, AccessControlState, ControllerSnapshot, commit,
    };
    pub use crate::configuration::{
        Blake3Configuration, Configuration, DomainLabel, ExampleLabel, Sha3Configuration,
    };
    pub use crate::errors::AccessControlError;
    pub use crate::settings::RegistrySettings;
    pub use crate::storage::{InMemoryRoleStore, RoleStore};
    pub use crate::tree::{CommitmentTree, MerklePath};
    pub use crate::types::{Commitment, Identity, Role, RoleValue};
}

#[cfg(test)]
mod test_utils;
