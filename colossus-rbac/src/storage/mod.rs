//! The controller's private role store.
//!
//! Maps a [`Commitment`](crate::types::Commitment) to the plaintext
//! [`RoleValue`](crate::types::RoleValue) behind it. Nothing in here is part
//! of the public state; the tree only ever sees commitments.

pub mod memory;
pub mod traits;

pub use memory::InMemoryRoleStore;
pub use traits::RoleStore;
