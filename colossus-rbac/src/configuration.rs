mod rbac;

use crate::{
    crypto::Digest,
    types::{Commitment, Identity, Role},
};
pub use rbac::{Blake3Configuration, RbacConfiguration, Sha3Configuration};

pub trait DomainLabel: Clone + Send + Sync + 'static {
    fn domain_label() -> &'static [u8];
}

#[derive(Clone)]
pub struct ExampleLabel;

impl DomainLabel for ExampleLabel {
    fn domain_label() -> &'static [u8] {
        "ExampleLabel".as_bytes()
    }
}

/// Hashing rules shared by the commitment hasher and the commitment tree.
///
/// A registry and every party verifying its paths must agree on the same
/// configuration, domain label included.
pub trait Configuration: Clone + Send + Sync + 'static {
    /// Short name of the hash backend, used in logs.
    fn name() -> &'static str;

    /// Binds an identity to a role. Identity bytes come first and are
    /// length-prefixed.
    fn commit(identity: &Identity, role: Role) -> Commitment;

    /// Value of a leaf that has never been written.
    fn empty_leaf_value() -> Digest;

    fn hash_leaf(commitment: &Commitment) -> Digest;

    fn compute_parent_hash_from_children(left: &Digest, right: &Digest) -> Digest;
}
