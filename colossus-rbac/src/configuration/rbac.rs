use super::{Configuration, DomainLabel};
use crate::{
    crypto::{Blake3Hash, Digest, EMPTY_DIGEST, HashProvider, Sha3_256Hash},
    types::{Commitment, Identity, Role},
    utils::i2osp_array,
};
use core::marker::PhantomData;

const COMMIT_TAG: &[u8] = b"rbac:commit";
const LEAF_TAG: &[u8] = b"rbac:leaf";
const NODE_TAG: &[u8] = b"rbac:node";

pub struct RbacConfiguration<H, L>(PhantomData<fn() -> (H, L)>);

pub type Blake3Configuration<L> = RbacConfiguration<Blake3Hash, L>;

pub type Sha3Configuration<L> = RbacConfiguration<Sha3_256Hash, L>;

impl<H, L> Clone for RbacConfiguration<H, L> {
    fn clone(&self) -> Self {
        Self(PhantomData)
    }
}

impl<H: HashProvider + 'static, L: DomainLabel> RbacConfiguration<H, L> {
    fn hash_tagged(tag: &[u8], parts: &[&[u8]]) -> Digest {
        let mut hasher = H::new_hasher();
        hasher.update(L::domain_label());
        hasher.update(tag);
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize()
    }
}

impl<H: HashProvider + 'static, L: DomainLabel> Configuration for RbacConfiguration<H, L> {
    fn name() -> &'static str {
        H::NAME
    }

    fn commit(identity: &Identity, role: Role) -> Commitment {
        let encoded_identity = i2osp_array(identity.as_bytes());
        let role_byte = [role.as_byte()];
        Commitment(Self::hash_tagged(COMMIT_TAG, &[encoded_identity.as_slice(), &role_byte[..]]))
    }

    fn empty_leaf_value() -> Digest {
        EMPTY_DIGEST
    }

    fn hash_leaf(commitment: &Commitment) -> Digest {
        Self::hash_tagged(LEAF_TAG, &[&commitment.as_bytes()[..]])
    }

    fn compute_parent_hash_from_children(left: &Digest, right: &Digest) -> Digest {
        Self::hash_tagged(NODE_TAG, &[&left[..], &right[..]])
    }
}
