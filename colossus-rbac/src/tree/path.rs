use crate::{
    configuration::Configuration,
    crypto::Digest,
    types::Commitment,
    utils::serde_helpers::{digests_deserialize_hex, digests_serialize_hex},
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Sibling digests from a leaf up to (but excluding) the root.
///
/// `siblings[0]` is the sibling leaf node, `siblings[depth - 1]` is the
/// sibling of the root's child on the path. Bit `i` of `index` says whether
/// the path node at level `i` is a right child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    pub index: u64,

    #[serde(serialize_with = "digests_serialize_hex", deserialize_with = "digests_deserialize_hex")]
    pub siblings: Vec<Digest>,
}

impl MerklePath {
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Folds the path over `commitment` and returns the resulting root.
    pub fn compute_root<TC: Configuration>(&self, commitment: &Commitment) -> Digest {
        let mut position = self.index;
        let mut current = TC::hash_leaf(commitment);
        for sibling in &self.siblings {
            current = if position & 1 == 0 {
                TC::compute_parent_hash_from_children(&current, sibling)
            } else {
                TC::compute_parent_hash_from_children(sibling, &current)
            };
            position >>= 1;
        }
        current
    }

    /// True if `commitment` sits at `self.index` in a tree whose root is
    /// `root`.
    pub fn verify<TC: Configuration>(&self, commitment: &Commitment, root: &Digest) -> bool {
        if self.depth() >= 64 || (self.index >> self.depth()) != 0 {
            return false;
        }
        let computed = self.compute_root::<TC>(commitment);
        computed[..].ct_eq(&root[..]).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        configuration::{Blake3Configuration, ExampleLabel},
        tree::CommitmentTree,
    };

    type TC = Blake3Configuration<ExampleLabel>;

    fn populated() -> (CommitmentTree<TC>, Commitment) {
        let mut tree = CommitmentTree::<TC>::new(4).unwrap();
        let target = Commitment([5u8; 32]);
        tree.insert(0, Commitment([1u8; 32])).unwrap();
        tree.insert(6, target).unwrap();
        tree.insert(15, Commitment([2u8; 32])).unwrap();
        (tree, target)
    }

    #[test]
    fn test_path_rejects_wrong_index() {
        let (tree, target) = populated();
        let mut path = tree.find_path_for_leaf(6).unwrap();
        assert!(path.verify::<TC>(&target, &tree.root()));

        path.index = 7;
        assert!(!path.verify::<TC>(&target, &tree.root()));

        // an index that does not fit in the path depth
        path.index = 6 + 16;
        assert!(!path.verify::<TC>(&target, &tree.root()));
    }

    #[test]
    fn test_path_rejects_tampered_sibling() {
        let (tree, target) = populated();
        let mut path = tree.find_path_for_leaf(6).unwrap();
        path.siblings[2][0] ^= 1;
        assert!(!path.verify::<TC>(&target, &tree.root()));
    }

    #[test]
    fn test_path_goes_stale_after_update() {
        let (mut tree, target) = populated();
        let path = tree.find_path_for_leaf(6).unwrap();
        let old_root = tree.root();

        tree.insert(9, Commitment([3u8; 32])).unwrap();
        assert!(path.verify::<TC>(&target, &old_root));
        assert!(!path.verify::<TC>(&target, &tree.root()));
        assert!(tree.find_path_for_leaf(6).unwrap().verify::<TC>(&target, &tree.root()));
    }

    #[test]
    fn test_path_json_roundtrip() {
        let (tree, target) = populated();
        let path = tree.find_path_for_leaf(6).unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let back: MerklePath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert!(back.verify::<TC>(&target, &tree.root()));
    }
}
