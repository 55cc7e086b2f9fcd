//! https://ethereum.github.io/consensus-specs/ssz/merkle-proofs

use alloy_primitives::B256;
use anyhow::ensure;

mod index;
mod tree;

pub use index::{
    GeneralizedIndex, LeafIndex, generalized_index_from_leaf_index, get_generalized_index_length,
    get_subtree_index,
};
use index::{generalized_index_parent, generalized_index_sibling, get_generalized_index_bit};
pub use tree::MerkleTree;

pub(crate) fn hash_concat(h1: &[u8], h2: &[u8]) -> B256 {
    ethereum_hashing::hash32_concat(h1, h2).into()
}

/// Build a flat binary tree over ``leaves``, zero padded to ``2**depth`` leaves.
///
/// Node ``i`` lives at ``tree[i]``: the root at ``1`` and the leaves from ``2**depth``.
pub fn merkle_tree(leaves: &[B256], depth: u64) -> anyhow::Result<Vec<B256>> {
    ensure!(depth < 64, "Depth {depth} is too large");
    let num_of_leaves = leaves.len();
    let bottom_length = 1 << depth;
    ensure!(
        num_of_leaves <= bottom_length,
        "Number of leaves is greater than the bottom length (depth too small)"
    );

    let mut tree = vec![B256::ZERO; bottom_length];
    tree.extend(leaves);
    tree.extend(vec![B256::ZERO; bottom_length - num_of_leaves]);

    for i in (1..bottom_length).rev() {
        tree[i] = hash_concat(tree[i * 2].as_slice(), tree[i * 2 + 1].as_slice());
    }

    Ok(tree)
}

/// Collect the sibling hashes from ``generalized_index`` up to the root of a flat ``tree``.
///
/// The branch is ordered bottom-up, the layout ``is_valid_merkle_branch`` expects.
pub fn generate_proof(tree: &[B256], generalized_index: GeneralizedIndex) -> anyhow::Result<Vec<B256>> {
    ensure!(generalized_index > 0, "Generalized index 0 is not a tree node");
    ensure!(
        (generalized_index as usize) < tree.len(),
        "Generalized index {generalized_index} is out of bounds for a tree of {} nodes",
        tree.len()
    );

    let mut proof = Vec::with_capacity(get_generalized_index_length(generalized_index) as usize);
    let mut current_index = generalized_index;
    while current_index > 1 {
        proof.push(tree[generalized_index_sibling(current_index) as usize]);
        current_index = generalized_index_parent(current_index);
    }

    Ok(proof)
}

pub fn is_valid_merkle_branch(
    leaf: B256,
    branch: &[B256],
    depth: u64,
    index: u64,
    root: B256,
) -> bool {
    if (branch.len() as u64) < depth {
        return false;
    }
    let mut value = leaf;
    for i in 0..depth {
        if get_generalized_index_bit(index, i) {
            value = hash_concat(branch[i as usize].as_slice(), value.as_slice());
        } else {
            value = hash_concat(value.as_slice(), branch[i as usize].as_slice());
        }
    }
    value == root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merkle_tree() {
        let leaves = vec![
            B256::from_slice(&[0xAA; 32]),
            B256::from_slice(&[0xBB; 32]),
            B256::from_slice(&[0xCC; 32]),
            B256::from_slice(&[0xDD; 32]),
        ];
        let depth = 2;

        let node_2 = hash_concat(leaves[0].as_slice(), leaves[1].as_slice());
        let node_3 = hash_concat(leaves[2].as_slice(), leaves[3].as_slice());
        let root = hash_concat(node_2.as_slice(), node_3.as_slice());

        let tree = merkle_tree(&leaves, depth).unwrap();
        assert_eq!(tree[1], root);

        for (index, leaf) in leaves.iter().enumerate() {
            let proof =
                generate_proof(&tree, generalized_index_from_leaf_index(index as u64, depth))
                    .unwrap();
            assert!(is_valid_merkle_branch(*leaf, &proof, depth, index as u64, root));
        }
    }

    #[test]
    fn test_leaves_are_zero_padded() {
        let leaves = vec![B256::repeat_byte(0x11); 3];
        let tree = merkle_tree(&leaves, 2).unwrap();
        assert_eq!(tree[7], B256::ZERO);
        assert!(merkle_tree(&leaves, 1).is_err());
    }

    #[test]
    fn test_generate_proof_rejects_out_of_range_index() {
        let tree = merkle_tree(&[B256::repeat_byte(0x11); 2], 1).unwrap();
        assert!(generate_proof(&tree, 0).is_err());
        assert!(generate_proof(&tree, 4).is_err());
        assert!(generate_proof(&tree, 1).unwrap().is_empty());
    }

    #[test]
    fn test_short_branch_is_invalid() {
        let leaves = vec![B256::repeat_byte(0x11); 4];
        let tree = merkle_tree(&leaves, 2).unwrap();
        let proof = generate_proof(&tree, 4).unwrap();
        assert!(!is_valid_merkle_branch(leaves[0], &proof[..1], 2, 0, tree[1]));
    }
}
