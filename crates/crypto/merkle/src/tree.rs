use std::collections::BTreeMap;

use alloy_primitives::B256;
use anyhow::{anyhow, ensure};

use crate::{
    generate_proof,
    index::{
        GeneralizedIndex, LeafIndex, generalized_index_below_ancestor,
        generalized_index_from_leaf_index, get_generalized_index_length,
    },
    merkle_tree,
};

/// A binary merkle tree that can prove any of its nodes.
///
/// Leaves that are themselves containers can carry the container's own tree through
/// [`MerkleTree::graft`], which makes the nodes below those leaves provable as well. This is how
/// a state tree proves ``finalized_checkpoint.root`` (generalized index ``105``) while only
/// hashing the checkpoint container once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    depth: u64,
    nodes: Vec<B256>,
    subtrees: BTreeMap<GeneralizedIndex, MerkleTree>,
}

impl MerkleTree {
    pub fn new(leaves: &[B256], depth: u64) -> anyhow::Result<Self> {
        Ok(Self {
            depth,
            nodes: merkle_tree(leaves, depth)?,
            subtrees: BTreeMap::new(),
        })
    }

    /// Build the shallowest tree that fits all of ``leaves``.
    pub fn from_leaves(leaves: &[B256]) -> anyhow::Result<Self> {
        let depth = leaves.len().max(1).next_power_of_two().ilog2() as u64;
        Self::new(leaves, depth)
    }

    pub fn root(&self) -> B256 {
        self.nodes[1]
    }

    pub fn depth(&self) -> u64 {
        self.depth
    }

    pub fn leaf(&self, leaf_index: LeafIndex) -> Option<B256> {
        self.nodes
            .get(generalized_index_from_leaf_index(leaf_index, self.depth) as usize)
            .copied()
    }

    /// Attach the tree of the container stored at ``leaf_index``.
    ///
    /// The subtree root must equal the leaf, otherwise proofs through it would not verify
    /// against [`MerkleTree::root`].
    pub fn graft(&mut self, leaf_index: LeafIndex, subtree: MerkleTree) -> anyhow::Result<()> {
        let leaf = self.leaf(leaf_index).ok_or_else(|| {
            anyhow!(
                "Leaf index {leaf_index} is out of bounds for a tree of depth {}",
                self.depth
            )
        })?;
        ensure!(
            leaf == subtree.root(),
            "Subtree root {:?} does not match leaf {leaf:?} at index {leaf_index}",
            subtree.root()
        );
        self.subtrees.insert(
            generalized_index_from_leaf_index(leaf_index, self.depth),
            subtree,
        );
        Ok(())
    }

    /// Return the branch proving the node at ``generalized_index`` against [`MerkleTree::root`],
    /// ordered bottom-up.
    pub fn prove(&self, generalized_index: GeneralizedIndex) -> anyhow::Result<Vec<B256>> {
        ensure!(generalized_index > 0, "Generalized index 0 is not a tree node");
        let length = get_generalized_index_length(generalized_index);
        if length <= self.depth {
            return generate_proof(&self.nodes, generalized_index);
        }

        let levels_below_leaf = length - self.depth;
        let leaf_generalized_index = generalized_index >> levels_below_leaf;
        let subtree = self.subtrees.get(&leaf_generalized_index).ok_or_else(|| {
            anyhow!(
                "Generalized index {generalized_index} is below leaf {leaf_generalized_index} \
                 which has no grafted subtree"
            )
        })?;

        let mut proof = subtree.prove(generalized_index_below_ancestor(
            generalized_index,
            levels_below_leaf,
        ))?;
        proof.extend(generate_proof(&self.nodes, leaf_generalized_index)?);
        Ok(proof)
    }
}
