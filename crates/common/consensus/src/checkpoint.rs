use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use sundial_merkle::MerkleTree;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

#[derive(
    Debug,
    Eq,
    Hash,
    PartialEq,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Encode,
    Decode,
    TreeHash,
    PartialOrd,
    Ord,
    Default,
)]
pub struct Checkpoint {
    #[serde(with = "serde_utils::quoted_u64")]
    pub epoch: u64,
    pub root: B256,
}

impl Checkpoint {
    /// Two-leaf tree of the container, ``epoch`` on the left and ``root`` on the right.
    ///
    /// Grafting it onto the ``finalized_checkpoint`` leaf of a state tree makes
    /// ``finalized_checkpoint.root`` provable.
    pub fn merkle_tree(&self) -> anyhow::Result<MerkleTree> {
        MerkleTree::new(
            &[self.epoch.tree_hash_root(), self.root.tree_hash_root()],
            1,
        )
    }
}
