//! The views of the host's beacon state and blocks that light-client update tracking needs.
//!
//! The host owns the real containers; implementing these traits is all it takes to feed them
//! into the updater.

use std::sync::Arc;

use alloy_primitives::B256;
use sundial_merkle::MerkleTree;
use tree_hash::TreeHash;

use crate::{
    beacon_block_header::BeaconBlockHeader, checkpoint::Checkpoint,
    constants::SLOTS_PER_HISTORICAL_ROOT, fork::ForkName, sync_aggregate::SyncAggregate,
    sync_committee::SyncCommittee,
};

pub trait LightClientState {
    fn slot(&self) -> u64;

    fn fork_name(&self) -> ForkName;

    fn latest_block_header(&self) -> BeaconBlockHeader;

    fn finalized_checkpoint(&self) -> Checkpoint;

    /// ``None`` before Altair.
    fn next_sync_committee(&self) -> Option<Arc<SyncCommittee>>;

    /// The ``block_roots`` ring buffer, ``SLOTS_PER_HISTORICAL_ROOT`` entries long.
    fn block_roots(&self) -> &[B256];

    /// Merkle tree over the state fields, with the ``finalized_checkpoint`` container grafted
    /// onto its leaf so that its ``root`` can be proven.
    fn merkle_tree(&self) -> anyhow::Result<MerkleTree>;

    /// Return the block root at a recent ``slot``, or ``None`` if it has left the
    /// ``block_roots`` window.
    fn get_block_root_at_slot(&self, slot: u64) -> Option<B256> {
        let state_slot = self.slot();
        if !(slot < state_slot && state_slot <= slot.saturating_add(SLOTS_PER_HISTORICAL_ROOT)) {
            return None;
        }
        self.block_roots()
            .get((slot % SLOTS_PER_HISTORICAL_ROOT) as usize)
            .copied()
    }
}

pub trait LightClientBlock {
    fn slot(&self) -> u64;

    fn proposer_index(&self) -> u64;

    fn parent_root(&self) -> B256;

    fn state_root(&self) -> B256;

    fn body_root(&self) -> B256;

    /// ``None`` for blocks without a sync aggregate (before Altair).
    fn sync_aggregate(&self) -> Option<&SyncAggregate>;

    fn to_header(&self) -> BeaconBlockHeader {
        BeaconBlockHeader {
            slot: self.slot(),
            proposer_index: self.proposer_index(),
            parent_root: self.parent_root(),
            state_root: self.state_root(),
            body_root: self.body_root(),
        }
    }

    /// A block and its header share the same root.
    fn block_root(&self) -> B256 {
        self.to_header().tree_hash_root()
    }
}
