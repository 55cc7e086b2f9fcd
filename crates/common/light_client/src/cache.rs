use std::{num::NonZeroUsize, sync::Arc};

use alloy_primitives::{B256, aliases::B32};
use lru::LruCache;
use sundial_consensus::{
    beacon_block_header::BeaconBlockHeader,
    checkpoint::Checkpoint,
    light_client::{FinalityBranch, NextSyncCommitteeBranch},
    sync_aggregate::SyncAggregate,
    sync_committee::SyncCommittee,
};
use tracing::trace;

/// What a later sync aggregate over a block attests to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncAttestedData {
    pub header: BeaconBlockHeader,
    /// Finalized checkpoint of the block's post-state
    pub finality_checkpoint: Checkpoint,
    pub finality_branch: FinalityBranch,
    pub next_sync_committee: Arc<SyncCommittee>,
    pub next_sync_committee_branch: NextSyncCommitteeBranch,
}

/// The sync aggregate carried by a head block, with the fork it was signed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureData {
    pub slot: u64,
    pub fork_version: B32,
    pub sync_aggregate: SyncAggregate,
}

/// Attested data of recent heads, keyed by block root.
///
/// Entries are evicted in insertion order; lookups do not refresh them.
#[derive(Debug)]
pub struct AttestedDataCache {
    entries: LruCache<B256, SyncAttestedData>,
}

impl AttestedDataCache {
    /// A zero ``max_size`` is treated as one.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Insert or overwrite the entry for ``block_root``, evicting the oldest entry when full.
    pub fn put(&mut self, block_root: B256, data: SyncAttestedData) {
        match self.entries.push(block_root, data) {
            Some((evicted_root, _)) if evicted_root != block_root => {
                trace!("Evicted attested data for block root {evicted_root}");
            }
            _ => {}
        }
    }

    pub fn get(&self, block_root: &B256) -> Option<&SyncAttestedData> {
        self.entries.peek(block_root)
    }

    pub fn contains(&self, block_root: &B256) -> bool {
        self.entries.contains(block_root)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict oldest entries until at most ``max_size`` remain. Returns the number evicted.
    pub fn prune_to_bound(&mut self, max_size: usize) -> usize {
        let mut evicted = 0;
        while self.entries.len() > max_size {
            let Some((block_root, _)) = self.entries.pop_lru() else {
                break;
            };
            trace!("Pruned attested data for block root {block_root}");
            evicted += 1;
        }
        evicted
    }
}
