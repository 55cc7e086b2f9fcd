use std::sync::Arc;

use alloy_primitives::B256;
use ssz_types::BitVector;
use sundial_consensus::{
    beacon_block_header::BeaconBlockHeader,
    bls::BLSSignature,
    checkpoint::Checkpoint,
    constants::{
        BEACON_STATE_FIELD_COUNT, CURRENT_SYNC_COMMITTEE_FIELD_INDEX,
        FINALIZED_CHECKPOINT_FIELD_INDEX, NEXT_SYNC_COMMITTEE_FIELD_INDEX,
        SLOTS_PER_HISTORICAL_ROOT,
    },
    fork::ForkName,
    light_client::{FinalizedCheckpointRecord, LightClientUpdate, UpdateTrack},
    state::{LightClientBlock, LightClientState},
    sync_aggregate::SyncAggregate,
    sync_committee::SyncCommittee,
};
use sundial_merkle::MerkleTree;
use sundial_storage::{
    errors::StoreError,
    in_memory::InMemoryLightClientStore,
    store::{LightClientUpdateStore, UpdateWriteBatch},
};
use tree_hash::TreeHash;

const SLOT_FIELD_INDEX: usize = 2;
const LATEST_BLOCK_HEADER_FIELD_INDEX: usize = 4;

pub fn sync_aggregate(participants: usize) -> SyncAggregate {
    let mut sync_committee_bits = BitVector::new();
    for index in 0..participants {
        sync_committee_bits.set(index, true).unwrap();
    }
    SyncAggregate {
        sync_committee_bits,
        sync_committee_signature: BLSSignature::infinity(),
    }
}

/// A state that only commits to the fields light-client tracking reads.
#[derive(Debug, Clone)]
pub struct FakeState {
    pub slot: u64,
    pub fork_name: ForkName,
    pub latest_block_header: BeaconBlockHeader,
    pub finalized_checkpoint: Checkpoint,
    pub next_sync_committee: Option<Arc<SyncCommittee>>,
    pub block_roots: Vec<B256>,
    /// Fields beyond the Altair layout, for states of another shape
    pub extra_fields: usize,
}

impl FakeState {
    pub fn field_roots(&self) -> Vec<B256> {
        let mut roots: Vec<B256> = (0..BEACON_STATE_FIELD_COUNT + self.extra_fields)
            .map(|index| B256::left_padding_from(&(index as u64 + 1).to_be_bytes()))
            .collect();
        let sync_committee_root = self
            .next_sync_committee
            .as_ref()
            .map(|sync_committee| sync_committee.tree_hash_root())
            .unwrap_or_default();

        roots[SLOT_FIELD_INDEX] = self.slot.tree_hash_root();
        roots[LATEST_BLOCK_HEADER_FIELD_INDEX] = self.latest_block_header.tree_hash_root();
        roots[FINALIZED_CHECKPOINT_FIELD_INDEX as usize] = self.finalized_checkpoint.tree_hash_root();
        roots[CURRENT_SYNC_COMMITTEE_FIELD_INDEX as usize] = sync_committee_root;
        roots[NEXT_SYNC_COMMITTEE_FIELD_INDEX as usize] = sync_committee_root;
        roots
    }

    pub fn state_root(&self) -> B256 {
        self.merkle_tree().unwrap().root()
    }
}

impl LightClientState for FakeState {
    fn slot(&self) -> u64 {
        self.slot
    }

    fn fork_name(&self) -> ForkName {
        self.fork_name
    }

    fn latest_block_header(&self) -> BeaconBlockHeader {
        self.latest_block_header.clone()
    }

    fn finalized_checkpoint(&self) -> Checkpoint {
        self.finalized_checkpoint
    }

    fn next_sync_committee(&self) -> Option<Arc<SyncCommittee>> {
        self.next_sync_committee.clone()
    }

    fn block_roots(&self) -> &[B256] {
        &self.block_roots
    }

    fn merkle_tree(&self) -> anyhow::Result<MerkleTree> {
        let mut tree = MerkleTree::from_leaves(&self.field_roots())?;
        tree.graft(
            FINALIZED_CHECKPOINT_FIELD_INDEX,
            self.finalized_checkpoint.merkle_tree()?,
        )?;
        Ok(tree)
    }
}

#[derive(Debug, Clone)]
pub struct FakeBlock {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: B256,
    pub state_root: B256,
    pub body_root: B256,
    pub sync_aggregate: Option<SyncAggregate>,
}

impl LightClientBlock for FakeBlock {
    fn slot(&self) -> u64 {
        self.slot
    }

    fn proposer_index(&self) -> u64 {
        self.proposer_index
    }

    fn parent_root(&self) -> B256 {
        self.parent_root
    }

    fn state_root(&self) -> B256 {
        self.state_root
    }

    fn body_root(&self) -> B256 {
        self.body_root
    }

    fn sync_aggregate(&self) -> Option<&SyncAggregate> {
        self.sync_aggregate.as_ref()
    }
}

/// Produces consecutive states and blocks whose headers, roots and ``block_roots`` agree.
#[derive(Debug, Clone)]
pub struct TestChain {
    pub head_slot: u64,
    pub head_root: B256,
    pub head_header: BeaconBlockHeader,
    pub finalized_checkpoint: Checkpoint,
    pub next_sync_committee: Arc<SyncCommittee>,
    block_roots: Vec<B256>,
}

impl TestChain {
    pub fn genesis() -> (Self, FakeState) {
        let next_sync_committee = Arc::new(SyncCommittee::default());
        let state = FakeState {
            slot: 0,
            fork_name: ForkName::Altair,
            latest_block_header: BeaconBlockHeader::default(),
            finalized_checkpoint: Checkpoint::default(),
            next_sync_committee: Some(next_sync_committee.clone()),
            block_roots: vec![B256::ZERO; SLOTS_PER_HISTORICAL_ROOT as usize],
            extra_fields: 0,
        };
        let head_header = BeaconBlockHeader {
            state_root: state.state_root(),
            ..Default::default()
        };
        let chain = Self {
            head_slot: 0,
            head_root: head_header.tree_hash_root(),
            head_header,
            finalized_checkpoint: Checkpoint::default(),
            next_sync_committee,
            block_roots: state.block_roots.clone(),
        };
        (chain, state)
    }

    /// Import a block at ``slot``, skipping any slots in between.
    pub fn advance(&mut self, slot: u64, sync_aggregate: SyncAggregate) -> (FakeState, FakeBlock) {
        for skipped_slot in self.head_slot..slot {
            self.block_roots[(skipped_slot % SLOTS_PER_HISTORICAL_ROOT) as usize] = self.head_root;
        }

        let latest_block_header = BeaconBlockHeader {
            slot,
            proposer_index: slot % 64,
            parent_root: self.head_root,
            state_root: B256::ZERO,
            body_root: B256::left_padding_from(&slot.to_be_bytes()),
        };
        let state = FakeState {
            slot,
            fork_name: ForkName::Altair,
            latest_block_header: latest_block_header.clone(),
            finalized_checkpoint: self.finalized_checkpoint,
            next_sync_committee: Some(self.next_sync_committee.clone()),
            block_roots: self.block_roots.clone(),
            extra_fields: 0,
        };
        let block = FakeBlock {
            slot,
            proposer_index: latest_block_header.proposer_index,
            parent_root: latest_block_header.parent_root,
            state_root: state.state_root(),
            body_root: latest_block_header.body_root,
            sync_aggregate: Some(sync_aggregate),
        };

        self.head_slot = slot;
        self.head_root = block.block_root();
        self.head_header = block.to_header();
        (state, block)
    }

    pub fn next(&mut self, participants: usize) -> (FakeState, FakeBlock) {
        self.advance(self.head_slot + 1, sync_aggregate(participants))
    }
}

/// Reads and finalized records go to ``inner``, every update commit fails.
#[derive(Debug, Default)]
pub struct FailingCommitStore {
    pub inner: InMemoryLightClientStore,
}

impl LightClientUpdateStore for FailingCommitStore {
    fn get_best_update(
        &self,
        period: u64,
        track: UpdateTrack,
    ) -> Result<Option<LightClientUpdate>, StoreError> {
        self.inner.get_best_update(period, track)
    }

    fn get_latest_update(
        &self,
        track: UpdateTrack,
    ) -> Result<Option<LightClientUpdate>, StoreError> {
        self.inner.get_latest_update(track)
    }

    fn commit(&self, _batch: UpdateWriteBatch) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }

    fn get_finalized_checkpoint_record(
        &self,
        epoch: u64,
    ) -> Result<Option<FinalizedCheckpointRecord>, StoreError> {
        self.inner.get_finalized_checkpoint_record(epoch)
    }

    fn put_finalized_checkpoint_record(
        &self,
        epoch: u64,
        record: FinalizedCheckpointRecord,
    ) -> Result<(), StoreError> {
        self.inner.put_finalized_checkpoint_record(epoch, record)
    }

    fn finalized_checkpoint_record_epochs(&self) -> Result<Vec<u64>, StoreError> {
        self.inner.finalized_checkpoint_record_epochs()
    }

    fn remove_finalized_checkpoint_record(&self, epoch: u64) -> Result<(), StoreError> {
        self.inner.remove_finalized_checkpoint_record(epoch)
    }
}
