use std::sync::Arc;

use alloy_primitives::B256;
use anyhow::anyhow;
use sundial_consensus::{
    checkpoint::Checkpoint,
    constants::{MAX_REQUEST_LIGHT_CLIENT_UPDATES, MIN_SYNC_COMMITTEE_PARTICIPANTS},
    light_client::{FinalizedCheckpointRecord, LightClientUpdate, UpdateTrack},
    misc::{compute_epoch_at_slot, compute_sync_committee_period_at_slot},
    state::{LightClientBlock, LightClientState},
};
use sundial_network_spec::networks::BeaconNetworkSpec;
use sundial_storage::store::{LightClientUpdateStore, UpdateWriteBatch};
use tracing::{debug, info};
use tree_hash::TreeHash;

use crate::{
    builder::build_updates,
    cache::{AttestedDataCache, SignatureData, SyncAttestedData},
    config::LightClientConfig,
    errors::LightClientError,
    proof::{extract_state_proofs, next_sync_committee_branch, state_tree},
    selector::{AppliedUpdate, stage_update},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedUpdates {
    pub period: u64,
    /// ``None`` when no finalized checkpoint record was available
    pub finalized: Option<AppliedUpdate>,
    pub non_finalized: AppliedUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadOutcome {
    /// The block the head's sync aggregate signs over was never seen, or was already evicted.
    Uncorrelated,
    InsufficientParticipation { participants: u64 },
    /// The aggregate was signed in a later sync committee period than the attested block.
    PeriodMismatch {
        attested_period: u64,
        signature_period: u64,
    },
    Applied(AppliedUpdates),
}

/// Maintains the best and latest light-client updates from the heads and finalized
/// checkpoints the host imports.
///
/// Events must be delivered in chain order by a single caller.
pub struct LightClientUpdater<S> {
    store: S,
    network_spec: Arc<BeaconNetworkSpec>,
    config: LightClientConfig,
    attested_data: AttestedDataCache,
}

impl<S: LightClientUpdateStore> LightClientUpdater<S> {
    pub fn new(store: S, network_spec: Arc<BeaconNetworkSpec>, config: LightClientConfig) -> Self {
        Self {
            store,
            network_spec,
            attested_data: AttestedDataCache::new(config.prev_data_max_size),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn attested_data(&self) -> &AttestedDataCache {
        &self.attested_data
    }

    /// Record what ``block`` attests to, then turn its sync aggregate into updates for the
    /// parent block it signs over.
    pub fn on_head(
        &mut self,
        state: &impl LightClientState,
        block: &impl LightClientBlock,
    ) -> Result<HeadOutcome, LightClientError> {
        let result = self.process_head(state, block);
        self.attested_data
            .prune_to_bound(self.config.prev_data_max_size);

        match result {
            Err(err) if err.is_benign() => {
                debug!("No light client update for head at slot {}: {err}", block.slot());
                Ok(HeadOutcome::Uncorrelated)
            }
            result => result,
        }
    }

    fn process_head(
        &mut self,
        state: &impl LightClientState,
        block: &impl LightClientBlock,
    ) -> Result<HeadOutcome, LightClientError> {
        let fork_name = state.fork_name();
        let state_type_error = || LightClientError::StateType {
            slot: block.slot(),
            fork_name,
        };
        if !fork_name.has_altair_state_layout() {
            return Err(state_type_error());
        }
        let sync_aggregate = block.sync_aggregate().ok_or_else(state_type_error)?;
        let next_sync_committee = state.next_sync_committee().ok_or_else(state_type_error)?;

        let epoch = compute_epoch_at_slot(block.slot());
        let (active_fork, fork) = self
            .network_spec
            .fork_with_name_at_epoch(epoch)
            .map_err(|error| LightClientError::ForkLookup { epoch, error })?;
        if !active_fork.has_sync_committees() {
            return Err(LightClientError::ForkLookup {
                epoch,
                error: anyhow!("{active_fork:?} has no sync committees"),
            });
        }

        let proofs = extract_state_proofs(state)?;
        if state.slot() != block.slot() || proofs.state_root != block.state_root() {
            return Err(LightClientError::StateBlockMismatch {
                block_slot: block.slot(),
                state_slot: state.slot(),
                state_root: proofs.state_root,
                block_state_root: block.state_root(),
            });
        }
        self.attested_data.put(
            block.block_root(),
            SyncAttestedData {
                header: block.to_header(),
                finality_checkpoint: state.finalized_checkpoint(),
                finality_branch: proofs.finality_branch,
                next_sync_committee,
                next_sync_committee_branch: proofs.next_sync_committee_branch,
            },
        );
        let signature = SignatureData {
            slot: block.slot(),
            fork_version: fork.current_version,
            sync_aggregate: sync_aggregate.clone(),
        };

        let Some(attested_slot) = state.slot().checked_sub(1) else {
            debug!("Head at slot {} has no parent to attest to", block.slot());
            return Ok(HeadOutcome::Uncorrelated);
        };
        let attested_root = state
            .get_block_root_at_slot(attested_slot)
            .ok_or(LightClientError::BlockRootNotFound {
                slot: attested_slot,
            })?;
        self.apply_signature(attested_root, signature)
    }

    fn apply_signature(
        &self,
        attested_root: B256,
        signature: SignatureData,
    ) -> Result<HeadOutcome, LightClientError> {
        let attested = self
            .attested_data
            .get(&attested_root)
            .ok_or(LightClientError::Uncorrelated {
                block_root: attested_root,
            })?;

        let participants = signature.sync_aggregate.num_participants();
        if participants < MIN_SYNC_COMMITTEE_PARTICIPANTS {
            debug!(
                "Sync aggregate at slot {} has {participants} participants, need {MIN_SYNC_COMMITTEE_PARTICIPANTS}",
                signature.slot
            );
            return Ok(HeadOutcome::InsufficientParticipation { participants });
        }

        let finalized_record = self
            .store
            .get_finalized_checkpoint_record(attested.finality_checkpoint.epoch)?;
        let Some(candidates) = build_updates(attested, &signature, finalized_record.as_ref())
        else {
            let outcome = HeadOutcome::PeriodMismatch {
                attested_period: compute_sync_committee_period_at_slot(attested.header.slot),
                signature_period: compute_sync_committee_period_at_slot(signature.slot),
            };
            debug!(
                "Sync aggregate at slot {} straddles a sync committee period: {outcome:?}",
                signature.slot
            );
            return Ok(outcome);
        };

        let period = candidates.period;
        let mut batch = UpdateWriteBatch::default();
        let finalized = match &candidates.finalized {
            Some(candidate) => stage_update(
                &self.store,
                candidate,
                UpdateTrack::Finalized,
                period,
                true,
                &mut batch,
            )?,
            None => None,
        };
        // a finalized update dominates any non-finalized one of the same period
        let finalized_period = finalized.map(|_| period);
        let Some(non_finalized) = stage_update(
            &self.store,
            &candidates.non_finalized,
            UpdateTrack::NonFinalized,
            period,
            finalized_period != Some(period),
            &mut batch,
        )?
        else {
            return Ok(HeadOutcome::PeriodMismatch {
                attested_period: period,
                signature_period: compute_sync_committee_period_at_slot(signature.slot),
            });
        };

        let applied = AppliedUpdates {
            period,
            finalized,
            non_finalized,
        };
        for (track, track_applied) in [
            (UpdateTrack::Finalized, finalized),
            (UpdateTrack::NonFinalized, Some(non_finalized)),
        ] {
            let Some(track_applied) = track_applied else {
                continue;
            };
            if track_applied.best {
                debug!("New best {track} light client update for period {period}");
            }
            if track_applied.latest {
                debug!(
                    "New latest {track} light client update attested at slot {}",
                    attested.header.slot
                );
            }
        }
        self.store.commit(batch)?;

        Ok(HeadOutcome::Applied(applied))
    }

    /// Persist the finalized checkpoint block's header and next sync committee, which finalized
    /// updates attesting to this checkpoint are built from.
    pub fn on_finalized(
        &mut self,
        state: &impl LightClientState,
        checkpoint: Checkpoint,
    ) -> Result<(), LightClientError> {
        let fork_name = state.fork_name();
        if !fork_name.has_altair_state_layout() {
            return Err(LightClientError::StateType {
                slot: state.slot(),
                fork_name,
            });
        }
        if self
            .store
            .get_finalized_checkpoint_record(checkpoint.epoch)?
            .is_some()
        {
            debug!("Finalized checkpoint at epoch {} is already recorded", checkpoint.epoch);
            return Ok(());
        }

        let tree = state_tree(state)?;
        let mut header = state.latest_block_header();
        if header.state_root == B256::ZERO {
            header.state_root = tree.root();
        }
        let block_root = header.tree_hash_root();
        // the genesis checkpoint has a zero root
        if checkpoint.root != B256::ZERO && block_root != checkpoint.root {
            return Err(LightClientError::CheckpointMismatch {
                epoch: checkpoint.epoch,
                block_root,
                checkpoint_root: checkpoint.root,
            });
        }
        let next_sync_committee =
            state
                .next_sync_committee()
                .ok_or(LightClientError::StateType {
                    slot: state.slot(),
                    fork_name,
                })?;

        let record = FinalizedCheckpointRecord {
            next_sync_committee_branch: next_sync_committee_branch(&tree)?,
            header,
            next_sync_committee,
        };
        info!(
            "Recorded finalized checkpoint at epoch {} for block at slot {}",
            checkpoint.epoch, record.header.slot
        );
        self.store
            .put_finalized_checkpoint_record(checkpoint.epoch, record)?;

        self.prune_finalized_records()
    }

    fn prune_finalized_records(&self) -> Result<(), LightClientError> {
        let retained = self.config.finalized_records_retained.max(1);
        let epochs = self.store.finalized_checkpoint_record_epochs()?;
        let stale = epochs.len().saturating_sub(retained);
        for epoch in &epochs[..stale] {
            self.store.remove_finalized_checkpoint_record(*epoch)?;
        }
        if stale > 0 {
            debug!("Pruned {stale} finalized checkpoint records");
        }
        Ok(())
    }

    /// Best update of each period from ``start_period``, preferring finalized updates.
    ///
    /// Stops at the first period without any update and returns at most
    /// ``MAX_REQUEST_LIGHT_CLIENT_UPDATES`` updates.
    pub fn best_updates_by_range(
        &self,
        start_period: u64,
        count: u64,
    ) -> Result<Vec<LightClientUpdate>, LightClientError> {
        let count = count.min(MAX_REQUEST_LIGHT_CLIENT_UPDATES);

        let mut updates = vec![];
        for period in start_period..start_period.saturating_add(count) {
            let update = match self
                .store
                .get_best_update(period, UpdateTrack::Finalized)?
            {
                Some(update) => Some(update),
                None => self
                    .store
                    .get_best_update(period, UpdateTrack::NonFinalized)?,
            };
            let Some(update) = update else {
                break;
            };
            updates.push(update);
        }
        Ok(updates)
    }

    pub fn latest_finalized_update(&self) -> Result<Option<LightClientUpdate>, LightClientError> {
        Ok(self.store.get_latest_update(UpdateTrack::Finalized)?)
    }

    pub fn latest_non_finalized_update(
        &self,
    ) -> Result<Option<LightClientUpdate>, LightClientError> {
        Ok(self.store.get_latest_update(UpdateTrack::NonFinalized)?)
    }
}
