use sundial_consensus::light_client::{FinalizedCheckpointRecord, LightClientUpdate, UpdateTrack};

use crate::errors::StoreError;

/// Writes that must land together or not at all.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UpdateWriteBatch {
    pub best_updates: Vec<(u64, UpdateTrack, LightClientUpdate)>,
    pub latest_updates: Vec<(UpdateTrack, LightClientUpdate)>,
}

impl UpdateWriteBatch {
    pub fn put_best_update(&mut self, period: u64, track: UpdateTrack, update: LightClientUpdate) {
        self.best_updates.push((period, track, update));
    }

    pub fn put_latest_update(&mut self, track: UpdateTrack, update: LightClientUpdate) {
        self.latest_updates.push((track, update));
    }

    pub fn is_empty(&self) -> bool {
        self.best_updates.is_empty() && self.latest_updates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.best_updates.len() + self.latest_updates.len()
    }
}

/// Persistence for light-client updates.
///
/// Implementations must be strongly consistent: a read following a successful write observes
/// it. [`LightClientUpdateStore::commit`] applies a whole batch atomically.
#[allow(clippy::result_large_err)]
pub trait LightClientUpdateStore {
    fn get_best_update(
        &self,
        period: u64,
        track: UpdateTrack,
    ) -> Result<Option<LightClientUpdate>, StoreError>;

    fn put_best_update(
        &self,
        period: u64,
        track: UpdateTrack,
        update: LightClientUpdate,
    ) -> Result<(), StoreError> {
        let mut batch = UpdateWriteBatch::default();
        batch.put_best_update(period, track, update);
        self.commit(batch)
    }

    fn get_latest_update(&self, track: UpdateTrack)
    -> Result<Option<LightClientUpdate>, StoreError>;

    fn put_latest_update(
        &self,
        track: UpdateTrack,
        update: LightClientUpdate,
    ) -> Result<(), StoreError> {
        let mut batch = UpdateWriteBatch::default();
        batch.put_latest_update(track, update);
        self.commit(batch)
    }

    fn commit(&self, batch: UpdateWriteBatch) -> Result<(), StoreError>;

    fn get_finalized_checkpoint_record(
        &self,
        epoch: u64,
    ) -> Result<Option<FinalizedCheckpointRecord>, StoreError>;

    fn put_finalized_checkpoint_record(
        &self,
        epoch: u64,
        record: FinalizedCheckpointRecord,
    ) -> Result<(), StoreError>;

    /// Epochs with a stored record, ascending.
    fn finalized_checkpoint_record_epochs(&self) -> Result<Vec<u64>, StoreError>;

    fn remove_finalized_checkpoint_record(&self, epoch: u64) -> Result<(), StoreError>;
}
