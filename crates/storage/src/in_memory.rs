use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use parking_lot::RwLock;
use sundial_consensus::light_client::{FinalizedCheckpointRecord, LightClientUpdate, UpdateTrack};

use crate::{
    errors::StoreError,
    store::{LightClientUpdateStore, UpdateWriteBatch},
};

#[derive(Debug, Default)]
struct Tables {
    best_updates: BTreeMap<(u64, UpdateTrack), LightClientUpdate>,
    latest_updates: HashMap<UpdateTrack, LightClientUpdate>,
    finalized_checkpoint_records: BTreeMap<u64, FinalizedCheckpointRecord>,
}

/// A [`LightClientUpdateStore`] kept entirely in memory.
///
/// Clones share the same tables.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLightClientStore {
    tables: Arc<RwLock<Tables>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryLightClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of update writes committed so far, finalized checkpoint records excluded.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl LightClientUpdateStore for InMemoryLightClientStore {
    fn get_best_update(
        &self,
        period: u64,
        track: UpdateTrack,
    ) -> Result<Option<LightClientUpdate>, StoreError> {
        Ok(self.tables.read().best_updates.get(&(period, track)).cloned())
    }

    fn get_latest_update(
        &self,
        track: UpdateTrack,
    ) -> Result<Option<LightClientUpdate>, StoreError> {
        Ok(self.tables.read().latest_updates.get(&track).cloned())
    }

    fn commit(&self, batch: UpdateWriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let writes = batch.len();

        let mut tables = self.tables.write();
        for (period, track, update) in batch.best_updates {
            tables.best_updates.insert((period, track), update);
        }
        for (track, update) in batch.latest_updates {
            tables.latest_updates.insert(track, update);
        }
        self.writes.fetch_add(writes, Ordering::Relaxed);
        Ok(())
    }

    fn get_finalized_checkpoint_record(
        &self,
        epoch: u64,
    ) -> Result<Option<FinalizedCheckpointRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .finalized_checkpoint_records
            .get(&epoch)
            .cloned())
    }

    fn put_finalized_checkpoint_record(
        &self,
        epoch: u64,
        record: FinalizedCheckpointRecord,
    ) -> Result<(), StoreError> {
        self.tables
            .write()
            .finalized_checkpoint_records
            .insert(epoch, record);
        Ok(())
    }

    fn finalized_checkpoint_record_epochs(&self) -> Result<Vec<u64>, StoreError> {
        Ok(self
            .tables
            .read()
            .finalized_checkpoint_records
            .keys()
            .copied()
            .collect())
    }

    fn remove_finalized_checkpoint_record(&self, epoch: u64) -> Result<(), StoreError> {
        self.tables
            .write()
            .finalized_checkpoint_records
            .remove(&epoch);
        Ok(())
    }
}
