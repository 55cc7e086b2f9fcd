use std::sync::Arc;

use redb::{Database, Durability};
use sundial_consensus::light_client::{FinalizedCheckpointRecord, LightClientUpdate, UpdateTrack};
use tracing::trace;

use crate::{
    errors::StoreError,
    store::{LightClientUpdateStore, UpdateWriteBatch},
    tables::{
        best_update::{BEST_UPDATE_TABLE, BestUpdateTable},
        finalized_checkpoint_record::FinalizedCheckpointRecordTable,
        latest_update::{LATEST_UPDATE_TABLE, LatestUpdateTable},
        table::Table,
    },
};

#[derive(Clone, Debug)]
pub struct LightClientDB {
    pub db: Arc<Database>,
}

impl LightClientDB {
    pub fn best_update_provider(&self) -> BestUpdateTable {
        BestUpdateTable {
            db: self.db.clone(),
        }
    }

    pub fn latest_update_provider(&self) -> LatestUpdateTable {
        LatestUpdateTable {
            db: self.db.clone(),
        }
    }

    pub fn finalized_checkpoint_record_provider(&self) -> FinalizedCheckpointRecordTable {
        FinalizedCheckpointRecordTable {
            db: self.db.clone(),
        }
    }
}

impl LightClientUpdateStore for LightClientDB {
    fn get_best_update(
        &self,
        period: u64,
        track: UpdateTrack,
    ) -> Result<Option<LightClientUpdate>, StoreError> {
        self.best_update_provider().get((period, track))
    }

    fn get_latest_update(
        &self,
        track: UpdateTrack,
    ) -> Result<Option<LightClientUpdate>, StoreError> {
        self.latest_update_provider().get(track)
    }

    /// Apply every write of ``batch`` in one write transaction.
    fn commit(&self, batch: UpdateWriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let writes = batch.len();

        let mut write_txn = self.db.begin_write()?;
        write_txn.set_durability(Durability::Immediate);
        {
            let mut best_table = write_txn.open_table(BEST_UPDATE_TABLE)?;
            for (period, track, update) in batch.best_updates {
                best_table.insert((period, track.as_u8()), update)?;
            }
            let mut latest_table = write_txn.open_table(LATEST_UPDATE_TABLE)?;
            for (track, update) in batch.latest_updates {
                latest_table.insert(track.as_u8(), update)?;
            }
        }
        write_txn.commit()?;

        trace!("Committed {writes} light client update writes");
        Ok(())
    }

    fn get_finalized_checkpoint_record(
        &self,
        epoch: u64,
    ) -> Result<Option<FinalizedCheckpointRecord>, StoreError> {
        self.finalized_checkpoint_record_provider().get(epoch)
    }

    fn put_finalized_checkpoint_record(
        &self,
        epoch: u64,
        record: FinalizedCheckpointRecord,
    ) -> Result<(), StoreError> {
        self.finalized_checkpoint_record_provider()
            .insert(epoch, record)
    }

    fn finalized_checkpoint_record_epochs(&self) -> Result<Vec<u64>, StoreError> {
        self.finalized_checkpoint_record_provider().epochs()
    }

    fn remove_finalized_checkpoint_record(&self, epoch: u64) -> Result<(), StoreError> {
        self.finalized_checkpoint_record_provider().remove(epoch)?;
        Ok(())
    }
}
