use std::sync::Arc;

use redb::{Database, Durability, ReadableTable, TableDefinition};
use sundial_consensus::light_client::FinalizedCheckpointRecord;

use crate::{
    errors::StoreError,
    tables::{ssz_encoder::SSZEncoding, table::Table},
};

/// Table definition for the FinalizedCheckpointRecord table
///
/// Key: checkpoint epoch
/// Value: FinalizedCheckpointRecord
pub(crate) const FINALIZED_CHECKPOINT_RECORD_TABLE: TableDefinition<
    u64,
    SSZEncoding<FinalizedCheckpointRecord>,
> = TableDefinition::new("light_client_finalized_checkpoint");

pub struct FinalizedCheckpointRecordTable {
    pub db: Arc<Database>,
}

impl FinalizedCheckpointRecordTable {
    /// Stored epochs in ascending order.
    pub fn epochs(&self) -> Result<Vec<u64>, StoreError> {
        let read_txn = self.db.begin_read()?;

        let table = read_txn.open_table(FINALIZED_CHECKPOINT_RECORD_TABLE)?;
        let epochs = table
            .iter()?
            .map(|entry| entry.map(|(epoch, _)| epoch.value()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(epochs)
    }

    pub fn remove(&self, epoch: u64) -> Result<Option<FinalizedCheckpointRecord>, StoreError> {
        let mut write_txn = self.db.begin_write()?;
        write_txn.set_durability(Durability::Immediate);
        let mut table = write_txn.open_table(FINALIZED_CHECKPOINT_RECORD_TABLE)?;
        let value = table.remove(epoch)?.map(|res| res.value());
        drop(table);
        write_txn.commit()?;
        Ok(value)
    }
}

impl Table for FinalizedCheckpointRecordTable {
    type Key = u64;

    type Value = FinalizedCheckpointRecord;

    fn get(&self, epoch: Self::Key) -> Result<Option<Self::Value>, StoreError> {
        let read_txn = self.db.begin_read()?;

        let table = read_txn.open_table(FINALIZED_CHECKPOINT_RECORD_TABLE)?;
        let result = table.get(epoch)?;
        Ok(result.map(|res| res.value()))
    }

    fn insert(&self, epoch: Self::Key, value: Self::Value) -> Result<(), StoreError> {
        let mut write_txn = self.db.begin_write()?;
        write_txn.set_durability(Durability::Immediate);
        let mut table = write_txn.open_table(FINALIZED_CHECKPOINT_RECORD_TABLE)?;
        table.insert(epoch, value)?;
        drop(table);
        write_txn.commit()?;
        Ok(())
    }
}
