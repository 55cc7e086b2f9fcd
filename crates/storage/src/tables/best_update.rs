use std::sync::Arc;

use redb::{Database, TableDefinition};
use sundial_consensus::light_client::{LightClientUpdate, UpdateTrack};

use crate::{errors::StoreError, tables::ssz_encoder::SSZEncoding};

/// Table definition for the best update of each sync committee period
///
/// Key: (sync committee period, update track)
/// Value: LightClientUpdate
pub(crate) const BEST_UPDATE_TABLE: TableDefinition<(u64, u8), SSZEncoding<LightClientUpdate>> =
    TableDefinition::new("light_client_best_update");

pub struct BestUpdateTable {
    pub db: Arc<Database>,
}

impl BestUpdateTable {
    pub fn get(
        &self,
        (period, track): (u64, UpdateTrack),
    ) -> Result<Option<LightClientUpdate>, StoreError> {
        let read_txn = self.db.begin_read()?;

        let table = read_txn.open_table(BEST_UPDATE_TABLE)?;
        let result = table.get((period, track.as_u8()))?;
        Ok(result.map(|res| res.value()))
    }
}
