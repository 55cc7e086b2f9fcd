use std::sync::Arc;

use redb::{Database, TableDefinition};
use sundial_consensus::light_client::{LightClientUpdate, UpdateTrack};

use crate::{errors::StoreError, tables::ssz_encoder::SSZEncoding};

/// Table definition for the most recent update of each track, regardless of quality
///
/// Key: update track
/// Value: LightClientUpdate
pub(crate) const LATEST_UPDATE_TABLE: TableDefinition<u8, SSZEncoding<LightClientUpdate>> =
    TableDefinition::new("light_client_latest_update");

pub struct LatestUpdateTable {
    pub db: Arc<Database>,
}

impl LatestUpdateTable {
    pub fn get(&self, track: UpdateTrack) -> Result<Option<LightClientUpdate>, StoreError> {
        let read_txn = self.db.begin_read()?;

        let table = read_txn.open_table(LATEST_UPDATE_TABLE)?;
        let result = table.get(track.as_u8())?;
        Ok(result.map(|res| res.value()))
    }
}
