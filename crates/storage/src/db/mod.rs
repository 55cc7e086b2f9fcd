pub mod light_client;

use std::{fs, path::PathBuf, sync::Arc};

use light_client::LightClientDB;
use redb::{Builder, Database};
use tracing::info;

use crate::{
    errors::StoreError,
    tables::{
        best_update::BEST_UPDATE_TABLE,
        finalized_checkpoint_record::FINALIZED_CHECKPOINT_RECORD_TABLE,
        latest_update::LATEST_UPDATE_TABLE,
    },
};

pub const REDB_FILE: &str = "sundial.redb";

/// The size of the cache for the database
///
/// 64 MiB, updates are few and small
pub const REDB_CACHE_SIZE: usize = 64 * 1_024 * 1_024;

#[derive(Clone, Debug)]
pub struct SundialDB {
    db: Arc<Database>,
    data_dir: PathBuf,
}

impl SundialDB {
    pub fn new(data_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&data_dir)?;
        let db_path = data_dir.join(REDB_FILE);
        let db = Builder::new()
            .set_cache_size(REDB_CACHE_SIZE)
            .create(&db_path)?;
        info!("Opened light client database at {}", db_path.display());

        Ok(SundialDB {
            db: Arc::new(db),
            data_dir,
        })
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn init_light_client_db(&self) -> Result<LightClientDB, StoreError> {
        let write_txn = self.db.begin_write()?;

        write_txn.open_table(BEST_UPDATE_TABLE)?;
        write_txn.open_table(FINALIZED_CHECKPOINT_RECORD_TABLE)?;
        write_txn.open_table(LATEST_UPDATE_TABLE)?;
        write_txn.commit()?;

        Ok(LightClientDB {
            db: self.db.clone(),
        })
    }
}
