use serde::{Deserialize, Serialize};

/// Number of heads whose attested data is kept for correlation with later sync aggregates.
pub const PREV_DATA_MAX_SIZE: usize = 64;

/// Number of most recent finalized checkpoint records kept. Heads whose state still points at
/// the previous finalized checkpoint need its record to produce finalized updates.
pub const FINALIZED_RECORDS_RETAINED: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightClientConfig {
    pub prev_data_max_size: usize,
    pub finalized_records_retained: usize,
}

impl Default for LightClientConfig {
    fn default() -> Self {
        Self {
            prev_data_max_size: PREV_DATA_MAX_SIZE,
            finalized_records_retained: FINALIZED_RECORDS_RETAINED,
        }
    }
}
