pub const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: u64 = 256;
pub const SLOTS_PER_EPOCH: u64 = 32;
pub const SLOTS_PER_HISTORICAL_ROOT: u64 = 8192;

/// Field positions in an Altair ``BeaconState``, which has 24 fields (tree depth 5).
pub const BEACON_STATE_FIELD_COUNT: usize = 24;
pub const BEACON_STATE_MERKLE_DEPTH: u64 = 5;
pub const FINALIZED_CHECKPOINT_FIELD_INDEX: u64 = 20;
pub const CURRENT_SYNC_COMMITTEE_FIELD_INDEX: u64 = 22;
pub const NEXT_SYNC_COMMITTEE_FIELD_INDEX: u64 = 23;

/// Generalized index of ``finalized_checkpoint.root`` in an Altair ``BeaconState``.
pub const FINALIZED_ROOT_INDEX: u64 = 105;
pub const FINALIZED_ROOT_DEPTH: u64 = 6;
/// Generalized index of ``next_sync_committee`` in an Altair ``BeaconState``.
pub const NEXT_SYNC_COMMITTEE_INDEX: u64 = 55;
pub const NEXT_SYNC_COMMITTEE_DEPTH: u64 = 5;

pub const MIN_SYNC_COMMITTEE_PARTICIPANTS: u64 = 1;
pub const MAX_REQUEST_LIGHT_CLIENT_UPDATES: u64 = 128;
