use std::{fmt, sync::Arc};

use alloy_primitives::{B256, aliases::B32};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::{
    FixedVector,
    typenum::{U5, U6},
};

use crate::{
    beacon_block_header::BeaconBlockHeader, misc::compute_sync_committee_period_at_slot,
    sync_aggregate::SyncAggregate, sync_committee::SyncCommittee,
};

pub type FinalityBranch = FixedVector<B256, U6>;
pub type NextSyncCommitteeBranch = FixedVector<B256, U5>;

/// An update a light client can verify against the sync committee of its period.
///
/// A non-finalized update carries the attested header in ``header`` and no finality. A
/// finalized update carries the finalized checkpoint block header in ``header`` together with
/// the next sync committee proven against its state, while ``finality_header`` holds the
/// attested header whose state proves that checkpoint through ``finality_branch``.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct LightClientUpdate {
    pub header: BeaconBlockHeader,
    /// Next sync committee corresponding to `header.state_root`
    pub next_sync_committee: Arc<SyncCommittee>,
    pub next_sync_committee_branch: NextSyncCommitteeBranch,
    pub finality_header: Option<BeaconBlockHeader>,
    pub finality_branch: Option<FinalityBranch>,
    /// Sync committee aggregate signature
    pub sync_aggregate: SyncAggregate,
    /// Fork version the aggregate was signed under
    pub fork_version: B32,
    /// Slot at which the aggregate signature was created (untrusted)
    #[serde(with = "serde_utils::quoted_u64")]
    pub signature_slot: u64,
}

impl LightClientUpdate {
    pub fn num_participants(&self) -> u64 {
        self.sync_aggregate.num_participants()
    }

    pub fn is_finality_update(&self) -> bool {
        self.finality_header.is_some()
    }

    /// The header the sync aggregate signs over.
    pub fn attested_header(&self) -> &BeaconBlockHeader {
        self.finality_header.as_ref().unwrap_or(&self.header)
    }

    pub fn attested_period(&self) -> u64 {
        compute_sync_committee_period_at_slot(self.attested_header().slot)
    }

    pub fn signature_period(&self) -> u64 {
        compute_sync_committee_period_at_slot(self.signature_slot)
    }
}

/// What ``on_finalized`` keeps about a finalized checkpoint block: its header and the next sync
/// committee proven against its post-state.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct FinalizedCheckpointRecord {
    pub header: BeaconBlockHeader,
    pub next_sync_committee: Arc<SyncCommittee>,
    pub next_sync_committee_branch: NextSyncCommitteeBranch,
}

/// Finalized and non-finalized updates are ranked and stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateTrack {
    Finalized,
    NonFinalized,
}

impl UpdateTrack {
    pub const ALL: [UpdateTrack; 2] = [UpdateTrack::Finalized, UpdateTrack::NonFinalized];

    pub fn as_u8(self) -> u8 {
        match self {
            UpdateTrack::Finalized => 0,
            UpdateTrack::NonFinalized => 1,
        }
    }
}

impl TryFrom<u8> for UpdateTrack {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UpdateTrack::Finalized),
            1 => Ok(UpdateTrack::NonFinalized),
            _ => Err(anyhow::anyhow!("Unknown update track: {value}")),
        }
    }
}

impl fmt::Display for UpdateTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateTrack::Finalized => write!(f, "finalized"),
            UpdateTrack::NonFinalized => write!(f, "non-finalized"),
        }
    }
}
