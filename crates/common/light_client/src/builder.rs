use sundial_consensus::{
    light_client::{FinalizedCheckpointRecord, LightClientUpdate},
    misc::compute_sync_committee_period_at_slot,
};

use crate::cache::{SignatureData, SyncAttestedData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCandidates {
    pub period: u64,
    /// Only built when a record exists for the attested finalized checkpoint
    pub finalized: Option<LightClientUpdate>,
    pub non_finalized: LightClientUpdate,
}

/// Combine the attested data of a block with the sync aggregate signed over it.
///
/// Returns ``None`` when the aggregate was signed in a different sync committee period than the
/// attested block, as it then cannot be attributed to the committee that block's state names.
pub fn build_updates(
    attested: &SyncAttestedData,
    signature: &SignatureData,
    finalized_record: Option<&FinalizedCheckpointRecord>,
) -> Option<UpdateCandidates> {
    let period = compute_sync_committee_period_at_slot(attested.header.slot);
    if period != compute_sync_committee_period_at_slot(signature.slot) {
        return None;
    }

    let finalized = finalized_record.map(|record| LightClientUpdate {
        header: record.header.clone(),
        next_sync_committee: record.next_sync_committee.clone(),
        next_sync_committee_branch: record.next_sync_committee_branch.clone(),
        finality_header: Some(attested.header.clone()),
        finality_branch: Some(attested.finality_branch.clone()),
        sync_aggregate: signature.sync_aggregate.clone(),
        fork_version: signature.fork_version,
        signature_slot: signature.slot,
    });

    let non_finalized = LightClientUpdate {
        header: attested.header.clone(),
        next_sync_committee: attested.next_sync_committee.clone(),
        next_sync_committee_branch: attested.next_sync_committee_branch.clone(),
        finality_header: None,
        finality_branch: None,
        sync_aggregate: signature.sync_aggregate.clone(),
        fork_version: signature.fork_version,
        signature_slot: signature.slot,
    };

    Some(UpdateCandidates {
        period,
        finalized,
        non_finalized,
    })
}
