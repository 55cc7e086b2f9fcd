use sundial_consensus::light_client::{LightClientUpdate, UpdateTrack};
use sundial_storage::{
    errors::StoreError,
    store::{LightClientUpdateStore, UpdateWriteBatch},
};
use tracing::debug;

/// Whether ``new`` should replace ``old`` as the best update of their period.
///
/// Ranks by sync committee participation, then by the attested header slot, then by the
/// signature slot. Updates ranking equal are not better, so the incumbent is kept.
pub fn is_better_update(new: &LightClientUpdate, old: &LightClientUpdate) -> bool {
    ranking_key(new) > ranking_key(old)
}

fn ranking_key(update: &LightClientUpdate) -> (u64, u64, u64) {
    (
        update.num_participants(),
        update.attested_header().slot,
        update.signature_slot,
    )
}

/// Ranks by the attested header slot, then the finalized header slot. Ties go to ``new``.
pub fn is_latest_best_finalized_update(new: &LightClientUpdate, old: &LightClientUpdate) -> bool {
    (new.attested_header().slot, new.header.slot) >= (old.attested_header().slot, old.header.slot)
}

/// Ranks by the attested header slot. Ties go to ``new``.
pub fn is_latest_best_non_finalized_update(
    new: &LightClientUpdate,
    old: &LightClientUpdate,
) -> bool {
    new.attested_header().slot >= old.attested_header().slot
}

fn is_latest_update(track: UpdateTrack, new: &LightClientUpdate, old: &LightClientUpdate) -> bool {
    match track {
        UpdateTrack::Finalized => is_latest_best_finalized_update(new, old),
        UpdateTrack::NonFinalized => is_latest_best_non_finalized_update(new, old),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedUpdate {
    /// Replaced the best update of the period
    pub best: bool,
    /// Replaced the latest update of the track
    pub latest: bool,
}

/// Stage the writes ``candidate`` earns on ``track`` into ``batch``.
///
/// Returns ``None`` if the candidate does not belong to ``period``. The best update of the
/// period is only considered when ``write_best`` is set; the latest update always is.
pub fn stage_update<S: LightClientUpdateStore + ?Sized>(
    store: &S,
    candidate: &LightClientUpdate,
    track: UpdateTrack,
    period: u64,
    write_best: bool,
    batch: &mut UpdateWriteBatch,
) -> Result<Option<AppliedUpdate>, StoreError> {
    if candidate.attested_period() != period || candidate.signature_period() != period {
        debug!(
            "Dropping {track} update: attested period {} and signature period {} differ from {period}",
            candidate.attested_period(),
            candidate.signature_period()
        );
        return Ok(None);
    }

    let mut applied = AppliedUpdate::default();
    if write_best {
        applied.best = match store.get_best_update(period, track)? {
            Some(current) => is_better_update(candidate, &current),
            None => true,
        };
        if applied.best {
            batch.put_best_update(period, track, candidate.clone());
        }
    }

    applied.latest = match store.get_latest_update(track)? {
        Some(current) => current != *candidate && is_latest_update(track, candidate, &current),
        None => true,
    };
    if applied.latest {
        batch.put_latest_update(track, candidate.clone());
    }

    Ok(Some(applied))
}
