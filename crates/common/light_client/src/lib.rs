//! Tracks the light-client updates a beacon node can serve.
//!
//! [`updater::LightClientUpdater`] is driven by the host on every imported head and every
//! finalized checkpoint. It keeps the best update per sync committee period and the latest
//! update, each for the finalized and the non-finalized track, in a
//! [`sundial_storage::store::LightClientUpdateStore`].

pub mod builder;
pub mod cache;
pub mod config;
pub mod errors;
pub mod proof;
pub mod selector;
pub mod updater;

#[cfg(test)]
pub(crate) mod test_utils;
