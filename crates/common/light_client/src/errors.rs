use alloy_primitives::B256;
use sundial_consensus::fork::ForkName;
use sundial_storage::errors::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightClientError {
    #[error(
        "Light-client updates need an Altair through Deneb state and a block with a sync aggregate, got {fork_name:?} at slot {slot}"
    )]
    StateType { slot: u64, fork_name: ForkName },

    #[error("Failed to prove state fields: {0:#}")]
    Proof(anyhow::Error),

    #[error("No sync committee fork active at epoch {epoch}: {error:#}")]
    ForkLookup { epoch: u64, error: anyhow::Error },

    #[error(
        "State at slot {state_slot} with root {state_root} is not the post-state of block at slot {block_slot} with state root {block_state_root}"
    )]
    StateBlockMismatch {
        block_slot: u64,
        state_slot: u64,
        state_root: B256,
        block_state_root: B256,
    },

    #[error("Block root at slot {slot} is outside the state's block roots window")]
    BlockRootNotFound { slot: u64 },

    #[error(
        "Finalized block root {block_root} does not match checkpoint root {checkpoint_root} at epoch {epoch}"
    )]
    CheckpointMismatch {
        epoch: u64,
        block_root: B256,
        checkpoint_root: B256,
    },

    #[error("No attested data cached for block root {block_root}")]
    Uncorrelated { block_root: B256 },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl LightClientError {
    /// Errors that are expected in steady state and only mean no update is produced.
    pub fn is_benign(&self) -> bool {
        matches!(self, LightClientError::Uncorrelated { .. })
    }
}
