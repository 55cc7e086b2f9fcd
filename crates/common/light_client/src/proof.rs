use alloy_primitives::B256;
use anyhow::{anyhow, ensure};
use ssz_types::{FixedVector, typenum::Unsigned};
use sundial_consensus::{
    constants::{
        BEACON_STATE_MERKLE_DEPTH, FINALIZED_ROOT_DEPTH, FINALIZED_ROOT_INDEX,
        NEXT_SYNC_COMMITTEE_DEPTH, NEXT_SYNC_COMMITTEE_INDEX,
    },
    light_client::{FinalityBranch, NextSyncCommitteeBranch},
    state::LightClientState,
};
use sundial_merkle::MerkleTree;

use crate::errors::LightClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateProofs {
    pub state_root: B256,
    /// Proves ``finalized_checkpoint.root``
    pub finality_branch: FinalityBranch,
    pub next_sync_committee_branch: NextSyncCommitteeBranch,
}

pub fn extract_state_proofs(state: &impl LightClientState) -> Result<StateProofs, LightClientError> {
    let tree = state_tree(state)?;
    Ok(StateProofs {
        state_root: tree.root(),
        finality_branch: prove_branch(&tree, FINALIZED_ROOT_INDEX, FINALIZED_ROOT_DEPTH)?,
        next_sync_committee_branch: next_sync_committee_branch(&tree)?,
    })
}

/// Build the state tree, rejecting trees whose shape the fixed generalized indices do not fit.
pub fn state_tree(state: &impl LightClientState) -> Result<MerkleTree, LightClientError> {
    let tree = state.merkle_tree().map_err(LightClientError::Proof)?;
    if tree.depth() != BEACON_STATE_MERKLE_DEPTH {
        return Err(LightClientError::Proof(anyhow!(
            "State tree has depth {}, expected {BEACON_STATE_MERKLE_DEPTH}",
            tree.depth()
        )));
    }
    Ok(tree)
}

pub fn next_sync_committee_branch(
    tree: &MerkleTree,
) -> Result<NextSyncCommitteeBranch, LightClientError> {
    prove_branch(tree, NEXT_SYNC_COMMITTEE_INDEX, NEXT_SYNC_COMMITTEE_DEPTH)
}

fn prove_branch<N: Unsigned>(
    tree: &MerkleTree,
    generalized_index: u64,
    depth: u64,
) -> Result<FixedVector<B256, N>, LightClientError> {
    let prove = || -> anyhow::Result<FixedVector<B256, N>> {
        let branch = tree.prove(generalized_index)?;
        ensure!(
            branch.len() as u64 == depth && N::to_u64() == depth,
            "Branch for generalized index {generalized_index} has length {}, expected {depth}",
            branch.len()
        );
        FixedVector::new(branch).map_err(|err| anyhow!("Invalid branch length: {err:?}"))
    };
    prove().map_err(LightClientError::Proof)
}
