use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::{BitVector, typenum::U512};
use tree_hash_derive::TreeHash;

use crate::bls::BLSSignature;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SyncAggregate {
    pub sync_committee_bits: BitVector<U512>,
    pub sync_committee_signature: BLSSignature,
}

impl SyncAggregate {
    /// Number of sync committee members that signed.
    pub fn num_participants(&self) -> u64 {
        self.sync_committee_bits.num_set_bits() as u64
    }
}

impl Default for SyncAggregate {
    fn default() -> Self {
        Self {
            sync_committee_bits: BitVector::new(),
            sync_committee_signature: BLSSignature::infinity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_participants() {
        let mut sync_aggregate = SyncAggregate::default();
        assert_eq!(sync_aggregate.num_participants(), 0);
        for index in [0, 3, 511] {
            sync_aggregate.sync_committee_bits.set(index, true).unwrap();
        }
        assert_eq!(sync_aggregate.num_participants(), 3);
    }
}
