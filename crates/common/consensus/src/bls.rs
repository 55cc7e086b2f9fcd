//! Opaque BLS byte containers. Nothing here verifies signatures: the light-client updater only
//! carries them from blocks into updates.

use alloy_primitives::hex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_utils::hex::PrefixedHexVisitor;
use ssz_derive::{Decode, Encode};
use ssz_types::{
    FixedVector,
    typenum::{U48, U96},
};
use tree_hash_derive::TreeHash;

#[derive(Debug, PartialEq, Eq, Clone, Default, Hash, Encode, Decode, TreeHash)]
pub struct PubKey {
    pub inner: FixedVector<u8, U48>,
}

#[derive(Debug, PartialEq, Eq, Clone, Default, Hash, Encode, Decode, TreeHash)]
pub struct BLSSignature {
    pub inner: FixedVector<u8, U96>,
}

/// Signature of an empty participation set, the infinity point.
pub const G2_POINT_AT_INFINITY: [u8; 96] = {
    let mut bytes = [0; 96];
    bytes[0] = 0xc0;
    bytes
};

impl BLSSignature {
    pub fn infinity() -> Self {
        Self {
            inner: FixedVector::from(G2_POINT_AT_INFINITY.to_vec()),
        }
    }
}

macro_rules! impl_hex_serde {
    ($type:ty) => {
        impl $type {
            pub fn to_bytes(&self) -> &[u8] {
                self.inner.iter().as_slice()
            }
        }

        impl Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&format!("0x{}", hex::encode(self.to_bytes())))
            }
        }

        impl<'de> Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let bytes = deserializer.deserialize_str(PrefixedHexVisitor)?;
                let inner = FixedVector::new(bytes).map_err(|err| {
                    serde::de::Error::custom(format!("Invalid byte length: {err:?}"))
                })?;
                Ok(Self { inner })
            }
        }
    };
}

impl_hex_serde!(PubKey);
impl_hex_serde!(BLSSignature);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_hex_round_trip() {
        let signature = BLSSignature::infinity();
        let json = serde_json::to_string(&signature).unwrap();
        assert!(json.starts_with("\"0xc000"));
        assert_eq!(serde_json::from_str::<BLSSignature>(&json).unwrap(), signature);
    }

    #[test]
    fn test_pubkey_rejects_wrong_length() {
        assert!(serde_json::from_str::<PubKey>("\"0x0102\"").is_err());
    }
}
