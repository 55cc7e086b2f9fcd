use std::sync::{Arc, LazyLock};

use alloy_primitives::{aliases::B32, fixed_bytes};
use serde::{Deserialize, Serialize};
use sundial_consensus::fork::{Fork, ForkName};

use crate::fork_schedule::ForkSchedule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Sepolia,
    Dev,
    Custom(String),
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Dev => "dev",
            Network::Custom(name) => name,
        })
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "sepolia" => Ok(Network::Sepolia),
            "dev" => Ok(Network::Dev),
            custom => Ok(Network::Custom(custom.to_string())),
        }
    }
}

/// The subset of a consensus config file that light-client update tracking depends on.
///
/// Keys are spelled like the upstream ``config.yaml`` files so those can be loaded directly;
/// unrelated keys are ignored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct BeaconNetworkSpec {
    pub preset_base: String,
    #[serde(rename = "CONFIG_NAME")]
    pub network: Network,

    // Genesis
    #[serde(with = "crate::b32_hex")]
    pub genesis_fork_version: B32,

    // Forking
    #[serde(with = "crate::b32_hex")]
    pub altair_fork_version: B32,
    pub altair_fork_epoch: u64,
    #[serde(with = "crate::b32_hex")]
    pub bellatrix_fork_version: B32,
    pub bellatrix_fork_epoch: u64,
    #[serde(with = "crate::b32_hex")]
    pub capella_fork_version: B32,
    pub capella_fork_epoch: u64,
    #[serde(with = "crate::b32_hex")]
    pub deneb_fork_version: B32,
    pub deneb_fork_epoch: u64,
    #[serde(with = "crate::b32_hex")]
    pub electra_fork_version: B32,
    pub electra_fork_epoch: u64,

    // Time parameters
    pub seconds_per_slot: u64,
}

impl BeaconNetworkSpec {
    pub fn fork_schedule(&self) -> ForkSchedule {
        ForkSchedule::new([
            Fork {
                previous_version: self.genesis_fork_version,
                current_version: self.genesis_fork_version,
                epoch: 0,
            },
            Fork {
                previous_version: self.genesis_fork_version,
                current_version: self.altair_fork_version,
                epoch: self.altair_fork_epoch,
            },
            Fork {
                previous_version: self.altair_fork_version,
                current_version: self.bellatrix_fork_version,
                epoch: self.bellatrix_fork_epoch,
            },
            Fork {
                previous_version: self.bellatrix_fork_version,
                current_version: self.capella_fork_version,
                epoch: self.capella_fork_epoch,
            },
            Fork {
                previous_version: self.capella_fork_version,
                current_version: self.deneb_fork_version,
                epoch: self.deneb_fork_epoch,
            },
            Fork {
                previous_version: self.deneb_fork_version,
                current_version: self.electra_fork_version,
                epoch: self.electra_fork_epoch,
            },
        ])
    }

    pub fn fork_at_epoch(&self, epoch: u64) -> anyhow::Result<Fork> {
        self.fork_schedule().fork_at_epoch(epoch)
    }

    pub fn fork_name_at_epoch(&self, epoch: u64) -> anyhow::Result<ForkName> {
        Ok(self.fork_with_name_at_epoch(epoch)?.0)
    }

    pub fn fork_with_name_at_epoch(&self, epoch: u64) -> anyhow::Result<(ForkName, Fork)> {
        self.fork_schedule().fork_with_name_at_epoch(epoch)
    }
}

pub static MAINNET: LazyLock<Arc<BeaconNetworkSpec>> = LazyLock::new(|| {
    BeaconNetworkSpec {
        preset_base: "mainnet".to_string(),
        network: Network::Mainnet,
        genesis_fork_version: fixed_bytes!("0x00000000"),
        altair_fork_version: fixed_bytes!("0x01000000"),
        altair_fork_epoch: 74240,
        bellatrix_fork_version: fixed_bytes!("0x02000000"),
        bellatrix_fork_epoch: 144896,
        capella_fork_version: fixed_bytes!("0x03000000"),
        capella_fork_epoch: 194048,
        deneb_fork_version: fixed_bytes!("0x04000000"),
        deneb_fork_epoch: 269568,
        electra_fork_version: fixed_bytes!("0x05000000"),
        electra_fork_epoch: 364032,
        seconds_per_slot: 12,
    }
    .into()
});

pub static SEPOLIA: LazyLock<Arc<BeaconNetworkSpec>> = LazyLock::new(|| {
    BeaconNetworkSpec {
        preset_base: "mainnet".to_string(),
        network: Network::Sepolia,
        genesis_fork_version: fixed_bytes!("0x90000069"),
        altair_fork_version: fixed_bytes!("0x90000070"),
        altair_fork_epoch: 50,
        bellatrix_fork_version: fixed_bytes!("0x90000071"),
        bellatrix_fork_epoch: 100,
        capella_fork_version: fixed_bytes!("0x90000072"),
        capella_fork_epoch: 56832,
        deneb_fork_version: fixed_bytes!("0x90000073"),
        deneb_fork_epoch: 132608,
        electra_fork_version: fixed_bytes!("0x90000074"),
        electra_fork_epoch: 222464,
        seconds_per_slot: 12,
    }
    .into()
});

/// Local development network with every fork active from genesis.
pub static DEV: LazyLock<Arc<BeaconNetworkSpec>> = LazyLock::new(|| {
    BeaconNetworkSpec {
        preset_base: "mainnet".to_string(),
        network: Network::Dev,
        genesis_fork_version: fixed_bytes!("0x00000001"),
        altair_fork_version: fixed_bytes!("0x01000001"),
        altair_fork_epoch: 0,
        bellatrix_fork_version: fixed_bytes!("0x02000001"),
        bellatrix_fork_epoch: 0,
        capella_fork_version: fixed_bytes!("0x03000001"),
        capella_fork_epoch: 0,
        deneb_fork_version: fixed_bytes!("0x04000001"),
        deneb_fork_epoch: 0,
        electra_fork_version: fixed_bytes!("0x05000001"),
        electra_fork_epoch: 0,
        seconds_per_slot: 12,
    }
    .into()
});
