use std::{fs, sync::Arc};

use anyhow::Context;

use crate::networks::{BeaconNetworkSpec, DEV, MAINNET, SEPOLIA};

/// Resolve a built-in network by name, or load a consensus ``config.yaml`` from a path.
pub fn beacon_network_parser(network_string: &str) -> anyhow::Result<Arc<BeaconNetworkSpec>> {
    match network_string {
        "mainnet" => Ok(MAINNET.clone()),
        "sepolia" => Ok(SEPOLIA.clone()),
        "dev" => Ok(DEV.clone()),
        path => read_network_spec(path),
    }
}

fn read_network_spec(path: &str) -> anyhow::Result<Arc<BeaconNetworkSpec>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let network_spec = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse network spec YAML from: {path}"))?;
    Ok(Arc::new(network_spec))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use alloy_primitives::fixed_bytes;

    use super::*;
    use crate::networks::Network;

    #[test]
    fn test_builtin_networks() {
        assert_eq!(beacon_network_parser("mainnet").unwrap().network, Network::Mainnet);
        assert_eq!(beacon_network_parser("dev").unwrap().network, Network::Dev);
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
PRESET_BASE: 'minimal'
CONFIG_NAME: 'kurtosis'
GENESIS_FORK_VERSION: 0x10000038
ALTAIR_FORK_VERSION: 0x20000038
ALTAIR_FORK_EPOCH: 0
BELLATRIX_FORK_VERSION: 0x30000038
BELLATRIX_FORK_EPOCH: 0
CAPELLA_FORK_VERSION: 0x40000038
CAPELLA_FORK_EPOCH: 0
DENEB_FORK_VERSION: 0x50000038
DENEB_FORK_EPOCH: 4
ELECTRA_FORK_VERSION: 0x60000038
ELECTRA_FORK_EPOCH: 18446744073709551615
SECONDS_PER_SLOT: 6
MIN_GENESIS_TIME: 1606824000
"#
        )
        .unwrap();

        let network_spec = beacon_network_parser(file.path().to_str().unwrap()).unwrap();
        assert_eq!(network_spec.network, Network::Custom("kurtosis".to_string()));
        assert_eq!(
            network_spec.fork_at_epoch(3).unwrap().current_version,
            fixed_bytes!("0x40000038")
        );
        assert_eq!(
            network_spec.fork_at_epoch(1_000_000).unwrap().current_version,
            fixed_bytes!("0x50000038")
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(beacon_network_parser("/nonexistent/config.yaml").is_err());
    }
}
