#![warn(clippy::unwrap_used)]

pub mod beacon_block_header;
pub mod bls;
pub mod checkpoint;
pub mod constants;
pub mod fork;
pub mod light_client;
pub mod misc;
pub mod state;
pub mod sync_aggregate;
pub mod sync_committee;
