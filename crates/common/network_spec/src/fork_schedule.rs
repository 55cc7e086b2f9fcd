use std::slice::Iter;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use sundial_consensus::fork::{Fork, ForkName};

/// Every fork of the chain in activation order, ``ForkName::Phase0`` first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkSchedule(pub [Fork; ForkSchedule::TOTAL]);

impl ForkSchedule {
    pub const TOTAL: usize = 6;

    const NAMES: [ForkName; ForkSchedule::TOTAL] = [
        ForkName::Phase0,
        ForkName::Altair,
        ForkName::Bellatrix,
        ForkName::Capella,
        ForkName::Deneb,
        ForkName::Electra,
    ];

    pub const fn new(forks: [Fork; ForkSchedule::TOTAL]) -> Self {
        Self(forks)
    }

    pub fn iter(&self) -> Iter<'_, Fork> {
        self.0.iter()
    }

    pub fn scheduled(&self) -> impl Iterator<Item = &Fork> {
        self.iter()
            .filter(|fork| fork.epoch != Fork::UNSCHEDULED_EPOCH)
    }

    /// Return the fork active at ``epoch`` together with its name.
    ///
    /// Fails when ``epoch`` precedes every scheduled fork.
    pub fn fork_with_name_at_epoch(&self, epoch: u64) -> anyhow::Result<(ForkName, Fork)> {
        Self::NAMES
            .iter()
            .zip(self.iter())
            .rev()
            .find(|(_, fork)| fork.epoch != Fork::UNSCHEDULED_EPOCH && fork.epoch <= epoch)
            .map(|(name, fork)| (*name, *fork))
            .ok_or_else(|| anyhow!("No fork is scheduled at or before epoch {epoch}"))
    }

    pub fn fork_at_epoch(&self, epoch: u64) -> anyhow::Result<Fork> {
        Ok(self.fork_with_name_at_epoch(epoch)?.1)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{aliases::B32, fixed_bytes};

    use super::*;

    fn fork(previous_version: B32, current_version: B32, epoch: u64) -> Fork {
        Fork {
            previous_version,
            current_version,
            epoch,
        }
    }

    fn schedule() -> ForkSchedule {
        ForkSchedule::new([
            fork(fixed_bytes!("0x00000000"), fixed_bytes!("0x00000000"), 10),
            fork(fixed_bytes!("0x00000000"), fixed_bytes!("0x01000000"), 20),
            fork(fixed_bytes!("0x01000000"), fixed_bytes!("0x02000000"), 20),
            fork(fixed_bytes!("0x02000000"), fixed_bytes!("0x03000000"), 30),
            fork(fixed_bytes!("0x03000000"), fixed_bytes!("0x04000000"), Fork::UNSCHEDULED_EPOCH),
            fork(fixed_bytes!("0x04000000"), fixed_bytes!("0x05000000"), Fork::UNSCHEDULED_EPOCH),
        ])
    }

    #[test]
    fn test_fork_at_epoch() {
        let schedule = schedule();
        assert_eq!(
            schedule.fork_with_name_at_epoch(10).unwrap().0,
            ForkName::Phase0
        );
        // bellatrix shares altair's epoch and wins as the later fork
        assert_eq!(
            schedule.fork_with_name_at_epoch(25).unwrap(),
            (ForkName::Bellatrix, schedule.0[2])
        );
        assert_eq!(
            schedule.fork_at_epoch(u64::MAX - 1).unwrap().current_version,
            fixed_bytes!("0x03000000")
        );
        assert_eq!(schedule.scheduled().count(), 4);
    }

    #[test]
    fn test_fork_at_epoch_before_genesis_fails() {
        assert!(schedule().fork_at_epoch(9).is_err());
    }
}
