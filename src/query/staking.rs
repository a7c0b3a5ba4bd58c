//! Staking epoch schedule and reward APY arithmetic.
//!
//! Closed-form formulas over the weekly emission schedule: supply decays by
//! a fixed rate per week, and a fixed share of emissions goes to stakers.

use crate::Network;

/// Seconds per staking epoch.
pub const WEEK_SECONDS: u64 = 604_800;

/// Weekly emission decay rate.
pub const DECAY_RATE: f64 = 0.0205;

/// Token emission during the very first epoch.
pub const INITIAL_WEEKLY_SUPPLY: f64 = 14_463.369_230_769_231;

/// Share of emissions distributed to stakers.
pub const STAKING_REWARDS_RATIO: f64 = 0.6;

/// Fallback epoch schedule start for networks without their own
/// (Optimism mainnet).
pub const DEFAULT_EPOCH_START: u64 = 1_668_556_800;

/// Start and end timestamps of a weekly staking epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochDetails {
    pub epoch_start: u64,
    pub epoch_end: u64,
}

/// Boundaries of the given epoch on a network, falling back to the Optimism
/// mainnet schedule when the network has none.
pub fn epoch_details(network: &Network, epoch: u64) -> EpochDetails {
    let epoch_start =
        network.epoch_start().unwrap_or(DEFAULT_EPOCH_START) + WEEK_SECONDS * epoch;
    EpochDetails {
        epoch_start,
        epoch_end: epoch_start + WEEK_SECONDS,
    }
}

/// Yearly staking reward rate for the given total stake, `week_counter`
/// weeks into the emission schedule. Zero when nothing is staked.
pub fn staking_apy(total_staked_balance: f64, week_counter: u32) -> f64 {
    let supply_rate = 1.0 - DECAY_RATE;
    let start_weekly_supply = INITIAL_WEEKLY_SUPPLY * supply_rate.powi(week_counter as i32);
    let yearly_rewards = start_weekly_supply * (1.0 - supply_rate.powi(52)) / (1.0 - supply_rate);
    if total_staked_balance > 0.0 {
        yearly_rewards * STAKING_REWARDS_RATIO / total_staked_balance
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_details_schedule() {
        let optimism = Network::optimism();
        let first = epoch_details(&optimism, 0);
        assert_eq!(first.epoch_start, 1_668_556_800);
        assert_eq!(first.epoch_end, 1_668_556_800 + WEEK_SECONDS);

        let tenth = epoch_details(&optimism, 10);
        assert_eq!(tenth.epoch_start, first.epoch_start + 10 * WEEK_SECONDS);
    }

    #[test]
    fn test_epoch_details_falls_back_to_mainnet_schedule() {
        let custom = Network::custom(
            31_337,
            url::Url::parse("http://localhost:8000/subgraphs/futures").unwrap(),
            None,
        );
        assert_eq!(epoch_details(&custom, 0).epoch_start, DEFAULT_EPOCH_START);
    }

    #[test]
    fn test_apy_zero_without_stake() {
        assert_eq!(staking_apy(0.0, 5), 0.0);
        assert_eq!(staking_apy(-1.0, 5), 0.0);
    }

    #[test]
    fn test_apy_decays_over_weeks() {
        let early = staking_apy(1_000_000.0, 0);
        let late = staking_apy(1_000_000.0, 40);
        assert!(early > 0.0);
        assert!(late > 0.0);
        assert!(late < early);
    }

    #[test]
    fn test_apy_inverse_in_total_stake() {
        let small_pool = staking_apy(100_000.0, 3);
        let big_pool = staking_apy(1_000_000.0, 3);
        assert!((small_pool / big_pool - 10.0).abs() < 1e-9);
    }
}
