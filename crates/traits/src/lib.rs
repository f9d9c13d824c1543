#![cfg_attr(not(feature = "std"), no_std)]

pub mod lending;
pub use lending::*;

/// Balances are 18-decimal fixed point integers.
pub type Balance = u128;

/// Maximum share of the supplied collateral that may be borrowed, in percent.
pub const LTV_RATIO: u128 = 75;
/// Supply rate at zero utilization, in percent.
pub const BASE_RATE: u8 = 2;
/// Health factor below which a position is at risk of liquidation.
pub const HEALTH_FACTOR_DANGER: u128 = 100;
pub const HEALTH_FACTOR_WARNING: u128 = 150;
pub const HEALTH_FACTOR_SAFE: u128 = 200;
/// Decimals of the pooled asset.
pub const DECIMALS: u32 = 18;
