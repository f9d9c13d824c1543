//! Estimated weights for lending, derived from the storage accesses listed on each call.
//!
//! Not benchmark output: regenerate with `--features runtime-benchmarks` and
//! `benchmark pallet --pallet lending` before relying on the figures.

#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use sp_std::marker::PhantomData;

/// Weight functions needed for lending.
pub trait WeightInfo {
	fn approve() -> Weight;
	fn supply() -> Weight;
	fn withdraw() -> Weight;
	fn borrow() -> Weight;
	fn repay() -> Weight;
}

/// Weights for lending using the Substrate node and recommended hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
	// Storage: Lending Allowances (r:0 w:1)
	fn approve() -> Weight {
		Weight::from_parts(14_312_000, 0)
			.saturating_add(T::DbWeight::get().writes(1_u64))
	}
	// Storage: Lending Entered (r:1 w:1)
	// Storage: Lending AccountSupplies (r:1 w:1)
	// Storage: Lending TotalSupply (r:1 w:1)
	// Storage: Lending Allowances (r:1 w:1)
	// Storage: Tokens Accounts (r:2 w:2)
	// Storage: Timestamp Now (r:1 w:0)
	fn supply() -> Weight {
		Weight::from_parts(61_870_000, 5_214)
			.saturating_add(T::DbWeight::get().reads(7_u64))
			.saturating_add(T::DbWeight::get().writes(6_u64))
	}
	// Storage: Lending Entered (r:1 w:1)
	// Storage: Lending AccountSupplies (r:1 w:1)
	// Storage: Lending AccountBorrows (r:1 w:0)
	// Storage: Lending TotalSupply (r:1 w:1)
	// Storage: Lending TotalBorrows (r:1 w:0)
	// Storage: Tokens Accounts (r:2 w:2)
	// Storage: Timestamp Now (r:1 w:0)
	fn withdraw() -> Weight {
		Weight::from_parts(63_457_000, 5_214)
			.saturating_add(T::DbWeight::get().reads(8_u64))
			.saturating_add(T::DbWeight::get().writes(5_u64))
	}
	// Storage: Lending Entered (r:1 w:1)
	// Storage: Lending AccountSupplies (r:1 w:0)
	// Storage: Lending AccountBorrows (r:1 w:1)
	// Storage: Lending TotalSupply (r:1 w:0)
	// Storage: Lending TotalBorrows (r:1 w:1)
	// Storage: Tokens Accounts (r:2 w:2)
	// Storage: Timestamp Now (r:1 w:0)
	fn borrow() -> Weight {
		Weight::from_parts(64_102_000, 5_214)
			.saturating_add(T::DbWeight::get().reads(8_u64))
			.saturating_add(T::DbWeight::get().writes(5_u64))
	}
	// Storage: Lending Entered (r:1 w:1)
	// Storage: Lending AccountBorrows (r:1 w:1)
	// Storage: Lending TotalBorrows (r:1 w:1)
	// Storage: Lending Allowances (r:1 w:1)
	// Storage: Tokens Accounts (r:2 w:2)
	// Storage: Timestamp Now (r:1 w:0)
	fn repay() -> Weight {
		Weight::from_parts(60_233_000, 5_214)
			.saturating_add(T::DbWeight::get().reads(7_u64))
			.saturating_add(T::DbWeight::get().writes(6_u64))
	}
}

// For backwards compatibility and tests
impl WeightInfo for () {
	fn approve() -> Weight {
		Weight::from_parts(14_312_000, 0)
			.saturating_add(RocksDbWeight::get().writes(1_u64))
	}
	fn supply() -> Weight {
		Weight::from_parts(61_870_000, 5_214)
			.saturating_add(RocksDbWeight::get().reads(7_u64))
			.saturating_add(RocksDbWeight::get().writes(6_u64))
	}
	fn withdraw() -> Weight {
		Weight::from_parts(63_457_000, 5_214)
			.saturating_add(RocksDbWeight::get().reads(8_u64))
			.saturating_add(RocksDbWeight::get().writes(5_u64))
	}
	fn borrow() -> Weight {
		Weight::from_parts(64_102_000, 5_214)
			.saturating_add(RocksDbWeight::get().reads(8_u64))
			.saturating_add(RocksDbWeight::get().writes(5_u64))
	}
	fn repay() -> Weight {
		Weight::from_parts(60_233_000, 5_214)
			.saturating_add(RocksDbWeight::get().reads(7_u64))
			.saturating_add(RocksDbWeight::get().writes(6_u64))
	}
}
