// Copyright 2022 Interlay.
// This file is part of Interlay.

// Copyright 2021 Parallel Finance Developer.
// This file is part of Parallel Finance.

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{HEALTH_FACTOR_DANGER, HEALTH_FACTOR_SAFE, HEALTH_FACTOR_WARNING};
use codec::{Decode, Encode};
use frame_support::dispatch::DispatchError;
use scale_info::TypeInfo;
use sp_runtime::{Percent, RuntimeDebug};
#[cfg(feature = "std")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub trait LendingApi<AccountId, Balance> {
    fn do_supply(supplier: &AccountId, amount: Balance) -> Result<(), DispatchError>;
    fn do_withdraw(supplier: &AccountId, amount: Balance) -> Result<(), DispatchError>;
    fn do_borrow(borrower: &AccountId, amount: Balance) -> Result<(), DispatchError>;
    /// Returns the amount actually repaid, which is capped by the outstanding debt.
    fn do_repay(borrower: &AccountId, amount: Balance) -> Result<Balance, DispatchError>;
}

pub trait LendingPoolDataProvider<AccountId, Balance> {
    fn get_user_position(account_id: &AccountId) -> Result<UserPosition<Balance>, DispatchError>;
    fn calculate_max_withdraw(account_id: &AccountId) -> Result<Balance, DispatchError>;
    fn calculate_max_borrow(account_id: &AccountId) -> Result<Balance, DispatchError>;
    fn get_pool_info() -> Result<PoolInfo<Balance>, DispatchError>;
}

/// Health of a borrowing position, as a percentage of the borrowed amount that the
/// LTV-weighted collateral covers. Accounts without debt are `Unbounded`.
#[derive(Encode, Decode, Eq, PartialEq, Copy, Clone, RuntimeDebug, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub enum HealthFactor {
    Unbounded,
    Ratio(u128),
}

impl Default for HealthFactor {
    fn default() -> Self {
        HealthFactor::Unbounded
    }
}

impl HealthFactor {
    pub fn band(&self) -> HealthBand {
        match *self {
            HealthFactor::Unbounded => HealthBand::VerySafe,
            HealthFactor::Ratio(value) if value < HEALTH_FACTOR_DANGER => HealthBand::Danger,
            HealthFactor::Ratio(value) if value < HEALTH_FACTOR_WARNING => HealthBand::Warning,
            HealthFactor::Ratio(value) if value < HEALTH_FACTOR_SAFE => HealthBand::Safe,
            HealthFactor::Ratio(_) => HealthBand::VerySafe,
        }
    }

    /// Whether the debt is still covered by the LTV-weighted collateral.
    pub fn is_within_ltv(&self) -> bool {
        self.band() != HealthBand::Danger
    }
}

/// Risk classification of a [HealthFactor].
#[derive(Encode, Decode, Eq, PartialEq, Copy, Clone, RuntimeDebug, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub enum HealthBand {
    /// Below 100%: liquidation risk
    Danger,
    /// 100% up to 150%
    Warning,
    /// 150% up to 200%
    Safe,
    /// 200% and above, or no debt at all
    VerySafe,
}

/// Snapshot of a single account's position in the pool.
#[derive(Encode, Decode, Eq, PartialEq, Copy, Clone, RuntimeDebug, Default, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
#[cfg_attr(
    feature = "std",
    serde(bound(serialize = "Balance: std::fmt::Display", deserialize = "Balance: std::str::FromStr"))
)]
pub struct UserPosition<Balance> {
    #[cfg_attr(
        feature = "std",
        serde(serialize_with = "serialize_as_string", deserialize_with = "deserialize_from_string")
    )]
    pub supplied: Balance,
    #[cfg_attr(
        feature = "std",
        serde(serialize_with = "serialize_as_string", deserialize_with = "deserialize_from_string")
    )]
    pub borrowed: Balance,
    /// Equal to `supplied`: the pooled asset is its own collateral.
    #[cfg_attr(
        feature = "std",
        serde(serialize_with = "serialize_as_string", deserialize_with = "deserialize_from_string")
    )]
    pub collateral_value: Balance,
    pub health_factor: HealthFactor,
}

/// Pool aggregates together with the spot interest rates derived from them.
#[derive(Encode, Decode, Eq, PartialEq, Copy, Clone, RuntimeDebug, Default, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
#[cfg_attr(
    feature = "std",
    serde(bound(serialize = "Balance: std::fmt::Display", deserialize = "Balance: std::str::FromStr"))
)]
pub struct PoolInfo<Balance> {
    #[cfg_attr(
        feature = "std",
        serde(serialize_with = "serialize_as_string", deserialize_with = "deserialize_from_string")
    )]
    pub total_supply: Balance,
    #[cfg_attr(
        feature = "std",
        serde(serialize_with = "serialize_as_string", deserialize_with = "deserialize_from_string")
    )]
    pub total_borrow: Balance,
    pub utilization_rate: Percent,
    pub supply_rate: Percent,
    pub borrow_rate: Percent,
}

#[cfg(feature = "std")]
fn serialize_as_string<S: Serializer, T: std::fmt::Display>(t: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&t.to_string())
}

#[cfg(feature = "std")]
fn deserialize_from_string<'de, D: Deserializer<'de>, T: std::str::FromStr>(deserializer: D) -> Result<T, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse::<T>()
        .map_err(|_| serde::de::Error::custom("Parse from string failed"))
}
