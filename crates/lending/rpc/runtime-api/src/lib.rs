//! Runtime API definition for the Lending pallet.

#![cfg_attr(not(feature = "std"), no_std)]

use codec::{Codec, Decode, Encode};
use frame_support::dispatch::DispatchError;
#[cfg(feature = "std")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use traits::{HealthBand, HealthFactor, PoolInfo, UserPosition};

#[derive(Eq, PartialEq, Encode, Decode, Default)]
#[cfg_attr(feature = "std", derive(Debug, Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
/// a wrapper around a balance, used in RPC to workaround a bug where using u128
/// in runtime-apis fails. See <https://github.com/paritytech/substrate/issues/4641>
pub struct BalanceWrapper<T> {
    #[cfg_attr(feature = "std", serde(bound(serialize = "T: std::fmt::Display")))]
    #[cfg_attr(feature = "std", serde(serialize_with = "serialize_as_string"))]
    #[cfg_attr(feature = "std", serde(bound(deserialize = "T: std::str::FromStr")))]
    #[cfg_attr(feature = "std", serde(deserialize_with = "deserialize_from_string"))]
    pub amount: T,
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

sp_api::decl_runtime_apis! {
    pub trait LendingApi<AccountId, Balance> where
        AccountId: Codec,
        Balance: Codec,
    {
        /// Supplied and borrowed amounts of `account_id` with its health factor.
        fn get_user_position(account_id: AccountId) -> Result<UserPosition<Balance>, DispatchError>;

        /// Largest amount `account_id` can withdraw without breaching the LTV limit.
        fn calculate_max_withdraw(account_id: AccountId) -> Result<BalanceWrapper<Balance>, DispatchError>;

        /// Largest additional amount `account_id` can borrow against its supply.
        fn calculate_max_borrow(account_id: AccountId) -> Result<BalanceWrapper<Balance>, DispatchError>;

        fn get_pool_info() -> Result<PoolInfo<Balance>, DispatchError>;

        fn free_liquidity() -> Result<BalanceWrapper<Balance>, DispatchError>;

        fn allowance(account_id: AccountId) -> BalanceWrapper<Balance>;
    }
}
