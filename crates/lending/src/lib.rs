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

//! # Lending pallet
//!
//! ## Overview
//!
//! The lending pallet implements a single-asset, over-collateralized lending pool. Accounts supply
//! the pooled asset, and may borrow the same asset against their own supply up to a fixed
//! loan-to-value ceiling (`LTV_RATIO`). Interest rates are spot values that grow linearly with the
//! utilization of the pool; there is no accrual over time, so outstanding debt never grows on its own.
//!
//! Funds are held by the pallet account derived from `PalletId`. Supplying and repaying pull funds
//! from the caller, which requires a prior `approve` call, in the same way an ERC-20 `transferFrom`
//! requires an allowance.

#![cfg_attr(not(feature = "std"), no_std)]

pub use crate::rate_model::LinearModel;

use frame_support::{log, pallet_prelude::*, traits::UnixTime, transactional, PalletId};
use frame_system::pallet_prelude::*;
pub use pallet::*;
use sp_runtime::{
    traits::{AccountIdConversion, Zero},
    ArithmeticError,
};
use sp_std::{marker, result::Result};

pub use traits::{
    Balance, HealthBand, HealthFactor, LendingApi as LendingTrait, LendingPoolDataProvider, PoolInfo, UserPosition,
    BASE_RATE, DECIMALS, HEALTH_FACTOR_DANGER, HEALTH_FACTOR_SAFE, HEALTH_FACTOR_WARNING, LTV_RATIO,
};

pub use default_weights::WeightInfo;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

#[cfg(test)]
mod mock;

mod custody;
pub mod rate_model;
pub mod risk;

mod default_weights;

type AccountIdOf<T> = <T as frame_system::Config>::AccountId;
pub(crate) type CurrencyId<T> = <T as orml_tokens::Config>::CurrencyId;

#[frame_support::pallet]
pub mod pallet {

    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config + orml_tokens::Config<Balance = Balance> {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// The pallet id, used to derive the account that holds the liquidity of the pool.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// The asset that is supplied to and borrowed from the pool.
        #[pallet::constant]
        type GetAssetId: Get<CurrencyId<Self>>;

        /// Unix time
        type UnixTime: UnixTime;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Amount cannot be zero
        InvalidAmount,
        /// Requested more than the account has supplied, or repaid without any debt
        InsufficientBalance,
        /// The pool does not have enough allowance over, or the account does not hold enough of, the
        /// pulled funds
        InsufficientAuthorization,
        /// Withdrawing would bring the remaining supply below what the outstanding debt requires
        UnhealthyPosition,
        /// Borrowing would exceed the loan-to-value ceiling of the account
        ExceedsBorrowLimit,
        /// Not enough free liquidity in the pool
        InsufficientLiquidity,
        /// A lending operation was entered while another one was still in progress
        ReentrantCall,
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub (crate) fn deposit_event)]
    pub enum Event<T: Config> {
        /// The pool may now pull up to `amount` from `owner`
        Approval { owner: T::AccountId, amount: Balance },
        /// Event emitted when assets are supplied to the pool
        Supplied {
            account_id: T::AccountId,
            amount: Balance,
            timestamp: u64,
        },
        /// Event emitted when supplied assets are withdrawn
        Withdrawn {
            account_id: T::AccountId,
            amount: Balance,
            timestamp: u64,
        },
        /// Event emitted when assets are borrowed
        Borrowed {
            account_id: T::AccountId,
            amount: Balance,
            timestamp: u64,
        },
        /// Event emitted when a borrow is repaid. `amount` is capped by the outstanding debt.
        Repaid {
            account_id: T::AccountId,
            amount: Balance,
            timestamp: u64,
        },
    }

    /// Sum of all supplied balances.
    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T: Config> = StorageValue<_, Balance, ValueQuery>;

    /// Sum of all outstanding borrows.
    #[pallet::storage]
    #[pallet::getter(fn total_borrows)]
    pub type TotalBorrows<T: Config> = StorageValue<_, Balance, ValueQuery>;

    /// Mapping of account to its supplied balance.
    #[pallet::storage]
    #[pallet::getter(fn account_supplies)]
    pub type AccountSupplies<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, Balance, ValueQuery>;

    /// Mapping of account to its outstanding borrow.
    #[pallet::storage]
    #[pallet::getter(fn account_borrows)]
    pub type AccountBorrows<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, Balance, ValueQuery>;

    /// Amount the pool is still allowed to pull from each account.
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, Balance, ValueQuery>;

    /// Set while a lending operation is being executed.
    #[pallet::storage]
    pub(crate) type Entered<T: Config> = StorageValue<_, bool, ValueQuery>;

    #[pallet::pallet]
    pub struct Pallet<T>(marker::PhantomData<T>);

    #[pallet::extra_constants]
    impl<T: Config> Pallet<T> {
        /// Maximum borrow as a percentage of the supplied collateral.
        fn ltv_ratio() -> u128 {
            LTV_RATIO
        }

        /// Supply rate at zero utilization, in percent.
        fn base_rate() -> u8 {
            BASE_RATE
        }

        fn health_factor_danger() -> u128 {
            HEALTH_FACTOR_DANGER
        }

        fn health_factor_warning() -> u128 {
            HEALTH_FACTOR_WARNING
        }

        fn health_factor_safe() -> u128 {
            HEALTH_FACTOR_SAFE
        }

        /// Decimals of the pooled asset.
        fn decimals() -> u32 {
            DECIMALS
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Sets the amount the pool may pull from the caller on `supply` and `repay`.
        /// Overwrites any previous allowance; zero revokes it and `Balance::MAX` never runs out.
        ///
        /// - `amount`: the new allowance.
        #[pallet::call_index(0)]
        #[pallet::weight(<T as Config>::WeightInfo::approve())]
        #[transactional]
        pub fn approve(origin: OriginFor<T>, #[pallet::compact] amount: Balance) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::do_approve(&who, amount);

            Ok(().into())
        }

        /// The caller supplies assets into the pool.
        ///
        /// - `amount`: the amount to be supplied.
        #[pallet::call_index(1)]
        #[pallet::weight(<T as Config>::WeightInfo::supply())]
        #[transactional]
        pub fn supply(origin: OriginFor<T>, #[pallet::compact] amount: Balance) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::do_supply(&who, amount)?;

            Ok(().into())
        }

        /// The caller withdraws previously supplied assets. Fails if the remaining supply
        /// would no longer back the caller's outstanding borrow.
        ///
        /// - `amount`: the amount to be withdrawn.
        #[pallet::call_index(2)]
        #[pallet::weight(<T as Config>::WeightInfo::withdraw())]
        #[transactional]
        pub fn withdraw(origin: OriginFor<T>, #[pallet::compact] amount: Balance) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::do_withdraw(&who, amount)?;

            Ok(().into())
        }

        /// The caller borrows `amount` from the pool, using their supplied assets as collateral.
        ///
        /// - `amount`: the amount to be borrowed.
        #[pallet::call_index(3)]
        #[pallet::weight(<T as Config>::WeightInfo::borrow())]
        #[transactional]
        pub fn borrow(origin: OriginFor<T>, #[pallet::compact] amount: Balance) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::do_borrow(&who, amount)?;

            Ok(().into())
        }

        /// The caller repays some of their debt. Amounts above the outstanding
        /// debt are capped, only the capped amount is pulled.
        ///
        /// - `amount`: the amount to be repaid.
        #[pallet::call_index(4)]
        #[pallet::weight(<T as Config>::WeightInfo::repay())]
        #[transactional]
        pub fn repay(origin: OriginFor<T>, #[pallet::compact] amount: Balance) -> DispatchResultWithPostInfo {
            let who = ensure_signed(origin)?;
            Self::do_repay(&who, amount)?;

            Ok(().into())
        }
    }
}

impl<T: Config> Pallet<T> {
    pub fn account_id() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    /// Funds held by the pool that are not lent out.
    pub fn free_liquidity() -> Result<Balance, DispatchError> {
        Ok(Self::total_supply()
            .checked_sub(Self::total_borrows())
            .ok_or(ArithmeticError::Underflow)?)
    }

    pub fn get_user_position(account_id: &T::AccountId) -> Result<UserPosition<Balance>, DispatchError> {
        let supplied = Self::account_supplies(account_id);
        let borrowed = Self::account_borrows(account_id);
        Ok(UserPosition {
            supplied,
            borrowed,
            collateral_value: supplied,
            health_factor: risk::health_factor(supplied, borrowed),
        })
    }

    pub fn calculate_max_withdraw(account_id: &T::AccountId) -> Result<Balance, DispatchError> {
        let max_withdraw = risk::max_withdraw(Self::account_supplies(account_id), Self::account_borrows(account_id))?;
        Ok(max_withdraw)
    }

    pub fn calculate_max_borrow(account_id: &T::AccountId) -> Result<Balance, DispatchError> {
        let max_borrow = risk::max_borrow(Self::account_supplies(account_id), Self::account_borrows(account_id))?;
        Ok(max_borrow)
    }

    pub fn get_pool_info() -> Result<PoolInfo<Balance>, DispatchError> {
        let total_supply = Self::total_supply();
        let total_borrow = Self::total_borrows();
        let model = LinearModel::default();
        let utilization_rate = model.utilization(total_supply, total_borrow)?;
        Ok(PoolInfo {
            total_supply,
            total_borrow,
            utilization_rate,
            supply_rate: model.supply_rate(utilization_rate),
            borrow_rate: model.borrow_rate(utilization_rate),
        })
    }

    pub fn withdraw_allowed(supplier: &T::AccountId, amount: Balance) -> DispatchResult {
        ensure!(!amount.is_zero(), Error::<T>::InvalidAmount);

        let supplied = Self::account_supplies(supplier);
        let borrowed = Self::account_borrows(supplier);
        let max_withdraw = risk::max_withdraw(supplied, borrowed)?;
        let liquidity = Self::free_liquidity()?;
        log::trace!(
            target: "lending::withdraw_allowed",
            "account: {:?}, amount: {:?}, supplied: {:?}, borrowed: {:?}, max_withdraw: {:?}, liquidity: {:?}",
            supplier,
            amount,
            supplied,
            borrowed,
            max_withdraw,
            liquidity,
        );

        ensure!(amount <= supplied, Error::<T>::InsufficientBalance);
        ensure!(amount <= max_withdraw, Error::<T>::UnhealthyPosition);
        ensure!(amount <= liquidity, Error::<T>::InsufficientLiquidity);
        Ok(())
    }

    pub fn borrow_allowed(borrower: &T::AccountId, amount: Balance) -> DispatchResult {
        ensure!(!amount.is_zero(), Error::<T>::InvalidAmount);

        let max_borrow = Self::calculate_max_borrow(borrower)?;
        let liquidity = Self::free_liquidity()?;
        log::trace!(
            target: "lending::borrow_allowed",
            "account: {:?}, amount: {:?}, max_borrow: {:?}, liquidity: {:?}",
            borrower,
            amount,
            max_borrow,
            liquidity,
        );

        ensure!(amount <= max_borrow, Error::<T>::ExceedsBorrowLimit);
        ensure!(amount <= liquidity, Error::<T>::InsufficientLiquidity);
        Ok(())
    }

    pub(crate) fn do_approve(owner: &T::AccountId, amount: Balance) {
        if amount.is_zero() {
            Allowances::<T>::remove(owner);
        } else {
            Allowances::<T>::insert(owner, amount);
        }
        Self::deposit_event(Event::<T>::Approval {
            owner: owner.clone(),
            amount,
        });
    }

    /// Runs `f` with the reentrancy latch set. Fails without running `f` if the latch
    /// is already set, i.e. when called back from within another lending operation.
    fn non_reentrant<R>(f: impl FnOnce() -> Result<R, DispatchError>) -> Result<R, DispatchError> {
        if Entered::<T>::get() {
            log::debug!(target: "lending::non_reentrant", "rejected nested call");
            return Err(Error::<T>::ReentrantCall.into());
        }
        Entered::<T>::put(true);
        let result = f();
        Entered::<T>::kill();
        result
    }

    fn now() -> u64 {
        T::UnixTime::now().as_secs()
    }
}

impl<T: Config> LendingTrait<AccountIdOf<T>, Balance> for Pallet<T> {
    fn do_supply(supplier: &AccountIdOf<T>, amount: Balance) -> Result<(), DispatchError> {
        Self::non_reentrant(|| {
            ensure!(!amount.is_zero(), Error::<T>::InvalidAmount);

            let account_supplies_new = Self::account_supplies(supplier)
                .checked_add(amount)
                .ok_or(ArithmeticError::Overflow)?;
            let total_supply_new = Self::total_supply()
                .checked_add(amount)
                .ok_or(ArithmeticError::Overflow)?;

            Self::pull(supplier, amount)?;

            AccountSupplies::<T>::insert(supplier, account_supplies_new);
            TotalSupply::<T>::put(total_supply_new);

            Self::deposit_event(Event::<T>::Supplied {
                account_id: supplier.clone(),
                amount,
                timestamp: Self::now(),
            });
            Ok(())
        })
    }

    fn do_withdraw(supplier: &AccountIdOf<T>, amount: Balance) -> Result<(), DispatchError> {
        Self::non_reentrant(|| {
            Self::withdraw_allowed(supplier, amount)?;

            let account_supplies_new = Self::account_supplies(supplier)
                .checked_sub(amount)
                .ok_or(ArithmeticError::Underflow)?;
            let total_supply_new = Self::total_supply()
                .checked_sub(amount)
                .ok_or(ArithmeticError::Underflow)?;

            Self::push(supplier, amount)?;

            AccountSupplies::<T>::insert(supplier, account_supplies_new);
            TotalSupply::<T>::put(total_supply_new);

            Self::deposit_event(Event::<T>::Withdrawn {
                account_id: supplier.clone(),
                amount,
                timestamp: Self::now(),
            });
            Ok(())
        })
    }

    fn do_borrow(borrower: &AccountIdOf<T>, amount: Balance) -> Result<(), DispatchError> {
        Self::non_reentrant(|| {
            Self::borrow_allowed(borrower, amount)?;

            let account_borrows_new = Self::account_borrows(borrower)
                .checked_add(amount)
                .ok_or(ArithmeticError::Overflow)?;
            let total_borrows_new = Self::total_borrows()
                .checked_add(amount)
                .ok_or(ArithmeticError::Overflow)?;

            Self::push(borrower, amount)?;

            AccountBorrows::<T>::insert(borrower, account_borrows_new);
            TotalBorrows::<T>::put(total_borrows_new);

            Self::deposit_event(Event::<T>::Borrowed {
                account_id: borrower.clone(),
                amount,
                timestamp: Self::now(),
            });
            Ok(())
        })
    }

    fn do_repay(borrower: &AccountIdOf<T>, amount: Balance) -> Result<Balance, DispatchError> {
        Self::non_reentrant(|| {
            ensure!(!amount.is_zero(), Error::<T>::InvalidAmount);

            let account_borrows = Self::account_borrows(borrower);
            ensure!(!account_borrows.is_zero(), Error::<T>::InsufficientBalance);
            let repay_amount = amount.min(account_borrows);
            log::trace!(
                target: "lending::do_repay",
                "account: {:?}, amount: {:?}, account_borrows: {:?}, repay_amount: {:?}",
                borrower,
                amount,
                account_borrows,
                repay_amount,
            );

            let total_borrows_new = Self::total_borrows()
                .checked_sub(repay_amount)
                .ok_or(ArithmeticError::Underflow)?;

            Self::pull(borrower, repay_amount)?;

            AccountBorrows::<T>::insert(borrower, account_borrows.saturating_sub(repay_amount));
            TotalBorrows::<T>::put(total_borrows_new);

            Self::deposit_event(Event::<T>::Repaid {
                account_id: borrower.clone(),
                amount: repay_amount,
                timestamp: Self::now(),
            });
            Ok(repay_amount)
        })
    }
}

impl<T: Config> LendingPoolDataProvider<AccountIdOf<T>, Balance> for Pallet<T> {
    fn get_user_position(account_id: &AccountIdOf<T>) -> Result<UserPosition<Balance>, DispatchError> {
        Pallet::<T>::get_user_position(account_id)
    }

    fn calculate_max_withdraw(account_id: &AccountIdOf<T>) -> Result<Balance, DispatchError> {
        Pallet::<T>::calculate_max_withdraw(account_id)
    }

    fn calculate_max_borrow(account_id: &AccountIdOf<T>) -> Result<Balance, DispatchError> {
        Pallet::<T>::calculate_max_borrow(account_id)
    }

    fn get_pool_info() -> Result<PoolInfo<Balance>, DispatchError> {
        Pallet::<T>::get_pool_info()
    }
}
