//! Lending pallet benchmarking.

#![cfg(feature = "runtime-benchmarks")]
use super::*;
use crate::Pallet as Lending;

use frame_benchmarking::{account, benchmarks, impl_benchmark_test_suite, whitelisted_caller};
use frame_support::assert_ok;
use frame_system::{self, RawOrigin as SystemOrigin};
use orml_traits::MultiCurrency;

const SEED: u32 = 0;

fn unit(d: u128) -> Balance {
    d.saturating_mul(10_u128.pow(DECIMALS))
}

fn fund<T: Config>(who: &T::AccountId, amount: Balance) {
    assert_ok!(<orml_tokens::Pallet<T> as MultiCurrency<T::AccountId>>::deposit(
        T::GetAssetId::get(),
        who,
        amount
    ));
}

/// Funds `who`, approves the pool and supplies `amount`.
fn supplier<T: Config>(who: &T::AccountId, amount: Balance) {
    fund::<T>(who, unit(1_000_000));
    assert_ok!(Lending::<T>::approve(SystemOrigin::Signed(who.clone()).into(), Balance::MAX));
    assert_ok!(Lending::<T>::supply(SystemOrigin::Signed(who.clone()).into(), amount));
}

fn assert_last_event<T: Config>(generic_event: <T as Config>::RuntimeEvent) {
    frame_system::Pallet::<T>::assert_last_event(generic_event.into());
}

benchmarks! {
    approve {
        let caller: T::AccountId = whitelisted_caller();
    }: _(SystemOrigin::Signed(caller.clone()), unit(100))
    verify {
        assert_eq!(Allowances::<T>::get(&caller), unit(100));
    }

    supply {
        let caller: T::AccountId = whitelisted_caller();
        fund::<T>(&caller, unit(1_000));
        assert_ok!(Lending::<T>::approve(SystemOrigin::Signed(caller.clone()).into(), unit(1_000)));
    }: _(SystemOrigin::Signed(caller.clone()), unit(100))
    verify {
        assert_eq!(AccountSupplies::<T>::get(&caller), unit(100));
    }

    withdraw {
        let caller: T::AccountId = whitelisted_caller();
        supplier::<T>(&caller, unit(1_000));
        assert_ok!(Lending::<T>::borrow(SystemOrigin::Signed(caller.clone()).into(), unit(100)));
    }: _(SystemOrigin::Signed(caller.clone()), unit(500))
    verify {
        assert_eq!(AccountSupplies::<T>::get(&caller), unit(500));
    }

    borrow {
        let caller: T::AccountId = whitelisted_caller();
        let lender: T::AccountId = account("lender", 0, SEED);
        supplier::<T>(&lender, unit(10_000));
        supplier::<T>(&caller, unit(1_000));
    }: _(SystemOrigin::Signed(caller.clone()), unit(750))
    verify {
        assert_eq!(AccountBorrows::<T>::get(&caller), unit(750));
    }

    repay {
        let caller: T::AccountId = whitelisted_caller();
        supplier::<T>(&caller, unit(1_000));
        assert_ok!(Lending::<T>::borrow(SystemOrigin::Signed(caller.clone()).into(), unit(500)));
    }: _(SystemOrigin::Signed(caller.clone()), unit(1_000))
    verify {
        assert_eq!(AccountBorrows::<T>::get(&caller), 0);
        assert_last_event::<T>(Event::<T>::Repaid {
            account_id: caller,
            amount: unit(500),
            timestamp: T::UnixTime::now().as_secs(),
        }.into());
    }
}

impl_benchmark_test_suite!(Lending, crate::mock::new_test_ext(), crate::mock::Test);
