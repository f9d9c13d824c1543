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

pub use super::*;

use crate as lending;

use frame_benchmarking::whitelisted_caller;
use frame_support::{
    construct_runtime, parameter_types,
    traits::{ConstU32, Everything},
    PalletId,
};
use orml_traits::{
    currency::{MutationHooks, OnTransfer},
    parameter_type_with_key,
};
use sp_core::H256;
use sp_runtime::{testing::Header, traits::IdentityLookup, AccountId32};
use std::cell::RefCell;

type UncheckedExtrinsic = frame_system::mocking::MockUncheckedExtrinsic<Test>;
type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
    pub enum Test where
        Block = Block,
        NodeBlock = Block,
        UncheckedExtrinsic = UncheckedExtrinsic,
    {
        System: frame_system::{Pallet, Call, Storage, Config, Event<T>},
        Lending: lending::{Pallet, Storage, Call, Event<T>},
        TimestampPallet: pallet_timestamp::{Pallet, Call, Storage, Inherent},
        Tokens: orml_tokens::{Pallet, Call, Storage, Config<T>, Event<T>},
    }
);

parameter_types! {
    pub const BlockHashCount: u64 = 250;
    pub const SS58Prefix: u8 = 42;
}

impl frame_system::Config for Test {
    type BaseCallFilter = Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Index = u64;
    type BlockNumber = BlockNumber;
    type Hash = H256;
    type Hashing = ::sp_runtime::traits::BlakeTwo256;
    type AccountId = AccountId;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Header = Header;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = BlockHashCount;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = SS58Prefix;
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

pub type AccountId = AccountId32;
pub type BlockNumber = u64;
pub type CurrencyId = u32;

pub const ALICE: AccountId = AccountId32::new([1u8; 32]);
pub const BOB: AccountId = AccountId32::new([2u8; 32]);
pub const CHARLIE: AccountId = AccountId32::new([3u8; 32]);
pub const DAVE: AccountId = AccountId32::new([4u8; 32]);
pub const EVE: AccountId = AccountId32::new([5u8; 32]);

pub const DOT: CurrencyId = 0;
/// Not accepted by the pool.
pub const KSM: CurrencyId = 1;

parameter_types! {
    pub const MinimumPeriod: u64 = 5;
}

impl pallet_timestamp::Config for Test {
    type Moment = u64;
    type OnTimestampSet = ();
    type MinimumPeriod = MinimumPeriod;
    type WeightInfo = ();
}

parameter_type_with_key! {
    pub ExistentialDeposits: |_currency_id: CurrencyId| -> Balance {
        Zero::zero()
    };
}

/// A lending call the token ledger makes from within its transfer hook.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NestedCall {
    Supply,
    Withdraw,
    Borrow,
    Repay,
}

thread_local! {
    static NESTED_CALL: RefCell<Option<(AccountId, NestedCall)>> = RefCell::new(None);
    static NESTED_CALL_RESULT: RefCell<Option<DispatchResult>> = RefCell::new(None);
}

/// Makes the next token transfer call back into the pallet as `who`.
pub fn reenter_on_next_transfer(who: AccountId, call: NestedCall) {
    NESTED_CALL.with(|c| *c.borrow_mut() = Some((who, call)));
    NESTED_CALL_RESULT.with(|r| *r.borrow_mut() = None);
}

/// Result of the callback made by the last hooked transfer, if any.
pub fn nested_call_result() -> Option<DispatchResult> {
    NESTED_CALL_RESULT.with(|r| r.borrow().clone())
}

pub struct CallBackIntoLending;
impl OnTransfer<AccountId, CurrencyId, Balance> for CallBackIntoLending {
    fn on_transfer(_currency_id: CurrencyId, _from: &AccountId, _to: &AccountId, _amount: Balance) -> DispatchResult {
        if let Some((who, call)) = NESTED_CALL.with(|c| c.borrow_mut().take()) {
            let origin = RuntimeOrigin::signed(who);
            let result = match call {
                NestedCall::Supply => Lending::supply(origin, unit(1)),
                NestedCall::Withdraw => Lending::withdraw(origin, unit(1)),
                NestedCall::Borrow => Lending::borrow(origin, unit(1)),
                NestedCall::Repay => Lending::repay(origin, unit(1)),
            };
            NESTED_CALL_RESULT.with(|r| *r.borrow_mut() = Some(result.map(|_| ()).map_err(|e| e.error)));
        }
        Ok(())
    }
}

pub struct CurrencyHooks;
impl MutationHooks<AccountId, CurrencyId, Balance> for CurrencyHooks {
    type OnDust = ();
    type OnSlash = ();
    type PreDeposit = ();
    type PostDeposit = ();
    type PreTransfer = ();
    type PostTransfer = CallBackIntoLending;
    type OnNewTokenAccount = ();
    type OnKilledTokenAccount = ();
}

parameter_types! {
    pub const MaxLocks: u32 = 50;
}

impl orml_tokens::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Balance = Balance;
    type Amount = i128;
    type CurrencyId = CurrencyId;
    type WeightInfo = ();
    type ExistentialDeposits = ExistentialDeposits;
    type CurrencyHooks = CurrencyHooks;
    type MaxLocks = MaxLocks;
    type DustRemovalWhitelist = Everything;
    type MaxReserves = ConstU32<0>; // we don't use named reserves
    type ReserveIdentifier = (); // we don't use named reserves
}

parameter_types! {
    pub const LendingPalletId: PalletId = PalletId(*b"ldg/pool");
    pub const GetAssetId: CurrencyId = DOT;
}

impl Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type PalletId = LendingPalletId;
    type GetAssetId = GetAssetId;
    type UnixTime = TimestampPallet;
    type WeightInfo = ();
}

/// `d` whole tokens of the 18-decimal pooled asset.
pub fn unit(d: u128) -> u128 {
    d.saturating_mul(10_u128.pow(DECIMALS))
}

pub fn million_unit(d: u128) -> u128 {
    unit(d) * 10_u128.pow(6)
}

#[cfg(test)]
pub(crate) fn set_mock_balances() {
    for account in [ALICE, BOB, CHARLIE, DAVE] {
        Tokens::set_balance(RuntimeOrigin::root(), account.clone(), DOT, million_unit(1), 0).unwrap();
        Tokens::set_balance(RuntimeOrigin::root(), account, KSM, million_unit(1), 0).unwrap();
    }
    Tokens::set_balance(RuntimeOrigin::root(), whitelisted_caller(), DOT, million_unit(1), 0).unwrap();
}

/// Approves the pool to pull an effectively unlimited amount from `who`.
#[cfg(test)]
pub(crate) fn approve_max(who: &AccountId) {
    Lending::approve(RuntimeOrigin::signed(who.clone()), Balance::MAX).unwrap();
}

#[cfg(test)]
pub(crate) fn new_test_ext() -> sp_io::TestExternalities {
    let t = frame_system::GenesisConfig::default().build_storage::<Test>().unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| {
        // Init assets
        set_mock_balances();

        System::set_block_number(1);
        TimestampPallet::set_timestamp(6000);
    });
    ext
}

/// Progress to the given block, advancing the timestamp by six seconds per block.
pub(crate) fn run_to_block(n: BlockNumber) {
    for b in (System::block_number() + 1)..=n {
        System::set_block_number(b);
        TimestampPallet::set_timestamp(6000 * b);
    }
}

pub(crate) fn free_balance(currency_id: CurrencyId, who: &AccountId) -> Balance {
    <Tokens as orml_traits::MultiCurrency<AccountId>>::free_balance(currency_id, who)
}
