//! Movement of the pooled asset between accounts and the pool account.
//!
//! Funds only enter the pool through [Pallet::pull], which consumes the allowance the owner
//! granted with `approve` (an allowance of `Balance::MAX` is unlimited), and only leave it
//! through [Pallet::push].

use crate::*;
use orml_traits::MultiCurrency;

type TokensOf<T> = orml_tokens::Pallet<T>;

impl<T: Config> Pallet<T> {
    /// Moves `amount` from `from` into the pool account and lowers the allowance accordingly,
    /// unless the allowance is unlimited.
    pub(crate) fn pull(from: &T::AccountId, amount: Balance) -> DispatchResult {
        let allowance = Self::allowance(from);
        log::trace!(
            target: "lending::pull",
            "account: {:?}, amount: {:?}, allowance: {:?}",
            from,
            amount,
            allowance,
        );
        ensure!(allowance >= amount, Error::<T>::InsufficientAuthorization);

        <TokensOf<T> as MultiCurrency<T::AccountId>>::transfer(T::GetAssetId::get(), from, &Self::account_id(), amount)
            .map_err(|err| {
                log::trace!(target: "lending::pull", "transfer failed: {:?}", err);
                Error::<T>::InsufficientAuthorization
            })?;

        // `Balance::MAX` is an unlimited allowance and is never consumed
        if allowance == Balance::MAX {
            return Ok(());
        }
        let remaining = allowance.saturating_sub(amount);
        if remaining.is_zero() {
            Allowances::<T>::remove(from);
        } else {
            Allowances::<T>::insert(from, remaining);
        }
        Ok(())
    }

    /// Moves `amount` out of the pool account to `to`.
    pub(crate) fn push(to: &T::AccountId, amount: Balance) -> DispatchResult {
        <TokensOf<T> as MultiCurrency<T::AccountId>>::transfer(T::GetAssetId::get(), &Self::account_id(), to, amount)
            .map_err(|err| {
                log::trace!(target: "lending::push", "transfer failed: {:?}", err);
                Error::<T>::InsufficientLiquidity
            })?;
        Ok(())
    }

    /// Balance of the pooled asset held by the pool account.
    pub fn custody_balance() -> Balance {
        <TokensOf<T> as MultiCurrency<T::AccountId>>::free_balance(T::GetAssetId::get(), &Self::account_id())
    }
}
