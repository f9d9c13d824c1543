// Copyright 2022 Interlay.
// This file is part of Interlay.

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Collateral math for a single account. The pooled asset is its own collateral, so all
//! values are expressed in the same unit and no price conversion is needed.

use sp_arithmetic::{helpers_128bit::multiply_by_rational_with_rounding, Rounding};
use sp_runtime::{traits::Zero, ArithmeticError};
use traits::{Balance, HealthFactor, LTV_RATIO};

const ONE_HUNDRED_PERCENT: u128 = 100;

fn mul_div(a: Balance, b: u128, c: u128, rounding: Rounding) -> Result<Balance, ArithmeticError> {
    multiply_by_rational_with_rounding(a, b, c, rounding).ok_or(ArithmeticError::Overflow)
}

/// `floor(supplied * LTV / borrowed)`, or `Unbounded` without debt.
pub fn health_factor(supplied: Balance, borrowed: Balance) -> HealthFactor {
    if borrowed.is_zero() {
        return HealthFactor::Unbounded;
    }
    // the divisor is non-zero, so `None` can only mean the ratio exceeds `u128`
    HealthFactor::Ratio(
        multiply_by_rational_with_rounding(supplied, LTV_RATIO, borrowed, Rounding::Down).unwrap_or(u128::MAX),
    )
}

/// Smallest supply that keeps `borrowed` within the LTV ceiling.
pub fn min_required_supply(borrowed: Balance) -> Result<Balance, ArithmeticError> {
    mul_div(borrowed, ONE_HUNDRED_PERCENT, LTV_RATIO, Rounding::Up)
}

/// Largest withdrawal that leaves the remaining supply at or above [min_required_supply].
/// Not capped by the free liquidity of the pool.
pub fn max_withdraw(supplied: Balance, borrowed: Balance) -> Result<Balance, ArithmeticError> {
    if borrowed.is_zero() {
        return Ok(supplied);
    }
    Ok(supplied.saturating_sub(min_required_supply(borrowed)?))
}

/// Additional amount that can be borrowed before reaching the LTV ceiling.
/// Not capped by the free liquidity of the pool.
pub fn max_borrow(supplied: Balance, borrowed: Balance) -> Result<Balance, ArithmeticError> {
    let max_total_borrow = mul_div(supplied, LTV_RATIO, ONE_HUNDRED_PERCENT, Rounding::Down)?;
    Ok(max_total_borrow.saturating_sub(borrowed))
}
