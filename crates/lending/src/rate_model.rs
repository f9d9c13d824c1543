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

use sp_arithmetic::{helpers_128bit::multiply_by_rational_with_rounding, Rounding};
use sp_runtime::{traits::Zero, ArithmeticError, Percent, SaturatedConversion};
use traits::{Balance, BASE_RATE};

/// Linear rate model driven only by the current utilization of the pool.
///
/// Rates are spot values with whole-percent granularity. Nothing is accrued over
/// time, so the model is stateless.
///
/// ```text
/// supply_rate = base + utilization / 10
/// borrow_rate = base + 2 + utilization / 5
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LinearModel {
    pub base_rate: u8,
}

impl Default for LinearModel {
    fn default() -> Self {
        LinearModel { base_rate: BASE_RATE }
    }
}

impl LinearModel {
    /// `floor(total_borrow * 100 / total_supply)`, zero for an empty pool.
    pub fn utilization(&self, total_supply: Balance, total_borrow: Balance) -> Result<Percent, ArithmeticError> {
        if total_supply.is_zero() {
            return Ok(Percent::zero());
        }
        let utilization = multiply_by_rational_with_rounding(total_borrow, 100, total_supply, Rounding::Down)
            .ok_or(ArithmeticError::Overflow)?;
        // borrows never exceed supply, so this only clamps a corrupted state
        Ok(Percent::from_percent(utilization.min(100).saturated_into::<u8>()))
    }

    pub fn supply_rate(&self, utilization: Percent) -> Percent {
        Percent::from_percent(self.base_rate.saturating_add(utilization.deconstruct() / 10))
    }

    pub fn borrow_rate(&self, utilization: Percent) -> Percent {
        Percent::from_percent(
            self.base_rate
                .saturating_add(2)
                .saturating_add(utilization.deconstruct() / 5),
        )
    }
}
