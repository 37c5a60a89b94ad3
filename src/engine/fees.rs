//! Fee schedule applied at trade entry and settlement.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::Amount;

/// Platform fee rates.
///
/// `trading_fee_rate` is charged per side; settlement doubles it for the
/// round trip. `house_fee_rate` is the operator's cut of the settled
/// pool. A schedule is solvent while the combined round-trip rate stays
/// at or below 100% of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FeeSchedule {
    /// Per-side trading fee rate, e.g. `0.01` for 1%.
    #[serde(default = "default_trading_fee_rate")]
    pub trading_fee_rate: Decimal,
    /// House cut of the settled pool, e.g. `0.10` for 10%.
    #[serde(default = "default_house_fee_rate")]
    pub house_fee_rate: Decimal,
}

fn default_trading_fee_rate() -> Decimal {
    Decimal::new(1, 2) // 1% per side
}

fn default_house_fee_rate() -> Decimal {
    Decimal::new(10, 2) // 10%
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            trading_fee_rate: default_trading_fee_rate(),
            house_fee_rate: default_house_fee_rate(),
        }
    }
}

impl FeeSchedule {
    /// Fee withheld from a gross stake at entry.
    #[must_use]
    pub fn entry_fee(&self, amount: Amount) -> Amount {
        amount * self.trading_fee_rate
    }

    /// Trading fee doubled for the round trip plus the house cut.
    #[must_use]
    pub fn combined_round_trip_rate(&self) -> Decimal {
        self.trading_fee_rate * Decimal::TWO + self.house_fee_rate
    }

    /// Whether settlement under this schedule leaves a non-negative net
    /// pool: rates non-negative and combined round-trip rate at most 1.
    #[must_use]
    pub fn is_solvent(&self) -> bool {
        self.trading_fee_rate >= Decimal::ZERO
            && self.house_fee_rate >= Decimal::ZERO
            && self.combined_round_trip_rate() <= Decimal::ONE
    }
}
