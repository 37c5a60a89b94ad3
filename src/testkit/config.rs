//! Canonical test configurations.
//!
//! Single source of truth for fee schedules used across tests.
//! Avoids each test module defining its own slightly-different rates.

use rust_decimal_macros::dec;

use crate::engine::FeeSchedule;

/// The default schedule: 1% trading fee per side, 10% house cut.
pub fn standard_fees() -> FeeSchedule {
    FeeSchedule::default()
}

/// A zero-fee schedule; winners redistribute the full pool.
pub fn free_fees() -> FeeSchedule {
    FeeSchedule {
        trading_fee_rate: dec!(0),
        house_fee_rate: dec!(0),
    }
}

/// The steepest solvent schedule: a 0.98 combined rate leaves winners
/// 2% of the pool.
pub fn steep_fees() -> FeeSchedule {
    FeeSchedule {
        trading_fee_rate: dec!(0.24),
        house_fee_rate: dec!(0.50),
    }
}
