//! Monetary types for stake, share, and probability representation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Outcome share quantity represented as a Decimal for precision.
///
/// Shares are never rounded; they carry full precision from issuance to
/// settlement.
pub type Shares = Decimal;

/// Implied probability in `[0, 1]` represented as a Decimal.
pub type Probability = Decimal;

/// Decimal places for cash amounts leaving the system (payouts).
pub const CURRENCY_SCALE: u32 = 2;

/// Round a payout-bound amount down to currency scale.
///
/// Rounding is always toward zero so fractional cents stay with the
/// house rather than being minted.
#[must_use]
pub fn round_payout(amount: Amount) -> Amount {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::ToZero)
}
