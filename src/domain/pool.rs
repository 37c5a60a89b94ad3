//! Two-sided liquidity pool backing a binary market.

use rust_decimal::Decimal;

use super::error::DomainError;
use super::money::Amount;
use super::side::Side;

/// The YES/NO liquidity pair for one market.
///
/// Both balances are non-negative at all times. The product
/// `yes * no` is the constant `k` a priced trade must preserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolPair {
    yes: Amount,
    no: Amount,
}

impl PoolPair {
    /// Create a pool pair from balances already known to be valid.
    #[must_use]
    pub const fn new(yes: Amount, no: Amount) -> Self {
        Self { yes, no }
    }

    /// Create a pool pair with domain invariant validation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativePool`] if either balance is negative.
    pub fn try_new(yes: Amount, no: Amount) -> Result<Self, DomainError> {
        if yes < Decimal::ZERO {
            return Err(DomainError::NegativePool {
                side: "YES",
                balance: yes,
            });
        }
        if no < Decimal::ZERO {
            return Err(DomainError::NegativePool {
                side: "NO",
                balance: no,
            });
        }
        Ok(Self { yes, no })
    }

    /// Balance backing the YES side.
    #[must_use]
    pub const fn yes(&self) -> Amount {
        self.yes
    }

    /// Balance backing the NO side.
    #[must_use]
    pub const fn no(&self) -> Amount {
        self.no
    }

    /// Balance backing the given side.
    #[must_use]
    pub const fn side(&self, side: Side) -> Amount {
        match side {
            Side::Yes => self.yes,
            Side::No => self.no,
        }
    }

    /// Combined liquidity across both sides.
    #[must_use]
    pub fn total(&self) -> Amount {
        self.yes + self.no
    }

    /// The constant product `k = yes * no`.
    #[must_use]
    pub fn product(&self) -> Decimal {
        self.yes * self.no
    }

    /// True when no liquidity exists on either side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total().is_zero()
    }

    /// True when both sides hold positive liquidity, i.e. `k > 0` and a
    /// constant-product swap is defined.
    #[must_use]
    pub fn has_liquidity(&self) -> bool {
        self.yes > Decimal::ZERO && self.no > Decimal::ZERO
    }
}
