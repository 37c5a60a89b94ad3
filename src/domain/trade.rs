//! Trade records: one wagered position against a market.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::DomainError;
use super::id::{AccountId, MarketId, TradeId};
use super::money::{Amount, Shares};
use super::side::Side;

/// One wagered position taken by an account against a market.
///
/// `amount` is the gross stake; `fee` is the portion withheld at entry
/// and deducted from the eventual payout. `shares` is the claim issued
/// by the pricing engine from the pool snapshot that existed at entry,
/// and is immutable afterward: that snapshot no longer exists once
/// later trades move the pools, so the value can never be recomputed.
///
/// `payout` stays zero until settlement writes it, and `settled` flips
/// to true exactly once.
#[derive(Debug, Clone)]
pub struct Trade {
    id: TradeId,
    market_id: MarketId,
    account_id: AccountId,
    side: Side,
    amount: Amount,
    fee: Amount,
    shares: Shares,
    payout: Amount,
    settled: bool,
    placed_at: DateTime<Utc>,
}

impl Trade {
    /// Create a new unsettled trade with domain invariant validation.
    ///
    /// # Domain Invariants
    ///
    /// - `amount` must be positive
    /// - `fee` must be non-negative and no larger than `amount`
    /// - `shares` must be non-negative
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if any invariant is violated.
    pub fn try_new(
        id: TradeId,
        market_id: MarketId,
        account_id: AccountId,
        side: Side,
        amount: Amount,
        fee: Amount,
        shares: Shares,
    ) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveStake { amount });
        }
        if fee < Decimal::ZERO {
            return Err(DomainError::NegativeFee { fee });
        }
        if fee > amount {
            return Err(DomainError::FeeExceedsStake { fee, amount });
        }
        if shares < Decimal::ZERO {
            return Err(DomainError::NegativeShares { shares });
        }

        Ok(Self {
            id,
            market_id,
            account_id,
            side,
            amount,
            fee,
            shares,
            payout: Decimal::ZERO,
            settled: false,
            placed_at: Utc::now(),
        })
    }

    /// Get the trade ID.
    #[must_use]
    pub const fn id(&self) -> &TradeId {
        &self.id
    }

    /// Get the owning market's ID.
    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Get the staking account's ID.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Get the side wagered on.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Get the gross stake.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Get the fee withheld at entry.
    #[must_use]
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Get the issued share count.
    #[must_use]
    pub const fn shares(&self) -> Shares {
        self.shares
    }

    /// Get the settled payout; zero until settlement.
    #[must_use]
    pub const fn payout(&self) -> Amount {
        self.payout
    }

    /// Whether settlement has written this trade.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.settled
    }

    /// Get the entry timestamp.
    #[must_use]
    pub const fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// Write the settlement payout and flip the settled flag.
    ///
    /// Losing trades settle through here too, with a zero payout.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TradeAlreadySettled`] on a second call and
    /// [`DomainError::NegativePayout`] for a negative amount.
    pub fn record_payout(&mut self, payout: Amount) -> Result<(), DomainError> {
        if self.settled {
            return Err(DomainError::TradeAlreadySettled);
        }
        if payout < Decimal::ZERO {
            return Err(DomainError::NegativePayout { payout });
        }
        self.payout = payout;
        self.settled = true;
        Ok(())
    }
}
