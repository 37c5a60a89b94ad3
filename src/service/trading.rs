//! Order-entry service.
//!
//! Validates a stake request against a market snapshot, applies the fee
//! schedule, prices the trade, and returns a [`TradePlan`]: a pure
//! computed delta the ledger (or any external transaction boundary)
//! applies atomically. Nothing here writes state.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::{AccountId, Amount, Market, MarketId, PoolPair, Side, Trade, TradeId};
use crate::engine::pricing::{self, Quote};
use crate::engine::FeeSchedule;
use crate::error::TradeError;

/// A request to stake an amount on one side of a market.
#[derive(Debug, Clone)]
pub struct StakeRequest {
    /// Account placing the stake.
    pub account_id: AccountId,
    /// Side wagered on.
    pub side: Side,
    /// Gross stake in currency units.
    pub amount: Amount,
}

impl StakeRequest {
    /// Create a stake request.
    pub fn new(account_id: impl Into<AccountId>, side: Side, amount: Amount) -> Self {
        Self {
            account_id: account_id.into(),
            side,
            amount,
        }
    }
}

/// The computed delta for one accepted trade.
///
/// Carries the pool snapshot the trade was priced against
/// (`pool_before`) so the commit point can detect a lost-update race:
/// a plan whose snapshot no longer matches the live pools must be
/// rejected and re-priced, never merged.
#[derive(Debug, Clone)]
pub struct TradePlan {
    market_id: MarketId,
    pool_before: PoolPair,
    pool_after: PoolPair,
    trade: Trade,
}

impl TradePlan {
    /// Market this plan applies to.
    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Pool snapshot the trade was priced against.
    #[must_use]
    pub const fn pool_before(&self) -> PoolPair {
        self.pool_before
    }

    /// Pool balances after the trade is applied.
    #[must_use]
    pub const fn pool_after(&self) -> PoolPair {
        self.pool_after
    }

    /// The trade record to persist alongside the pool update.
    #[must_use]
    pub const fn trade(&self) -> &Trade {
        &self.trade
    }

    /// Consume the plan, yielding the trade record.
    #[must_use]
    pub fn into_trade(self) -> Trade {
        self.trade
    }
}

/// Order-entry checks and pricing for incoming stakes.
#[derive(Debug, Clone)]
pub struct TradeDesk {
    fees: FeeSchedule,
}

impl TradeDesk {
    /// Create a trade desk with the given fee schedule.
    #[must_use]
    pub const fn new(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    /// The fee schedule in effect.
    #[must_use]
    pub const fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Current implied probabilities for a market.
    #[must_use]
    pub fn quote(&self, market: &Market) -> Quote {
        pricing::probabilities(&market.pools())
    }

    /// Validate and price a stake against a market snapshot.
    ///
    /// Rejections:
    /// - the market is not open for trading;
    /// - the stake is not positive;
    /// - pricing issued zero shares, meaning the pool has no liquidity
    ///   to trade against. A zero-share fill is never accepted as a
    ///   valid zero-cost trade.
    ///
    /// On success the returned [`TradePlan`] holds the trade record and
    /// both pool snapshots; the caller commits it atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TradeError`] for any rejection.
    pub fn plan(&self, market: &Market, request: StakeRequest) -> Result<TradePlan, TradeError> {
        if !market.status().is_trading_open() {
            warn!(
                market_id = %market.id(),
                status = %market.status(),
                "stake rejected: market not open"
            );
            return Err(TradeError::MarketNotOpen {
                market_id: market.id().to_string(),
                status: market.status(),
            });
        }

        if request.amount <= Decimal::ZERO {
            return Err(TradeError::NonPositiveStake {
                amount: request.amount,
            });
        }

        let pool_before = market.pools();
        let priced = pricing::apply_stake(request.amount, &pool_before, request.side);
        if priced.shares.is_zero() {
            warn!(
                market_id = %market.id(),
                amount = %request.amount,
                "stake rejected: no liquidity"
            );
            return Err(TradeError::NoLiquidity {
                market_id: market.id().to_string(),
            });
        }

        let fee = self.fees.entry_fee(request.amount);
        let trade = Trade::try_new(
            TradeId::generate(),
            market.id().clone(),
            request.account_id,
            request.side,
            request.amount,
            fee,
            priced.shares,
        )?;

        info!(
            market_id = %market.id(),
            trade_id = %trade.id(),
            side = %request.side,
            amount = %request.amount,
            shares = %priced.shares,
            "trade planned"
        );

        Ok(TradePlan {
            market_id: market.id().clone(),
            pool_before,
            pool_after: priced.pools_after,
            trade,
        })
    }
}
