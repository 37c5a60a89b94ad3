//! Settlement of resolved markets.
//!
//! The single canonical payout computation: every caller that settles a
//! market goes through [`settle`]. The function is pure; it validates
//! its preconditions, computes the fee-adjusted redistribution, and
//! returns a [`Settlement`] the caller must apply as one atomic unit.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::fees::FeeSchedule;
use crate::domain::{round_payout, Amount, Market, Side, Trade, TradeId};
use crate::error::SettlementError;

/// The computed result of settling one market.
///
/// Intermediate fee figures are carried alongside the payout map so the
/// caller can reconcile them; `house_profit` is defined as
/// `total_pool - payouts_total`, which makes
/// `payouts_total() + house_profit == total_pool` hold exactly.
///
/// The payout map is only valid if applied completely: either every
/// trade gets its payout and the market transitions to settled, or
/// nothing is written.
#[derive(Debug, Clone)]
pub struct Settlement {
    /// Market this settlement was computed for.
    pub market_id: crate::domain::MarketId,
    /// The resolved outcome the payouts follow.
    pub outcome: Side,
    /// Combined liquidity at settlement time.
    pub total_pool: Amount,
    /// Round-trip trading fee taken off the pool.
    pub trading_fee: Amount,
    /// Operator's cut of the pool.
    pub house_cut: Amount,
    /// Pool remaining for winners after fees.
    pub net_pool: Amount,
    /// Net pool divided by the winning pool; zero when no winning
    /// stake exists.
    pub share_factor: Decimal,
    /// Payout per trade. Losing trades are present with a zero amount;
    /// applying the map settles every trade exactly once.
    pub payouts: HashMap<TradeId, Amount>,
    /// Value retained by the operator, the conservation remainder.
    pub house_profit: Amount,
}

impl Settlement {
    /// Sum of all payouts in the map.
    #[must_use]
    pub fn payouts_total(&self) -> Amount {
        self.payouts.values().copied().sum()
    }

    /// Payout for one trade, if it belongs to this settlement.
    #[must_use]
    pub fn payout_for(&self, trade_id: &TradeId) -> Option<Amount> {
        self.payouts.get(trade_id).copied()
    }
}

/// Compute payouts and house profit for a resolved market.
///
/// # Preconditions
///
/// The market must be `Open` with a resolved outcome, every trade must
/// belong to the market and be unsettled, and the fee schedule must be
/// solvent. Violations fail before any payout math runs.
///
/// # Computation
///
/// 1. `total_pool` is the combined liquidity.
/// 2. `trading_fee = total_pool * trading_fee_rate * 2` (round trip).
/// 3. `house_cut = total_pool * house_fee_rate`.
/// 4. `net_pool = total_pool - trading_fee - house_cut`.
/// 5. `share_factor = net_pool / winning_pool`, or zero when the
///    winning pool is empty: with no winning stake the whole pool is
///    retained by the house. That is a defined policy branch, not a
///    division failure.
/// 6. A winning trade pays `amount * share_factor - fee`, clamped at
///    zero and rounded down to cents. The fee was withheld at entry
///    and is deducted exactly once here.
/// 7. A losing trade pays zero.
///
/// # Errors
///
/// Returns [`SettlementError`] for unmet preconditions; see the variant
/// docs. The computation itself cannot fail.
pub fn settle(
    market: &Market,
    trades: &[Trade],
    fees: &FeeSchedule,
) -> Result<Settlement, SettlementError> {
    let outcome = market
        .resolved_outcome()
        .ok_or_else(|| SettlementError::OutcomeUnresolved {
            market_id: market.id().to_string(),
        })?;

    if !market.status().is_trading_open() {
        return Err(SettlementError::MarketNotOpen {
            market_id: market.id().to_string(),
            status: market.status(),
        });
    }

    for trade in trades {
        if trade.market_id() != market.id() {
            return Err(SettlementError::ForeignTrade {
                trade_id: trade.id().to_string(),
                expected: market.id().to_string(),
                found: trade.market_id().to_string(),
            });
        }
        if trade.is_settled() {
            return Err(SettlementError::TradeAlreadySettled {
                trade_id: trade.id().to_string(),
            });
        }
    }

    if fees.trading_fee_rate < Decimal::ZERO || fees.house_fee_rate < Decimal::ZERO {
        return Err(SettlementError::NegativeFeeRate {
            rate: fees.trading_fee_rate.min(fees.house_fee_rate),
        });
    }
    let combined = fees.combined_round_trip_rate();
    if combined > Decimal::ONE {
        return Err(SettlementError::FeeScheduleExceedsPool { combined });
    }

    let pools = market.pools();
    let total_pool = pools.total();
    let trading_fee = total_pool * fees.trading_fee_rate * Decimal::TWO;
    let house_cut = total_pool * fees.house_fee_rate;
    let net_pool = total_pool - trading_fee - house_cut;

    let winning_pool = pools.side(outcome);
    let share_factor = if winning_pool > Decimal::ZERO {
        net_pool / winning_pool
    } else {
        Decimal::ZERO
    };

    let mut payouts = HashMap::with_capacity(trades.len());
    let mut paid_total = Decimal::ZERO;
    for trade in trades {
        let payout = if trade.side() == outcome && share_factor > Decimal::ZERO {
            round_payout((trade.amount() * share_factor - trade.fee()).max(Decimal::ZERO))
        } else {
            Decimal::ZERO
        };
        if payouts.insert(trade.id().clone(), payout).is_some() {
            return Err(SettlementError::DuplicateTrade {
                trade_id: trade.id().to_string(),
            });
        }
        paid_total += payout;
    }

    Ok(Settlement {
        market_id: market.id().clone(),
        outcome,
        total_pool,
        trading_fee,
        house_cut,
        net_pool,
        share_factor,
        payouts,
        house_profit: total_pool - paid_total,
    })
}
