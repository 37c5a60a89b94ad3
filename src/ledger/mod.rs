//! Thread-safe in-memory market ledger.
//!
//! The ledger is the transaction boundary the engines themselves refuse
//! to be: it owns the market and trade records behind a single
//! [`RwLock`] and applies computed deltas atomically. Two commit styles
//! exist:
//!
//! - [`MarketLedger::place`] runs read-price-commit in one critical
//!   section, serializing concurrent stakes against the same pools.
//! - [`MarketLedger::commit_trade`] applies a [`TradePlan`] priced
//!   outside the lock, rejecting it when the pool snapshot it was
//!   priced against has moved (optimistic concurrency).
//!
//! Callers backing markets with external storage implement the same
//! contract there; this ledger is the in-process reference for it.

use std::collections::HashMap;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::{DomainError, Market, MarketId, Side, Trade};
use crate::engine::Settlement;
use crate::error::{Error, LedgerError, Result};
use crate::service::{StakeRequest, TradeDesk, TradePlan};

/// Thread-safe store of markets and their trades.
pub struct MarketLedger {
    state: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    markets: HashMap<MarketId, Market>,
    trades: HashMap<MarketId, Vec<Trade>>,
}

impl MarketLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Register a new market.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateMarket`] if the ID is taken.
    pub fn insert_market(&self, market: Market) -> std::result::Result<(), LedgerError> {
        let mut state = self.state.write();
        if state.markets.contains_key(market.id()) {
            return Err(LedgerError::DuplicateMarket {
                market_id: market.id().to_string(),
            });
        }
        state.trades.insert(market.id().clone(), Vec::new());
        state.markets.insert(market.id().clone(), market);
        Ok(())
    }

    /// Get a snapshot of a market.
    #[must_use]
    pub fn market(&self, market_id: &MarketId) -> Option<Market> {
        self.state.read().markets.get(market_id).cloned()
    }

    /// Get snapshots of all markets.
    #[must_use]
    pub fn markets(&self) -> Vec<Market> {
        self.state.read().markets.values().cloned().collect()
    }

    /// Get a snapshot of a market's trades, `None` for an unknown market.
    #[must_use]
    pub fn trades(&self, market_id: &MarketId) -> Option<Vec<Trade>> {
        let state = self.state.read();
        if !state.markets.contains_key(market_id) {
            return None;
        }
        Some(state.trades.get(market_id).cloned().unwrap_or_default())
    }

    /// Get a market and its trades as one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownMarket`] if the ID is unknown.
    pub fn settlement_view(
        &self,
        market_id: &MarketId,
    ) -> std::result::Result<(Market, Vec<Trade>), LedgerError> {
        let state = self.state.read();
        let market = state
            .markets
            .get(market_id)
            .cloned()
            .ok_or_else(|| LedgerError::UnknownMarket {
                market_id: market_id.to_string(),
            })?;
        let trades = state.trades.get(market_id).cloned().unwrap_or_default();
        Ok((market, trades))
    }

    /// Record the oracle-resolved outcome for a market.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownMarket`] or the domain transition
    /// failure.
    pub fn resolve(&self, market_id: &MarketId, outcome: Side) -> std::result::Result<(), LedgerError> {
        let mut state = self.state.write();
        let market = state
            .markets
            .get_mut(market_id)
            .ok_or_else(|| LedgerError::UnknownMarket {
                market_id: market_id.to_string(),
            })?;
        market.resolve(outcome)?;
        info!(market_id = %market_id, outcome = %outcome, "market resolved");
        Ok(())
    }

    /// Archive a stale unresolved market. Terminal; no trading after.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownMarket`] or the domain transition
    /// failure.
    pub fn archive(&self, market_id: &MarketId) -> std::result::Result<(), LedgerError> {
        let mut state = self.state.write();
        let market = state
            .markets
            .get_mut(market_id)
            .ok_or_else(|| LedgerError::UnknownMarket {
                market_id: market_id.to_string(),
            })?;
        market.archive()?;
        info!(market_id = %market_id, "market archived");
        Ok(())
    }

    /// Price and commit a stake in one critical section.
    ///
    /// The pool read, the pricing computation, and the pool write happen
    /// under a single write lock, so concurrent stakes against the same
    /// market serialize and each one prices against the pools the
    /// previous one left behind.
    ///
    /// # Errors
    ///
    /// Returns the order-entry rejection or ledger failure.
    pub fn place(
        &self,
        desk: &TradeDesk,
        market_id: &MarketId,
        request: StakeRequest,
    ) -> Result<Trade> {
        let mut state = self.state.write();
        let market = state
            .markets
            .get(market_id)
            .ok_or_else(|| LedgerError::UnknownMarket {
                market_id: market_id.to_string(),
            })?;

        let plan = desk.plan(market, request)?;
        Self::apply_plan(&mut state, plan).map_err(Error::from)
    }

    /// Apply a trade plan priced outside the lock.
    ///
    /// The plan's `pool_before` must still match the live pools; a
    /// mismatch means another trade committed in between and the plan's
    /// share count is no longer on the constant-product curve. Such a
    /// plan is rejected and must be re-priced, never merged.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StaleSnapshot`] on a snapshot mismatch,
    /// plus the usual lookup and status failures.
    pub fn commit_trade(&self, plan: TradePlan) -> std::result::Result<Trade, LedgerError> {
        let mut state = self.state.write();
        {
            let market = state.markets.get(plan.market_id()).ok_or_else(|| {
                LedgerError::UnknownMarket {
                    market_id: plan.market_id().to_string(),
                }
            })?;
            if !market.status().is_trading_open() {
                return Err(LedgerError::MarketNotOpen {
                    market_id: plan.market_id().to_string(),
                    status: market.status(),
                });
            }
            if market.pools() != plan.pool_before() {
                warn!(
                    market_id = %plan.market_id(),
                    "rejecting trade plan priced against a stale pool snapshot"
                );
                return Err(LedgerError::StaleSnapshot {
                    market_id: plan.market_id().to_string(),
                });
            }
        }
        Self::apply_plan(&mut state, plan)
    }

    fn apply_plan(state: &mut LedgerState, plan: TradePlan) -> std::result::Result<Trade, LedgerError> {
        let market_id = plan.market_id().clone();
        let trades = state.trades.entry(market_id.clone()).or_default();
        if trades.iter().any(|t| t.id() == plan.trade().id()) {
            return Err(LedgerError::DuplicateTrade {
                trade_id: plan.trade().id().to_string(),
                market_id: market_id.to_string(),
            });
        }

        let pool_after = plan.pool_after();
        let trade = plan.into_trade();
        trades.push(trade.clone());
        if let Some(market) = state.markets.get_mut(&market_id) {
            market.set_pools(pool_after);
        }
        Ok(trade)
    }

    /// Apply a computed settlement as one all-or-nothing commit.
    ///
    /// Re-validates under the write lock that the market is still open,
    /// that its recorded resolution matches the settlement's outcome,
    /// that the pools the settlement was computed from are still
    /// current, and that the payout map covers exactly the recorded
    /// trades with no negative amounts. Only after every check passes
    /// are payouts written, every trade marked settled, and the market
    /// transitioned; none of those writes can fail, so a rejected
    /// settlement leaves the ledger untouched. A settlement computed
    /// against state that has since moved is discarded, not applied.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MarketNotOpen`] when the market was
    /// settled or archived in the meantime, [`LedgerError::StaleSnapshot`]
    /// when the trade set, pools, or recorded outcome moved, and the
    /// domain failures for an unresolved market or a negative payout.
    pub fn commit_settlement(&self, settlement: &Settlement) -> std::result::Result<(), LedgerError> {
        let mut state = self.state.write();

        let market = state.markets.get(&settlement.market_id).ok_or_else(|| {
            LedgerError::UnknownMarket {
                market_id: settlement.market_id.to_string(),
            }
        })?;
        if !market.status().is_trading_open() {
            warn!(
                market_id = %settlement.market_id,
                status = %market.status(),
                "discarding settlement for a market that is no longer open"
            );
            return Err(LedgerError::MarketNotOpen {
                market_id: settlement.market_id.to_string(),
                status: market.status(),
            });
        }
        let resolved = market.resolved_outcome();
        if resolved.is_none() {
            warn!(
                market_id = %settlement.market_id,
                "discarding settlement for a market with no resolved outcome"
            );
            return Err(DomainError::OutcomeUnresolved.into());
        }
        if resolved != Some(settlement.outcome) {
            warn!(
                market_id = %settlement.market_id,
                claimed = %settlement.outcome,
                "discarding settlement whose outcome does not match the market resolution"
            );
            return Err(LedgerError::StaleSnapshot {
                market_id: settlement.market_id.to_string(),
            });
        }
        if market.pools().total() != settlement.total_pool {
            warn!(
                market_id = %settlement.market_id,
                "discarding settlement computed against stale pools"
            );
            return Err(LedgerError::StaleSnapshot {
                market_id: settlement.market_id.to_string(),
            });
        }

        let trades = state
            .trades
            .get(&settlement.market_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let covers_every_trade = trades.len() == settlement.payouts.len()
            && trades
                .iter()
                .all(|t| settlement.payouts.contains_key(t.id()) && !t.is_settled());
        if !covers_every_trade {
            warn!(
                market_id = %settlement.market_id,
                "discarding settlement whose payout map does not match the trade ledger"
            );
            return Err(LedgerError::StaleSnapshot {
                market_id: settlement.market_id.to_string(),
            });
        }
        if let Some(payout) = settlement.payouts.values().find(|p| **p < Decimal::ZERO) {
            warn!(
                market_id = %settlement.market_id,
                %payout,
                "discarding settlement carrying a negative payout"
            );
            return Err(DomainError::NegativePayout { payout: *payout }.into());
        }

        // Validation is complete; everything below must succeed.
        if let Some(trades) = state.trades.get_mut(&settlement.market_id) {
            for trade in trades.iter_mut() {
                if let Some(payout) = settlement.payout_for(trade.id()) {
                    trade.record_payout(payout)?;
                }
            }
        }
        if let Some(market) = state.markets.get_mut(&settlement.market_id) {
            market.mark_settled()?;
        }

        info!(
            market_id = %settlement.market_id,
            outcome = %settlement.outcome,
            payouts = settlement.payouts.len(),
            house_profit = %settlement.house_profit,
            "settlement committed"
        );
        Ok(())
    }

    /// Number of registered markets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().markets.len()
    }

    /// Check if the ledger holds no markets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MarketLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketStatus, PoolPair};
    use crate::engine::{self, FeeSchedule};
    use crate::error::TradeError;
    use rust_decimal_macros::dec;

    fn make_market(id: &str) -> Market {
        Market::try_new(
            MarketId::from(id),
            "Test market?",
            PoolPair::try_new(dec!(100), dec!(100)).unwrap(),
        )
        .unwrap()
    }

    fn make_desk() -> TradeDesk {
        TradeDesk::new(FeeSchedule::default())
    }

    #[test]
    fn insert_and_lookup() {
        let ledger = MarketLedger::new();
        assert!(ledger.is_empty());

        ledger.insert_market(make_market("m1")).unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.market(&MarketId::from("m1")).is_some());
        assert!(ledger.market(&MarketId::from("m2")).is_none());
        assert_eq!(ledger.trades(&MarketId::from("m1")).map(|t| t.len()), Some(0));
        assert!(ledger.trades(&MarketId::from("m2")).is_none());
    }

    #[test]
    fn duplicate_market_is_rejected() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();

        let err = ledger.insert_market(make_market("m1")).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateMarket { .. }));
    }

    #[test]
    fn place_commits_pools_and_trade_together() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();
        let desk = make_desk();
        let id = MarketId::from("m1");

        let trade = ledger
            .place(&desk, &id, StakeRequest::new("acct-1", Side::Yes, dec!(50)))
            .unwrap();

        let market = ledger.market(&id).unwrap();
        assert_eq!(market.pools().yes(), dec!(150));
        let trades = ledger.trades(&id).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].id(), trade.id());
    }

    #[test]
    fn place_on_unknown_market_fails() {
        let ledger = MarketLedger::new();
        let err = ledger
            .place(
                &make_desk(),
                &MarketId::from("nope"),
                StakeRequest::new("acct-1", Side::Yes, dec!(50)),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Ledger(LedgerError::UnknownMarket { .. })
        ));
    }

    #[test]
    fn sequential_places_price_against_updated_pools() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();
        let desk = make_desk();
        let id = MarketId::from("m1");

        let first = ledger
            .place(&desk, &id, StakeRequest::new("a", Side::Yes, dec!(50)))
            .unwrap();
        let second = ledger
            .place(&desk, &id, StakeRequest::new("b", Side::Yes, dec!(50)))
            .unwrap();

        // The second stake hits a worse price, so it buys fewer shares.
        assert!(second.shares() < first.shares());
    }

    #[test]
    fn commit_trade_rejects_stale_snapshot() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();
        let desk = make_desk();
        let id = MarketId::from("m1");

        // Price a plan, then move the pools underneath it.
        let market = ledger.market(&id).unwrap();
        let plan = desk
            .plan(&market, StakeRequest::new("a", Side::Yes, dec!(50)))
            .unwrap();
        ledger
            .place(&desk, &id, StakeRequest::new("b", Side::No, dec!(25)))
            .unwrap();

        let err = ledger.commit_trade(plan).unwrap_err();
        assert!(matches!(err, LedgerError::StaleSnapshot { .. }));
    }

    #[test]
    fn commit_trade_applies_a_fresh_plan() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();
        let desk = make_desk();
        let id = MarketId::from("m1");

        let market = ledger.market(&id).unwrap();
        let plan = desk
            .plan(&market, StakeRequest::new("a", Side::No, dec!(20)))
            .unwrap();
        let expected_pools = plan.pool_after();

        ledger.commit_trade(plan).unwrap();
        assert_eq!(ledger.market(&id).unwrap().pools(), expected_pools);
    }

    #[test]
    fn settlement_for_an_unresolved_market_writes_nothing() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();
        let desk = make_desk();
        let id = MarketId::from("m1");
        let trade = ledger
            .place(&desk, &id, StakeRequest::new("a", Side::Yes, dec!(50)))
            .unwrap();

        // A payout map for a market whose outcome was never recorded.
        let pool_total = ledger.market(&id).unwrap().pools().total();
        let forged = Settlement {
            market_id: id.clone(),
            outcome: Side::Yes,
            total_pool: pool_total,
            trading_fee: dec!(0),
            house_cut: dec!(0),
            net_pool: pool_total,
            share_factor: dec!(1),
            payouts: HashMap::from([(trade.id().clone(), dec!(1))]),
            house_profit: pool_total - dec!(1),
        };

        let err = ledger.commit_settlement(&forged).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Domain(DomainError::OutcomeUnresolved)
        ));

        // Nothing was written: trading continues and the trade is live.
        assert_eq!(ledger.market(&id).unwrap().status(), MarketStatus::Open);
        let trades = ledger.trades(&id).unwrap();
        assert!(!trades[0].is_settled());
        assert_eq!(trades[0].payout(), dec!(0));

        // Once resolved for real, the market still settles cleanly.
        ledger.resolve(&id, Side::Yes).unwrap();
        let (market, trades) = ledger.settlement_view(&id).unwrap();
        let settlement = engine::settle(&market, &trades, &FeeSchedule::default()).unwrap();
        ledger.commit_settlement(&settlement).unwrap();
        assert_eq!(ledger.market(&id).unwrap().status(), MarketStatus::Settled);
    }

    #[test]
    fn settlement_with_a_mismatched_outcome_is_discarded() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();
        let desk = make_desk();
        let id = MarketId::from("m1");
        ledger
            .place(&desk, &id, StakeRequest::new("a", Side::Yes, dec!(40)))
            .unwrap();

        // Settle a snapshot resolved YES while the ledger records NO.
        let (mut snapshot, trades) = ledger.settlement_view(&id).unwrap();
        snapshot.resolve(Side::Yes).unwrap();
        let settlement = engine::settle(&snapshot, &trades, &FeeSchedule::default()).unwrap();

        ledger.resolve(&id, Side::No).unwrap();
        let err = ledger.commit_settlement(&settlement).unwrap_err();
        assert!(matches!(err, LedgerError::StaleSnapshot { .. }));
        assert!(!ledger.trades(&id).unwrap()[0].is_settled());
    }

    #[test]
    fn settlement_with_a_negative_payout_writes_nothing() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();
        let desk = make_desk();
        let id = MarketId::from("m1");
        let trade = ledger
            .place(&desk, &id, StakeRequest::new("a", Side::Yes, dec!(50)))
            .unwrap();
        ledger.resolve(&id, Side::Yes).unwrap();

        let pool_total = ledger.market(&id).unwrap().pools().total();
        let forged = Settlement {
            market_id: id.clone(),
            outcome: Side::Yes,
            total_pool: pool_total,
            trading_fee: dec!(0),
            house_cut: dec!(0),
            net_pool: pool_total,
            share_factor: dec!(1),
            payouts: HashMap::from([(trade.id().clone(), dec!(-1))]),
            house_profit: pool_total + dec!(1),
        };

        let err = ledger.commit_settlement(&forged).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Domain(DomainError::NegativePayout { .. })
        ));
        assert!(!ledger.trades(&id).unwrap()[0].is_settled());
        assert_eq!(ledger.market(&id).unwrap().status(), MarketStatus::Open);
    }

    #[test]
    fn resolve_then_trading_is_still_open_until_settled() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();
        let id = MarketId::from("m1");

        ledger.resolve(&id, Side::Yes).unwrap();
        let market = ledger.market(&id).unwrap();
        assert_eq!(market.resolved_outcome(), Some(Side::Yes));
        assert!(market.status().is_trading_open());
    }

    #[test]
    fn archive_blocks_further_trading() {
        let ledger = MarketLedger::new();
        ledger.insert_market(make_market("m1")).unwrap();
        let id = MarketId::from("m1");

        ledger.archive(&id).unwrap();
        let err = ledger
            .place(&make_desk(), &id, StakeRequest::new("a", Side::Yes, dec!(10)))
            .unwrap_err();
        assert!(matches!(err, Error::Trade(TradeError::MarketNotOpen { .. })));
    }
}
