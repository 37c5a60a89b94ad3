//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Market`], [`Trade`], and
//! ledger setups so tests focus on assertions rather than construction
//! boilerplate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{AccountId, Market, MarketId, PoolPair, Side, Trade, TradeId};
use crate::engine::{shares_for_stake, FeeSchedule};
use crate::ledger::MarketLedger;
use crate::service::TradeDesk;

/// Create a [`MarketId`] from a string.
pub fn market_id(id: &str) -> MarketId {
    MarketId::from(id.to_string())
}

/// Create an open market with the default 100/100 fixture pools.
pub fn market() -> Market {
    market_with_pools(dec!(100), dec!(100))
}

/// Create an open market named `id` with the default fixture pools.
pub fn market_with_id(id: &str) -> Market {
    Market::try_new(
        MarketId::from(id),
        "Will the fixture market resolve YES?",
        PoolPair::new(dec!(100), dec!(100)),
    )
    .expect("fixture market should be valid")
}

/// Create an open market with the given pool balances.
pub fn market_with_pools(yes: Decimal, no: Decimal) -> Market {
    Market::try_new(
        market_id("test-market"),
        "Will the fixture market resolve YES?",
        PoolPair::try_new(yes, no).expect("fixture pools should be non-negative"),
    )
    .expect("fixture market should be valid")
}

/// Create a market already resolved to `outcome`, still open for
/// settlement.
pub fn resolved_market(outcome: Side) -> Market {
    let mut market = market();
    market
        .resolve(outcome)
        .expect("fresh fixture market should resolve");
    market
}

/// Create an unsettled trade against the default fixture market.
///
/// The fee follows the default schedule and the share count is priced
/// against the default fixture pools.
pub fn trade(id: &str, side: Side, amount: Decimal) -> Trade {
    let pools = PoolPair::new(dec!(100), dec!(100));
    Trade::try_new(
        TradeId::from(id),
        market_id("test-market"),
        AccountId::from("test-account"),
        side,
        amount,
        FeeSchedule::default().entry_fee(amount),
        shares_for_stake(amount, &pools, side),
    )
    .expect("fixture trade should be valid")
}

/// Create a trade desk with the default fee schedule.
pub fn desk() -> TradeDesk {
    TradeDesk::new(FeeSchedule::default())
}

/// Create a ledger holding the default fixture market.
pub fn ledger() -> MarketLedger {
    let ledger = MarketLedger::new();
    ledger
        .insert_market(market())
        .expect("empty ledger should accept the fixture market");
    ledger
}
