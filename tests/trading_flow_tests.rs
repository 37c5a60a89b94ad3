//! End-to-end order entry flows against the in-memory ledger.

use std::sync::Arc;
use std::thread;

use rust_decimal_macros::dec;

use bookie::domain::{Market, MarketId, PoolPair, Side};
use bookie::engine::apply_stake;
use bookie::error::{Error, LedgerError, TradeError};
use bookie::ledger::MarketLedger;
use bookie::service::StakeRequest;
use bookie::testkit;

#[test]
fn concurrent_stakes_match_a_sequential_replay() {
    let ledger = Arc::new(testkit::domain::ledger());
    let id = testkit::domain::market_id("test-market");
    let desk = testkit::domain::desk();

    let mut handles = Vec::new();
    for t in 0..8u32 {
        let ledger = Arc::clone(&ledger);
        let desk = desk.clone();
        let id = id.clone();
        handles.push(thread::spawn(move || {
            for i in 0..10u32 {
                let side = if (t + i) % 2 == 0 { Side::Yes } else { Side::No };
                ledger
                    .place(&desk, &id, StakeRequest::new(format!("acct-{t}"), side, dec!(5)))
                    .expect("concurrent place should succeed");
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker thread should not panic");
    }

    let trades = ledger.trades(&id).expect("fixture market exists");
    assert_eq!(trades.len(), 80);

    // The trade log is in commit order. Replaying it sequentially must
    // reproduce every share count and the final pools exactly; that
    // holds only if each stake was priced against the pools its
    // predecessor left behind.
    let mut pools = PoolPair::new(dec!(100), dec!(100));
    for trade in &trades {
        let priced = apply_stake(trade.amount(), &pools, trade.side());
        assert_eq!(priced.shares, trade.shares());
        pools = priced.pools_after;
    }
    assert_eq!(ledger.market(&id).expect("fixture market exists").pools(), pools);
}

#[test]
fn stale_plan_is_rejected_and_reprices_cleanly() {
    let ledger = testkit::domain::ledger();
    let id = testkit::domain::market_id("test-market");
    let desk = testkit::domain::desk();

    let snapshot = ledger.market(&id).expect("fixture market exists");
    let plan = desk
        .plan(&snapshot, StakeRequest::new("alice", Side::Yes, dec!(40)))
        .expect("plan against a fresh snapshot");

    // Another stake lands before the plan commits.
    ledger
        .place(&desk, &id, StakeRequest::new("bob", Side::No, dec!(10)))
        .expect("interleaved place");

    let err = ledger.commit_trade(plan).expect_err("stale plan must be rejected");
    assert!(matches!(err, LedgerError::StaleSnapshot { .. }));

    // Repricing against the current snapshot goes through.
    let fresh = ledger.market(&id).expect("fixture market exists");
    let plan = desk
        .plan(&fresh, StakeRequest::new("alice", Side::Yes, dec!(40)))
        .expect("plan against the current snapshot");
    let trade = ledger.commit_trade(plan).expect("fresh plan commits");
    assert!(trade.shares() > dec!(0));
}

#[test]
fn empty_pools_reject_stakes_as_no_liquidity() {
    let ledger = MarketLedger::new();
    let market = Market::try_new(
        MarketId::from("dead"),
        "Will anyone fund this?",
        PoolPair::default(),
    )
    .expect("zero pools are valid");
    ledger.insert_market(market).expect("insert");

    let err = ledger
        .place(
            &testkit::domain::desk(),
            &MarketId::from("dead"),
            StakeRequest::new("alice", Side::Yes, dec!(10)),
        )
        .expect_err("stake on empty pools must fail");
    assert!(matches!(err, Error::Trade(TradeError::NoLiquidity { .. })));
}

#[test]
fn one_sided_pool_rejects_stakes_as_no_liquidity() {
    let ledger = MarketLedger::new();
    let market = Market::try_new(
        MarketId::from("one-sided"),
        "Is one side enough?",
        PoolPair::try_new(dec!(50), dec!(0)).expect("non-negative pools"),
    )
    .expect("market");
    ledger.insert_market(market).expect("insert");

    let err = ledger
        .place(
            &testkit::domain::desk(),
            &MarketId::from("one-sided"),
            StakeRequest::new("alice", Side::Yes, dec!(10)),
        )
        .expect_err("stake against an empty opposing pool must fail");
    assert!(matches!(err, Error::Trade(TradeError::NoLiquidity { .. })));
}

#[test]
fn archived_market_rejects_stakes() {
    let ledger = testkit::domain::ledger();
    let id = testkit::domain::market_id("test-market");
    ledger.archive(&id).expect("archive an open market");

    let err = ledger
        .place(
            &testkit::domain::desk(),
            &id,
            StakeRequest::new("alice", Side::Yes, dec!(10)),
        )
        .expect_err("archived market must reject stakes");
    assert!(matches!(err, Error::Trade(TradeError::MarketNotOpen { .. })));
}

#[test]
fn stakes_are_recorded_gross_with_the_fee_alongside() {
    let ledger = testkit::domain::ledger();
    let id = testkit::domain::market_id("test-market");
    let desk = testkit::domain::desk();

    let trade = ledger
        .place(&desk, &id, StakeRequest::new("alice", Side::Yes, dec!(50)))
        .expect("place");

    // The full stake joins the pool; the entry fee is recorded on the
    // trade and deducted once at settlement.
    assert_eq!(trade.amount(), dec!(50));
    assert_eq!(trade.fee(), dec!(0.50));
    let pools = ledger.market(&id).expect("fixture market exists").pools();
    assert_eq!(pools.yes(), dec!(150));
}

#[test]
fn repeated_stakes_move_the_quoted_probability() {
    let ledger = testkit::domain::ledger();
    let id = testkit::domain::market_id("test-market");
    let desk = testkit::domain::desk();

    let mut last_yes = desk
        .quote(&ledger.market(&id).expect("fixture market exists"))
        .yes;
    assert_eq!(last_yes, dec!(0.5));

    for _ in 0..5 {
        ledger
            .place(&desk, &id, StakeRequest::new("alice", Side::Yes, dec!(20)))
            .expect("place");
        let quote = desk.quote(&ledger.market(&id).expect("fixture market exists"));
        assert!(quote.yes > last_yes);
        assert_eq!(quote.yes + quote.no, dec!(1));
        last_yes = quote.yes;
    }
    assert!(last_yes < dec!(1));
}
