//! Bookie - Constant-product pricing and settlement for binary
//! prediction markets.
//!
//! This crate provides the core engines of a YES/NO prediction market:
//! automated market making over liquidity pools and fee-adjusted payout
//! settlement once an outcome is known.
//!
//! # Architecture
//!
//! Computation and state are kept apart:
//!
//! - **`engine`** - Pure, synchronous math over pool snapshots
//!   - Constant-product pricing: implied probabilities and share issuance
//!   - The canonical settlement computation: one formula, every caller
//!
//! - **`ledger`** - The only place state changes
//!   - Serializes concurrent stakes against the same pools
//!   - Applies trade plans and settlements as all-or-nothing commits
//!
//! - **`service`** - Stateless orchestrators wiring the two together
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and logging setup
//! - [`domain`] - Validated records: markets, trades, pools, sides
//! - [`engine`] - Pricing and settlement computations
//! - [`error`] - Error types for the crate
//! - [`ledger`] - Thread-safe in-memory market store and commit point
//! - [`service`] - Order entry and settlement orchestration
//!
//! # Features
//!
//! - `testkit` - Shared fixtures for downstream integration tests
//!
//! # Example
//!
//! ```
//! use bookie::domain::{Market, MarketId, PoolPair, Side};
//! use bookie::engine::FeeSchedule;
//! use bookie::ledger::MarketLedger;
//! use bookie::service::{SettlementRunner, StakeRequest, TradeDesk};
//! use rust_decimal_macros::dec;
//!
//! let ledger = MarketLedger::new();
//! let id = MarketId::from("btc-100k");
//! let market = Market::try_new(
//!     id.clone(),
//!     "Will BTC close above $100k this year?",
//!     PoolPair::try_new(dec!(100), dec!(100))?,
//! )?;
//! ledger.insert_market(market)?;
//!
//! let desk = TradeDesk::new(FeeSchedule::default());
//! let trade = ledger.place(&desk, &id, StakeRequest::new("alice", Side::Yes, dec!(50)))?;
//! assert!(trade.shares() > dec!(0));
//!
//! ledger.resolve(&id, Side::Yes)?;
//! let runner = SettlementRunner::new(FeeSchedule::default());
//! let settlement = runner.settle_market(&ledger, &id)?;
//! assert_eq!(
//!     settlement.payouts_total() + settlement.house_profit,
//!     settlement.total_pool,
//! );
//! # Ok::<(), bookie::error::Error>(())
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
