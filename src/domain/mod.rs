//! Transport-agnostic domain types for binary prediction markets.

pub mod error;
pub mod id;
pub mod market;
pub mod money;
pub mod pool;
pub mod side;
pub mod trade;

// Core domain types
pub use error::DomainError;
pub use id::{AccountId, MarketId, TradeId};
pub use market::{Market, MarketStatus};
pub use money::{round_payout, Amount, Probability, Shares, CURRENCY_SCALE};
pub use pool::PoolPair;
pub use side::Side;
pub use trade::Trade;
