//! Cross-cutting services - order entry and settlement orchestration.

mod settlement;
mod trading;

pub use settlement::SettlementRunner;
pub use trading::{StakeRequest, TradeDesk, TradePlan};
