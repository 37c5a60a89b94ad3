use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::market::MarketStatus;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Order-entry rejections.
#[derive(Error, Debug, Clone)]
pub enum TradeError {
    #[error("market {market_id} is {status}, expected open")]
    MarketNotOpen {
        market_id: String,
        status: MarketStatus,
    },

    #[error("stake must be positive, got {amount}")]
    NonPositiveStake { amount: rust_decimal::Decimal },

    #[error("market {market_id} has no liquidity to price against")]
    NoLiquidity { market_id: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Settlement precondition and configuration failures.
#[derive(Error, Debug, Clone)]
pub enum SettlementError {
    #[error("market {market_id} has no resolved outcome")]
    OutcomeUnresolved { market_id: String },

    #[error("market {market_id} is {status}, expected open")]
    MarketNotOpen {
        market_id: String,
        status: MarketStatus,
    },

    #[error("fee rate must be non-negative, got {rate}")]
    NegativeFeeRate { rate: rust_decimal::Decimal },

    #[error("fee schedule consumes the whole pool: combined round-trip rate {combined} > 1")]
    FeeScheduleExceedsPool { combined: rust_decimal::Decimal },

    #[error("trade {trade_id} belongs to market {found}, not {expected}")]
    ForeignTrade {
        trade_id: String,
        expected: String,
        found: String,
    },

    #[error("trade {trade_id} is already settled")]
    TradeAlreadySettled { trade_id: String },

    #[error("trade {trade_id} appears more than once")]
    DuplicateTrade { trade_id: String },
}

/// Ledger commit and lookup failures.
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    #[error("unknown market {market_id}")]
    UnknownMarket { market_id: String },

    #[error("market {market_id} already registered")]
    DuplicateMarket { market_id: String },

    #[error("trade {trade_id} already recorded for market {market_id}")]
    DuplicateTrade {
        trade_id: String,
        market_id: String,
    },

    #[error("market {market_id} is {status}, expected open")]
    MarketNotOpen {
        market_id: String,
        status: MarketStatus,
    },

    #[error("pool snapshot for market {market_id} is stale")]
    StaleSnapshot { market_id: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Trade(#[from] TradeError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, Error>;
