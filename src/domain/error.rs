//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `try_new` constructors and by lifecycle
//! transitions that validate state.
//!
//! # Examples
//!
//! Handling validation errors:
//!
//! ```
//! use bookie::domain::error::DomainError;
//! use bookie::domain::pool::PoolPair;
//! use rust_decimal_macros::dec;
//!
//! // Negative liquidity fails validation
//! let result = PoolPair::try_new(dec!(-1), dec!(100));
//!
//! assert!(matches!(result, Err(DomainError::NegativePool { .. })));
//! ```

use thiserror::Error;

use super::market::MarketStatus;

/// Errors that occur when domain invariants are violated.
///
/// These errors are returned by `try_new` constructors and other methods
/// that validate domain rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Pool balances must never go negative.
    #[error("pool for {side} must be non-negative, got {balance}")]
    NegativePool {
        /// Which side held the invalid balance.
        side: &'static str,
        /// The invalid balance that was provided.
        balance: rust_decimal::Decimal,
    },

    /// Stakes must be strictly positive.
    #[error("stake must be positive, got {amount}")]
    NonPositiveStake {
        /// The invalid stake that was provided.
        amount: rust_decimal::Decimal,
    },

    /// Fees are withheld from the stake and cannot be negative.
    #[error("fee must be non-negative, got {fee}")]
    NegativeFee {
        /// The invalid fee that was provided.
        fee: rust_decimal::Decimal,
    },

    /// A fee larger than the stake would imply a negative net position.
    #[error("fee {fee} exceeds stake {amount}")]
    FeeExceedsStake {
        /// The fee withheld at entry.
        fee: rust_decimal::Decimal,
        /// The gross stake.
        amount: rust_decimal::Decimal,
    },

    /// Issued share counts are drawn from a pool and cannot be negative.
    #[error("shares must be non-negative, got {shares}")]
    NegativeShares {
        /// The invalid share count that was provided.
        shares: rust_decimal::Decimal,
    },

    /// Settled payouts are cash leaving the system and cannot be negative.
    #[error("payout must be non-negative, got {payout}")]
    NegativePayout {
        /// The invalid payout that was provided.
        payout: rust_decimal::Decimal,
    },

    /// Markets must pose a question.
    #[error("question cannot be empty")]
    EmptyQuestion,

    /// Side strings outside the canonical pair and its accepted aliases.
    #[error("unknown side {value:?}, expected YES or NO (UP/DOWN accepted as aliases)")]
    UnknownSide {
        /// The unrecognized input.
        value: String,
    },

    /// Lifecycle transition not permitted from the current status.
    #[error("cannot transition market from {from} to {to}")]
    InvalidTransition {
        /// Status the market was in.
        from: MarketStatus,
        /// Status the transition targeted.
        to: MarketStatus,
    },

    /// Operation requires an open market.
    #[error("market is {status}, expected open")]
    MarketNotOpen {
        /// The status the market was found in.
        status: MarketStatus,
    },

    /// Operation requires a resolved outcome.
    #[error("market has no resolved outcome")]
    OutcomeUnresolved,

    /// A market may only be resolved once.
    #[error("market already resolved")]
    AlreadyResolved,

    /// Settlement writes a trade exactly once.
    #[error("trade already settled")]
    TradeAlreadySettled,
}
