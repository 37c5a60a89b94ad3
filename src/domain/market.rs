//! Market domain types.
//!
//! - [`Market`] - A binary prediction market with its liquidity pools
//! - [`MarketStatus`] - Lifecycle states and the allowed transitions

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::MarketId;
use super::pool::PoolPair;
use super::side::Side;

/// Lifecycle state of a market.
///
/// A market is created `Open`, trades while `Open`, and transitions
/// exactly once into one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    /// Accepting trades; pools mutate with each accepted trade.
    Open,
    /// Terminal: outcome resolved and payouts computed.
    Settled,
    /// Terminal: retired without settlement, used for stale unresolved
    /// markets. No trading, no payouts.
    Archived,
}

impl MarketStatus {
    /// True while trades may still be placed.
    #[must_use]
    pub const fn is_trading_open(&self) -> bool {
        matches!(self, MarketStatus::Open)
    }

    /// True once the market can never change again.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, MarketStatus::Settled | MarketStatus::Archived)
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MarketStatus::Open => "open",
            MarketStatus::Settled => "settled",
            MarketStatus::Archived => "archived",
        };
        f.write_str(label)
    }
}

/// A binary prediction market.
///
/// Holds the YES/NO liquidity pair, the lifecycle status, and the
/// oracle-resolved outcome once known. Pool mutation happens only
/// through the ledger commit path; everything else reads snapshots.
///
/// # Example
///
/// ```
/// use bookie::domain::{Market, MarketId, PoolPair, Side};
/// use rust_decimal_macros::dec;
///
/// let mut market = Market::try_new(
///     MarketId::from("btc-100k"),
///     "Will BTC close above $100k this year?",
///     PoolPair::try_new(dec!(100), dec!(100)).unwrap(),
/// )
/// .unwrap();
///
/// market.resolve(Side::Yes).unwrap();
/// assert_eq!(market.resolved_outcome(), Some(Side::Yes));
/// ```
#[derive(Debug, Clone)]
pub struct Market {
    id: MarketId,
    question: String,
    pools: PoolPair,
    status: MarketStatus,
    resolved_outcome: Option<Side>,
    created_at: DateTime<Utc>,
}

impl Market {
    /// Create a new open, unresolved market.
    ///
    /// # Domain Invariants
    ///
    /// - `question` must not be empty
    /// - pools are validated by [`PoolPair`] construction before this call
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if any invariant is violated.
    pub fn try_new(
        id: MarketId,
        question: impl Into<String>,
        pools: PoolPair,
    ) -> Result<Self, DomainError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(DomainError::EmptyQuestion);
        }

        Ok(Self {
            id,
            question,
            pools,
            status: MarketStatus::Open,
            resolved_outcome: None,
            created_at: Utc::now(),
        })
    }

    /// Get the market ID.
    #[must_use]
    pub const fn id(&self) -> &MarketId {
        &self.id
    }

    /// Get the market question.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Get the current liquidity pools.
    #[must_use]
    pub const fn pools(&self) -> PoolPair {
        self.pools
    }

    /// Get the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> MarketStatus {
        self.status
    }

    /// Get the resolved outcome, if the event has concluded.
    #[must_use]
    pub const fn resolved_outcome(&self) -> Option<Side> {
        self.resolved_outcome
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Record the oracle-resolved outcome.
    ///
    /// The market must still be `Open` and not resolved before.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MarketNotOpen`] or
    /// [`DomainError::AlreadyResolved`].
    pub fn resolve(&mut self, outcome: Side) -> Result<(), DomainError> {
        if !self.status.is_trading_open() {
            return Err(DomainError::MarketNotOpen {
                status: self.status,
            });
        }
        if self.resolved_outcome.is_some() {
            return Err(DomainError::AlreadyResolved);
        }
        self.resolved_outcome = Some(outcome);
        Ok(())
    }

    /// Transition `Open` -> `Settled`. Terminal.
    ///
    /// Requires a resolved outcome; a settled market without one would
    /// be unreconcilable.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] unless the market is
    /// `Open`, or [`DomainError::OutcomeUnresolved`] when no outcome
    /// has been recorded.
    pub fn mark_settled(&mut self) -> Result<(), DomainError> {
        if !self.status.is_trading_open() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: MarketStatus::Settled,
            });
        }
        if self.resolved_outcome.is_none() {
            return Err(DomainError::OutcomeUnresolved);
        }
        self.status = MarketStatus::Settled;
        Ok(())
    }

    /// Transition `Open` -> `Archived`. Terminal.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] unless the market is
    /// `Open`.
    pub fn archive(&mut self) -> Result<(), DomainError> {
        if !self.status.is_trading_open() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: MarketStatus::Archived,
            });
        }
        self.status = MarketStatus::Archived;
        Ok(())
    }

    /// Replace the pool balances with a committed post-trade pair.
    ///
    /// Only the ledger commit path calls this, after verifying the
    /// snapshot the pair was priced against is still current.
    pub(crate) fn set_pools(&mut self, pools: PoolPair) {
        self.pools = pools;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_market() -> Market {
        Market::try_new(
            MarketId::from("m1"),
            "Will it rain tomorrow?",
            PoolPair::try_new(dec!(100), dec!(100)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn try_new_starts_open_and_unresolved() {
        let market = make_market();
        assert_eq!(market.id().as_str(), "m1");
        assert_eq!(market.question(), "Will it rain tomorrow?");
        assert_eq!(market.status(), MarketStatus::Open);
        assert_eq!(market.resolved_outcome(), None);
        assert_eq!(market.pools().total(), dec!(200));
    }

    #[test]
    fn try_new_rejects_empty_question() {
        let result = Market::try_new(MarketId::from("m1"), "   ", PoolPair::default());
        assert!(matches!(result, Err(DomainError::EmptyQuestion)));
    }

    #[test]
    fn resolve_records_outcome_once() {
        let mut market = make_market();
        market.resolve(Side::No).unwrap();
        assert_eq!(market.resolved_outcome(), Some(Side::No));

        let err = market.resolve(Side::Yes).unwrap_err();
        assert_eq!(err, DomainError::AlreadyResolved);
        assert_eq!(market.resolved_outcome(), Some(Side::No));
    }

    #[test]
    fn resolve_rejected_after_archive() {
        let mut market = make_market();
        market.archive().unwrap();

        let err = market.resolve(Side::Yes).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MarketNotOpen {
                status: MarketStatus::Archived
            }
        ));
    }

    #[test]
    fn mark_settled_requires_resolution() {
        let mut market = make_market();
        let err = market.mark_settled().unwrap_err();
        assert_eq!(err, DomainError::OutcomeUnresolved);

        market.resolve(Side::Yes).unwrap();
        market.mark_settled().unwrap();
        assert_eq!(market.status(), MarketStatus::Settled);
        assert!(market.status().is_terminal());
    }

    #[test]
    fn mark_settled_twice_is_rejected() {
        let mut market = make_market();
        market.resolve(Side::Yes).unwrap();
        market.mark_settled().unwrap();

        let err = market.mark_settled().unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: MarketStatus::Settled,
                to: MarketStatus::Settled,
            }
        ));
    }

    #[test]
    fn archive_is_terminal() {
        let mut market = make_market();
        market.archive().unwrap();
        assert_eq!(market.status(), MarketStatus::Archived);
        assert!(market.status().is_terminal());

        let err = market.archive().unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn status_helpers() {
        assert!(MarketStatus::Open.is_trading_open());
        assert!(!MarketStatus::Open.is_terminal());
        assert!(!MarketStatus::Settled.is_trading_open());
        assert!(MarketStatus::Settled.is_terminal());
        assert!(MarketStatus::Archived.is_terminal());
    }

    #[test]
    fn status_display_is_lowercase() {
        assert_eq!(MarketStatus::Open.to_string(), "open");
        assert_eq!(MarketStatus::Settled.to_string(), "settled");
        assert_eq!(MarketStatus::Archived.to_string(), "archived");
    }

    #[test]
    fn status_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&MarketStatus::Open).unwrap(),
            "\"open\""
        );
        let status: MarketStatus = serde_json::from_str("\"settled\"").unwrap();
        assert_eq!(status, MarketStatus::Settled);
        assert!(serde_json::from_str::<MarketStatus>("\"Open\"").is_err());
    }
}
