//! Constant-product pricing for binary markets.
//!
//! Pure functions over a [`PoolPair`] snapshot. Nothing here mutates
//! state, logs, or fails: degenerate inputs map to defined fallback
//! values because trade submission is a hot path where undefined
//! numeric behavior is unacceptable.

use rust_decimal::Decimal;

use crate::domain::{Amount, PoolPair, Probability, Shares, Side};

/// Implied probabilities for both sides of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Implied probability of YES.
    pub yes: Probability,
    /// Implied probability of NO.
    pub no: Probability,
}

/// A priced stake: the shares it buys and the pools it leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedStake {
    /// Shares issued to the bettor.
    pub shares: Shares,
    /// Pool balances after the swap. Unchanged when no shares were
    /// issued; a zero-share stake must never move the pools.
    pub pools_after: PoolPair,
}

/// Implied probabilities from the current pool balances.
///
/// An empty market is defined to be a fair coin: both probabilities are
/// exactly `0.5`. This is a policy value, not a derived one. Otherwise
/// the YES probability is `yes / (yes + no)` and NO is its exact
/// complement, so the pair always sums to one.
#[must_use]
pub fn probabilities(pools: &PoolPair) -> Quote {
    let total = pools.total();
    if total.is_zero() {
        let half = Decimal::new(5, 1);
        return Quote {
            yes: half,
            no: half,
        };
    }

    let yes = pools.yes() / total;
    Quote {
        yes,
        no: Decimal::ONE - yes,
    }
}

/// Shares issued for a stake against the given pools.
///
/// See [`apply_stake`] for the swap itself; this returns only the share
/// count, matching the order-entry call site that has not yet decided
/// to commit.
#[must_use]
pub fn shares_for_stake(amount: Amount, pools: &PoolPair, side: Side) -> Shares {
    apply_stake(amount, pools, side).shares
}

/// Price a stake with the constant-product rule and produce the
/// post-swap pools.
///
/// For a YES stake the YES pool grows by the full amount and the NO
/// pool shrinks to `k / yes'`, holding `k = yes * no` constant; the
/// shares issued are exactly what the NO pool gave up. A NO stake is
/// symmetric.
///
/// Degenerate inputs never fail:
/// - a non-positive `amount` buys zero shares;
/// - a pool with a zero side has `k = 0`, the swap is undefined, and
///   zero shares come back. The caller must treat zero shares on a
///   positive stake as "no liquidity", not as a free trade.
///
/// The share count is never negative and never exceeds the opposing
/// pool.
#[must_use]
pub fn apply_stake(amount: Amount, pools: &PoolPair, side: Side) -> PricedStake {
    if amount <= Decimal::ZERO || !pools.has_liquidity() {
        return PricedStake {
            shares: Decimal::ZERO,
            pools_after: *pools,
        };
    }

    let k = pools.product();
    let own = pools.side(side);
    let opposing = pools.side(side.opposite());

    let own_after = own + amount;
    let opposing_after = k / own_after;
    // Division rounds to 28 significant digits; clamp so a rounding
    // artifact can never issue negative shares.
    let shares = (opposing - opposing_after).max(Decimal::ZERO);

    let pools_after = match side {
        Side::Yes => PoolPair::new(own_after, opposing - shares),
        Side::No => PoolPair::new(opposing - shares, own_after),
    };

    PricedStake {
        shares,
        pools_after,
    }
}
