//! Settlement orchestration.
//!
//! [`SettlementRunner`] drives the pure settlement computation against a
//! ledger: snapshot the market and its trades, compute the payouts, and
//! hand the result back to the ledger as one atomic commit. The commit
//! re-validates the snapshot, so a settlement computed against state
//! that moved in the meantime is discarded and the sweep moves on.

use tracing::{info, warn};

use crate::domain::MarketId;
use crate::engine::{self, FeeSchedule, Settlement};
use crate::error::Result;
use crate::ledger::MarketLedger;

/// Settles resolved markets against a ledger.
#[derive(Debug, Clone)]
pub struct SettlementRunner {
    fees: FeeSchedule,
}

impl SettlementRunner {
    /// Create a runner with the given fee schedule.
    #[must_use]
    pub const fn new(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    /// The fee schedule applied to every settlement.
    #[must_use]
    pub const fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Settle one market end to end.
    ///
    /// Snapshots the market and its trades, computes the payouts, and
    /// commits them. The market transitions to settled inside the
    /// commit, so a second call fails and a market is never paid twice.
    ///
    /// # Errors
    ///
    /// Returns the snapshot, computation, or commit failure; on any of
    /// them the ledger is left untouched.
    pub fn settle_market(
        &self,
        ledger: &MarketLedger,
        market_id: &MarketId,
    ) -> Result<Settlement> {
        let (market, trades) = ledger.settlement_view(market_id)?;
        let settlement = engine::settle(&market, &trades, &self.fees)?;
        ledger.commit_settlement(&settlement)?;

        info!(
            market_id = %market_id,
            outcome = %settlement.outcome,
            payouts_total = %settlement.payouts_total(),
            house_profit = %settlement.house_profit,
            "market settled"
        );
        Ok(settlement)
    }

    /// Settle every open market with a resolved outcome.
    ///
    /// Each market settles independently; one failure does not stop the
    /// sweep or affect the others. Returns the per-market results in no
    /// particular order.
    pub fn settle_resolved(
        &self,
        ledger: &MarketLedger,
    ) -> Vec<(MarketId, Result<Settlement>)> {
        let due: Vec<MarketId> = ledger
            .markets()
            .into_iter()
            .filter(|m| m.status().is_trading_open() && m.resolved_outcome().is_some())
            .map(|m| m.id().clone())
            .collect();

        let mut results = Vec::with_capacity(due.len());
        for market_id in due {
            let result = self.settle_market(ledger, &market_id);
            if let Err(error) = &result {
                warn!(market_id = %market_id, %error, "settlement failed");
            }
            results.push((market_id, result));
        }

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        info!(
            settled = results.len() - failed,
            failed,
            "settlement sweep complete"
        );
        results
    }
}
