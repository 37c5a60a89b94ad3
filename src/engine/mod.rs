//! The pure computation core: pricing and settlement.
//!
//! Both engines are synchronous functions of their inputs. They never
//! log, never perform I/O, and never touch shared state; committing
//! their outputs is the ledger's job.

pub mod fees;
pub mod pricing;
pub mod settlement;

pub use fees::FeeSchedule;
pub use pricing::{apply_stake, probabilities, shares_for_stake, PricedStake, Quote};
pub use settlement::{settle, Settlement};
