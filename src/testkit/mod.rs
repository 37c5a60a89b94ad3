//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`]: builders for domain primitives and ledgers: markets,
//!   trades, desks.
//! - [`config`]: canonical fee schedules (standard, free, steep).

pub mod config;
pub mod domain;
