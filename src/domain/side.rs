//! The canonical outcome side for binary markets.
//!
//! Every boundary normalizes to [`Side::Yes`] / [`Side::No`]. Some
//! collaborators still speak `UP`/`DOWN`; those are accepted as aliases
//! during deserialization and parsing but never propagate past this type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// One side of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// The affirmative outcome. Alias: `UP`.
    #[serde(alias = "UP", alias = "up", alias = "Yes", alias = "yes")]
    Yes,
    /// The negative outcome. Alias: `DOWN`.
    #[serde(alias = "DOWN", alias = "down", alias = "No", alias = "no")]
    No,
}

impl Side {
    /// The other side of the market.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Yes => Side::No,
            Side::No => Side::Yes,
        }
    }

    /// Canonical uppercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Yes => "YES",
            Side::No => "NO",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = DomainError;

    /// Parse a side label, normalizing legacy aliases.
    ///
    /// Accepts `YES`/`NO` and the legacy `UP`/`DOWN` pair, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YES" | "UP" => Ok(Side::Yes),
            "NO" | "DOWN" => Ok(Side::No),
            _ => Err(DomainError::UnknownSide {
                value: s.to_string(),
            }),
        }
    }
}
