//! Gas ceiling for mutating calls
//!
//! Local dev networks routinely fail gas estimation for calls against freshly
//! deployed contracts, so every write carries an explicit ceiling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default ceiling used when the caller supplies none
pub const DEFAULT_GAS_LIMIT: u64 = 10_000_000;

/// Gas ceiling attached to a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GasLimit(u64);

impl GasLimit {
    /// Create a gas ceiling
    pub const fn new(limit: u64) -> Self {
        Self(limit)
    }

    /// Caller override if given, else the default
    pub fn resolve(override_limit: Option<u64>, default: GasLimit) -> Self {
        match override_limit {
            Some(limit) if limit > 0 => Self(limit),
            _ => default,
        }
    }

    /// The raw limit
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl Default for GasLimit {
    fn default() -> Self {
        Self(DEFAULT_GAS_LIMIT)
    }
}

impl fmt::Display for GasLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
