//! Balance and allowance readings for the debug panel

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for a field that has not been read yet
pub const NOT_CHECKED: &str = "Not checked";

/// Sentinel for a field whose read failed
pub const ERROR_FETCHING: &str = "Error fetching";

/// One formatted reading
///
/// A failed read is distinct from a zero value: zero is
/// `Value("0.0 SYM")`, a failure is `ErrorFetching`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum FieldReading {
    #[default]
    NotChecked,
    Value(String),
    ErrorFetching,
}

impl FieldReading {
    /// Whether this holds a value
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl fmt::Display for FieldReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotChecked => write!(f, "{}", NOT_CHECKED),
            Self::Value(v) => write!(f, "{}", v),
            Self::ErrorFetching => write!(f, "{}", ERROR_FETCHING),
        }
    }
}

/// Everything the last balance/allowance refresh found
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub token0_balance: FieldReading,
    pub token1_balance: FieldReading,
    pub token0_allowance: FieldReading,
    pub token1_allowance: FieldReading,
    pub lp_token_balance: FieldReading,
    /// LP balance in base units, as a decimal string
    pub raw_lp_balance: String,
    /// Serialized payload of the most recent failure
    pub last_error: String,
}

/// Results of the ad-hoc balance and allowance checks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InspectionResults {
    pub balance: String,
    pub allowance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert_eq!(FieldReading::NotChecked.to_string(), "Not checked");
        assert_eq!(FieldReading::ErrorFetching.to_string(), "Error fetching");
        assert_eq!(FieldReading::Value("0.0 LP".into()).to_string(), "0.0 LP");
    }

    #[test]
    fn test_default_debug_info_is_unchecked() {
        let info = DebugInfo::default();
        assert_eq!(info.lp_token_balance, FieldReading::NotChecked);
        assert!(info.last_error.is_empty());
    }
}
