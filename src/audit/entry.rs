//! Activity entry data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Operation, TransactionOutcome, TxStatus};

/// A single settled action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the action settled (UTC)
    pub timestamp: DateTime<Utc>,

    /// Which action it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,

    /// Success or error
    pub status: TxStatus,

    /// Banner text shown to the user
    pub message: String,

    /// Serialized error payload, for failures that carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl ActivityEntry {
    /// Record a settled outcome
    pub fn from_outcome(outcome: &TransactionOutcome, payload: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: outcome.operation,
            status: outcome.status,
            message: outcome.message.clone(),
            payload,
        }
    }

    /// Short single-line description
    pub fn summary(&self) -> String {
        let op = self
            .operation
            .map(|o| o.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} [{}] {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.status,
            op,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_outcome() {
        let outcome = TransactionOutcome::success(Some(Operation::Mint), "Liquidity added");
        let entry = ActivityEntry::from_outcome(&outcome, None);

        assert_eq!(entry.operation, Some(Operation::Mint));
        assert_eq!(entry.status, TxStatus::Success);
        assert_eq!(entry.message, "Liquidity added");
        assert!(entry.summary().contains("[success] mint: Liquidity added"));
    }

    #[test]
    fn test_serialization_skips_empty_payload() {
        let outcome = TransactionOutcome::success(Some(Operation::Initialize), "ok");
        let json = serde_json::to_string(&ActivityEntry::from_outcome(&outcome, None)).unwrap();

        assert!(json.contains("\"operation\":\"initialize\""));
        assert!(json.contains("\"status\":\"success\""));
        assert!(!json.contains("payload"));
    }

    #[test]
    fn test_error_payload_round_trips() {
        let outcome = TransactionOutcome::error(Some(Operation::ApproveToken), "reverted");
        let entry = ActivityEntry::from_outcome(&outcome, Some("{\"kind\":\"reverted\"}".into()));

        let json = serde_json::to_string(&entry).unwrap();
        let back: ActivityEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
