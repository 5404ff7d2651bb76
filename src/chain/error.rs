//! Chain-level error type
//!
//! Every failure raised by a contract binding, the signer, or the node is
//! reported as a [`ChainError`]. The type is serializable so the full payload
//! can be captured for the debug panel.

use serde::Serialize;
use thiserror::Error;

/// Generic message used when a failure carries no text of its own
pub const GENERIC_FAILURE: &str = "Transaction failed";

/// Errors raised while talking to the node or a contract
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ChainError {
    /// No RPC endpoint was configured
    #[error("RPC endpoint is not configured")]
    MissingRpcUrl,

    /// No signing key was configured
    #[error("signing key is not configured")]
    MissingSigningKey,

    /// The RPC endpoint could not be parsed
    #[error("invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    /// The signing key could not be parsed
    #[error("invalid signing key: {0}")]
    InvalidSigningKey(String),

    /// The contract reverted, or the receipt reported failure
    #[error("{reason}")]
    Reverted {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },

    /// Transport, RPC, or decoding failure
    #[error("{0}")]
    Transport(String),

    /// The node returned nothing for a lookup
    #[error("{0} not found")]
    NotFound(String),
}

impl ChainError {
    /// The message to show in the status banner
    ///
    /// Revert reason first, then the error text, then the generic message.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            text
        }
    }

    /// Serialized error payload for inspection
    pub fn payload(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }

    /// Whether this error happened before any network call was made
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingRpcUrl
                | Self::MissingSigningKey
                | Self::InvalidRpcUrl { .. }
                | Self::InvalidSigningKey(_)
        )
    }
}

/// Result type alias for chain calls
pub type ChainResult<T> = Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverted_message_is_reason() {
        let err = ChainError::Reverted {
            reason: "Pool not initialized".into(),
            data: Some("0x08c379a0".into()),
        };
        assert_eq!(err.user_message(), "Pool not initialized");
    }

    #[test]
    fn test_empty_reason_falls_back_to_generic() {
        let err = ChainError::Reverted {
            reason: String::new(),
            data: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = ChainError::Transport("  ".into());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_payload_is_tagged_json() {
        let err = ChainError::Transport("connection refused".into());
        let payload: serde_json::Value = serde_json::from_str(&err.payload()).unwrap();
        assert_eq!(payload["kind"], "transport");
    }

    #[test]
    fn test_configuration_errors() {
        assert!(ChainError::MissingRpcUrl.is_configuration());
        assert!(ChainError::MissingSigningKey.is_configuration());
        assert!(!ChainError::Transport("x".into()).is_configuration());
    }
}
