//! Custom error types for poolwizard
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Chain-level failures live in
//! [`crate::chain::ChainError`] and are folded into [`WizardError`] at the
//! controller boundary.

use thiserror::Error;

use crate::chain::ChainError;

/// The main error type for poolwizard operations
#[derive(Error, Debug)]
pub enum WizardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for user input (addresses, amounts, steps)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Could not reach the node or build a signer
    #[error("Connection error: {0}")]
    Connection(String),

    /// The pool has no token pair yet
    #[error("Pool not properly initialized. Please complete Step 1 first.")]
    PoolNotInitialized {
        /// Underlying reason, kept for the debug panel
        detail: String,
    },

    /// A submitted transaction failed or reverted
    #[error("{message}")]
    Transaction {
        /// Revert reason or error text shown to the user
        message: String,
        /// Serialized error payload for inspection
        payload: String,
    },

    /// A read against a contract failed
    #[error("Read error: {0}")]
    Read(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl WizardError {
    /// Wrap a chain error raised while submitting a transaction
    pub fn transaction(err: &ChainError) -> Self {
        Self::Transaction {
            message: err.user_message(),
            payload: err.payload(),
        }
    }

    /// Wrap a chain error raised while connecting
    pub fn connection(err: &ChainError) -> Self {
        Self::Connection(err.to_string())
    }

    /// Text for `DebugInfo::last_error`, if this error carries any
    pub fn debug_detail(&self) -> Option<String> {
        match self {
            Self::Transaction { payload, .. } => Some(payload.clone()),
            Self::PoolNotInitialized { detail } => Some(detail.clone()),
            _ => None,
        }
    }

    /// Banner text for an error outcome
    pub fn banner(&self) -> String {
        match self {
            Self::Connection(_) => "Failed to initialize contract".to_string(),
            Self::Validation(msg) | Self::Read(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Local persistence failed; the controller reports these to its caller
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io(_) | Self::Json(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for WizardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for poolwizard operations
pub type WizardResult<T> = Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WizardError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_pool_not_initialized_message() {
        let err = WizardError::PoolNotInitialized {
            detail: "token0 is zero".into(),
        };
        assert_eq!(
            err.to_string(),
            "Pool not properly initialized. Please complete Step 1 first."
        );
        assert_eq!(err.debug_detail().as_deref(), Some("token0 is zero"));
    }

    #[test]
    fn test_transaction_error_uses_revert_reason() {
        let chain_err = ChainError::Reverted {
            reason: "Already initialized".into(),
            data: None,
        };
        let err = WizardError::transaction(&chain_err);
        assert_eq!(err.to_string(), "Already initialized");
        assert!(err.debug_detail().unwrap().contains("Already initialized"));
    }

    #[test]
    fn test_banner_text() {
        let err = WizardError::Connection("missing RPC URL".into());
        assert_eq!(err.banner(), "Failed to initialize contract");

        let err = WizardError::Validation("Please provide a valid token address".into());
        assert_eq!(err.banner(), "Please provide a valid token address");
        assert!(!err.is_storage());
        assert!(WizardError::Storage("disk full".into()).is_storage());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WizardError = io_err.into();
        assert!(matches!(err, WizardError::Io(_)));
    }
}
