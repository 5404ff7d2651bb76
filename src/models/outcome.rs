//! Transaction outcome shown in the status banner
//!
//! Each user action produces an outcome that moves none -> pending ->
//! success | error. Error outcomes clear themselves after a fixed delay;
//! success outcomes stay until the next action.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Default delay before an error banner clears
pub const ERROR_CLEAR_DELAY: Duration = Duration::from_secs(5);

/// Status of the current action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    #[default]
    None,
    Pending,
    Success,
    Error,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::None => write!(f, "none"),
            TxStatus::Pending => write!(f, "pending"),
            TxStatus::Success => write!(f, "success"),
            TxStatus::Error => write!(f, "error"),
        }
    }
}

/// Tag identifying which action produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initialize,
    ApproveToken,
    Mint,
    Burn,
    Swap,
    Transfer,
    Approve,
    TransferFrom,
    FaucetMint,
    BalanceCheck,
    AllowanceCheck,
}

impl Operation {
    /// Whether this action submits a transaction
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::BalanceCheck | Self::AllowanceCheck)
    }

    /// Message shown while pending
    pub fn pending_message(self) -> &'static str {
        match self {
            Self::Initialize => "Initializing pool...",
            Self::ApproveToken => "Approving token...",
            Self::Mint => "Adding liquidity...",
            Self::Burn => "Removing liquidity...",
            Self::Swap => "Swapping tokens...",
            Self::Transfer => "Transferring tokens...",
            Self::Approve => "Approving spender...",
            Self::TransferFrom => "Transferring tokens from...",
            Self::FaucetMint => "Minting test tokens...",
            Self::BalanceCheck => "Checking balance...",
            Self::AllowanceCheck => "Checking allowance...",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initialize => "initialize",
            Self::ApproveToken => "approveToken",
            Self::Mint => "mint",
            Self::Burn => "burn",
            Self::Swap => "swap",
            Self::Transfer => "transfer",
            Self::Approve => "approve",
            Self::TransferFrom => "transferFrom",
            Self::FaucetMint => "mintTokens",
            Self::BalanceCheck => "balanceCheck",
            Self::AllowanceCheck => "allowanceCheck",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of the most recent user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub status: TxStatus,
    pub message: String,
    pub operation: Option<Operation>,
    /// When the status last changed
    pub updated_at: Instant,
}

impl Default for TransactionOutcome {
    fn default() -> Self {
        Self::none()
    }
}

impl TransactionOutcome {
    /// No outcome to show
    pub fn none() -> Self {
        Self {
            status: TxStatus::None,
            message: String::new(),
            operation: None,
            updated_at: Instant::now(),
        }
    }

    /// An action has been submitted
    pub fn pending(operation: Operation) -> Self {
        Self {
            status: TxStatus::Pending,
            message: operation.pending_message().to_string(),
            operation: Some(operation),
            updated_at: Instant::now(),
        }
    }

    /// An action settled successfully
    pub fn success(operation: Option<Operation>, message: impl Into<String>) -> Self {
        Self {
            status: TxStatus::Success,
            message: message.into(),
            operation,
            updated_at: Instant::now(),
        }
    }

    /// An action failed
    pub fn error(operation: Option<Operation>, message: impl Into<String>) -> Self {
        Self {
            status: TxStatus::Error,
            message: message.into(),
            operation,
            updated_at: Instant::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TxStatus::Pending
    }

    pub fn is_error(&self) -> bool {
        self.status == TxStatus::Error
    }

    /// Whether an error outcome has been shown for at least `delay`
    pub fn is_expired_at(&self, now: Instant, delay: Duration) -> bool {
        self.is_error() && now.saturating_duration_since(self.updated_at) >= delay
    }

    /// Revert an expired error to none; returns true if it cleared
    pub fn clear_if_expired(&mut self, now: Instant, delay: Duration) -> bool {
        if self.is_expired_at(now, delay) {
            *self = Self::none();
            true
        } else {
            false
        }
    }
}
