//! Core data models for poolwizard
//!
//! This module contains the data structures the wizard works with: wizard
//! progress, transaction outcomes, balance readings, form inputs, token
//! amounts, and block explorer pages.

pub mod amount;
pub mod block;
pub mod contract_info;
pub mod debug_info;
pub mod forms;
pub mod outcome;
pub mod wizard;

pub use amount::{AmountParseError, TokenAmount, LP_DECIMALS};
pub use block::{BlockPage, BlockSummary, ReceiptSummary};
pub use contract_info::ContractInfo;
pub use debug_info::{DebugInfo, FieldReading, InspectionResults, ERROR_FETCHING, NOT_CHECKED};
pub use forms::FormsState;
pub use outcome::{Operation, TransactionOutcome, TxStatus, ERROR_CLEAR_DELAY};
pub use wizard::{DeployedTokens, StepsCompleted, WizardState, WizardStep};
