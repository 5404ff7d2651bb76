//! Display formatting for terminal output
//!
//! Plain-text renderings of wizard state for the CLI. The TUI draws its own
//! widgets from the same models.

pub mod blocks;
pub mod wizard;

pub use blocks::format_block_page;
pub use wizard::{
    format_activity, format_contract_info, format_debug_info, format_inspection,
    format_outcome, format_progress, format_status,
};
