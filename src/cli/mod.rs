//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the wizard controller.
//!
//! Handlers return `Ok(false)` when the operation settled with an error
//! outcome, so the binary can exit non-zero without treating it as a crash.

pub mod activity;
pub mod blocks;
pub mod check;
pub mod pool;
pub mod session;
pub mod wizard;

pub use activity::handle_activity_command;
pub use blocks::handle_blocks_command;
pub use check::{handle_check_command, CheckCommands};
pub use pool::{handle_pool_command, PoolCommands};
pub use session::Session;
pub use wizard::{handle_wizard_command, StepCommands, WizardCommands};

use crate::display::{format_outcome, format_progress};
use crate::models::DeployedTokens;
use crate::services::WizardView;

/// Print the settled outcome; returns false for an error outcome
pub fn report(view: &WizardView) -> bool {
    let banner = format_outcome(&view.outcome);

    if view.outcome.is_error() {
        eprint!("{}", banner);
        if !view.debug.last_error.is_empty() {
            eprintln!("  Details: {}", view.debug.last_error);
        }
        return false;
    }

    print!("{}", banner);
    true
}

/// Print the outcome followed by the step list
pub fn report_with_progress(view: &WizardView) -> bool {
    let ok = report(view);
    if ok {
        println!();
        print!("{}", format_progress(&view.state));
    }
    ok
}

/// Expand `token0` / `token1` to the stored pair addresses
pub fn resolve_token(input: &str, tokens: &DeployedTokens) -> String {
    let trimmed = input.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "token0" => tokens.token0.clone(),
        "token1" => tokens.token1.clone(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_token_aliases() {
        let tokens = DeployedTokens::new("0xaaa", "0xbbb");
        assert_eq!(resolve_token("token0", &tokens), "0xaaa");
        assert_eq!(resolve_token(" TOKEN1 ", &tokens), "0xbbb");
        assert_eq!(resolve_token(" 0xccc ", &tokens), "0xccc");
    }

    #[test]
    fn test_resolve_token_with_unknown_pair() {
        let tokens = DeployedTokens::default();
        assert_eq!(resolve_token("token0", &tokens), "");
    }
}
