//! Wizard display formatting
//!
//! Formats wizard progress, the status banner, the debug panel and contract
//! metadata for terminal output.

use crate::audit::ActivityEntry;
use crate::models::{
    ContractInfo, DebugInfo, InspectionResults, TransactionOutcome, TxStatus, WizardState,
    WizardStep,
};
use crate::services::WizardView;

/// Marker shown next to each step in the stepper
pub fn step_marker(state: &WizardState, step: WizardStep) -> &'static str {
    if state.steps_completed.is_complete(step) {
        "[x]"
    } else if state.current_step == step {
        "[>]"
    } else {
        "[ ]"
    }
}

/// Format the three-step progress list
pub fn format_progress(state: &WizardState) -> String {
    let mut output = String::new();

    for step in WizardStep::ALL {
        output.push_str(&format!(
            "  {} {}. {}\n",
            step_marker(state, step),
            step.number(),
            step.title()
        ));
    }

    output.push('\n');
    output.push_str(&format!("  Current step:     {}\n", state.current_step));
    output.push_str(&format!(
        "  Pool initialized: {}\n",
        if state.pool_initialized { "Yes" } else { "No" }
    ));

    let tokens = &state.deployed_tokens;
    output.push_str(&format!(
        "  Token0:           {}\n",
        or_dash(&tokens.token0)
    ));
    output.push_str(&format!(
        "  Token1:           {}\n",
        or_dash(&tokens.token1)
    ));

    if state.is_done() {
        output.push('\n');
        output.push_str("All steps completed successfully!\n");
    }

    output
}

/// Format the status banner, or nothing when there is no outcome
pub fn format_outcome(outcome: &TransactionOutcome) -> String {
    let label = match outcome.status {
        TxStatus::None => return String::new(),
        TxStatus::Pending => "PENDING",
        TxStatus::Success => "SUCCESS",
        TxStatus::Error => "ERROR",
    };
    format!("[{}] {}\n", label, outcome.message)
}

/// Format the balance and allowance readings
pub fn format_debug_info(debug: &DebugInfo) -> String {
    let mut output = String::new();

    output.push_str("Balances (signer)\n");
    output.push_str(&format!("  Token0 balance:   {}\n", debug.token0_balance));
    output.push_str(&format!("  Token1 balance:   {}\n", debug.token1_balance));
    output.push_str(&format!("  Token0 allowance: {}\n", debug.token0_allowance));
    output.push_str(&format!("  Token1 allowance: {}\n", debug.token1_allowance));
    output.push_str(&format!("  LP balance:       {}\n", debug.lp_token_balance));
    if !debug.raw_lp_balance.is_empty() {
        output.push_str(&format!("  LP balance (wei): {}\n", debug.raw_lp_balance));
    }

    if !debug.last_error.is_empty() {
        output.push('\n');
        output.push_str(&format!("Last error: {}\n", debug.last_error));
    }

    output
}

/// Format pool metadata
pub fn format_contract_info(info: &ContractInfo) -> String {
    if !info.is_loaded() {
        return "Contract info not loaded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Pool: {} ({})\n", info.name, info.symbol));
    output.push_str(&format!("  Address:      {}\n", info.address));
    output.push_str(&format!("  Decimals:     {}\n", info.decimals));
    output.push_str(&format!("  Total supply: {}\n", info.total_supply));
    output
}

/// Format the ad-hoc check results that have been filled in
pub fn format_inspection(results: &InspectionResults) -> String {
    let mut output = String::new();
    if !results.balance.is_empty() {
        output.push_str(&format!("Balance:   {}\n", results.balance));
    }
    if !results.allowance.is_empty() {
        output.push_str(&format!("Allowance: {}\n", results.allowance));
    }
    output
}

/// Format the full status report
pub fn format_status(view: &WizardView) -> String {
    let mut output = String::new();

    output.push_str(&format!("Signer: {}\n", view.signer));
    output.push_str(&format!("Pool:   {}\n\n", view.pool));
    output.push_str(&format_progress(&view.state));
    output.push('\n');
    output.push_str(&format_contract_info(&view.contract_info));
    output.push('\n');
    output.push_str(&format_debug_info(&view.debug));

    output
}

/// Format recent activity, oldest first
pub fn format_activity(entries: &[ActivityEntry]) -> String {
    if entries.is_empty() {
        return "No activity recorded.\n".to_string();
    }

    entries
        .iter()
        .map(|entry| format!("{}\n", entry.summary()))
        .collect()
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldReading, Operation};

    #[test]
    fn test_progress_markers() {
        let mut state = WizardState::default();
        state.complete_step(WizardStep::Initialize);

        let output = format_progress(&state);
        assert!(output.contains("[x] 1. Initialize Uniswap V2 Pool"));
        assert!(output.contains("[>] 2. Approve Tokens for Uniswap V2"));
        assert!(output.contains("[ ] 3. Add Liquidity (Mint)"));
        assert!(output.contains("Token0:           -"));
        assert!(!output.contains("All steps completed"));
    }

    #[test]
    fn test_done_banner() {
        let mut state = WizardState::default();
        state.steps_completed.mark(WizardStep::Mint);
        assert!(format_progress(&state).contains("All steps completed successfully!"));
    }

    #[test]
    fn test_outcome_banner() {
        assert_eq!(format_outcome(&TransactionOutcome::none()), "");
        let outcome = TransactionOutcome::error(Some(Operation::Mint), "boom");
        assert_eq!(format_outcome(&outcome), "[ERROR] boom\n");
    }

    #[test]
    fn test_debug_info_shows_sentinels() {
        let debug = DebugInfo {
            lp_token_balance: FieldReading::ErrorFetching,
            ..Default::default()
        };
        let output = format_debug_info(&debug);
        assert!(output.contains("Token0 balance:   Not checked"));
        assert!(output.contains("LP balance:       Error fetching"));
        assert!(!output.contains("Last error"));
    }

    #[test]
    fn test_contract_info_not_loaded() {
        assert_eq!(
            format_contract_info(&ContractInfo::default()),
            "Contract info not loaded.\n"
        );
    }
}
