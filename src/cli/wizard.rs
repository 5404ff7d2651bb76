//! Wizard CLI commands
//!
//! The three wizard steps, the dev faucet, and step navigation.

use clap::Subcommand;

use super::{report, report_with_progress, resolve_token};
use crate::display::{format_debug_info, format_status};
use crate::error::{WizardError, WizardResult};
use crate::models::WizardStep;
use crate::services::WizardController;

/// Wizard subcommands
#[derive(Subcommand)]
pub enum WizardCommands {
    /// Show wizard progress, pool info and balances
    Status,
    /// Step 1: initialize the pool with a token pair
    Init {
        /// token0 address
        token0: String,
        /// token1 address
        token1: String,
        /// Fee recipient (defaults to the zero address)
        #[arg(long, default_value = "")]
        fee_to: String,
    },
    /// Step 2: approve the pool to spend the pair's tokens
    Approve {
        /// token0, token1 or a token address; both pair tokens when omitted
        token: Option<String>,
        /// Amount in whole tokens (defaults to the configured amount)
        #[arg(short, long, default_value = "")]
        amount: String,
    },
    /// Step 3: mint LP tokens
    Mint {
        /// LP recipient (defaults to the signer)
        #[arg(long, default_value = "")]
        to: String,
    },
    /// Mint dev tokens to the signer
    Faucet {
        /// token0, token1 or a token address
        token: String,
        /// Amount in whole tokens
        amount: String,
    },
    /// Re-read balances and allowances
    Refresh,
    /// Move between wizard steps
    #[command(subcommand)]
    Step(StepCommands),
}

/// Step navigation subcommands
#[derive(Subcommand)]
pub enum StepCommands {
    /// Go back to an earlier step
    Back {
        /// Step number (1-3)
        step: u8,
    },
    /// Continue once the current step is complete
    Next,
}

/// Handle a wizard command against a started controller
pub async fn handle_wizard_command(
    controller: &mut WizardController,
    cmd: WizardCommands,
    gas: Option<u64>,
) -> WizardResult<bool> {
    match cmd {
        WizardCommands::Status => {
            print!("{}", format_status(&controller.view()));
            Ok(true)
        }

        WizardCommands::Init {
            token0,
            token1,
            fee_to,
        } => {
            controller.initialize(&token0, &token1, &fee_to, gas).await?;
            Ok(report_with_progress(&controller.view()))
        }

        WizardCommands::Approve { token, amount } => {
            let tokens = controller.state().deployed_tokens.clone();
            let targets = match token {
                Some(token) => vec![resolve_token(&token, &tokens)],
                None => vec![tokens.token0, tokens.token1],
            };

            for target in targets {
                controller.approve_token(&target, &amount, gas).await?;
                if !report(&controller.view()) {
                    return Ok(false);
                }
            }
            println!();
            print!("{}", format_debug_info(controller.debug_info()));
            Ok(true)
        }

        WizardCommands::Mint { to } => {
            controller.mint(&to, gas).await?;
            Ok(report_with_progress(&controller.view()))
        }

        WizardCommands::Faucet { token, amount } => {
            let token = resolve_token(&token, &controller.state().deployed_tokens);
            controller.faucet_mint(&token, &amount, gas).await?;
            Ok(report(&controller.view()))
        }

        WizardCommands::Refresh => {
            controller.check_token_balances_and_allowances().await?;
            print!("{}", format_debug_info(controller.debug_info()));
            Ok(true)
        }

        WizardCommands::Step(StepCommands::Back { step }) => {
            let target = WizardStep::from_number(step)
                .ok_or_else(|| WizardError::Validation(format!("Unknown step: {}", step)))?;
            let current = controller.state().current_step;

            if controller.go_to_step(target)? {
                println!("Moved back to step {}: {}", target, target.title());
            } else {
                println!(
                    "Step {} is not before the current step ({}).",
                    target, current
                );
            }
            Ok(true)
        }

        WizardCommands::Step(StepCommands::Next) => {
            let current = controller.state().current_step;
            if controller.advance()? {
                let next = controller.state().current_step;
                println!("Moved on to step {}: {}", next, next.title());
            } else {
                println!(
                    "Step {} must be completed before moving on.",
                    current
                );
            }
            Ok(true)
        }
    }
}
