//! Pool CLI commands
//!
//! Direct calls on the pair contract and its LP token outside the wizard
//! flow. LP amounts use 18 decimals; swap amounts use each token's own.

use clap::Subcommand;

use super::report;
use crate::display::{format_contract_info, format_debug_info};
use crate::error::WizardResult;
use crate::services::WizardController;

/// Pool subcommands
#[derive(Subcommand)]
pub enum PoolCommands {
    /// Show the pool's name, symbol, decimals and supply
    Info,
    /// Burn LP tokens held by the pool
    Burn {
        /// Recipient of the underlying tokens (defaults to the signer)
        #[arg(long, default_value = "")]
        to: String,
    },
    /// Swap tokens out of the pool
    Swap {
        /// Amount of token0 out
        #[arg(long, default_value = "")]
        amount0_out: String,
        /// Amount of token1 out
        #[arg(long, default_value = "")]
        amount1_out: String,
        /// Recipient (defaults to the signer)
        #[arg(long, default_value = "")]
        to: String,
        /// Callback data as hex
        #[arg(long, default_value = "")]
        data: String,
    },
    /// Transfer LP tokens
    Transfer {
        /// Recipient
        to: String,
        /// Amount of LP tokens
        amount: String,
    },
    /// Approve a spender for LP tokens
    Approve {
        /// Spender
        spender: String,
        /// Amount of LP tokens
        amount: String,
    },
    /// Transfer LP tokens on behalf of another holder
    TransferFrom {
        /// Holder
        from: String,
        /// Recipient
        to: String,
        /// Amount of LP tokens
        amount: String,
    },
}

/// Handle a pool command against a started controller
pub async fn handle_pool_command(
    controller: &mut WizardController,
    cmd: PoolCommands,
    gas: Option<u64>,
) -> WizardResult<bool> {
    match cmd {
        PoolCommands::Info => {
            controller.fetch_contract_info().await?;
            let view = controller.view();
            if view.outcome.is_error() {
                return Ok(report(&view));
            }
            print!("{}", format_contract_info(&view.contract_info));
            return Ok(true);
        }
        PoolCommands::Burn { to } => controller.burn(&to, gas).await?,
        PoolCommands::Swap {
            amount0_out,
            amount1_out,
            to,
            data,
        } => {
            controller
                .swap(&amount0_out, &amount1_out, &to, &data, gas)
                .await?
        }
        PoolCommands::Transfer { to, amount } => controller.transfer(&to, &amount, gas).await?,
        PoolCommands::Approve { spender, amount } => {
            controller.approve(&spender, &amount, gas).await?
        }
        PoolCommands::TransferFrom { from, to, amount } => {
            controller.transfer_from(&from, &to, &amount, gas).await?
        }
    }

    let ok = report(&controller.view());
    if ok {
        println!();
        print!("{}", format_debug_info(controller.debug_info()));
    }
    Ok(ok)
}
