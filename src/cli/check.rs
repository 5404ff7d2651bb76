//! Ad-hoc balance and allowance checks

use clap::Subcommand;

use super::{report, resolve_token};
use crate::display::format_inspection;
use crate::error::WizardResult;
use crate::services::WizardController;

/// Check subcommands
#[derive(Subcommand)]
pub enum CheckCommands {
    /// Read an account's balance of a token
    Balance {
        /// Account address
        address: String,
        /// token0, token1 or a token address
        token: String,
    },
    /// Read an owner's allowance to a spender
    Allowance {
        /// Owner address
        owner: String,
        /// Spender address
        spender: String,
        /// token0, token1 or a token address
        token: String,
    },
}

/// Handle a check command
pub async fn handle_check_command(
    controller: &mut WizardController,
    cmd: CheckCommands,
) -> WizardResult<bool> {
    let tokens = controller.state().deployed_tokens.clone();

    match cmd {
        CheckCommands::Balance { address, token } => {
            controller
                .check_balance(&address, &resolve_token(&token, &tokens))
                .await?;
        }
        CheckCommands::Allowance {
            owner,
            spender,
            token,
        } => {
            controller
                .check_allowance(&owner, &spender, &resolve_token(&token, &tokens))
                .await?;
        }
    }

    let view = controller.view();
    if !report(&view) {
        return Ok(false);
    }
    print!("{}", format_inspection(&view.inspection));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{controller, MockChain, SIGNER};

    #[tokio::test]
    async fn test_balance_check_accepts_token_alias() {
        let chain = MockChain::with_pair();
        let (_dir, mut wizard) = controller(chain);
        wizard.start().await.unwrap();

        let cmd = CheckCommands::Balance {
            address: SIGNER.to_string(),
            token: "token0".into(),
        };
        assert!(handle_check_command(&mut wizard, cmd).await.unwrap());
        assert!(wizard.inspection().balance.ends_with("TKA"));
    }

    #[tokio::test]
    async fn test_allowance_check_with_blank_owner_fails() {
        let chain = MockChain::with_pair();
        let (_dir, mut wizard) = controller(chain);
        wizard.start().await.unwrap();

        let cmd = CheckCommands::Allowance {
            owner: String::new(),
            spender: SIGNER.to_string(),
            token: "token1".into(),
        };
        assert!(!handle_check_command(&mut wizard, cmd).await.unwrap());
    }
}
