//! One-off reads against arbitrary tokens
//!
//! Independent of the wizard's token pair. Results are formatted as
//! `"<amount> <symbol>"` with the token's own decimals.

use futures_util::future::join3;
use tracing::debug;

use crate::chain::{Chain, ChainError};
use crate::config::parse_address;
use crate::error::{WizardError, WizardResult};
use crate::models::TokenAmount;

/// Balance of `address` in `token`
pub async fn check_balance(chain: &dyn Chain, address: &str, token: &str) -> WizardResult<String> {
    let (owner, token_address) = match (
        parse_address(address, "address"),
        parse_address(token, "token address"),
    ) {
        (Ok(owner), Ok(token)) => (owner, token),
        _ => {
            return Err(WizardError::Validation(
                "Please enter a valid address and token address".into(),
            ))
        }
    };

    debug!(%owner, token = %token_address, "checking balance");
    let token = chain.token(token_address);
    let (balance, decimals, symbol) =
        join3(token.balance_of(owner), token.decimals(), token.symbol()).await;

    let amount = TokenAmount::from_raw(balance.map_err(read_error)?, decimals.map_err(read_error)?);
    Ok(amount.format_with_symbol(&symbol.map_err(read_error)?))
}

/// Allowance from `owner` to `spender` in `token`
pub async fn check_allowance(
    chain: &dyn Chain,
    owner: &str,
    spender: &str,
    token: &str,
) -> WizardResult<String> {
    let (owner, spender, token_address) = match (
        parse_address(owner, "owner"),
        parse_address(spender, "spender"),
        parse_address(token, "token address"),
    ) {
        (Ok(owner), Ok(spender), Ok(token)) => (owner, spender, token),
        _ => {
            return Err(WizardError::Validation(
                "Please enter valid owner, spender, and token addresses".into(),
            ))
        }
    };

    debug!(%owner, %spender, token = %token_address, "checking allowance");
    let token = chain.token(token_address);
    let (allowance, decimals, symbol) = join3(
        token.allowance(owner, spender),
        token.decimals(),
        token.symbol(),
    )
    .await;

    let amount =
        TokenAmount::from_raw(allowance.map_err(read_error)?, decimals.map_err(read_error)?);
    Ok(amount.format_with_symbol(&symbol.map_err(read_error)?))
}

fn read_error(err: ChainError) -> WizardError {
    WizardError::Read(err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{MockChain, MockToken, POOL, SIGNER, TOKEN_A};
    use alloy::primitives::U256;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_balance_uses_token_decimals() {
        let chain = MockChain::new();
        let token = chain.add_token(MockToken::new(TOKEN_A, "USDC", 6));
        token.ledger.set_balance(SIGNER, U256::from(1_500_000u64));

        let reading = check_balance(chain.as_ref(), &SIGNER.to_string(), &TOKEN_A.to_string())
            .await
            .unwrap();
        assert_eq!(reading, "1.5 USDC");
    }

    #[tokio::test]
    async fn test_allowance_reading() {
        let chain = MockChain::new();
        let token = chain.add_token(MockToken::new(TOKEN_A, "TKA", 18));
        token.ledger.set_allowance(SIGNER, POOL, U256::ZERO);

        let reading = check_allowance(
            chain.as_ref(),
            &SIGNER.to_string(),
            &POOL.to_string(),
            &TOKEN_A.to_string(),
        )
        .await
        .unwrap();
        assert_eq!(reading, "0.0 TKA");
    }

    #[tokio::test]
    async fn test_missing_inputs_are_validation_errors() {
        let chain = MockChain::new();
        let err = check_balance(chain.as_ref(), "", &TOKEN_A.to_string())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.banner(), "Please enter a valid address and token address");
    }

    #[tokio::test]
    async fn test_read_failure_is_a_read_error() {
        let chain = MockChain::new();
        let token = chain.add_token(MockToken::new(TOKEN_A, "TKA", 18));
        token.ledger.fail_reads.store(true, Ordering::SeqCst);

        let err = check_balance(chain.as_ref(), &SIGNER.to_string(), &TOKEN_A.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::Read(_)));
    }
}
