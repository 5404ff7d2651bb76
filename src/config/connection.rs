//! Chain connection settings
//!
//! The RPC endpoint and signing key come from command-line flags or the
//! `RPC_URL` / `PRIVATE_KEY` environment variables. A missing value resolves
//! to an empty string here; [`ChainConfig::connect`] rejects it before any
//! network call.

use std::str::FromStr;

use alloy::primitives::Address;
use zeroize::Zeroizing;

use super::settings::Settings;
use crate::chain::ChainConfig;
use crate::error::{WizardError, WizardResult};

/// Raw connection inputs as gathered from flags and environment
#[derive(Default)]
pub struct ConnectionOptions {
    pub rpc_url: Option<String>,
    pub private_key: Option<Zeroizing<String>>,
    pub pool_address: Option<String>,
    /// Ask for the key on the terminal when none was given
    pub prompt_key: bool,
}

impl ConnectionOptions {
    /// Resolve into a chain config
    ///
    /// The pool address must parse; the endpoint and key may be empty.
    pub fn resolve(self, settings: &Settings) -> WizardResult<ChainConfig> {
        let pool = self
            .pool_address
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| settings.pool_address.clone());
        let pool_address = parse_address(&pool, "pool address")?;

        let private_key = match self.private_key {
            Some(key) if !key.trim().is_empty() => key,
            _ if self.prompt_key => prompt_private_key()?,
            _ => Zeroizing::new(String::new()),
        };

        Ok(ChainConfig {
            rpc_url: self.rpc_url.unwrap_or_default(),
            private_key,
            pool_address,
        })
    }
}

/// Parse a user-supplied address, naming the field on failure
pub fn parse_address(input: &str, field: &str) -> WizardResult<Address> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WizardError::Validation(format!("{} is required", field)));
    }
    Address::from_str(trimmed)
        .map_err(|e| WizardError::Validation(format!("Invalid {} '{}': {}", field, trimmed, e)))
}

/// Read the signing key with hidden input
fn prompt_private_key() -> WizardResult<Zeroizing<String>> {
    rpassword::prompt_password("Private key: ")
        .map(Zeroizing::new)
        .map_err(|e| WizardError::Config(format!("Failed to read private key: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_resolve_to_empty() {
        let config = ConnectionOptions::default()
            .resolve(&Settings::default())
            .unwrap();
        assert!(config.rpc_url.is_empty());
        assert!(config.private_key.is_empty());
        assert_eq!(
            config.pool_address,
            Address::from_str(super::super::settings::DEFAULT_POOL_ADDRESS).unwrap()
        );
    }

    #[test]
    fn test_pool_override() {
        let options = ConnectionOptions {
            pool_address: Some("0x00000000000000000000000000000000000000aa".into()),
            ..Default::default()
        };
        let config = options.resolve(&Settings::default()).unwrap();
        assert_eq!(config.pool_address, Address::with_last_byte(0xaa));
    }

    #[test]
    fn test_bad_pool_address_is_rejected() {
        let options = ConnectionOptions {
            pool_address: Some("0x1234".into()),
            ..Default::default()
        };
        let err = options.resolve(&Settings::default()).err().unwrap();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_address_requires_value() {
        let err = parse_address("  ", "token0").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: token0 is required");
    }
}
