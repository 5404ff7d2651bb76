//! User settings for poolwizard
//!
//! Pool address, gas ceiling and display timings. The RPC endpoint and the
//! signing key are deliberately not stored here; they come from flags or the
//! environment (see [`super::connection`]).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::paths::WizardPaths;
use crate::chain::{GasLimit, DEFAULT_GAS_LIMIT};
use crate::error::WizardError;

/// Pair contract deployed by the local devnode scripts
pub const DEFAULT_POOL_ADDRESS: &str = "0x8503ad43df47a2f3290b3cf530122eb409439d63";

/// User settings for poolwizard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Pair contract address
    #[serde(default = "default_pool_address")]
    pub pool_address: String,

    /// Gas ceiling for every transaction unless overridden
    #[serde(default = "default_gas_limit")]
    pub default_gas_limit: u64,

    /// Seconds an error banner stays visible
    #[serde(default = "default_error_clear_secs")]
    pub error_clear_secs: u64,

    /// Blocks per explorer page
    #[serde(default = "default_explorer_page_size")]
    pub explorer_page_size: u64,

    /// Amount used when an approval form is left blank
    #[serde(default = "default_approve_amount")]
    pub default_approve_amount: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_pool_address() -> String {
    DEFAULT_POOL_ADDRESS.to_string()
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

fn default_error_clear_secs() -> u64 {
    5
}

fn default_explorer_page_size() -> u64 {
    20
}

fn default_approve_amount() -> String {
    "1000".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            pool_address: default_pool_address(),
            default_gas_limit: default_gas_limit(),
            error_clear_secs: default_error_clear_secs(),
            explorer_page_size: default_explorer_page_size(),
            default_approve_amount: default_approve_amount(),
        }
    }
}

impl Settings {
    /// Gas ceiling as a typed value
    pub fn gas_limit(&self) -> GasLimit {
        GasLimit::new(self.default_gas_limit)
    }

    /// Delay before an error banner clears
    pub fn error_clear_delay(&self) -> Duration {
        Duration::from_secs(self.error_clear_secs)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &WizardPaths) -> Result<Self, WizardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| WizardError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                WizardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &WizardPaths) -> Result<(), WizardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| WizardError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| WizardError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
