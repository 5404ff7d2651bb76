//! Pool contract metadata

use serde::{Deserialize, Serialize};

/// Name, symbol and supply of the pool's LP token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: String,
    /// Formatted with 18 decimals
    pub total_supply: String,
    pub address: String,
}

impl ContractInfo {
    /// Whether a fetch has filled this in
    pub fn is_loaded(&self) -> bool {
        !self.address.is_empty()
    }
}
