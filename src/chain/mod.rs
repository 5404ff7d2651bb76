//! Typed access to the chain
//!
//! The pair contract, the generic dev token, and the node are external
//! collaborators. They are consumed only through the traits in this module:
//!
//! - [`Erc20`]: the ERC20 surface both contracts share
//! - [`PoolContract`]: the pair (token0/token1, initialize, mint, burn, swap)
//! - [`TokenContract`]: a generic dev token with a faucet `mint`
//! - [`Chain`]: signer identity, contract handles, raw transactions
//! - [`BlockSource`]: block and receipt lookups for the explorer
//!
//! [`client::AlloyChain`] implements all of them over JSON-RPC.

pub mod bindings;
pub mod calldata;
pub mod client;
pub mod error;
pub mod gas;

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{BlockSummary, ReceiptSummary};

pub use client::{AlloyChain, ChainConfig};
pub use error::{ChainError, ChainResult};
pub use gas::{GasLimit, DEFAULT_GAS_LIMIT};

/// Confirmation of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash
    pub hash: B256,
    /// Block the transaction landed in
    pub block_number: Option<u64>,
    /// Gas consumed
    pub gas_used: u64,
}

/// The ERC20 surface shared by the pair's LP token and the dev tokens
#[async_trait]
pub trait Erc20: Send + Sync {
    /// Contract address
    fn address(&self) -> Address;

    async fn name(&self) -> ChainResult<String>;
    async fn symbol(&self) -> ChainResult<String>;
    async fn decimals(&self) -> ChainResult<u8>;
    async fn total_supply(&self) -> ChainResult<U256>;
    async fn balance_of(&self, owner: Address) -> ChainResult<U256>;
    async fn allowance(&self, owner: Address, spender: Address) -> ChainResult<U256>;

    async fn approve(&self, spender: Address, amount: U256, gas: GasLimit)
        -> ChainResult<TxReceipt>;
    async fn transfer(&self, to: Address, amount: U256, gas: GasLimit) -> ChainResult<TxReceipt>;
    async fn transfer_from(
        &self,
        from: Address,
        to: Address,
        amount: U256,
        gas: GasLimit,
    ) -> ChainResult<TxReceipt>;
}

/// The AMM pair contract
#[async_trait]
pub trait PoolContract: Erc20 {
    async fn token0(&self) -> ChainResult<Address>;
    async fn token1(&self) -> ChainResult<Address>;

    async fn initialize(
        &self,
        token0: Address,
        token1: Address,
        fee_to: Address,
        gas: GasLimit,
    ) -> ChainResult<TxReceipt>;

    /// Mint LP tokens to `to`
    async fn mint(&self, to: Address, gas: GasLimit) -> ChainResult<TxReceipt>;

    async fn burn(&self, to: Address, gas: GasLimit) -> ChainResult<TxReceipt>;

    async fn swap(
        &self,
        amount0_out: U256,
        amount1_out: U256,
        to: Address,
        data: Bytes,
        gas: GasLimit,
    ) -> ChainResult<TxReceipt>;
}

/// A generic dev token
#[async_trait]
pub trait TokenContract: Erc20 {
    /// Faucet mint, only present on dev tokens
    async fn mint(&self, to: Address, amount: U256, gas: GasLimit) -> ChainResult<TxReceipt>;
}

/// A connected node plus signer
#[async_trait]
pub trait Chain: Send + Sync {
    /// Address of the active signer
    fn signer(&self) -> Address;

    /// Handle to the configured pair contract
    fn pool(&self) -> Arc<dyn PoolContract>;

    /// Handle to an arbitrary token
    fn token(&self, address: Address) -> Arc<dyn TokenContract>;

    /// Send a transaction with hand-built calldata
    async fn send_raw(&self, to: Address, data: Bytes, gas: GasLimit) -> ChainResult<TxReceipt>;
}

/// Block and receipt lookups
#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn latest_block_number(&self) -> ChainResult<u64>;
    async fn block(&self, number: u64) -> ChainResult<BlockSummary>;
    async fn receipt(&self, hash: B256) -> ChainResult<ReceiptSummary>;
}
