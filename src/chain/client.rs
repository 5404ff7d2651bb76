//! JSON-RPC implementation of the chain traits
//!
//! Built on alloy: a signing HTTP provider, `sol!` contract instances for
//! the pair and for tokens, and plain provider calls for the explorer.

use std::fmt;
use std::sync::Arc;

use alloy::eips::BlockNumberOrTag;
use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::decode_revert_reason;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use zeroize::Zeroizing;

use super::bindings::{IFaucetToken, IUniswapV2Pair};
use super::{
    BlockSource, Chain, ChainError, ChainResult, Erc20, GasLimit, PoolContract, TokenContract,
    TxReceipt,
};
use crate::models::{BlockSummary, ReceiptSummary};

/// Everything needed to reach the node and sign
pub struct ChainConfig {
    /// JSON-RPC endpoint; empty when not configured
    pub rpc_url: String,
    /// Hex private key; empty when not configured
    pub private_key: Zeroizing<String>,
    /// Pair contract address
    pub pool_address: Address,
}

impl fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("pool_address", &self.pool_address)
            .finish()
    }
}

impl ChainConfig {
    /// Build a signing provider
    ///
    /// Fails before any network call when the endpoint or key is missing or
    /// malformed. The HTTP transport connects lazily, so an unreachable node
    /// surfaces on the first read.
    pub fn connect(&self) -> ChainResult<AlloyChain> {
        let rpc_url = self.rpc_url.trim();
        if rpc_url.is_empty() {
            return Err(ChainError::MissingRpcUrl);
        }
        let key = self.private_key.trim();
        if key.is_empty() {
            return Err(ChainError::MissingSigningKey);
        }

        let url = rpc_url
            .parse::<Url>()
            .map_err(|e| ChainError::InvalidRpcUrl {
                url: rpc_url.to_string(),
                reason: e.to_string(),
            })?;

        let signer: PrivateKeySigner = key
            .parse()
            .map_err(|e| ChainError::InvalidSigningKey(format!("{}", e)))?;
        let signer_address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_http(url)
            .erased();

        tracing::info!(
            rpc_url,
            signer = %signer_address,
            pool = %self.pool_address,
            "connected chain client"
        );

        Ok(AlloyChain {
            provider,
            signer: signer_address,
            pool_address: self.pool_address,
        })
    }
}

/// Signing JSON-RPC client
#[derive(Clone)]
pub struct AlloyChain {
    provider: DynProvider,
    signer: Address,
    pool_address: Address,
}

impl AlloyChain {
    /// Address of the configured pair
    pub fn pool_address(&self) -> Address {
        self.pool_address
    }
}

#[async_trait]
impl Chain for AlloyChain {
    fn signer(&self) -> Address {
        self.signer
    }

    fn pool(&self) -> Arc<dyn PoolContract> {
        Arc::new(AlloyPool {
            inner: IUniswapV2Pair::new(self.pool_address, self.provider.clone()),
        })
    }

    fn token(&self, address: Address) -> Arc<dyn TokenContract> {
        Arc::new(AlloyToken {
            inner: IFaucetToken::new(address, self.provider.clone()),
        })
    }

    async fn send_raw(&self, to: Address, data: Bytes, gas: GasLimit) -> ChainResult<TxReceipt> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(data)
            .with_gas_limit(gas.get());
        tracing::debug!(%to, %gas, "sending raw transaction");
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ChainError::Transport(e.to_string()));
        confirm(pending).await
    }
}

#[async_trait]
impl BlockSource for AlloyChain {
    async fn latest_block_number(&self) -> ChainResult<u64> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))
    }

    async fn block(&self, number: u64) -> ChainResult<BlockSummary> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .full()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?
            .ok_or_else(|| ChainError::NotFound(format!("block {}", number)))?;

        Ok(BlockSummary {
            number: block.header.number,
            hash: block.header.hash,
            timestamp: block.header.timestamp,
            miner: block.header.beneficiary,
            gas_used: block.header.gas_used,
            transactions: block.transactions.hashes().collect(),
        })
    }

    async fn receipt(&self, hash: B256) -> ChainResult<ReceiptSummary> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?
            .ok_or_else(|| ChainError::NotFound(format!("receipt {}", hash)))?;

        Ok(ReceiptSummary {
            hash,
            success: receipt.status(),
            block_number: receipt.block_number,
            from: receipt.from,
            to: receipt.to,
            contract_address: receipt.contract_address,
            gas_used: receipt.gas_used,
        })
    }
}

/// Map a contract call error, decoding the revert reason when present
fn contract_error(err: alloy::contract::Error) -> ChainError {
    if let Some(data) = err.as_revert_data() {
        let reason = decode_revert_reason(&data).unwrap_or_default();
        return ChainError::Reverted {
            reason,
            data: Some(data.to_string()),
        };
    }
    ChainError::Transport(err.to_string())
}

/// Wait for the receipt and reject failed transactions
async fn confirm(pending: ChainResult<PendingTransactionBuilder<Ethereum>>) -> ChainResult<TxReceipt> {
    let pending = pending?;
    let hash = *pending.tx_hash();
    tracing::debug!(%hash, "awaiting receipt");

    let receipt: TransactionReceipt = pending
        .get_receipt()
        .await
        .map_err(|e| ChainError::Transport(e.to_string()))?;

    if !receipt.status() {
        tracing::warn!(%hash, "transaction reverted");
        return Err(ChainError::Reverted {
            reason: format!("Transaction {} reverted", hash),
            data: None,
        });
    }

    Ok(TxReceipt {
        hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}

/// Generates the shared ERC20 impl for a `sol!` instance wrapper
macro_rules! impl_erc20 {
    ($wrapper:ident) => {
        #[async_trait]
        impl Erc20 for $wrapper {
            fn address(&self) -> Address {
                *self.inner.address()
            }

            async fn name(&self) -> ChainResult<String> {
                self.inner.name().call().await.map_err(contract_error)
            }

            async fn symbol(&self) -> ChainResult<String> {
                self.inner.symbol().call().await.map_err(contract_error)
            }

            async fn decimals(&self) -> ChainResult<u8> {
                self.inner.decimals().call().await.map_err(contract_error)
            }

            async fn total_supply(&self) -> ChainResult<U256> {
                self.inner.totalSupply().call().await.map_err(contract_error)
            }

            async fn balance_of(&self, owner: Address) -> ChainResult<U256> {
                self.inner.balanceOf(owner).call().await.map_err(contract_error)
            }

            async fn allowance(&self, owner: Address, spender: Address) -> ChainResult<U256> {
                self.inner
                    .allowance(owner, spender)
                    .call()
                    .await
                    .map_err(contract_error)
            }

            async fn approve(
                &self,
                spender: Address,
                amount: U256,
                gas: GasLimit,
            ) -> ChainResult<TxReceipt> {
                let pending = self
                    .inner
                    .approve(spender, amount)
                    .gas(gas.get())
                    .send()
                    .await
                    .map_err(contract_error);
                confirm(pending).await
            }

            async fn transfer(
                &self,
                to: Address,
                amount: U256,
                gas: GasLimit,
            ) -> ChainResult<TxReceipt> {
                let pending = self
                    .inner
                    .transfer(to, amount)
                    .gas(gas.get())
                    .send()
                    .await
                    .map_err(contract_error);
                confirm(pending).await
            }

            async fn transfer_from(
                &self,
                from: Address,
                to: Address,
                amount: U256,
                gas: GasLimit,
            ) -> ChainResult<TxReceipt> {
                let pending = self
                    .inner
                    .transferFrom(from, to, amount)
                    .gas(gas.get())
                    .send()
                    .await
                    .map_err(contract_error);
                confirm(pending).await
            }
        }
    };
}

struct AlloyPool {
    inner: IUniswapV2Pair::IUniswapV2PairInstance<DynProvider>,
}

struct AlloyToken {
    inner: IFaucetToken::IFaucetTokenInstance<DynProvider>,
}

impl_erc20!(AlloyPool);
impl_erc20!(AlloyToken);

#[async_trait]
impl PoolContract for AlloyPool {
    async fn token0(&self) -> ChainResult<Address> {
        self.inner.token0().call().await.map_err(contract_error)
    }

    async fn token1(&self) -> ChainResult<Address> {
        self.inner.token1().call().await.map_err(contract_error)
    }

    async fn initialize(
        &self,
        token0: Address,
        token1: Address,
        fee_to: Address,
        gas: GasLimit,
    ) -> ChainResult<TxReceipt> {
        let pending = self
            .inner
            .initialize(token0, token1, fee_to)
            .gas(gas.get())
            .send()
            .await
            .map_err(contract_error);
        confirm(pending).await
    }

    async fn mint(&self, to: Address, gas: GasLimit) -> ChainResult<TxReceipt> {
        let pending = self
            .inner
            .mint(to)
            .gas(gas.get())
            .send()
            .await
            .map_err(contract_error);
        confirm(pending).await
    }

    async fn burn(&self, to: Address, gas: GasLimit) -> ChainResult<TxReceipt> {
        let pending = self
            .inner
            .burn(to)
            .gas(gas.get())
            .send()
            .await
            .map_err(contract_error);
        confirm(pending).await
    }

    async fn swap(
        &self,
        amount0_out: U256,
        amount1_out: U256,
        to: Address,
        data: Bytes,
        gas: GasLimit,
    ) -> ChainResult<TxReceipt> {
        let pending = self
            .inner
            .swap(amount0_out, amount1_out, to, data)
            .gas(gas.get())
            .send()
            .await
            .map_err(contract_error);
        confirm(pending).await
    }
}

#[async_trait]
impl TokenContract for AlloyToken {
    async fn mint(&self, to: Address, amount: U256, gas: GasLimit) -> ChainResult<TxReceipt> {
        let pending = self
            .inner
            .mint(to, amount)
            .gas(gas.get())
            .send()
            .await
            .map_err(contract_error);
        confirm(pending).await
    }
}
