//! In-memory chain for controller tests
//!
//! Contracts hold balances and allowances in maps and record every write so
//! tests can assert on what was submitted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use tokio::sync::Notify;

use crate::chain::{
    Chain, ChainError, ChainResult, Erc20, GasLimit, PoolContract, TokenContract, TxReceipt,
};
use crate::audit::ActivityLogger;
use crate::config::paths::WizardPaths;
use crate::config::Settings;
use crate::storage::Storage;

use super::wizard::WizardController;

pub const SIGNER: Address = Address::new([0xcc; 20]);
pub const POOL: Address = Address::new([0x99; 20]);
pub const TOKEN_A: Address = Address::new([0xaa; 20]);
pub const TOKEN_B: Address = Address::new([0xbb; 20]);

static NEXT_HASH: AtomicU64 = AtomicU64::new(1);

fn receipt() -> TxReceipt {
    TxReceipt {
        hash: B256::left_padding_from(&NEXT_HASH.fetch_add(1, Ordering::SeqCst).to_be_bytes()),
        block_number: Some(1),
        gas_used: 21_000,
    }
}

fn unreachable_node() -> ChainError {
    ChainError::Transport("connection refused".into())
}

/// Balances and allowances shared by the pool's LP token and dev tokens
pub struct Ledger {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    pub balances: Mutex<HashMap<Address, U256>>,
    pub allowances: Mutex<HashMap<(Address, Address), U256>>,
    /// Every write as `(function, gas)`
    pub calls: Mutex<Vec<(String, GasLimit)>>,
    /// Make every read fail
    pub fail_reads: AtomicBool,
    /// Revert the next write with this error
    pub revert_next: Mutex<Option<ChainError>>,
}

impl Ledger {
    fn new(address: Address, symbol: &str, decimals: u8) -> Self {
        Self {
            address,
            symbol: symbol.to_string(),
            decimals,
            balances: Mutex::new(HashMap::new()),
            allowances: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            revert_next: Mutex::new(None),
        }
    }

    pub fn set_balance(&self, owner: Address, amount: U256) {
        self.balances.lock().unwrap().insert(owner, amount);
    }

    pub fn set_allowance(&self, owner: Address, spender: Address, amount: U256) {
        self.allowances
            .lock()
            .unwrap()
            .insert((owner, spender), amount);
    }

    pub fn calls_named(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(call, _)| call == name)
            .count()
    }

    pub fn last_gas(&self) -> Option<GasLimit> {
        self.calls.lock().unwrap().last().map(|(_, gas)| *gas)
    }

    fn read<T>(&self, value: T) -> ChainResult<T> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(unreachable_node())
        } else {
            Ok(value)
        }
    }

    fn write(&self, name: &str, gas: GasLimit) -> ChainResult<TxReceipt> {
        if let Some(err) = self.revert_next.lock().unwrap().take() {
            return Err(err);
        }
        self.calls.lock().unwrap().push((name.to_string(), gas));
        Ok(receipt())
    }

    fn balance(&self, owner: Address) -> U256 {
        self.balances
            .lock()
            .unwrap()
            .get(&owner)
            .copied()
            .unwrap_or_default()
    }

    pub fn allowance_of(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .lock()
            .unwrap()
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }
}

macro_rules! ledger_erc20 {
    ($ty:ty) => {
        #[async_trait]
        impl Erc20 for $ty {
            fn address(&self) -> Address {
                self.ledger.address
            }

            async fn name(&self) -> ChainResult<String> {
                self.ledger.read(format!("{} Token", self.ledger.symbol))
            }

            async fn symbol(&self) -> ChainResult<String> {
                self.ledger.read(self.ledger.symbol.clone())
            }

            async fn decimals(&self) -> ChainResult<u8> {
                self.ledger.read(self.ledger.decimals)
            }

            async fn total_supply(&self) -> ChainResult<U256> {
                let total = self
                    .ledger
                    .balances
                    .lock()
                    .unwrap()
                    .values()
                    .fold(U256::ZERO, |acc, b| acc.saturating_add(*b));
                self.ledger.read(total)
            }

            async fn balance_of(&self, owner: Address) -> ChainResult<U256> {
                self.ledger.read(self.ledger.balance(owner))
            }

            async fn allowance(&self, owner: Address, spender: Address) -> ChainResult<U256> {
                self.ledger.read(self.ledger.allowance_of(owner, spender))
            }

            async fn approve(
                &self,
                spender: Address,
                amount: U256,
                gas: GasLimit,
            ) -> ChainResult<TxReceipt> {
                self.before_approve().await;
                let receipt = self.ledger.write("approve", gas)?;
                self.ledger.set_allowance(SIGNER, spender, amount);
                Ok(receipt)
            }

            async fn transfer(
                &self,
                to: Address,
                amount: U256,
                gas: GasLimit,
            ) -> ChainResult<TxReceipt> {
                let receipt = self.ledger.write("transfer", gas)?;
                let mut balances = self.ledger.balances.lock().unwrap();
                let from = balances.entry(SIGNER).or_default();
                *from = from.saturating_sub(amount);
                *balances.entry(to).or_default() += amount;
                Ok(receipt)
            }

            async fn transfer_from(
                &self,
                from: Address,
                to: Address,
                amount: U256,
                gas: GasLimit,
            ) -> ChainResult<TxReceipt> {
                let receipt = self.ledger.write("transferFrom", gas)?;
                let mut balances = self.ledger.balances.lock().unwrap();
                let source = balances.entry(from).or_default();
                *source = source.saturating_sub(amount);
                *balances.entry(to).or_default() += amount;
                Ok(receipt)
            }
        }
    };
}

/// A dev token
pub struct MockToken {
    pub ledger: Ledger,
    /// Reject the typed faucet `mint`
    pub reject_typed_mint: AtomicBool,
    /// Hold `approve` until [`MockToken::release_approve`]
    pub gate_approve: AtomicBool,
    gate: Notify,
}

impl MockToken {
    pub fn new(address: Address, symbol: &str, decimals: u8) -> Self {
        Self {
            ledger: Ledger::new(address, symbol, decimals),
            reject_typed_mint: AtomicBool::new(false),
            gate_approve: AtomicBool::new(false),
            gate: Notify::new(),
        }
    }

    pub fn release_approve(&self) {
        self.gate.notify_one();
    }

    async fn before_approve(&self) {
        if self.gate_approve.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
    }
}

ledger_erc20!(MockToken);

#[async_trait]
impl TokenContract for MockToken {
    async fn mint(&self, to: Address, amount: U256, gas: GasLimit) -> ChainResult<TxReceipt> {
        if self.reject_typed_mint.load(Ordering::SeqCst) {
            return Err(ChainError::Reverted {
                reason: String::new(),
                data: None,
            });
        }
        let receipt = self.ledger.write("mint", gas)?;
        *self.ledger.balances.lock().unwrap().entry(to).or_default() += amount;
        Ok(receipt)
    }
}

/// The pair contract
pub struct MockPool {
    pub ledger: Ledger,
    pub token0: Mutex<Address>,
    pub token1: Mutex<Address>,
    pub fail_token_reads: AtomicBool,
    /// Recipients of `mint`, in order
    pub mint_recipients: Mutex<Vec<Address>>,
    /// Submitted swaps as `(amount0_out, amount1_out, to)`
    pub swaps: Mutex<Vec<(U256, U256, Address)>>,
}

impl MockPool {
    fn new() -> Self {
        Self {
            ledger: Ledger::new(POOL, "UNI-V2", 18),
            token0: Mutex::new(Address::ZERO),
            token1: Mutex::new(Address::ZERO),
            fail_token_reads: AtomicBool::new(false),
            mint_recipients: Mutex::new(Vec::new()),
            swaps: Mutex::new(Vec::new()),
        }
    }

    pub fn set_tokens(&self, token0: Address, token1: Address) {
        *self.token0.lock().unwrap() = token0;
        *self.token1.lock().unwrap() = token1;
    }

    async fn before_approve(&self) {}

    fn pair_read(&self, slot: &Mutex<Address>) -> ChainResult<Address> {
        if self.fail_token_reads.load(Ordering::SeqCst) {
            Err(unreachable_node())
        } else {
            Ok(*slot.lock().unwrap())
        }
    }
}

ledger_erc20!(MockPool);

#[async_trait]
impl PoolContract for MockPool {
    async fn token0(&self) -> ChainResult<Address> {
        self.pair_read(&self.token0)
    }

    async fn token1(&self) -> ChainResult<Address> {
        self.pair_read(&self.token1)
    }

    async fn initialize(
        &self,
        token0: Address,
        token1: Address,
        _fee_to: Address,
        gas: GasLimit,
    ) -> ChainResult<TxReceipt> {
        let receipt = self.ledger.write("initialize", gas)?;
        self.set_tokens(token0, token1);
        Ok(receipt)
    }

    async fn mint(&self, to: Address, gas: GasLimit) -> ChainResult<TxReceipt> {
        let receipt = self.ledger.write("mint", gas)?;
        self.mint_recipients.lock().unwrap().push(to);
        *self.ledger.balances.lock().unwrap().entry(to).or_default() +=
            U256::from(10u64).pow(U256::from(18u64));
        Ok(receipt)
    }

    async fn burn(&self, to: Address, gas: GasLimit) -> ChainResult<TxReceipt> {
        let receipt = self.ledger.write("burn", gas)?;
        self.ledger.balances.lock().unwrap().remove(&to);
        Ok(receipt)
    }

    async fn swap(
        &self,
        amount0_out: U256,
        amount1_out: U256,
        to: Address,
        _data: Bytes,
        gas: GasLimit,
    ) -> ChainResult<TxReceipt> {
        let receipt = self.ledger.write("swap", gas)?;
        self.swaps.lock().unwrap().push((amount0_out, amount1_out, to));
        Ok(receipt)
    }
}

/// A node with one signer, one pool and any number of tokens
pub struct MockChain {
    pub pool: Arc<MockPool>,
    tokens: Mutex<HashMap<Address, Arc<MockToken>>>,
    /// Raw transactions as `(to, calldata)`
    pub raw_sends: Mutex<Vec<(Address, Bytes)>>,
}

impl MockChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pool: Arc::new(MockPool::new()),
            tokens: Mutex::new(HashMap::new()),
            raw_sends: Mutex::new(Vec::new()),
        })
    }

    /// A pool already initialized with two 18-decimal tokens
    pub fn with_pair() -> Arc<Self> {
        let chain = Self::new();
        chain.add_token(MockToken::new(TOKEN_A, "TKA", 18));
        chain.add_token(MockToken::new(TOKEN_B, "TKB", 18));
        chain.pool.set_tokens(TOKEN_A, TOKEN_B);
        chain
    }

    pub fn add_token(&self, token: MockToken) -> Arc<MockToken> {
        let token = Arc::new(token);
        self.tokens
            .lock()
            .unwrap()
            .insert(token.ledger.address, Arc::clone(&token));
        token
    }

    pub fn mock_token(&self, address: Address) -> Arc<MockToken> {
        Arc::clone(
            self.tokens
                .lock()
                .unwrap()
                .entry(address)
                .or_insert_with(|| Arc::new(MockToken::new(address, "TKN", 18))),
        )
    }
}

#[async_trait]
impl Chain for MockChain {
    fn signer(&self) -> Address {
        SIGNER
    }

    fn pool(&self) -> Arc<dyn PoolContract> {
        self.pool.clone()
    }

    fn token(&self, address: Address) -> Arc<dyn TokenContract> {
        self.mock_token(address)
    }

    async fn send_raw(&self, to: Address, data: Bytes, _gas: GasLimit) -> ChainResult<TxReceipt> {
        self.raw_sends.lock().unwrap().push((to, data));
        Ok(receipt())
    }
}

/// A controller over `chain` storing its files in a temp dir
pub fn controller(chain: Arc<MockChain>) -> (tempfile::TempDir, WizardController) {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let paths = WizardPaths::with_base_dir(temp_dir.path().to_path_buf());
    let controller = controller_at(&paths, chain);
    (temp_dir, controller)
}

/// A controller over `chain` using existing paths
pub fn controller_at(paths: &WizardPaths, chain: Arc<MockChain>) -> WizardController {
    let storage = Storage::open(paths.clone()).unwrap();
    let activity = ActivityLogger::new(paths.activity_log());
    WizardController::new(chain, storage, activity, &Settings::default())
}
