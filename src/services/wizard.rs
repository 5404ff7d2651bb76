//! Setup wizard controller
//!
//! Drives the three-step "initialize -> approve -> mint" flow against the
//! pair contract, keeps a persisted cache of progress, and reconciles that
//! cache with what the contract reports. The contract is authoritative:
//! every read that completes overwrites the local belief.
//!
//! Operations never fail on chain errors. Failures become an error outcome
//! (and a debug payload where one exists); only local storage failures are
//! returned to the caller.

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy::primitives::{Address, Bytes, U256};
use futures_util::future::join;
use tracing::{debug, info, warn};

use super::inspect;
use crate::audit::{ActivityEntry, ActivityLogger};
use crate::chain::calldata::faucet_mint_calldata;
use crate::chain::{Chain, ChainError, ChainResult, GasLimit, PoolContract, TokenContract};
use crate::config::{parse_address, Settings};
use crate::error::{WizardError, WizardResult};
use crate::models::forms::{AllowanceCheckForm, BalanceCheckForm, InitializeForm};
use crate::models::{
    ContractInfo, DebugInfo, DeployedTokens, FieldReading, FormsState, InspectionResults,
    Operation, StepsCompleted, TokenAmount, TransactionOutcome, WizardState, WizardStep,
    LP_DECIMALS,
};
use crate::storage::Storage;

/// Symbol shown for the LP token when the pool will not report one
const LP_FALLBACK_SYMBOL: &str = "LP";

/// Everything a front-end renders
#[derive(Debug, Clone)]
pub struct WizardView {
    pub state: WizardState,
    pub outcome: TransactionOutcome,
    pub debug: DebugInfo,
    pub forms: FormsState,
    pub inspection: InspectionResults,
    pub contract_info: ContractInfo,
    pub signer: Address,
    pub pool: Address,
}

/// Owner of all wizard state
pub struct WizardController {
    chain: Arc<dyn Chain>,
    storage: Storage,
    activity: ActivityLogger,
    gas: GasLimit,
    default_approve_amount: String,
    error_clear_delay: Duration,

    state: WizardState,
    outcome: TransactionOutcome,
    debug: DebugInfo,
    forms: FormsState,
    inspection: InspectionResults,
    contract_info: ContractInfo,
}

impl WizardController {
    /// Create a controller; call [`WizardController::start`] before use
    pub fn new(
        chain: Arc<dyn Chain>,
        storage: Storage,
        activity: ActivityLogger,
        settings: &Settings,
    ) -> Self {
        Self {
            chain,
            storage,
            activity,
            gas: settings.gas_limit(),
            default_approve_amount: settings.default_approve_amount.clone(),
            error_clear_delay: settings.error_clear_delay(),
            state: WizardState::default(),
            outcome: TransactionOutcome::none(),
            debug: DebugInfo::default(),
            forms: FormsState::default(),
            inspection: InspectionResults::default(),
            contract_info: ContractInfo::default(),
        }
    }

    /// Override how long error outcomes stay visible
    pub fn with_error_clear_delay(mut self, delay: Duration) -> Self {
        self.error_clear_delay = delay;
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn outcome(&self) -> &TransactionOutcome {
        &self.outcome
    }

    pub fn debug_info(&self) -> &DebugInfo {
        &self.debug
    }

    pub fn forms(&self) -> &FormsState {
        &self.forms
    }

    /// Replace the form inputs
    pub fn set_forms(&mut self, forms: FormsState) {
        self.forms = forms;
    }

    pub fn inspection(&self) -> &InspectionResults {
        &self.inspection
    }

    pub fn contract_info(&self) -> &ContractInfo {
        &self.contract_info
    }

    pub fn error_clear_delay(&self) -> Duration {
        self.error_clear_delay
    }

    /// Snapshot for rendering
    pub fn view(&self) -> WizardView {
        WizardView {
            state: self.state.clone(),
            outcome: self.outcome.clone(),
            debug: self.debug.clone(),
            forms: self.forms.clone(),
            inspection: self.inspection.clone(),
            contract_info: self.contract_info.clone(),
            signer: self.chain.signer(),
            pool: self.chain.pool().address(),
        }
    }

    // ---- lifecycle ----

    /// Load persisted progress and reconcile it with the contract
    pub async fn start(&mut self) -> WizardResult<()> {
        self.state = self.storage.wizard.load()?;
        info!(
            step = %self.state.current_step,
            pool_initialized = self.state.pool_initialized,
            "loaded wizard state"
        );

        self.forms.initialize.token0 = self.state.deployed_tokens.token0.clone();
        self.forms.initialize.token1 = self.state.deployed_tokens.token1.clone();
        self.forms.mint.to = self.chain.signer().to_string();

        self.reconcile().await?;
        self.fetch_contract_info().await?;

        if self.state.deployed_tokens.both_known() {
            self.check_token_balances_and_allowances().await?;
        }
        Ok(())
    }

    /// Bring local progress in line with the contract
    ///
    /// Non-zero token0/token1 completes step 1; a non-zero allowance from the
    /// signer to the pool on either token completes step 2; a non-zero LP
    /// balance completes step 3. The current step is raised to each observed
    /// step but never past it.
    pub async fn reconcile(&mut self) -> WizardResult<()> {
        let pool = self.chain.pool();
        let (token0, token1) = join(pool.token0(), pool.token1()).await;

        match (token0, token1) {
            (Ok(token0), Ok(token1)) if !token0.is_zero() && !token1.is_zero() => {
                info!(%token0, %token1, "pool reports a token pair");
                self.state.pool_initialized = true;
                self.state.observe_step(WizardStep::Initialize);
                self.state.deployed_tokens =
                    DeployedTokens::new(token0.to_string(), token1.to_string());
                self.forms.initialize.token0 = token0.to_string();
                self.forms.initialize.token1 = token1.to_string();

                let signer = self.chain.signer();
                let spender = pool.address();
                let first = self.chain.token(token0);
                let second = self.chain.token(token1);
                let (allowance0, allowance1, lp_balance) = tokio::join!(
                    first.allowance(signer, spender),
                    second.allowance(signer, spender),
                    pool.balance_of(signer),
                );

                if is_positive(&allowance0) || is_positive(&allowance1) {
                    self.state.observe_step(WizardStep::Approve);
                }
                if is_positive(&lp_balance) {
                    self.state.observe_step(WizardStep::Mint);
                }
                for err in [allowance0.err(), allowance1.err(), lp_balance.err()]
                    .into_iter()
                    .flatten()
                {
                    warn!(error = %err, "progress read failed during reconciliation");
                }
            }
            (Ok(_), Ok(_)) => {
                info!("pool not initialized (token0 or token1 is zero)");
                self.mark_uninitialized();
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "could not read the pool's token pair");
                self.mark_uninitialized();
            }
        }

        self.persist()
    }

    /// Steps 2 and 3 depend on step 1, so no completion survives
    fn mark_uninitialized(&mut self) {
        self.state.pool_initialized = false;
        self.state.current_step = WizardStep::Initialize;
        self.state.steps_completed = StepsCompleted::default();
    }

    /// Read the pool's name, symbol, decimals and supply
    pub async fn fetch_contract_info(&mut self) -> WizardResult<()> {
        if let Err(err) = self.refresh_contract_info().await {
            warn!(error = %err, "contract info read failed");
            self.outcome = TransactionOutcome::error(None, "Error fetching contract info");
            self.record(Some(err.payload()));
        }
        Ok(())
    }

    async fn refresh_contract_info(&mut self) -> ChainResult<()> {
        let pool = self.chain.pool();
        let (name, symbol, decimals, total_supply) = tokio::join!(
            pool.name(),
            pool.symbol(),
            pool.decimals(),
            pool.total_supply(),
        );

        self.contract_info = ContractInfo {
            name: name?,
            symbol: symbol?,
            decimals: decimals?.to_string(),
            total_supply: TokenAmount::lp(total_supply?).to_string(),
            address: pool.address().to_string(),
        };
        Ok(())
    }

    /// Refresh the debug panel for the stored token pair
    ///
    /// Each field degrades on its own: a failed read shows "Error fetching"
    /// while the rest still update. On an initialized pool, completion flags
    /// for steps 2 and 3 are set when the thresholds are met; the current
    /// step is left alone.
    pub async fn check_token_balances_and_allowances(&mut self) -> WizardResult<()> {
        let tokens = &self.state.deployed_tokens;
        if !tokens.both_known() {
            debug!("token pair unknown, skipping balance refresh");
            return Ok(());
        }
        let (token0, token1) = match (
            Address::from_str(tokens.token0.trim()),
            Address::from_str(tokens.token1.trim()),
        ) {
            (Ok(a), Ok(b)) => (a, b),
            _ => {
                self.debug.last_error =
                    "Error checking balances: stored token addresses are invalid".to_string();
                return Ok(());
            }
        };

        let signer = self.chain.signer();
        let pool = self.chain.pool();
        let first = self.chain.token(token0);
        let second = self.chain.token(token1);
        let (first, second, lp) = tokio::join!(
            read_token(first.as_ref(), signer, pool.address()),
            read_token(second.as_ref(), signer, pool.address()),
            read_lp(pool.as_ref(), signer),
        );

        self.debug.token0_balance = first.balance;
        self.debug.token0_allowance = first.allowance;
        self.debug.token1_balance = second.balance;
        self.debug.token1_allowance = second.allowance;
        self.debug.lp_token_balance = lp.reading;
        self.debug.raw_lp_balance = lp
            .raw
            .map(|raw| raw.to_string())
            .unwrap_or_else(|| "0".to_string());

        let failure = [first.error, second.error, lp.error].into_iter().flatten().next();
        self.debug.last_error = match failure {
            Some(err) => {
                warn!(error = %err, "balance refresh degraded");
                format!("Error checking balances: {}", err)
            }
            None => String::new(),
        };

        // Steps 2 and 3 only count on an initialized pool
        if !self.state.pool_initialized {
            return Ok(());
        }
        let mut changed = false;
        if first.allowance_raw.is_some_and(|a| !a.is_zero())
            || second.allowance_raw.is_some_and(|a| !a.is_zero())
        {
            changed |= self.state.steps_completed.mark(WizardStep::Approve);
        }
        if lp.raw.is_some_and(|b| !b.is_zero()) {
            changed |= self.state.steps_completed.mark(WizardStep::Mint);
        }
        if changed {
            info!("balance refresh completed further steps");
            self.persist()?;
        }
        Ok(())
    }

    // ---- wizard steps ----

    /// Step 1: set the pool's token pair
    ///
    /// The typed addresses are remembered before submitting so a failed
    /// attempt does not lose them.
    pub async fn initialize(
        &mut self,
        token0: &str,
        token1: &str,
        fee_to: &str,
        gas: Option<u64>,
    ) -> WizardResult<()> {
        self.begin(Operation::Initialize);
        let result = self.run_initialize(token0, token1, fee_to, gas).await;
        self.settle(Operation::Initialize, result)
    }

    async fn run_initialize(
        &mut self,
        token0: &str,
        token1: &str,
        fee_to: &str,
        gas: Option<u64>,
    ) -> WizardResult<String> {
        self.forms.initialize = InitializeForm {
            token0: token0.trim().to_string(),
            token1: token1.trim().to_string(),
            fee_to: fee_to.trim().to_string(),
        };
        let first = parse_address(token0, "token0")?;
        let second = parse_address(token1, "token1")?;
        let fee_to = optional_address(fee_to, "feeTo")?.unwrap_or(Address::ZERO);

        self.state.deployed_tokens = DeployedTokens::new(token0.trim(), token1.trim());
        self.persist()?;

        let receipt = self
            .chain
            .pool()
            .initialize(first, second, fee_to, self.gas_for(gas))
            .await
            .map_err(|e| WizardError::transaction(&e))?;
        info!(tx = %receipt.hash, "pool initialized");

        self.state.complete_step(WizardStep::Initialize);
        self.state.pool_initialized = true;
        self.persist()?;

        self.refresh_contract_info_quietly().await;
        Ok("Pool initialized successfully!".to_string())
    }

    /// Step 2: approve the pool to spend `amount` of `token`
    ///
    /// A blank amount uses the configured default. The amount is scaled
    /// with the token's own decimals.
    pub async fn approve_token(
        &mut self,
        token: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<()> {
        self.begin(Operation::ApproveToken);
        let result = self.run_approve_token(token, amount, gas).await;
        self.settle(Operation::ApproveToken, result)
    }

    async fn run_approve_token(
        &mut self,
        token: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<String> {
        let token_address = parse_address(token, "token address").map_err(|_| {
            WizardError::Validation("Please provide valid token and spender addresses".into())
        })?;
        let amount_text = match amount.trim() {
            "" => self.default_approve_amount.clone(),
            typed => typed.to_string(),
        };

        let token = self.chain.token(token_address);
        let decimals = token
            .decimals()
            .await
            .map_err(|e| WizardError::transaction(&e))?;
        let scaled = parse_amount(&amount_text, decimals)?;
        let spender = self.chain.pool().address();

        info!(token = %token_address, %spender, amount = %scaled.raw(), "approving pool");
        token
            .approve(spender, scaled.raw(), self.gas_for(gas))
            .await
            .map_err(|e| WizardError::transaction(&e))?;

        self.state.complete_step(WizardStep::Approve);
        self.persist()?;
        self.check_token_balances_and_allowances().await?;

        Ok(format!("Successfully approved {} tokens!", amount_text))
    }

    /// Step 3: mint LP tokens
    ///
    /// Fails fast when the pool has no token pair. A blank recipient becomes
    /// the signer, and the mint form is updated to show it.
    pub async fn mint(&mut self, recipient: &str, gas: Option<u64>) -> WizardResult<()> {
        self.begin(Operation::Mint);
        let result = self.run_mint(recipient, gas).await;
        self.settle(Operation::Mint, result)
    }

    async fn run_mint(&mut self, recipient: &str, gas: Option<u64>) -> WizardResult<String> {
        let pool = self.chain.pool();
        ensure_pair(pool.as_ref()).await?;

        self.check_token_balances_and_allowances().await?;

        let to = match optional_address(recipient, "recipient")? {
            Some(to) => to,
            None => {
                let signer = self.chain.signer();
                debug!(%signer, "defaulting LP recipient to the signer");
                signer
            }
        };
        self.forms.mint.to = to.to_string();

        let receipt = pool
            .mint(to, self.gas_for(gas))
            .await
            .map_err(|e| WizardError::transaction(&e))?;
        info!(tx = %receipt.hash, %to, "liquidity minted");

        self.state.complete_step(WizardStep::Mint);
        self.persist()?;
        self.check_token_balances_and_allowances().await?;
        self.refresh_contract_info_quietly().await;

        Ok("Liquidity minted successfully!".to_string())
    }

    // ---- dev faucet ----

    /// Mint test tokens to the signer
    ///
    /// Tries the token's typed `mint(to, amount)` first and falls back to
    /// hand-built calldata when the token rejects it.
    pub async fn faucet_mint(
        &mut self,
        token: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<()> {
        self.begin(Operation::FaucetMint);
        let result = self.run_faucet_mint(token, amount, gas).await;
        self.settle(Operation::FaucetMint, result)
    }

    async fn run_faucet_mint(
        &mut self,
        token: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<String> {
        let token_address = parse_address(token, "token address")
            .map_err(|_| WizardError::Validation("Please provide a valid token address".into()))?;
        let amount_text = amount.trim();
        if amount_text.is_empty() {
            return Err(WizardError::Validation("Please provide an amount to mint".into()));
        }

        let token = self.chain.token(token_address);
        let decimals = token
            .decimals()
            .await
            .map_err(|e| WizardError::transaction(&e))?;
        let scaled = parse_amount(amount_text, decimals)?;
        let signer = self.chain.signer();
        let gas = self.gas_for(gas);

        match token.mint(signer, scaled.raw(), gas).await {
            Ok(receipt) => info!(tx = %receipt.hash, "faucet mint confirmed"),
            Err(err) => {
                warn!(error = %err, "typed faucet mint rejected, sending raw calldata");
                let data = faucet_mint_calldata(signer, scaled.raw());
                let receipt = self
                    .chain
                    .send_raw(token_address, data, gas)
                    .await
                    .map_err(|e| WizardError::transaction(&e))?;
                info!(tx = %receipt.hash, "fallback faucet mint confirmed");
            }
        }

        self.check_token_balances_and_allowances().await?;
        Ok(format!("Successfully minted {} tokens!", amount_text))
    }

    // ---- pool pass-through ----

    /// Burn the pool's own LP balance, paying out to `to` (blank: signer)
    pub async fn burn(&mut self, to: &str, gas: Option<u64>) -> WizardResult<()> {
        self.begin(Operation::Burn);
        let result = self.run_burn(to, gas).await;
        self.settle(Operation::Burn, result)
    }

    async fn run_burn(&mut self, to: &str, gas: Option<u64>) -> WizardResult<String> {
        let to = optional_address(to, "recipient")?.unwrap_or_else(|| self.chain.signer());
        self.forms.burn.to = to.to_string();

        self.chain
            .pool()
            .burn(to, self.gas_for(gas))
            .await
            .map_err(|e| WizardError::transaction(&e))?;

        self.after_pool_write().await?;
        Ok("Liquidity burned successfully!".to_string())
    }

    /// Swap out of the pool; amounts use token0/token1 decimals
    pub async fn swap(
        &mut self,
        amount0_out: &str,
        amount1_out: &str,
        to: &str,
        data: &str,
        gas: Option<u64>,
    ) -> WizardResult<()> {
        self.begin(Operation::Swap);
        let result = self
            .run_swap(amount0_out, amount1_out, to, data, gas)
            .await;
        self.settle(Operation::Swap, result)
    }

    async fn run_swap(
        &mut self,
        amount0_out: &str,
        amount1_out: &str,
        to: &str,
        data: &str,
        gas: Option<u64>,
    ) -> WizardResult<String> {
        let to = optional_address(to, "recipient")?.unwrap_or_else(|| self.chain.signer());
        let data = match data.trim() {
            "" => Bytes::new(),
            hex => Bytes::from_str(hex).map_err(|e| {
                WizardError::Validation(format!("Invalid swap data '{}': {}", hex, e))
            })?,
        };

        let pool = self.chain.pool();
        let (token0, token1) = ensure_pair(pool.as_ref()).await?;
        let (decimals0, decimals1) = join(
            self.chain.token(token0).decimals(),
            self.chain.token(token1).decimals(),
        )
        .await;
        let decimals0 = decimals0.map_err(|e| WizardError::transaction(&e))?;
        let decimals1 = decimals1.map_err(|e| WizardError::transaction(&e))?;
        let amount0 = parse_optional_amount(amount0_out, decimals0)?;
        let amount1 = parse_optional_amount(amount1_out, decimals1)?;

        pool.swap(amount0, amount1, to, data, self.gas_for(gas))
            .await
            .map_err(|e| WizardError::transaction(&e))?;

        self.after_pool_write().await?;
        Ok("Swap executed successfully!".to_string())
    }

    /// Transfer LP tokens from the signer
    pub async fn transfer(
        &mut self,
        to: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<()> {
        self.begin(Operation::Transfer);
        let result = self.run_transfer(to, amount, gas).await;
        self.settle(Operation::Transfer, result)
    }

    async fn run_transfer(
        &mut self,
        to: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<String> {
        let to = parse_address(to, "recipient")?;
        let amount = parse_amount(amount, LP_DECIMALS)?;

        self.chain
            .pool()
            .transfer(to, amount.raw(), self.gas_for(gas))
            .await
            .map_err(|e| WizardError::transaction(&e))?;

        self.after_pool_write().await?;
        Ok("Transfer completed successfully!".to_string())
    }

    /// Let `spender` move the signer's LP tokens
    pub async fn approve(
        &mut self,
        spender: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<()> {
        self.begin(Operation::Approve);
        let result = self.run_approve(spender, amount, gas).await;
        self.settle(Operation::Approve, result)
    }

    async fn run_approve(
        &mut self,
        spender: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<String> {
        let spender = parse_address(spender, "spender")?;
        let amount = parse_amount(amount, LP_DECIMALS)?;

        self.chain
            .pool()
            .approve(spender, amount.raw(), self.gas_for(gas))
            .await
            .map_err(|e| WizardError::transaction(&e))?;

        self.refresh_contract_info_quietly().await;
        Ok("Approval granted successfully!".to_string())
    }

    /// Move LP tokens between two accounts using an allowance
    pub async fn transfer_from(
        &mut self,
        from: &str,
        to: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<()> {
        self.begin(Operation::TransferFrom);
        let result = self.run_transfer_from(from, to, amount, gas).await;
        self.settle(Operation::TransferFrom, result)
    }

    async fn run_transfer_from(
        &mut self,
        from: &str,
        to: &str,
        amount: &str,
        gas: Option<u64>,
    ) -> WizardResult<String> {
        let from = parse_address(from, "owner")?;
        let to = parse_address(to, "recipient")?;
        let amount = parse_amount(amount, LP_DECIMALS)?;

        self.chain
            .pool()
            .transfer_from(from, to, amount.raw(), self.gas_for(gas))
            .await
            .map_err(|e| WizardError::transaction(&e))?;

        self.after_pool_write().await?;
        Ok("TransferFrom completed successfully!".to_string())
    }

    async fn after_pool_write(&mut self) -> WizardResult<()> {
        self.check_token_balances_and_allowances().await?;
        self.refresh_contract_info_quietly().await;
        Ok(())
    }

    // ---- ad-hoc inspection ----

    /// Read any account's balance of any token
    pub async fn check_balance(&mut self, address: &str, token: &str) -> WizardResult<()> {
        self.forms.balance_check = BalanceCheckForm {
            address: address.trim().to_string(),
            token_address: token.trim().to_string(),
        };
        self.begin(Operation::BalanceCheck);
        let result = inspect::check_balance(self.chain.as_ref(), address, token).await;
        let result = result.map(|reading| {
            self.inspection.balance = reading;
            "Balance checked successfully!".to_string()
        });
        self.settle(Operation::BalanceCheck, result)
    }

    /// Read any owner's allowance to any spender on any token
    pub async fn check_allowance(
        &mut self,
        owner: &str,
        spender: &str,
        token: &str,
    ) -> WizardResult<()> {
        self.forms.allowance_check = AllowanceCheckForm {
            owner: owner.trim().to_string(),
            spender: spender.trim().to_string(),
            token_address: token.trim().to_string(),
        };
        self.begin(Operation::AllowanceCheck);
        let result = inspect::check_allowance(self.chain.as_ref(), owner, spender, token).await;
        let result = result.map(|reading| {
            self.inspection.allowance = reading;
            "Allowance checked successfully!".to_string()
        });
        self.settle(Operation::AllowanceCheck, result)
    }

    // ---- navigation ----

    /// Go back to an earlier step; returns false if `step` is not earlier
    pub fn go_to_step(&mut self, step: WizardStep) -> WizardResult<bool> {
        if step >= self.state.current_step {
            debug!(%step, current = %self.state.current_step, "ignoring forward jump");
            return Ok(false);
        }
        self.state.current_step = step;
        self.persist()?;
        Ok(true)
    }

    /// Continue to the next step once the current one is complete
    pub fn advance(&mut self) -> WizardResult<bool> {
        let current = self.state.current_step;
        let next = match current.next() {
            Some(next) if self.state.steps_completed.is_complete(current) => next,
            _ => return Ok(false),
        };
        self.state.current_step = next;
        self.persist()?;
        Ok(true)
    }

    /// Forget all progress; the next reconcile rebuilds it from the chain
    pub fn reset(&mut self) -> WizardResult<()> {
        self.storage.wizard.clear()?;
        self.state = WizardState::default();
        self.debug = DebugInfo::default();
        self.outcome = TransactionOutcome::none();
        self.forms.initialize = InitializeForm::default();
        info!("wizard progress reset");
        Ok(())
    }

    /// Clear an error outcome that has been visible long enough
    pub fn expire_outcome(&mut self, now: Instant) -> bool {
        self.outcome.clear_if_expired(now, self.error_clear_delay)
    }

    // ---- internals ----

    /// Show the pending banner for `operation`
    pub fn begin(&mut self, operation: Operation) {
        debug!(%operation, "operation started");
        self.outcome = TransactionOutcome::pending(operation);
    }

    fn settle(&mut self, operation: Operation, result: WizardResult<String>) -> WizardResult<()> {
        match result {
            Ok(message) => {
                info!(%operation, %message, "operation succeeded");
                self.outcome = TransactionOutcome::success(Some(operation), message);
                self.record(None);
                Ok(())
            }
            Err(err) => {
                warn!(%operation, error = %err, "operation failed");
                let detail = err.debug_detail();
                if let Some(detail) = &detail {
                    self.debug.last_error = detail.clone();
                }
                self.outcome = TransactionOutcome::error(Some(operation), err.banner());
                self.record(detail);
                if err.is_storage() {
                    Err(err)
                } else {
                    Ok(())
                }
            }
        }
    }

    fn record(&self, payload: Option<String>) {
        let entry = ActivityEntry::from_outcome(&self.outcome, payload);
        if let Err(err) = self.activity.log(&entry) {
            warn!(error = %err, "could not append to the activity log");
        }
    }

    fn persist(&self) -> WizardResult<()> {
        self.storage.wizard.save(&self.state)
    }

    fn gas_for(&self, requested: Option<u64>) -> GasLimit {
        GasLimit::resolve(requested, self.gas)
    }

    async fn refresh_contract_info_quietly(&mut self) {
        if let Err(err) = self.refresh_contract_info().await {
            warn!(error = %err, "contract info refresh failed");
        }
    }
}

/// Formatted readings for one token of the pair
struct TokenSnapshot {
    balance: FieldReading,
    allowance: FieldReading,
    allowance_raw: Option<U256>,
    error: Option<ChainError>,
}

async fn read_token(token: &dyn TokenContract, owner: Address, spender: Address) -> TokenSnapshot {
    let (balance, allowance, decimals, symbol) = tokio::join!(
        token.balance_of(owner),
        token.allowance(owner, spender),
        token.decimals(),
        token.symbol(),
    );

    let error = [
        balance.as_ref().err(),
        allowance.as_ref().err(),
        decimals.as_ref().err(),
        symbol.as_ref().err(),
    ]
    .into_iter()
    .flatten()
    .next()
    .cloned();

    let meta = match (decimals, symbol) {
        (Ok(decimals), Ok(symbol)) => Some((decimals, symbol)),
        _ => None,
    };

    TokenSnapshot {
        balance: format_reading(&balance, meta.as_ref()),
        allowance: format_reading(&allowance, meta.as_ref()),
        allowance_raw: allowance.ok(),
        error,
    }
}

fn format_reading(raw: &ChainResult<U256>, meta: Option<&(u8, String)>) -> FieldReading {
    match (raw, meta) {
        (Ok(raw), Some((decimals, symbol))) => {
            FieldReading::Value(TokenAmount::from_raw(*raw, *decimals).format_with_symbol(symbol))
        }
        _ => FieldReading::ErrorFetching,
    }
}

/// The signer's LP position
struct LpSnapshot {
    reading: FieldReading,
    raw: Option<U256>,
    error: Option<ChainError>,
}

async fn read_lp(pool: &dyn PoolContract, owner: Address) -> LpSnapshot {
    let (balance, symbol) = join(pool.balance_of(owner), pool.symbol()).await;
    let symbol = symbol.unwrap_or_else(|err| {
        debug!(error = %err, "pool symbol unavailable");
        LP_FALLBACK_SYMBOL.to_string()
    });

    match balance {
        Ok(raw) => LpSnapshot {
            reading: FieldReading::Value(TokenAmount::lp(raw).format_with_symbol(&symbol)),
            raw: Some(raw),
            error: None,
        },
        Err(err) => LpSnapshot {
            reading: FieldReading::ErrorFetching,
            raw: None,
            error: Some(err),
        },
    }
}

/// The pool's token pair, or `PoolNotInitialized`
async fn ensure_pair(pool: &dyn PoolContract) -> WizardResult<(Address, Address)> {
    match join(pool.token0(), pool.token1()).await {
        (Ok(token0), Ok(token1)) if !token0.is_zero() && !token1.is_zero() => Ok((token0, token1)),
        (Err(err), _) | (_, Err(err)) => Err(WizardError::PoolNotInitialized {
            detail: err.to_string(),
        }),
        _ => Err(WizardError::PoolNotInitialized {
            detail: "token0 or token1 is the zero address".to_string(),
        }),
    }
}

fn is_positive(reading: &ChainResult<U256>) -> bool {
    matches!(reading, Ok(value) if !value.is_zero())
}

fn optional_address(input: &str, field: &str) -> WizardResult<Option<Address>> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_address(input, field).map(Some)
    }
}

fn parse_amount(input: &str, decimals: u8) -> WizardResult<TokenAmount> {
    TokenAmount::parse(input, decimals)
        .map_err(|e| WizardError::Validation(format!("Invalid amount '{}': {}", input.trim(), e)))
}

fn parse_optional_amount(input: &str, decimals: u8) -> WizardResult<U256> {
    if input.trim().is_empty() {
        Ok(U256::ZERO)
    } else {
        parse_amount(input, decimals).map(|amount| amount.raw())
    }
}
