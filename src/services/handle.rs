//! Single-writer command queue for the wizard
//!
//! The controller lives inside one tokio task. Key presses, refresh timers
//! and error-expiry timers only enqueue [`WizardCommand`]s; the task applies
//! them one at a time and publishes a [`WizardView`] after each change, so a
//! background refresh can never interleave with a transaction.
//!
//! At most one mutating command is in flight. Submitting another while one
//! is queued or running is ignored rather than queued behind it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::wizard::{WizardController, WizardView};
use crate::error::WizardResult;
use crate::models::{FormsState, Operation, WizardStep};

/// Something the wizard task should do
#[derive(Debug, Clone)]
pub enum WizardCommand {
    Start,
    Reconcile,
    RefreshBalances,
    FetchContractInfo,
    Initialize {
        token0: String,
        token1: String,
        fee_to: String,
        gas: Option<u64>,
    },
    ApproveToken {
        token: String,
        amount: String,
        gas: Option<u64>,
    },
    Mint {
        recipient: String,
        gas: Option<u64>,
    },
    FaucetMint {
        token: String,
        amount: String,
        gas: Option<u64>,
    },
    Burn {
        to: String,
        gas: Option<u64>,
    },
    Swap {
        amount0_out: String,
        amount1_out: String,
        to: String,
        data: String,
        gas: Option<u64>,
    },
    Transfer {
        to: String,
        amount: String,
        gas: Option<u64>,
    },
    Approve {
        spender: String,
        amount: String,
        gas: Option<u64>,
    },
    TransferFrom {
        from: String,
        to: String,
        amount: String,
        gas: Option<u64>,
    },
    CheckBalance {
        address: String,
        token: String,
    },
    CheckAllowance {
        owner: String,
        spender: String,
        token: String,
    },
    UpdateForms(FormsState),
    GoToStep(WizardStep),
    Advance,
    Reset,
    ExpireOutcome,
}

impl WizardCommand {
    /// The user action this command performs, if any
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Initialize { .. } => Some(Operation::Initialize),
            Self::ApproveToken { .. } => Some(Operation::ApproveToken),
            Self::Mint { .. } => Some(Operation::Mint),
            Self::FaucetMint { .. } => Some(Operation::FaucetMint),
            Self::Burn { .. } => Some(Operation::Burn),
            Self::Swap { .. } => Some(Operation::Swap),
            Self::Transfer { .. } => Some(Operation::Transfer),
            Self::Approve { .. } => Some(Operation::Approve),
            Self::TransferFrom { .. } => Some(Operation::TransferFrom),
            Self::CheckBalance { .. } => Some(Operation::BalanceCheck),
            Self::CheckAllowance { .. } => Some(Operation::AllowanceCheck),
            _ => None,
        }
    }

    /// Whether this command submits a transaction
    pub fn is_mutating(&self) -> bool {
        self.operation().is_some_and(Operation::is_mutating)
    }
}

/// Result of [`WizardHandle::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// Another transaction is in flight, or the task has stopped
    Ignored,
}

/// Front-end side of the wizard task
pub struct WizardHandle {
    commands: mpsc::UnboundedSender<WizardCommand>,
    view: watch::Receiver<WizardView>,
    in_flight: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl WizardHandle {
    /// Move `controller` into a new task
    pub fn spawn(controller: WizardController) -> Self {
        let (commands, queue) = mpsc::unbounded_channel();
        let (publisher, view) = watch::channel(controller.view());
        let in_flight = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn(run(controller, queue, publisher, Arc::clone(&in_flight)));

        Self {
            commands,
            view,
            in_flight,
            task,
        }
    }

    /// Enqueue a command
    pub fn submit(&self, command: WizardCommand) -> Submission {
        let mutating = command.is_mutating();
        if mutating
            && self
                .in_flight
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
        {
            debug!(?command, "transaction already in flight, ignoring");
            return Submission::Ignored;
        }

        if self.commands.send(command).is_err() {
            if mutating {
                self.in_flight.store(false, Ordering::SeqCst);
            }
            return Submission::Ignored;
        }
        Submission::Accepted
    }

    /// Latest published view
    pub fn view(&self) -> WizardView {
        self.view.borrow().clone()
    }

    /// Receiver that wakes on every published view
    pub fn subscribe(&self) -> watch::Receiver<WizardView> {
        self.view.clone()
    }

    /// Whether a transaction is queued or running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Stop accepting commands and wait for the queue to drain
    pub async fn shutdown(self) {
        drop(self.commands);
        if let Err(err) = self.task.await {
            error!(error = %err, "wizard task ended abnormally");
        }
    }
}

async fn run(
    mut controller: WizardController,
    mut queue: mpsc::UnboundedReceiver<WizardCommand>,
    publisher: watch::Sender<WizardView>,
    in_flight: Arc<AtomicBool>,
) {
    let (expiry_tx, mut expiry_rx) = mpsc::unbounded_channel::<()>();

    loop {
        let command = tokio::select! {
            command = queue.recv() => match command {
                Some(command) => command,
                None => break,
            },
            Some(()) = expiry_rx.recv() => WizardCommand::ExpireOutcome,
        };

        let mutating = command.is_mutating();
        if let Some(operation) = command.operation() {
            controller.begin(operation);
            publisher.send_replace(controller.view());
        }

        let was_error_at = controller
            .outcome()
            .is_error()
            .then(|| controller.outcome().updated_at);

        if let Err(err) = apply(&mut controller, command).await {
            error!(error = %err, "wizard command failed");
        }

        if mutating {
            in_flight.store(false, Ordering::SeqCst);
        }

        // Each new error gets its own expiry timer
        let outcome = controller.outcome();
        if outcome.is_error() && was_error_at != Some(outcome.updated_at) {
            let delay = controller.error_clear_delay();
            let expiry_tx = expiry_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = expiry_tx.send(());
            });
        }

        publisher.send_replace(controller.view());
    }

    debug!("wizard task stopped");
}

async fn apply(
    controller: &mut WizardController,
    command: WizardCommand,
) -> WizardResult<()> {
    match command {
        WizardCommand::Start => controller.start().await,
        WizardCommand::Reconcile => controller.reconcile().await,
        WizardCommand::RefreshBalances => controller.check_token_balances_and_allowances().await,
        WizardCommand::FetchContractInfo => controller.fetch_contract_info().await,
        WizardCommand::Initialize {
            token0,
            token1,
            fee_to,
            gas,
        } => controller.initialize(&token0, &token1, &fee_to, gas).await,
        WizardCommand::ApproveToken { token, amount, gas } => {
            controller.approve_token(&token, &amount, gas).await
        }
        WizardCommand::Mint { recipient, gas } => controller.mint(&recipient, gas).await,
        WizardCommand::FaucetMint { token, amount, gas } => {
            controller.faucet_mint(&token, &amount, gas).await
        }
        WizardCommand::Burn { to, gas } => controller.burn(&to, gas).await,
        WizardCommand::Swap {
            amount0_out,
            amount1_out,
            to,
            data,
            gas,
        } => {
            controller
                .swap(&amount0_out, &amount1_out, &to, &data, gas)
                .await
        }
        WizardCommand::Transfer { to, amount, gas } => {
            controller.transfer(&to, &amount, gas).await
        }
        WizardCommand::Approve {
            spender,
            amount,
            gas,
        } => controller.approve(&spender, &amount, gas).await,
        WizardCommand::TransferFrom {
            from,
            to,
            amount,
            gas,
        } => controller.transfer_from(&from, &to, &amount, gas).await,
        WizardCommand::CheckBalance { address, token } => {
            controller.check_balance(&address, &token).await
        }
        WizardCommand::CheckAllowance {
            owner,
            spender,
            token,
        } => controller.check_allowance(&owner, &spender, &token).await,
        WizardCommand::UpdateForms(forms) => {
            controller.set_forms(forms);
            Ok(())
        }
        WizardCommand::GoToStep(step) => controller.go_to_step(step).map(|_| ()),
        WizardCommand::Advance => controller.advance().map(|_| ()),
        WizardCommand::Reset => controller.reset(),
        WizardCommand::ExpireOutcome => {
            controller.expire_outcome(Instant::now());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxStatus;
    use crate::services::testing::{controller, MockChain, TOKEN_A};
    use std::time::Duration;

    fn approve_a() -> WizardCommand {
        WizardCommand::ApproveToken {
            token: TOKEN_A.to_string(),
            amount: "1000".into(),
            gas: None,
        }
    }

    #[tokio::test]
    async fn test_second_approve_while_pending_is_ignored() {
        let chain = MockChain::with_pair();
        let token = chain.mock_token(TOKEN_A);
        token.gate_approve.store(true, Ordering::SeqCst);
        let (_dir, wizard) = controller(chain.clone());
        let handle = WizardHandle::spawn(wizard);
        let mut views = handle.subscribe();

        assert_eq!(handle.submit(approve_a()), Submission::Accepted);
        views
            .wait_for(|v| v.outcome.status == TxStatus::Pending)
            .await
            .unwrap();
        assert_eq!(handle.submit(approve_a()), Submission::Ignored);
        assert!(handle.is_busy());

        token.release_approve();
        views
            .wait_for(|v| v.outcome.status == TxStatus::Success)
            .await
            .unwrap();

        assert_eq!(token.ledger.calls_named("approve"), 1);
        assert!(!handle.is_busy());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_reads_are_not_gated() {
        let chain = MockChain::with_pair();
        let token = chain.mock_token(TOKEN_A);
        token.gate_approve.store(true, Ordering::SeqCst);
        let (_dir, wizard) = controller(chain.clone());
        let handle = WizardHandle::spawn(wizard);

        assert_eq!(handle.submit(approve_a()), Submission::Accepted);
        assert_eq!(handle.submit(WizardCommand::Reconcile), Submission::Accepted);
        assert_eq!(handle.submit(WizardCommand::Advance), Submission::Accepted);

        token.release_approve();
        handle.shutdown().await;
        assert_eq!(token.ledger.calls_named("approve"), 1);
    }

    #[tokio::test]
    async fn test_error_outcome_expires_after_delay() {
        let chain = MockChain::new();
        let (_dir, wizard) = controller(chain);
        let handle = WizardHandle::spawn(wizard.with_error_clear_delay(Duration::from_millis(50)));
        let mut views = handle.subscribe();

        handle.submit(WizardCommand::Mint {
            recipient: String::new(),
            gas: None,
        });
        views.wait_for(|v| v.outcome.is_error()).await.unwrap();

        tokio::time::timeout(
            Duration::from_secs(5),
            views.wait_for(|v| v.outcome.status == TxStatus::None),
        )
        .await
        .expect("error outcome was not cleared")
        .unwrap();
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_start_publishes_reconciled_state() {
        let chain = MockChain::with_pair();
        let (_dir, wizard) = controller(chain);
        let handle = WizardHandle::spawn(wizard);
        let mut views = handle.subscribe();

        handle.submit(WizardCommand::Start);
        views
            .wait_for(|v| v.state.pool_initialized)
            .await
            .unwrap();

        assert_eq!(handle.view().state.deployed_tokens.token0, TOKEN_A.to_string());
        handle.shutdown().await;
    }

    #[test]
    fn test_mutating_commands() {
        assert!(approve_a().is_mutating());
        assert!(!WizardCommand::Reconcile.is_mutating());
        assert!(!WizardCommand::CheckBalance {
            address: String::new(),
            token: String::new(),
        }
        .is_mutating());
    }
}
