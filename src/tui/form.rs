//! Form fields and actions for the TUI
//!
//! Every page is a list of [`Item`]s: editable fields backed by
//! [`FormsState`], and actions that turn the current values into a
//! [`WizardCommand`].

use crate::models::{FormsState, WizardState, WizardStep};
use crate::services::WizardCommand;

/// Form values plus the TUI-only gas override
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub forms: FormsState,
    pub gas: String,
}

impl FormValues {
    /// Gas override, if one was typed
    pub fn gas_override(&self) -> Result<Option<u64>, String> {
        let gas = self.gas.trim();
        if gas.is_empty() {
            return Ok(None);
        }
        gas.parse::<u64>()
            .map(Some)
            .map_err(|_| format!("Invalid gas limit '{}'", gas))
    }

    /// Take values the controller filled in for fields still blank here
    ///
    /// Typed values are never overwritten, so a refresh landing mid-edit
    /// cannot eat keystrokes.
    pub fn fill_blanks(&mut self, published: &FormsState) {
        for field in Field::ALL {
            let incoming = field.get(published);
            if incoming.trim().is_empty() || !field.get(&self.forms).trim().is_empty() {
                continue;
            }
            if let Some(slot) = field.slot(&mut self.forms) {
                *slot = incoming.to_string();
            }
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Gas => &self.gas,
            other => other.get(&self.forms),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field.slot(&mut self.forms) {
            Some(slot) => *slot = value,
            None => self.gas = value,
        }
    }
}

/// An editable input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    InitToken0,
    InitToken1,
    InitFeeTo,
    ApproveAmount0,
    ApproveAmount1,
    FaucetToken,
    FaucetAmount,
    MintTo,
    BurnTo,
    SwapAmount0,
    SwapAmount1,
    SwapTo,
    TransferTo,
    TransferAmount,
    LpSpender,
    LpAmount,
    FromHolder,
    FromTo,
    FromAmount,
    BalanceAddress,
    BalanceToken,
    AllowanceOwner,
    AllowanceSpender,
    AllowanceToken,
    Gas,
}

impl Field {
    pub const ALL: [Field; 25] = [
        Self::InitToken0,
        Self::InitToken1,
        Self::InitFeeTo,
        Self::ApproveAmount0,
        Self::ApproveAmount1,
        Self::FaucetToken,
        Self::FaucetAmount,
        Self::MintTo,
        Self::BurnTo,
        Self::SwapAmount0,
        Self::SwapAmount1,
        Self::SwapTo,
        Self::TransferTo,
        Self::TransferAmount,
        Self::LpSpender,
        Self::LpAmount,
        Self::FromHolder,
        Self::FromTo,
        Self::FromAmount,
        Self::BalanceAddress,
        Self::BalanceToken,
        Self::AllowanceOwner,
        Self::AllowanceSpender,
        Self::AllowanceToken,
        Self::Gas,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::InitToken0 => "Token0",
            Self::InitToken1 => "Token1",
            Self::InitFeeTo => "Fee to",
            Self::ApproveAmount0 => "Token0 amount",
            Self::ApproveAmount1 => "Token1 amount",
            Self::FaucetToken => "Faucet token",
            Self::FaucetAmount => "Faucet amount",
            Self::MintTo => "LP recipient",
            Self::BurnTo => "Burn to",
            Self::SwapAmount0 => "Amount0 out",
            Self::SwapAmount1 => "Amount1 out",
            Self::SwapTo => "Swap to",
            Self::TransferTo => "Transfer to",
            Self::TransferAmount => "LP amount",
            Self::LpSpender => "Spender",
            Self::LpAmount => "Allowance",
            Self::FromHolder => "From",
            Self::FromTo => "To",
            Self::FromAmount => "LP amount",
            Self::BalanceAddress => "Account",
            Self::BalanceToken => "Token",
            Self::AllowanceOwner => "Owner",
            Self::AllowanceSpender => "Spender",
            Self::AllowanceToken => "Token",
            Self::Gas => "Gas limit",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::InitFeeTo => "0x... (blank: zero address)",
            Self::ApproveAmount0 | Self::ApproveAmount1 => "blank: default amount",
            Self::FaucetToken | Self::BalanceToken | Self::AllowanceToken => {
                "0x... or token0 / token1"
            }
            Self::MintTo | Self::BurnTo | Self::SwapTo => "0x... (blank: signer)",
            Self::SwapAmount0 | Self::SwapAmount1 => "0",
            Self::FaucetAmount
            | Self::TransferAmount
            | Self::LpAmount
            | Self::FromAmount => "0.0",
            Self::Gas => "blank: configured limit",
            _ => "0x...",
        }
    }

    /// Current value in `forms`
    pub fn get(self, forms: &FormsState) -> &str {
        match self {
            Self::InitToken0 => &forms.initialize.token0,
            Self::InitToken1 => &forms.initialize.token1,
            Self::InitFeeTo => &forms.initialize.fee_to,
            Self::ApproveAmount0 => &forms.approve.token0_amount,
            Self::ApproveAmount1 => &forms.approve.token1_amount,
            Self::FaucetToken => &forms.faucet.token_address,
            Self::FaucetAmount => &forms.faucet.amount,
            Self::MintTo => &forms.mint.to,
            Self::BurnTo => &forms.burn.to,
            Self::SwapAmount0 => &forms.swap.amount0_out,
            Self::SwapAmount1 => &forms.swap.amount1_out,
            Self::SwapTo => &forms.swap.to,
            Self::TransferTo => &forms.transfer.to,
            Self::TransferAmount => &forms.transfer.amount,
            Self::LpSpender => &forms.approve.spender,
            Self::LpAmount => &forms.approve.amount,
            Self::FromHolder => &forms.transfer_from.from,
            Self::FromTo => &forms.transfer_from.to,
            Self::FromAmount => &forms.transfer_from.amount,
            Self::BalanceAddress => &forms.balance_check.address,
            Self::BalanceToken => &forms.balance_check.token_address,
            Self::AllowanceOwner => &forms.allowance_check.owner,
            Self::AllowanceSpender => &forms.allowance_check.spender,
            Self::AllowanceToken => &forms.allowance_check.token_address,
            Self::Gas => "",
        }
    }

    /// Mutable slot in `forms`; `None` for the gas field, which lives outside it
    fn slot(self, forms: &mut FormsState) -> Option<&mut String> {
        let slot = match self {
            Self::InitToken0 => &mut forms.initialize.token0,
            Self::InitToken1 => &mut forms.initialize.token1,
            Self::InitFeeTo => &mut forms.initialize.fee_to,
            Self::ApproveAmount0 => &mut forms.approve.token0_amount,
            Self::ApproveAmount1 => &mut forms.approve.token1_amount,
            Self::FaucetToken => &mut forms.faucet.token_address,
            Self::FaucetAmount => &mut forms.faucet.amount,
            Self::MintTo => &mut forms.mint.to,
            Self::BurnTo => &mut forms.burn.to,
            Self::SwapAmount0 => &mut forms.swap.amount0_out,
            Self::SwapAmount1 => &mut forms.swap.amount1_out,
            Self::SwapTo => &mut forms.swap.to,
            Self::TransferTo => &mut forms.transfer.to,
            Self::TransferAmount => &mut forms.transfer.amount,
            Self::LpSpender => &mut forms.approve.spender,
            Self::LpAmount => &mut forms.approve.amount,
            Self::FromHolder => &mut forms.transfer_from.from,
            Self::FromTo => &mut forms.transfer_from.to,
            Self::FromAmount => &mut forms.transfer_from.amount,
            Self::BalanceAddress => &mut forms.balance_check.address,
            Self::BalanceToken => &mut forms.balance_check.token_address,
            Self::AllowanceOwner => &mut forms.allowance_check.owner,
            Self::AllowanceSpender => &mut forms.allowance_check.spender,
            Self::AllowanceToken => &mut forms.allowance_check.token_address,
            Self::Gas => return None,
        };
        Some(slot)
    }
}

/// A button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Initialize,
    ApproveToken0,
    ApproveToken1,
    Faucet,
    Mint,
    Burn,
    Swap,
    Transfer,
    ApproveLp,
    TransferFrom,
    CheckBalance,
    CheckAllowance,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Self::Initialize => "Initialize Pool",
            Self::ApproveToken0 => "Approve Token0",
            Self::ApproveToken1 => "Approve Token1",
            Self::Faucet => "Mint Test Tokens",
            Self::Mint => "Add Liquidity",
            Self::Burn => "Burn",
            Self::Swap => "Swap",
            Self::Transfer => "Transfer",
            Self::ApproveLp => "Approve Spender",
            Self::TransferFrom => "Transfer From",
            Self::CheckBalance => "Check Balance",
            Self::CheckAllowance => "Check Allowance",
        }
    }

    /// Build the command for this action from the current values
    pub fn command(self, values: &FormValues, state: &WizardState) -> Result<WizardCommand, String> {
        let gas = values.gas_override()?;
        let forms = &values.forms;
        let tokens = &state.deployed_tokens;

        let command = match self {
            Self::Initialize => WizardCommand::Initialize {
                token0: forms.initialize.token0.clone(),
                token1: forms.initialize.token1.clone(),
                fee_to: forms.initialize.fee_to.clone(),
                gas,
            },
            Self::ApproveToken0 => WizardCommand::ApproveToken {
                token: tokens.token0.clone(),
                amount: forms.approve.token0_amount.clone(),
                gas,
            },
            Self::ApproveToken1 => WizardCommand::ApproveToken {
                token: tokens.token1.clone(),
                amount: forms.approve.token1_amount.clone(),
                gas,
            },
            Self::Faucet => WizardCommand::FaucetMint {
                token: crate::cli::resolve_token(&forms.faucet.token_address, tokens),
                amount: forms.faucet.amount.clone(),
                gas,
            },
            Self::Mint => WizardCommand::Mint {
                recipient: forms.mint.to.clone(),
                gas,
            },
            Self::Burn => WizardCommand::Burn {
                to: forms.burn.to.clone(),
                gas,
            },
            Self::Swap => WizardCommand::Swap {
                amount0_out: forms.swap.amount0_out.clone(),
                amount1_out: forms.swap.amount1_out.clone(),
                to: forms.swap.to.clone(),
                data: String::new(),
                gas,
            },
            Self::Transfer => WizardCommand::Transfer {
                to: forms.transfer.to.clone(),
                amount: forms.transfer.amount.clone(),
                gas,
            },
            Self::ApproveLp => WizardCommand::Approve {
                spender: forms.approve.spender.clone(),
                amount: forms.approve.amount.clone(),
                gas,
            },
            Self::TransferFrom => WizardCommand::TransferFrom {
                from: forms.transfer_from.from.clone(),
                to: forms.transfer_from.to.clone(),
                amount: forms.transfer_from.amount.clone(),
                gas,
            },
            Self::CheckBalance => WizardCommand::CheckBalance {
                address: forms.balance_check.address.clone(),
                token: crate::cli::resolve_token(&forms.balance_check.token_address, tokens),
            },
            Self::CheckAllowance => WizardCommand::CheckAllowance {
                owner: forms.allowance_check.owner.clone(),
                spender: forms.allowance_check.spender.clone(),
                token: crate::cli::resolve_token(&forms.allowance_check.token_address, tokens),
            },
        };
        Ok(command)
    }
}

/// One row of a form page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Field(Field),
    Action(Action),
}

/// Rows shown for a wizard step
pub fn step_items(step: WizardStep) -> &'static [Item] {
    use Item::{Action as A, Field as F};
    match step {
        WizardStep::Initialize => &[
            F(Field::InitToken0),
            F(Field::InitToken1),
            F(Field::InitFeeTo),
            A(Action::Initialize),
        ],
        WizardStep::Approve => &[
            F(Field::ApproveAmount0),
            A(Action::ApproveToken0),
            F(Field::ApproveAmount1),
            A(Action::ApproveToken1),
            F(Field::FaucetToken),
            F(Field::FaucetAmount),
            A(Action::Faucet),
        ],
        WizardStep::Mint => &[F(Field::MintTo), A(Action::Mint)],
    }
}

/// Rows on the pool page
pub const POOL_ITEMS: &[Item] = &[
    Item::Field(Field::BurnTo),
    Item::Action(Action::Burn),
    Item::Field(Field::SwapAmount0),
    Item::Field(Field::SwapAmount1),
    Item::Field(Field::SwapTo),
    Item::Action(Action::Swap),
    Item::Field(Field::TransferTo),
    Item::Field(Field::TransferAmount),
    Item::Action(Action::Transfer),
    Item::Field(Field::LpSpender),
    Item::Field(Field::LpAmount),
    Item::Action(Action::ApproveLp),
    Item::Field(Field::FromHolder),
    Item::Field(Field::FromTo),
    Item::Field(Field::FromAmount),
    Item::Action(Action::TransferFrom),
    Item::Field(Field::Gas),
];

/// Rows on the inspect page
pub const INSPECT_ITEMS: &[Item] = &[
    Item::Field(Field::BalanceAddress),
    Item::Field(Field::BalanceToken),
    Item::Action(Action::CheckBalance),
    Item::Field(Field::AllowanceOwner),
    Item::Field(Field::AllowanceSpender),
    Item::Field(Field::AllowanceToken),
    Item::Action(Action::CheckAllowance),
];
