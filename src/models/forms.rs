//! Form inputs
//!
//! The values the user has typed into each form, kept as raw strings.
//! Both the terminal UI and the controller read and write these.

/// Pool initialization form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitializeForm {
    pub token0: String,
    pub token1: String,
    pub fee_to: String,
}

/// Single-recipient form (mint, burn)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientForm {
    pub to: String,
}

/// Swap form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapForm {
    pub amount0_out: String,
    pub amount1_out: String,
    pub to: String,
}

/// LP transfer form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    pub to: String,
    pub amount: String,
}

/// Approval form
///
/// The per-token amounts feed step 2; `spender` and `amount` feed the LP
/// token's own `approve`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApproveForm {
    pub token0_amount: String,
    pub token1_amount: String,
    pub spender: String,
    pub amount: String,
}

/// Dev faucet form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaucetForm {
    pub token_address: String,
    pub amount: String,
}

/// LP transferFrom form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferFromForm {
    pub from: String,
    pub to: String,
    pub amount: String,
}

/// Ad-hoc balance check form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceCheckForm {
    pub address: String,
    pub token_address: String,
}

/// Ad-hoc allowance check form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowanceCheckForm {
    pub owner: String,
    pub spender: String,
    pub token_address: String,
}

/// All forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormsState {
    pub initialize: InitializeForm,
    pub mint: RecipientForm,
    pub burn: RecipientForm,
    pub swap: SwapForm,
    pub transfer: TransferForm,
    pub approve: ApproveForm,
    pub faucet: FaucetForm,
    pub transfer_from: TransferFromForm,
    pub balance_check: BalanceCheckForm,
    pub allowance_check: AllowanceCheckForm,
}
