use anchor_lang::prelude::*;

/// Emitted when liquidity is minted or burned.
#[event]
pub struct LpChangeEvent {
    pub pool_id: Pubkey,
    pub lp_amount_before: u64,
    /// Reserves excluding accumulated protocol and fund fees.
    pub token_0_vault_before: u64,
    pub token_1_vault_before: u64,
    /// Vault-side movement, gross of transfer fees.
    pub token_0_amount: u64,
    pub token_1_amount: u64,
    pub token_0_transfer_fee: u64,
    pub token_1_transfer_fee: u64,
    /// 0: deposit, 1: withdraw, 2: initialize
    pub change_type: u8,
}

/// Emitted on every executed swap.
#[event]
pub struct SwapEvent {
    pub pool_id: Pubkey,
    pub input_vault_before: u64,
    pub output_vault_before: u64,
    /// Gross input moved into the vault, including the trade fee.
    pub input_amount: u64,
    /// Gross output moved out of the vault, before the outbound transfer fee.
    pub output_amount: u64,
    pub input_transfer_fee: u64,
    pub output_transfer_fee: u64,
    pub base_input: bool,
}
