// Pool State
//
// Central record of one trading pair: vault and mint references, liquidity
// supply, accumulated protocol/fund fees and per-operation pause bits.
// Reserves are the vault balances minus the accumulated fees; the fees sit
// in the vaults but no longer back liquidity.

use anchor_lang::prelude::*;

use crate::errors::*;

/// Bit positions of the independent pause flags.
#[derive(PartialEq, Eq, Clone, Copy)]
pub enum PoolStatusBitIndex {
    Deposit = 0,
    Withdraw = 1,
    Swap = 2,
}

#[derive(PartialEq, Eq)]
pub enum PoolStatusBitFlag {
    Enable,
    Disable,
}

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct PoolState {
    /// Fee schedule the pool was created with.
    pub amm_config: Pubkey,
    pub pool_creator: Pubkey,
    pub token_0_vault: Pubkey,
    pub token_1_vault: Pubkey,
    pub lp_mint: Pubkey,
    /// Canonically ordered: token_0_mint < token_1_mint.
    pub token_0_mint: Pubkey,
    pub token_1_mint: Pubkey,
    /// Owning token program of each mint; decides whether the mint can
    /// carry a transfer-fee extension.
    pub token_0_program: Pubkey,
    pub token_1_program: Pubkey,
    pub observation_key: Pubkey,
    pub auth_bump: u8,
    /// Bit 0: deposit paused, bit 1: withdraw paused, bit 2: swap paused.
    pub status: u8,
    pub lp_mint_decimals: u8,
    pub mint_0_decimals: u8,
    pub mint_1_decimals: u8,
    /// Outstanding liquidity tokens.
    pub lp_supply: u64,
    /// Trade-fee carve-outs accrued per side, claimable by the protocol.
    pub protocol_fees_token_0: u64,
    pub protocol_fees_token_1: u64,
    pub fund_fees_token_0: u64,
    pub fund_fees_token_1: u64,
    /// Unix timestamp before which swaps are rejected.
    pub open_time: u64,
    pub padding: [u64; 16],
}

impl PoolState {
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        auth_bump: u8,
        lp_supply: u64,
        open_time: u64,
        pool_creator: Pubkey,
        amm_config: Pubkey,
        token_0_vault: Pubkey,
        token_1_vault: Pubkey,
        token_0_mint: &InterfaceAccount<anchor_spl::token_interface::Mint>,
        token_1_mint: &InterfaceAccount<anchor_spl::token_interface::Mint>,
        lp_mint: Pubkey,
        observation_key: Pubkey,
    ) {
        self.amm_config = amm_config;
        self.pool_creator = pool_creator;
        self.token_0_vault = token_0_vault;
        self.token_1_vault = token_1_vault;
        self.lp_mint = lp_mint;
        self.token_0_mint = token_0_mint.key();
        self.token_1_mint = token_1_mint.key();
        self.token_0_program = *token_0_mint.to_account_info().owner;
        self.token_1_program = *token_1_mint.to_account_info().owner;
        self.observation_key = observation_key;
        self.auth_bump = auth_bump;
        self.status = 0;
        self.lp_mint_decimals = crate::constants::LP_MINT_DECIMALS;
        self.mint_0_decimals = token_0_mint.decimals;
        self.mint_1_decimals = token_1_mint.decimals;
        self.lp_supply = lp_supply;
        self.protocol_fees_token_0 = 0;
        self.protocol_fees_token_1 = 0;
        self.fund_fees_token_0 = 0;
        self.fund_fees_token_1 = 0;
        self.open_time = open_time;
        self.padding = [0u64; 16];
    }

    pub fn set_status(&mut self, status: u8) {
        self.status = status;
    }

    pub fn set_status_by_bit(&mut self, bit: PoolStatusBitIndex, flag: PoolStatusBitFlag) {
        let mask = 1 << (bit as u8);
        match flag {
            PoolStatusBitFlag::Disable => self.status |= mask,
            PoolStatusBitFlag::Enable => self.status &= !mask,
        }
    }

    /// True when the operation class is enabled (its pause bit is clear).
    pub fn get_status_by_bit(&self, bit: PoolStatusBitIndex) -> bool {
        let status = self.status & (1 << (bit as u8));
        status == 0
    }

    pub fn assert_not_paused(&self, bit: PoolStatusBitIndex) -> Result<()> {
        require!(self.get_status_by_bit(bit), AmmError::PoolPaused);
        Ok(())
    }

    pub fn assert_is_creator(&self, caller: &Pubkey) -> Result<()> {
        require!(self.pool_creator == *caller, AmmError::UnauthorizedAccess);
        Ok(())
    }

    /// Reserves backing liquidity: vault balances minus accrued fees.
    pub fn vault_amount_without_fee(
        &self,
        vault_0_amount: u64,
        vault_1_amount: u64,
    ) -> Result<(u64, u64)> {
        let amount_0 = vault_0_amount
            .checked_sub(self.protocol_fees_token_0)
            .and_then(|v| v.checked_sub(self.fund_fees_token_0))
            .ok_or(AmmError::ArithmeticOverflow)?;
        let amount_1 = vault_1_amount
            .checked_sub(self.protocol_fees_token_1)
            .and_then(|v| v.checked_sub(self.fund_fees_token_1))
            .ok_or(AmmError::ArithmeticOverflow)?;
        Ok((amount_0, amount_1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bits_are_independent() {
        let mut pool = PoolState::default();
        pool.set_status_by_bit(PoolStatusBitIndex::Swap, PoolStatusBitFlag::Disable);
        assert!(pool.get_status_by_bit(PoolStatusBitIndex::Deposit));
        assert!(pool.get_status_by_bit(PoolStatusBitIndex::Withdraw));
        assert!(!pool.get_status_by_bit(PoolStatusBitIndex::Swap));

        pool.set_status_by_bit(PoolStatusBitIndex::Swap, PoolStatusBitFlag::Enable);
        assert!(pool.get_status_by_bit(PoolStatusBitIndex::Swap));
    }

    #[test]
    fn set_status_overwrites_all_bits() {
        let mut pool = PoolState::default();
        pool.set_status(0b111);
        assert!(!pool.get_status_by_bit(PoolStatusBitIndex::Deposit));
        assert!(!pool.get_status_by_bit(PoolStatusBitIndex::Withdraw));
        assert!(!pool.get_status_by_bit(PoolStatusBitIndex::Swap));
    }

    #[test]
    fn accrued_fees_are_excluded_from_reserves() {
        let pool = PoolState {
            protocol_fees_token_0: 30,
            fund_fees_token_0: 20,
            protocol_fees_token_1: 5,
            ..Default::default()
        };
        let (r0, r1) = pool.vault_amount_without_fee(1_000, 500).unwrap();
        assert_eq!(r0, 950);
        assert_eq!(r1, 495);
    }
}
