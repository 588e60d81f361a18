// Swap Base Input Instruction
//
// Fixed-input swap: the trade fee comes out of the effective input, the
// protocol and fund carve-outs accrue to the pool's fee buckets and the
// remainder of the fee stays in the input reserve.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{constants::*, curve::*, errors::*, events::*, state::*, utils::*};

/// Account set shared by both swap variants.
#[derive(Accounts)]
pub struct Swap<'info> {
    pub payer: Signer<'info>,

    /// CHECK: PDA signer over the vaults
    #[account(
        seeds = [AUTH_SEED],
        bump = pool_state.auth_bump
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(address = pool_state.amm_config)]
    pub amm_config: Box<Account<'info, AmmConfig>>,

    #[account(mut)]
    pub pool_state: Box<Account<'info, PoolState>>,

    #[account(
        mut,
        token::mint = input_token_mint,
    )]
    pub input_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = output_token_mint,
    )]
    pub output_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub input_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub output_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub input_token_program: Interface<'info, TokenInterface>,
    pub output_token_program: Interface<'info, TokenInterface>,

    #[account(address = input_vault.mint)]
    pub input_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = output_vault.mint)]
    pub output_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        address = pool_state.observation_key
    )]
    pub observation_state: Box<Account<'info, ObservationState>>,
}

impl<'info> Swap<'info> {
    /// Resolve the swap direction from the vault pair and return the
    /// reserves backing liquidity, input side first.
    pub(super) fn load_reserves(&self) -> Result<(TradeDirection, u64, u64)> {
        let pool_state = &self.pool_state;
        if self.input_vault.key() == pool_state.token_0_vault
            && self.output_vault.key() == pool_state.token_1_vault
        {
            let (total_0, total_1) = pool_state
                .vault_amount_without_fee(self.input_vault.amount, self.output_vault.amount)?;
            Ok((TradeDirection::ZeroForOne, total_0, total_1))
        } else if self.input_vault.key() == pool_state.token_1_vault
            && self.output_vault.key() == pool_state.token_0_vault
        {
            let (total_0, total_1) = pool_state
                .vault_amount_without_fee(self.output_vault.amount, self.input_vault.amount)?;
            Ok((TradeDirection::OneForZero, total_1, total_0))
        } else {
            err!(AmmError::InvalidVault)
        }
    }

    pub(super) fn check_open(&self) -> Result<u64> {
        self.pool_state.assert_not_paused(PoolStatusBitIndex::Swap)?;
        let block_timestamp = u64::try_from(Clock::get()?.unix_timestamp)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        require!(
            block_timestamp >= self.pool_state.open_time,
            AmmError::NotApproved
        );
        Ok(block_timestamp)
    }

    pub(super) fn accrue_fees(
        &mut self,
        trade_direction: TradeDirection,
        protocol_fee: u64,
        fund_fee: u64,
    ) -> Result<()> {
        let pool_state = &mut self.pool_state;
        match trade_direction {
            TradeDirection::ZeroForOne => {
                pool_state.protocol_fees_token_0 = pool_state
                    .protocol_fees_token_0
                    .checked_add(protocol_fee)
                    .ok_or(AmmError::ArithmeticOverflow)?;
                pool_state.fund_fees_token_0 = pool_state
                    .fund_fees_token_0
                    .checked_add(fund_fee)
                    .ok_or(AmmError::ArithmeticOverflow)?;
            }
            TradeDirection::OneForZero => {
                pool_state.protocol_fees_token_1 = pool_state
                    .protocol_fees_token_1
                    .checked_add(protocol_fee)
                    .ok_or(AmmError::ArithmeticOverflow)?;
                pool_state.fund_fees_token_1 = pool_state
                    .fund_fees_token_1
                    .checked_add(fund_fee)
                    .ok_or(AmmError::ArithmeticOverflow)?;
            }
        }
        Ok(())
    }

    pub(super) fn transfer_swap_legs(
        &self,
        input_transfer_amount: u64,
        output_transfer_amount: u64,
    ) -> Result<()> {
        transfer_from_user_to_pool_vault(
            self.payer.to_account_info(),
            self.input_token_account.to_account_info(),
            self.input_vault.to_account_info(),
            &self.input_token_mint,
            self.input_token_program.to_account_info(),
            input_transfer_amount,
        )?;
        let bump = [self.pool_state.auth_bump];
        let authority_seeds = &[AUTH_SEED, &bump];
        let signer_seeds = &[&authority_seeds[..]];
        transfer_from_pool_vault_to_user(
            self.authority.to_account_info(),
            self.output_vault.to_account_info(),
            self.output_token_account.to_account_info(),
            &self.output_token_mint,
            self.output_token_program.to_account_info(),
            signer_seeds,
            output_transfer_amount,
        )
    }

    pub fn swap_base_input(&mut self, amount_in: u64, minimum_amount_out: u64) -> Result<()> {
        let block_timestamp = self.check_open()?;

        let transfer_fee = get_transfer_fee(&self.input_token_mint, amount_in)?;
        let actual_amount_in = amount_in
            .checked_sub(transfer_fee)
            .ok_or(AmmError::ArithmeticOverflow)?;
        require!(actual_amount_in > 0, AmmError::ZeroAmount);

        let (trade_direction, total_input_amount, total_output_amount) = self.load_reserves()?;
        let constant_before = u128::from(total_input_amount)
            .checked_mul(u128::from(total_output_amount))
            .ok_or(AmmError::ArithmeticOverflow)?;

        let result = CurveCalculator::swap_base_input(
            u128::from(actual_amount_in),
            u128::from(total_input_amount),
            u128::from(total_output_amount),
            self.amm_config.trade_fee_rate,
            self.amm_config.protocol_fee_rate,
            self.amm_config.fund_fee_rate,
        )
        .ok_or(AmmError::ArithmeticOverflow)?;

        // Invariant check with the fee excluded from the input leg; the
        // retained fee cut only ever raises it further.
        let constant_after = result
            .new_swap_source_amount
            .checked_sub(result.trade_fee)
            .and_then(|v| v.checked_mul(result.new_swap_destination_amount))
            .ok_or(AmmError::ArithmeticOverflow)?;
        require_gte!(constant_after, constant_before);

        let amount_out = u64::try_from(result.destination_amount_swapped)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        let output_transfer_fee = get_transfer_fee(&self.output_token_mint, amount_out)?;
        let amount_received = amount_out
            .checked_sub(output_transfer_fee)
            .ok_or(AmmError::ArithmeticOverflow)?;
        require!(amount_received > 0, AmmError::ZeroAmount);
        require!(
            amount_received >= minimum_amount_out,
            AmmError::SlippageExceeded
        );

        let protocol_fee = u64::try_from(result.protocol_fee)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        let fund_fee =
            u64::try_from(result.fund_fee).map_err(|_| AmmError::ArithmeticOverflow)?;
        self.accrue_fees(trade_direction, protocol_fee, fund_fee)?;

        self.transfer_swap_legs(amount_in, amount_out)?;

        // New reserves: carve-outs leave the invariant, the retained trade
        // fee cut stays in the input side.
        let new_input_reserve = total_input_amount
            .checked_add(actual_amount_in)
            .and_then(|v| v.checked_sub(protocol_fee))
            .and_then(|v| v.checked_sub(fund_fee))
            .ok_or(AmmError::ArithmeticOverflow)?;
        let new_output_reserve = total_output_amount
            .checked_sub(amount_out)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let (new_reserve_0, new_reserve_1) = match trade_direction {
            TradeDirection::ZeroForOne => (new_input_reserve, new_output_reserve),
            TradeDirection::OneForZero => (new_output_reserve, new_input_reserve),
        };
        self.observation_state
            .update(block_timestamp, new_reserve_0, new_reserve_1);

        emit!(SwapEvent {
            pool_id: self.pool_state.key(),
            input_vault_before: total_input_amount,
            output_vault_before: total_output_amount,
            input_amount: actual_amount_in,
            output_amount: amount_out,
            input_transfer_fee: transfer_fee,
            output_transfer_fee,
            base_input: true,
        });

        msg!(
            "Swapped {} in -> {} out ({} received after transfer fee)",
            amount_in,
            amount_out,
            amount_received
        );

        Ok(())
    }
}
