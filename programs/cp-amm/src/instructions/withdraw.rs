// Withdraw Instruction
//
// Burns liquidity for a proportional share of the reserves. The caller
// receives the share net of each mint's outbound transfer fee; the slippage
// minima are checked against what actually arrives.

use anchor_lang::prelude::*;
use anchor_spl::{
    token::Token,
    token_interface::{self, Burn, Mint, TokenAccount, TokenInterface},
};

use crate::{constants::*, curve::*, errors::*, events::*, state::*, utils::*};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub owner: Signer<'info>,

    /// CHECK: PDA signer over the vaults and the LP mint
    #[account(
        seeds = [AUTH_SEED],
        bump = pool_state.auth_bump
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub pool_state: Box<Account<'info, PoolState>>,

    #[account(
        mut,
        address = pool_state.lp_mint
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = lp_mint,
        token::authority = owner,
    )]
    pub owner_lp_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = token_0_mint,
        token::authority = owner,
    )]
    pub token_0_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = token_1_mint,
        token::authority = owner,
    )]
    pub token_1_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool_state.token_0_vault @ AmmError::InvalidVault
    )]
    pub token_0_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool_state.token_1_vault @ AmmError::InvalidVault
    )]
    pub token_1_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = pool_state.token_0_mint)]
    pub token_0_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = pool_state.token_1_mint)]
    pub token_1_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        address = pool_state.observation_key
    )]
    pub observation_state: Box<Account<'info, ObservationState>>,

    pub token_program: Program<'info, Token>,
    pub token_0_program: Interface<'info, TokenInterface>,
    pub token_1_program: Interface<'info, TokenInterface>,
}

impl<'info> Withdraw<'info> {
    pub fn withdraw(
        &mut self,
        lp_token_amount: u64,
        minimum_token_0_amount: u64,
        minimum_token_1_amount: u64,
    ) -> Result<()> {
        require!(lp_token_amount > 0, AmmError::InvalidAmount);
        self.pool_state.assert_not_paused(PoolStatusBitIndex::Withdraw)?;

        let lp_supply = self.pool_state.lp_supply;
        require!(
            lp_token_amount <= self.owner_lp_token.amount && lp_token_amount <= lp_supply,
            AmmError::InsufficientSupply
        );

        let (total_token_0_amount, total_token_1_amount) = self
            .pool_state
            .vault_amount_without_fee(self.token_0_vault.amount, self.token_1_vault.amount)?;

        let results = CurveCalculator::lp_tokens_to_trading_tokens(
            u128::from(lp_token_amount),
            u128::from(lp_supply),
            u128::from(total_token_0_amount),
            u128::from(total_token_1_amount),
            RoundDirection::Floor,
        )
        .ok_or(AmmError::ZeroAmount)?;
        let token_0_amount = u64::try_from(results.token_0_amount)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        let token_1_amount = u64::try_from(results.token_1_amount)
            .map_err(|_| AmmError::ArithmeticOverflow)?;

        // What leaves the vault and what the caller receives differ by the
        // mint's withholding on the way out.
        let transfer_fee_0 = get_transfer_fee(&self.token_0_mint, token_0_amount)?;
        let transfer_fee_1 = get_transfer_fee(&self.token_1_mint, token_1_amount)?;
        let receive_token_0_amount = token_0_amount
            .checked_sub(transfer_fee_0)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let receive_token_1_amount = token_1_amount
            .checked_sub(transfer_fee_1)
            .ok_or(AmmError::ArithmeticOverflow)?;
        require!(
            receive_token_0_amount > 0 || receive_token_1_amount > 0,
            AmmError::ZeroAmount
        );

        require!(
            receive_token_0_amount >= minimum_token_0_amount,
            AmmError::SlippageExceeded
        );
        require!(
            receive_token_1_amount >= minimum_token_1_amount,
            AmmError::SlippageExceeded
        );

        self.burn_lp_tokens(lp_token_amount)?;
        self.pool_state.lp_supply = lp_supply
            .checked_sub(lp_token_amount)
            .ok_or(AmmError::ArithmeticOverflow)?;

        let bump = [self.pool_state.auth_bump];
        let authority_seeds = &[AUTH_SEED, &bump];
        let signer_seeds = &[&authority_seeds[..]];
        transfer_from_pool_vault_to_user(
            self.authority.to_account_info(),
            self.token_0_vault.to_account_info(),
            self.token_0_account.to_account_info(),
            &self.token_0_mint,
            self.token_0_program.to_account_info(),
            signer_seeds,
            token_0_amount,
        )?;
        transfer_from_pool_vault_to_user(
            self.authority.to_account_info(),
            self.token_1_vault.to_account_info(),
            self.token_1_account.to_account_info(),
            &self.token_1_mint,
            self.token_1_program.to_account_info(),
            signer_seeds,
            token_1_amount,
        )?;

        let block_timestamp = u64::try_from(Clock::get()?.unix_timestamp)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        let new_reserve_0 = total_token_0_amount
            .checked_sub(token_0_amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let new_reserve_1 = total_token_1_amount
            .checked_sub(token_1_amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        self.observation_state
            .update(block_timestamp, new_reserve_0, new_reserve_1);

        emit!(LpChangeEvent {
            pool_id: self.pool_state.key(),
            lp_amount_before: lp_supply,
            token_0_vault_before: total_token_0_amount,
            token_1_vault_before: total_token_1_amount,
            token_0_amount,
            token_1_amount,
            token_0_transfer_fee: transfer_fee_0,
            token_1_transfer_fee: transfer_fee_1,
            change_type: 1,
        });

        msg!(
            "Withdrew {} LP -> {} + {} received",
            lp_token_amount,
            receive_token_0_amount,
            receive_token_1_amount
        );

        Ok(())
    }

    fn burn_lp_tokens(&self, amount: u64) -> Result<()> {
        token_interface::burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.lp_mint.to_account_info(),
                    from: self.owner_lp_token.to_account_info(),
                    authority: self.owner.to_account_info(),
                },
            ),
            amount,
        )
    }
}
