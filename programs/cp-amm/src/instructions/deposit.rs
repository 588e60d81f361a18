// Deposit Instruction
//
// Mints a requested amount of liquidity against a proportional share of the
// current reserves. Each side is grossed up for the destination mint's
// transfer fee so the vault gains exactly the proportional share.

use anchor_lang::prelude::*;
use anchor_spl::{
    token::Token,
    token_interface::{self, Mint, MintTo, TokenAccount, TokenInterface},
};

use crate::{constants::*, curve::*, errors::*, events::*, state::*, utils::*};

#[derive(Accounts)]
pub struct Deposit<'info> {
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
        token::mint = lp_mint,
        token::authority = owner,
    )]
    pub owner_lp_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool_state.observation_key
    )]
    pub observation_state: Box<Account<'info, ObservationState>>,

    pub token_program: Program<'info, Token>,
    pub token_0_program: Interface<'info, TokenInterface>,
    pub token_1_program: Interface<'info, TokenInterface>,
}

impl<'info> Deposit<'info> {
    pub fn deposit(
        &mut self,
        lp_token_amount: u64,
        maximum_token_0_amount: u64,
        maximum_token_1_amount: u64,
    ) -> Result<()> {
        require!(lp_token_amount > 0, AmmError::InvalidAmount);
        self.pool_state.assert_not_paused(PoolStatusBitIndex::Deposit)?;

        let (total_token_0_amount, total_token_1_amount) = self
            .pool_state
            .vault_amount_without_fee(self.token_0_vault.amount, self.token_1_vault.amount)?;
        let lp_supply = self.pool_state.lp_supply;

        let results = CurveCalculator::lp_tokens_to_trading_tokens(
            u128::from(lp_token_amount),
            u128::from(lp_supply),
            u128::from(total_token_0_amount),
            u128::from(total_token_1_amount),
            RoundDirection::Ceiling,
        )
        .ok_or(AmmError::ZeroAmount)?;
        let token_0_amount = u64::try_from(results.token_0_amount)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        let token_1_amount = u64::try_from(results.token_1_amount)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        require!(
            token_0_amount > 0 && token_1_amount > 0,
            AmmError::ZeroAmount
        );

        // Gross each leg up so the vault still gains the full proportional
        // share after the mint withholds its transfer fee.
        let transfer_fee_0 = get_transfer_inverse_fee(&self.token_0_mint, token_0_amount)?;
        let transfer_fee_1 = get_transfer_inverse_fee(&self.token_1_mint, token_1_amount)?;
        let transfer_token_0_amount = token_0_amount
            .checked_add(transfer_fee_0)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let transfer_token_1_amount = token_1_amount
            .checked_add(transfer_fee_1)
            .ok_or(AmmError::ArithmeticOverflow)?;

        require!(
            transfer_token_0_amount <= maximum_token_0_amount,
            AmmError::SlippageExceeded
        );
        require!(
            transfer_token_1_amount <= maximum_token_1_amount,
            AmmError::SlippageExceeded
        );

        transfer_from_user_to_pool_vault(
            self.owner.to_account_info(),
            self.token_0_account.to_account_info(),
            self.token_0_vault.to_account_info(),
            &self.token_0_mint,
            self.token_0_program.to_account_info(),
            transfer_token_0_amount,
        )?;
        transfer_from_user_to_pool_vault(
            self.owner.to_account_info(),
            self.token_1_account.to_account_info(),
            self.token_1_vault.to_account_info(),
            &self.token_1_mint,
            self.token_1_program.to_account_info(),
            transfer_token_1_amount,
        )?;

        self.pool_state.lp_supply = lp_supply
            .checked_add(lp_token_amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        self.mint_lp_tokens(lp_token_amount)?;

        let block_timestamp = u64::try_from(Clock::get()?.unix_timestamp)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        let new_reserve_0 = total_token_0_amount
            .checked_add(token_0_amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let new_reserve_1 = total_token_1_amount
            .checked_add(token_1_amount)
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
            change_type: 0,
        });

        msg!(
            "Deposited {} + {} -> {} LP",
            transfer_token_0_amount,
            transfer_token_1_amount,
            lp_token_amount
        );

        Ok(())
    }

    fn mint_lp_tokens(&self, amount: u64) -> Result<()> {
        let bump = [self.pool_state.auth_bump];
        let authority_seeds = &[AUTH_SEED, &bump];
        let signer_seeds = &[&authority_seeds[..]];

        token_interface::mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.lp_mint.to_account_info(),
                    to: self.owner_lp_token.to_account_info(),
                    authority: self.authority.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )
    }
}
