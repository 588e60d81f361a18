// Initialize Instruction
//
// Creates the pool for a canonically ordered mint pair, funds both vaults
// (net of each mint's transfer fee), bootstraps the liquidity supply as the
// geometric mean of the effective deposits and writes the first observation.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::Token,
    token_interface::{self, Mint, MintTo, TokenAccount, TokenInterface},
};

use crate::{constants::*, errors::*, events::*, state::*, utils::*};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    pub amm_config: Box<Account<'info, AmmConfig>>,

    /// CHECK: PDA signer over the vaults and the LP mint
    #[account(
        seeds = [AUTH_SEED],
        bump
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        space = ANCHOR_DISCRIMINATOR + PoolState::INIT_SPACE,
        seeds = [
            POOL_SEED,
            amm_config.key().as_ref(),
            token_0_mint.key().as_ref(),
            token_1_mint.key().as_ref(),
        ],
        bump
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    #[account(
        constraint = token_0_mint.key() < token_1_mint.key() @ AmmError::InvalidMintOrder,
        mint::token_program = token_0_program,
    )]
    pub token_0_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mint::token_program = token_1_program)]
    pub token_1_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = creator,
        seeds = [POOL_LP_MINT_SEED, pool_state.key().as_ref()],
        bump,
        mint::decimals = LP_MINT_DECIMALS,
        mint::authority = authority,
        mint::token_program = token_program,
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = token_0_mint,
        token::authority = creator,
    )]
    pub creator_token_0: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = token_1_mint,
        token::authority = creator,
    )]
    pub creator_token_1: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = creator,
        associated_token::mint = lp_mint,
        associated_token::authority = creator,
        associated_token::token_program = token_program,
    )]
    pub creator_lp_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = creator,
        seeds = [POOL_VAULT_SEED, pool_state.key().as_ref(), token_0_mint.key().as_ref()],
        bump,
        token::mint = token_0_mint,
        token::authority = authority,
        token::token_program = token_0_program,
    )]
    pub token_0_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = creator,
        seeds = [POOL_VAULT_SEED, pool_state.key().as_ref(), token_1_mint.key().as_ref()],
        bump,
        token::mint = token_1_mint,
        token::authority = authority,
        token::token_program = token_1_program,
    )]
    pub token_1_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: designated collection account for the schedule's creation fee
    #[account(
        mut,
        address = amm_config.protocol_owner,
    )]
    pub create_pool_fee: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        space = ANCHOR_DISCRIMINATOR + ObservationState::INIT_SPACE,
        seeds = [OBSERVATION_SEED, pool_state.key().as_ref()],
        bump
    )]
    pub observation_state: Box<Account<'info, ObservationState>>,

    pub token_program: Program<'info, Token>,
    pub token_0_program: Interface<'info, TokenInterface>,
    pub token_1_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(
        &mut self,
        init_amount_0: u64,
        init_amount_1: u64,
        open_time: u64,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        require!(init_amount_0 > 0, AmmError::InvalidAmount);
        require!(init_amount_1 > 0, AmmError::InvalidAmount);

        // The vault only keeps what survives the mint's withholding; the
        // effective amounts are the pool's real custody balances and seed
        // the reserves.
        let transfer_fee_0 = get_transfer_fee(&self.token_0_mint, init_amount_0)?;
        let transfer_fee_1 = get_transfer_fee(&self.token_1_mint, init_amount_1)?;
        let effective_amount_0 = init_amount_0
            .checked_sub(transfer_fee_0)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let effective_amount_1 = init_amount_1
            .checked_sub(transfer_fee_1)
            .ok_or(AmmError::ArithmeticOverflow)?;
        require!(
            effective_amount_0 > 0 && effective_amount_1 > 0,
            AmmError::InsufficientInitialLiquidity
        );

        let liquidity = u64::try_from(integer_sqrt(
            u128::from(effective_amount_0)
                .checked_mul(u128::from(effective_amount_1))
                .ok_or(AmmError::ArithmeticOverflow)?,
        ))
        .map_err(|_| AmmError::ArithmeticOverflow)?;
        require!(liquidity > 0, AmmError::InsufficientInitialLiquidity);

        transfer_from_user_to_pool_vault(
            self.creator.to_account_info(),
            self.creator_token_0.to_account_info(),
            self.token_0_vault.to_account_info(),
            &self.token_0_mint,
            self.token_0_program.to_account_info(),
            init_amount_0,
        )?;
        transfer_from_user_to_pool_vault(
            self.creator.to_account_info(),
            self.creator_token_1.to_account_info(),
            self.token_1_vault.to_account_info(),
            &self.token_1_mint,
            self.token_1_program.to_account_info(),
            init_amount_1,
        )?;

        self.mint_lp_tokens(liquidity, bumps.authority)?;

        if self.amm_config.create_pool_fee > 0 {
            system_program::transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    system_program::Transfer {
                        from: self.creator.to_account_info(),
                        to: self.create_pool_fee.to_account_info(),
                    },
                ),
                self.amm_config.create_pool_fee,
            )?;
        }

        let pool_key = self.pool_state.key();
        self.pool_state.initialize(
            bumps.authority,
            liquidity,
            open_time,
            self.creator.key(),
            self.amm_config.key(),
            self.token_0_vault.key(),
            self.token_1_vault.key(),
            &self.token_0_mint,
            &self.token_1_mint,
            self.lp_mint.key(),
            self.observation_state.key(),
        );

        self.observation_state.initialize(pool_key);
        let block_timestamp = u64::try_from(Clock::get()?.unix_timestamp)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        self.observation_state
            .update(block_timestamp, effective_amount_0, effective_amount_1);

        emit!(LpChangeEvent {
            pool_id: pool_key,
            lp_amount_before: 0,
            token_0_vault_before: 0,
            token_1_vault_before: 0,
            token_0_amount: effective_amount_0,
            token_1_amount: effective_amount_1,
            token_0_transfer_fee: transfer_fee_0,
            token_1_transfer_fee: transfer_fee_1,
            change_type: 2,
        });

        msg!(
            "Pool initialized: {} / {}, reserves {} / {}, liquidity {}",
            self.token_0_mint.key(),
            self.token_1_mint.key(),
            effective_amount_0,
            effective_amount_1,
            liquidity
        );

        Ok(())
    }

    fn mint_lp_tokens(&self, amount: u64, auth_bump: u8) -> Result<()> {
        let bump = [auth_bump];
        let authority_seeds = &[AUTH_SEED, &bump];
        let signer_seeds = &[&authority_seeds[..]];

        token_interface::mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.lp_mint.to_account_info(),
                    to: self.creator_lp_token.to_account_info(),
                    authority: self.authority.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )
    }
}
