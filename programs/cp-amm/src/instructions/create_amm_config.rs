// Create AMM Config Instruction
//
// Registers a fee schedule at a small integer index. The config address is
// derived from the index, so an occupied index cannot be created twice.

use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
#[instruction(index: u16)]
pub struct CreateAmmConfig<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = ANCHOR_DISCRIMINATOR + AmmConfig::INIT_SPACE,
        seeds = [AMM_CONFIG_SEED, &index.to_be_bytes()],
        bump
    )]
    pub amm_config: Account<'info, AmmConfig>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreateAmmConfig<'info> {
    pub fn create_amm_config(
        &mut self,
        index: u16,
        trade_fee_rate: u64,
        protocol_fee_rate: u64,
        fund_fee_rate: u64,
        create_pool_fee: u64,
        bumps: &CreateAmmConfigBumps,
    ) -> Result<()> {
        AmmConfig::validate_rates(trade_fee_rate, protocol_fee_rate, fund_fee_rate)?;

        self.amm_config.set_inner(AmmConfig {
            bump: bumps.amm_config,
            index,
            trade_fee_rate,
            protocol_fee_rate,
            fund_fee_rate,
            create_pool_fee,
            protocol_owner: self.owner.key(),
            fund_owner: self.owner.key(),
            padding: [0u64; 8],
        });

        msg!(
            "Amm config {} created: trade fee {} ppm, protocol cut {} ppm, fund cut {} ppm",
            index,
            trade_fee_rate,
            protocol_fee_rate,
            fund_fee_rate
        );

        Ok(())
    }
}
