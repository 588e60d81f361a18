// Update Pool Status Instruction
//
// Creator-gated pause toggle over the three operation classes.

use anchor_lang::prelude::*;

use crate::{errors::*, state::*};

#[derive(Accounts)]
pub struct UpdatePoolStatus<'info> {
    pub owner: Signer<'info>,

    #[account(mut)]
    pub pool_state: Account<'info, PoolState>,
}

impl<'info> UpdatePoolStatus<'info> {
    pub fn update_pool_status(&mut self, status: u8) -> Result<()> {
        require!(status <= 7, AmmError::InvalidStatusFlags);
        self.pool_state.assert_is_creator(&self.owner.key())?;
        self.pool_state.set_status(status);
        msg!("Pool status set to {:#05b}", status);
        Ok(())
    }
}
