// Constant Product AMM Settlement Program
//
// Pools hold two token reserves under a constant product invariant
// (x * y = k) and support mints that withhold a transfer fee in transit.
//
// Instructions:
// - create_amm_config: register a fee schedule at an integer index
// - initialize: create a pool for a canonically ordered mint pair
// - deposit / withdraw: mint or burn liquidity proportionally
// - swap_base_input / swap_base_output: fixed-input and fixed-output swaps
// - update_pool_status: per-operation-class pause toggle
//
// Trade fees are charged on the effective swap input; the protocol and
// fund fees are carved out of the trade fee, the remainder stays in the
// pool. Every rounding direction favors the pool.

use anchor_lang::prelude::*;

pub mod constants;
pub mod curve;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("8c3sXi6u2XJ1EPFHhkDiidERwtCePQ8Met42p2FUyXU3");

#[program]
pub mod cp_amm {
    use super::*;

    pub fn create_amm_config(
        ctx: Context<CreateAmmConfig>,
        index: u16,
        trade_fee_rate: u64,
        protocol_fee_rate: u64,
        fund_fee_rate: u64,
        create_pool_fee: u64,
    ) -> Result<()> {
        ctx.accounts.create_amm_config(
            index,
            trade_fee_rate,
            protocol_fee_rate,
            fund_fee_rate,
            create_pool_fee,
            &ctx.bumps,
        )
    }

    pub fn initialize(
        ctx: Context<Initialize>,
        init_amount_0: u64,
        init_amount_1: u64,
        open_time: u64,
    ) -> Result<()> {
        ctx.accounts
            .initialize(init_amount_0, init_amount_1, open_time, &ctx.bumps)
    }

    pub fn deposit(
        ctx: Context<Deposit>,
        lp_token_amount: u64,
        maximum_token_0_amount: u64,
        maximum_token_1_amount: u64,
    ) -> Result<()> {
        ctx.accounts.deposit(
            lp_token_amount,
            maximum_token_0_amount,
            maximum_token_1_amount,
        )
    }

    pub fn withdraw(
        ctx: Context<Withdraw>,
        lp_token_amount: u64,
        minimum_token_0_amount: u64,
        minimum_token_1_amount: u64,
    ) -> Result<()> {
        ctx.accounts.withdraw(
            lp_token_amount,
            minimum_token_0_amount,
            minimum_token_1_amount,
        )
    }

    pub fn swap_base_input(
        ctx: Context<Swap>,
        amount_in: u64,
        minimum_amount_out: u64,
    ) -> Result<()> {
        ctx.accounts.swap_base_input(amount_in, minimum_amount_out)
    }

    pub fn swap_base_output(
        ctx: Context<Swap>,
        max_amount_in: u64,
        amount_out_less_fee: u64,
    ) -> Result<()> {
        ctx.accounts
            .swap_base_output(max_amount_in, amount_out_less_fee)
    }

    pub fn update_pool_status(ctx: Context<UpdatePoolStatus>, status: u8) -> Result<()> {
        ctx.accounts.update_pool_status(status)
    }
}
