// Swap Base Output Instruction
//
// Fixed-output swap: the requested net receipt is grossed up for the output
// mint's transfer fee, the invariant is solved backwards for the required
// input, and that input is grossed up for the trade fee and the input
// mint's transfer fee.

use anchor_lang::prelude::*;

use crate::{curve::*, errors::*, events::*, utils::*};

use super::swap_base_input::Swap;

impl<'info> Swap<'info> {
    pub fn swap_base_output(&mut self, max_amount_in: u64, amount_out_less_fee: u64) -> Result<()> {
        let block_timestamp = self.check_open()?;
        require!(amount_out_less_fee > 0, AmmError::InvalidAmount);

        let out_transfer_fee =
            get_transfer_inverse_fee(&self.output_token_mint, amount_out_less_fee)?;
        let actual_amount_out = amount_out_less_fee
            .checked_add(out_transfer_fee)
            .ok_or(AmmError::ArithmeticOverflow)?;

        let (trade_direction, total_input_amount, total_output_amount) = self.load_reserves()?;
        let constant_before = u128::from(total_input_amount)
            .checked_mul(u128::from(total_output_amount))
            .ok_or(AmmError::ArithmeticOverflow)?;

        let result = CurveCalculator::swap_base_output(
            u128::from(actual_amount_out),
            u128::from(total_input_amount),
            u128::from(total_output_amount),
            self.amm_config.trade_fee_rate,
            self.amm_config.protocol_fee_rate,
            self.amm_config.fund_fee_rate,
        )
        .ok_or(AmmError::ArithmeticOverflow)?;

        let constant_after = result
            .new_swap_source_amount
            .checked_sub(result.trade_fee)
            .and_then(|v| v.checked_mul(result.new_swap_destination_amount))
            .ok_or(AmmError::ArithmeticOverflow)?;
        require_gte!(constant_after, constant_before);

        let source_amount_swapped = u64::try_from(result.source_amount_swapped)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        require!(source_amount_swapped > 0, AmmError::ZeroAmount);
        let input_transfer_fee =
            get_transfer_inverse_fee(&self.input_token_mint, source_amount_swapped)?;
        let input_transfer_amount = source_amount_swapped
            .checked_add(input_transfer_fee)
            .ok_or(AmmError::ArithmeticOverflow)?;
        require!(
            input_transfer_amount <= max_amount_in,
            AmmError::SlippageExceeded
        );

        let protocol_fee = u64::try_from(result.protocol_fee)
            .map_err(|_| AmmError::ArithmeticOverflow)?;
        let fund_fee =
            u64::try_from(result.fund_fee).map_err(|_| AmmError::ArithmeticOverflow)?;
        self.accrue_fees(trade_direction, protocol_fee, fund_fee)?;

        self.transfer_swap_legs(input_transfer_amount, actual_amount_out)?;

        let new_input_reserve = total_input_amount
            .checked_add(source_amount_swapped)
            .and_then(|v| v.checked_sub(protocol_fee))
            .and_then(|v| v.checked_sub(fund_fee))
            .ok_or(AmmError::ArithmeticOverflow)?;
        let new_output_reserve = total_output_amount
            .checked_sub(actual_amount_out)
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
            input_amount: source_amount_swapped,
            output_amount: actual_amount_out,
            input_transfer_fee,
            output_transfer_fee: out_transfer_fee,
            base_input: false,
        });

        msg!(
            "Swapped {} in (max {}) -> {} received",
            input_transfer_amount,
            max_amount_in,
            amount_out_less_fee
        );

        Ok(())
    }
}
