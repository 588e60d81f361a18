// Swap and liquidity calculators.
//
// Pure functions over u128 snapshots of the pool reserves; the instruction
// handlers commit the results atomically. All failures surface as None and
// map to ArithmeticOverflow at the boundary unless a more specific guard
// fired first.

use crate::curve::constant_product::ConstantProductCurve;
use crate::curve::fees::Fees;

/// Direction of a swap relative to the canonical token ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeDirection {
    /// Input token 0, output token 1.
    ZeroForOne,
    /// Input token 1, output token 0.
    OneForZero,
}

impl TradeDirection {
    pub fn opposite(&self) -> TradeDirection {
        match self {
            TradeDirection::ZeroForOne => TradeDirection::OneForZero,
            TradeDirection::OneForZero => TradeDirection::ZeroForOne,
        }
    }
}

/// Rounding applied when converting liquidity to trading tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundDirection {
    /// Used on withdraw: the depositor receives the floor.
    Floor,
    /// Used on deposit: the depositor pays the ceiling.
    Ceiling,
}

#[derive(Debug, PartialEq, Eq)]
pub struct SwapResult {
    /// Source reserve after the swap, gross of the retained trade fee and
    /// before the protocol/fund carve-outs are excluded.
    pub new_swap_source_amount: u128,
    /// Destination reserve after the swap.
    pub new_swap_destination_amount: u128,
    /// Amount entering the source vault, trade fee included.
    pub source_amount_swapped: u128,
    /// Amount leaving the destination vault.
    pub destination_amount_swapped: u128,
    pub trade_fee: u128,
    pub protocol_fee: u128,
    pub fund_fee: u128,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TradingTokenResult {
    pub token_0_amount: u128,
    pub token_1_amount: u128,
}

pub struct CurveCalculator {}

impl CurveCalculator {
    /// Fixed-input swap: decompose the trade fee out of the effective input,
    /// run the invariant on the remainder.
    pub fn swap_base_input(
        source_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        trade_fee_rate: u64,
        protocol_fee_rate: u64,
        fund_fee_rate: u64,
    ) -> Option<SwapResult> {
        let trade_fee = Fees::trading_fee(source_amount, trade_fee_rate)?;
        let protocol_fee = Fees::protocol_fee(trade_fee, protocol_fee_rate)?;
        let fund_fee = Fees::fund_fee(trade_fee, fund_fee_rate)?;

        let source_amount_less_fees = source_amount.checked_sub(trade_fee)?;
        let destination_amount_swapped = ConstantProductCurve::swap_base_input_without_fees(
            source_amount_less_fees,
            swap_source_amount,
            swap_destination_amount,
        )?;

        Some(SwapResult {
            new_swap_source_amount: swap_source_amount.checked_add(source_amount)?,
            new_swap_destination_amount: swap_destination_amount
                .checked_sub(destination_amount_swapped)?,
            source_amount_swapped: source_amount,
            destination_amount_swapped,
            trade_fee,
            protocol_fee,
            fund_fee,
        })
    }

    /// Fixed-output swap: solve the invariant for the required input, then
    /// gross it up for the trade fee.
    pub fn swap_base_output(
        destination_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
        trade_fee_rate: u64,
        protocol_fee_rate: u64,
        fund_fee_rate: u64,
    ) -> Option<SwapResult> {
        let source_amount_swapped = ConstantProductCurve::swap_base_output_without_fees(
            destination_amount,
            swap_source_amount,
            swap_destination_amount,
        )?;
        let source_amount = Fees::calculate_pre_fee_amount(source_amount_swapped, trade_fee_rate)?;
        let trade_fee = source_amount.checked_sub(source_amount_swapped)?;
        let protocol_fee = Fees::protocol_fee(trade_fee, protocol_fee_rate)?;
        let fund_fee = Fees::fund_fee(trade_fee, fund_fee_rate)?;

        Some(SwapResult {
            new_swap_source_amount: swap_source_amount.checked_add(source_amount)?,
            new_swap_destination_amount: swap_destination_amount
                .checked_sub(destination_amount)?,
            source_amount_swapped: source_amount,
            destination_amount_swapped: destination_amount,
            trade_fee,
            protocol_fee,
            fund_fee,
        })
    }

    /// Proportional share of the reserves for `lp_token_amount` of the
    /// supply. Ceiling rounding makes a depositor pay the extra remainder
    /// unit; floor rounding makes a withdrawer forfeit it.
    pub fn lp_tokens_to_trading_tokens(
        lp_token_amount: u128,
        lp_token_supply: u128,
        swap_token_0_amount: u128,
        swap_token_1_amount: u128,
        round_direction: RoundDirection,
    ) -> Option<TradingTokenResult> {
        if lp_token_supply == 0 {
            return None;
        }
        let raw_0 = lp_token_amount.checked_mul(swap_token_0_amount)?;
        let raw_1 = lp_token_amount.checked_mul(swap_token_1_amount)?;
        let mut token_0_amount = raw_0.checked_div(lp_token_supply)?;
        let mut token_1_amount = raw_1.checked_div(lp_token_supply)?;
        if round_direction == RoundDirection::Ceiling {
            if raw_0.checked_rem(lp_token_supply)? > 0 {
                token_0_amount = token_0_amount.checked_add(1)?;
            }
            if raw_1.checked_rem(lp_token_supply)? > 0 {
                token_1_amount = token_1_amount.checked_add(1)?;
            }
        }
        Some(TradingTokenResult {
            token_0_amount,
            token_1_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TRADE_FEE_RATE: u64 = 2500;
    const PROTOCOL_FEE_RATE: u64 = 120_000;
    const FUND_FEE_RATE: u64 = 40_000;

    #[test]
    fn fee_decomposition_conserves_every_unit() {
        let result = CurveCalculator::swap_base_input(
            1_000_000,
            50_000_000,
            50_000_000,
            TRADE_FEE_RATE,
            PROTOCOL_FEE_RATE,
            FUND_FEE_RATE,
        )
        .unwrap();
        let retained = result.trade_fee - result.protocol_fee - result.fund_fee;
        assert_eq!(
            result.trade_fee,
            result.protocol_fee + result.fund_fee + retained
        );
        assert!(result.protocol_fee + result.fund_fee <= result.trade_fee);
    }

    #[test]
    fn zero_fee_swap_keeps_full_input_on_curve() {
        let result =
            CurveCalculator::swap_base_input(1_000, 10_000, 10_000, 0, 0, 0).unwrap();
        assert_eq!(result.trade_fee, 0);
        assert_eq!(result.destination_amount_swapped, 909);
    }

    #[test]
    fn deposit_rounds_up_withdraw_rounds_down() {
        let up = CurveCalculator::lp_tokens_to_trading_tokens(
            10,
            3,
            100,
            200,
            RoundDirection::Ceiling,
        )
        .unwrap();
        let down = CurveCalculator::lp_tokens_to_trading_tokens(
            10,
            3,
            100,
            200,
            RoundDirection::Floor,
        )
        .unwrap();
        assert_eq!(up.token_0_amount, 334);
        assert_eq!(down.token_0_amount, 333);
        assert_eq!(up.token_1_amount, 667);
        assert_eq!(down.token_1_amount, 666);
    }

    #[test]
    fn zero_supply_is_rejected() {
        assert!(CurveCalculator::lp_tokens_to_trading_tokens(
            1,
            0,
            100,
            100,
            RoundDirection::Floor
        )
        .is_none());
    }

    proptest! {
        #[test]
        fn swap_invariant_is_monotone_with_fees(
            x in 1_000u64..=(1u64 << 56),
            y in 1_000u64..=(1u64 << 56),
            dx in 1u64..=(1u64 << 56),
        ) {
            let result = CurveCalculator::swap_base_input(
                u128::from(dx),
                u128::from(x),
                u128::from(y),
                TRADE_FEE_RATE,
                PROTOCOL_FEE_RATE,
                FUND_FEE_RATE,
            ).unwrap();
            let k_before = u128::from(x) * u128::from(y);
            // The carve-outs leave the reserves; the retained cut stays.
            let new_x = result.new_swap_source_amount
                - result.protocol_fee
                - result.fund_fee;
            let k_after = new_x * result.new_swap_destination_amount;
            prop_assert!(k_after >= k_before);
        }

        #[test]
        fn swap_round_trip_never_favors_trader(
            x in 1_000u64..=(1u64 << 40),
            y in 1_000u64..=(1u64 << 40),
            dx in 10u64..=(1u64 << 40),
        ) {
            let input = CurveCalculator::swap_base_input(
                u128::from(dx),
                u128::from(x),
                u128::from(y),
                TRADE_FEE_RATE,
                PROTOCOL_FEE_RATE,
                FUND_FEE_RATE,
            ).unwrap();
            prop_assume!(input.destination_amount_swapped > 0);
            // Ask the fixed-output path for exactly what the fixed-input
            // path produced, against the same starting reserves. It returns
            // the minimal input, so it can never demand more than dx.
            let output = CurveCalculator::swap_base_output(
                input.destination_amount_swapped,
                u128::from(x),
                u128::from(y),
                TRADE_FEE_RATE,
                PROTOCOL_FEE_RATE,
                FUND_FEE_RATE,
            ).unwrap();
            prop_assert!(output.source_amount_swapped <= u128::from(dx));
            // And the minimal input still buys at least the requested
            // output; the gap between the two is rounding the pool keeps.
            let replay = CurveCalculator::swap_base_input(
                output.source_amount_swapped,
                u128::from(x),
                u128::from(y),
                TRADE_FEE_RATE,
                PROTOCOL_FEE_RATE,
                FUND_FEE_RATE,
            ).unwrap();
            prop_assert!(
                replay.destination_amount_swapped >= input.destination_amount_swapped
            );
        }

        #[test]
        fn fee_conservation_holds_for_all_inputs(
            x in 1_000u64..=(1u64 << 56),
            y in 1_000u64..=(1u64 << 56),
            dx in 1u64..=(1u64 << 56),
        ) {
            let result = CurveCalculator::swap_base_input(
                u128::from(dx),
                u128::from(x),
                u128::from(y),
                TRADE_FEE_RATE,
                PROTOCOL_FEE_RATE,
                FUND_FEE_RATE,
            ).unwrap();
            prop_assert!(result.protocol_fee + result.fund_fee <= result.trade_fee);
            prop_assert_eq!(
                result.trade_fee,
                result.protocol_fee
                    + result.fund_fee
                    + (result.trade_fee - result.protocol_fee - result.fund_fee)
            );
        }

        #[test]
        fn deposit_then_withdraw_never_pays_out_more(
            supply in 1_000u64..=(1u64 << 48),
            r0 in 1_000u64..=(1u64 << 48),
            r1 in 1_000u64..=(1u64 << 48),
            lp in 1u64..=(1u64 << 48),
        ) {
            let paid = CurveCalculator::lp_tokens_to_trading_tokens(
                u128::from(lp),
                u128::from(supply),
                u128::from(r0),
                u128::from(r1),
                RoundDirection::Ceiling,
            ).unwrap();
            // Same LP amount immediately withdrawn against the grown reserves.
            let received = CurveCalculator::lp_tokens_to_trading_tokens(
                u128::from(lp),
                u128::from(supply) + u128::from(lp),
                u128::from(r0) + paid.token_0_amount,
                u128::from(r1) + paid.token_1_amount,
                RoundDirection::Floor,
            ).unwrap();
            prop_assert!(received.token_0_amount <= paid.token_0_amount);
            prop_assert!(received.token_1_amount <= paid.token_1_amount);
        }
    }
}
