// Scenario tests against the public curve and fee API, pinned to the
// values the reference harness exercises: ppm rates (10, 1000, 25000) and
// a Token-2022 mint charging a 1% transfer fee capped at 50_000_000.

use anchor_spl::token_2022::spl_token_2022::extension::transfer_fee::TransferFee;
use cp_amm::curve::{CurveCalculator, RoundDirection};
use cp_amm::utils::integer_sqrt;

const TRADE_FEE_RATE: u64 = 10;
const PROTOCOL_FEE_RATE: u64 = 1000;
const FUND_FEE_RATE: u64 = 25000;

const INIT_AMOUNT: u64 = 10_000_000_000;

fn transfer_fee(basis_points: u16, maximum_fee: u64) -> TransferFee {
    TransferFee {
        epoch: 0u64.into(),
        maximum_fee: maximum_fee.into(),
        transfer_fee_basis_points: basis_points.into(),
    }
}

#[test]
fn initialize_on_fee_free_mints_keeps_full_amounts() {
    // A mint without withholding keeps the requested amount in custody.
    let fee = transfer_fee(0, 0).calculate_fee(INIT_AMOUNT).unwrap();
    assert_eq!(fee, 0);
    let effective = INIT_AMOUNT - fee;
    assert_eq!(effective, INIT_AMOUNT);

    // Equal effective deposits bootstrap supply at their geometric mean.
    let liquidity = integer_sqrt(u128::from(effective) * u128::from(effective));
    assert_eq!(liquidity, u128::from(INIT_AMOUNT));
}

#[test]
fn initialize_with_capped_one_percent_transfer_fee() {
    // 1% of 10_000_000_000 would be 100_000_000; the cap wins.
    let fee = transfer_fee(100, 50_000_000)
        .calculate_fee(INIT_AMOUNT)
        .unwrap();
    assert_eq!(fee, 50_000_000);
    let effective = INIT_AMOUNT - fee;
    assert!(effective < INIT_AMOUNT);
    assert_eq!(INIT_AMOUNT - effective, 50_000_000);
}

#[test]
fn uncapped_transfer_fee_takes_the_rate() {
    let fee = transfer_fee(100, u64::MAX).calculate_fee(INIT_AMOUNT).unwrap();
    assert_eq!(fee, 100_000_000);
}

#[test]
fn inverse_transfer_fee_survives_the_withholding() {
    let fee_config = transfer_fee(100, 50_000_000);
    for target in [1u64, 999, 1_000_000, INIT_AMOUNT] {
        let inverse = fee_config.calculate_inverse_fee(target).unwrap();
        let gross = target + inverse;
        let withheld = fee_config.calculate_fee(gross).unwrap();
        assert!(gross - withheld >= target, "target={target}");
    }
}

#[test]
fn zero_geometric_mean_is_unfundable() {
    // floor(sqrt(0 * anything)) = 0: the initialize path must reject this.
    assert_eq!(integer_sqrt(0), 0);
    assert_eq!(integer_sqrt(u128::from(1u64) * u128::from(0u64)), 0);
}

#[test]
fn swap_base_input_with_harness_rates() {
    let result = CurveCalculator::swap_base_input(
        1_000_000_000,
        u128::from(INIT_AMOUNT),
        u128::from(INIT_AMOUNT),
        TRADE_FEE_RATE,
        PROTOCOL_FEE_RATE,
        FUND_FEE_RATE,
    )
    .unwrap();

    assert_eq!(result.trade_fee, 10_000);
    assert_eq!(result.protocol_fee, 10);
    assert_eq!(result.fund_fee, 250);
    assert_eq!(result.destination_amount_swapped, 909_082_644);

    // Every fee unit is accounted for.
    let retained = result.trade_fee - result.protocol_fee - result.fund_fee;
    assert_eq!(retained, 9_740);

    // k grows once the retained fee cut is folded back in.
    let k_before = u128::from(INIT_AMOUNT) * u128::from(INIT_AMOUNT);
    let k_after = (result.new_swap_source_amount - result.protocol_fee - result.fund_fee)
        * result.new_swap_destination_amount;
    assert!(k_after >= k_before);
}

#[test]
fn swap_base_output_reproduces_the_input_leg() {
    // Asking for exactly the output of the fixed-input swap above demands
    // exactly the same gross input.
    let result = CurveCalculator::swap_base_output(
        909_082_644,
        u128::from(INIT_AMOUNT),
        u128::from(INIT_AMOUNT),
        TRADE_FEE_RATE,
        PROTOCOL_FEE_RATE,
        FUND_FEE_RATE,
    )
    .unwrap();
    assert_eq!(result.source_amount_swapped, 1_000_000_000);
}

#[test]
fn deposit_requirement_above_maximum_is_detectable() {
    // 1 LP against supply 3 needs ceil shares on both sides; a caller
    // maximum below that requirement must trip the slippage guard.
    let required = CurveCalculator::lp_tokens_to_trading_tokens(
        1_000,
        3_000,
        INIT_AMOUNT as u128,
        INIT_AMOUNT as u128,
        RoundDirection::Ceiling,
    )
    .unwrap();
    let maximum = required.token_0_amount - 1;
    assert!(required.token_0_amount > maximum);
}

#[test]
fn proportional_round_trip_never_profits() {
    let supply = u128::from(INIT_AMOUNT);
    let lp = 123_456_789u128;
    let paid = CurveCalculator::lp_tokens_to_trading_tokens(
        lp,
        supply,
        u128::from(INIT_AMOUNT),
        u128::from(INIT_AMOUNT),
        RoundDirection::Ceiling,
    )
    .unwrap();
    let received = CurveCalculator::lp_tokens_to_trading_tokens(
        lp,
        supply + lp,
        u128::from(INIT_AMOUNT) + paid.token_0_amount,
        u128::from(INIT_AMOUNT) + paid.token_1_amount,
        RoundDirection::Floor,
    )
    .unwrap();
    assert!(received.token_0_amount <= paid.token_0_amount);
    assert!(received.token_1_amount <= paid.token_1_amount);
}
