// Fee math on the parts-per-million base.
//
// The trade fee is charged on the effective swap input and rounds up; the
// protocol and fund fees are carved out of the collected trade fee and round
// down, so the carve-outs can never exceed the collection. The remainder of
// the trade fee stays in the pool reserve.

use crate::constants::FEE_RATE_DENOMINATOR_VALUE;

pub struct Fees {}

fn ceil_div(token_amount: u128, fee_numerator: u128, fee_denominator: u128) -> Option<u128> {
    token_amount
        .checked_mul(fee_numerator)?
        .checked_add(fee_denominator)?
        .checked_sub(1)?
        .checked_div(fee_denominator)
}

fn floor_div(token_amount: u128, fee_numerator: u128, fee_denominator: u128) -> Option<u128> {
    token_amount
        .checked_mul(fee_numerator)?
        .checked_div(fee_denominator)
}

impl Fees {
    /// Trade fee on the effective input amount, rounded up.
    pub fn trading_fee(amount: u128, trade_fee_rate: u64) -> Option<u128> {
        if trade_fee_rate == 0 {
            return Some(0);
        }
        ceil_div(
            amount,
            u128::from(trade_fee_rate),
            u128::from(FEE_RATE_DENOMINATOR_VALUE),
        )
    }

    /// Protocol share of an already-collected trade fee, rounded down.
    pub fn protocol_fee(trade_fee: u128, protocol_fee_rate: u64) -> Option<u128> {
        floor_div(
            trade_fee,
            u128::from(protocol_fee_rate),
            u128::from(FEE_RATE_DENOMINATOR_VALUE),
        )
    }

    /// Fund share of an already-collected trade fee, rounded down.
    pub fn fund_fee(trade_fee: u128, fund_fee_rate: u64) -> Option<u128> {
        floor_div(
            trade_fee,
            u128::from(fund_fee_rate),
            u128::from(FEE_RATE_DENOMINATOR_VALUE),
        )
    }

    /// Smallest gross amount whose post-fee remainder is at least
    /// `post_fee_amount`. Used by fixed-output swaps to work backwards from
    /// the invariant-preserving input to what the trader must supply.
    pub fn calculate_pre_fee_amount(post_fee_amount: u128, trade_fee_rate: u64) -> Option<u128> {
        if trade_fee_rate == 0 {
            return Some(post_fee_amount);
        }
        let numerator = post_fee_amount.checked_mul(u128::from(FEE_RATE_DENOMINATOR_VALUE))?;
        let denominator =
            u128::from(FEE_RATE_DENOMINATOR_VALUE).checked_sub(u128::from(trade_fee_rate))?;
        numerator
            .checked_add(denominator)?
            .checked_sub(1)?
            .checked_div(denominator)
    }
}
