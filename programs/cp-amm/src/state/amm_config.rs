// Fee Schedule State
//
// One AmmConfig exists per small integer index; pools reference the config
// they were created with. Rates are parts per million. The protocol and fund
// rates are carved out of the collected trade fee, never charged on top.

use anchor_lang::prelude::*;

use crate::constants::FEE_RATE_DENOMINATOR_VALUE;
use crate::errors::*;

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct AmmConfig {
    pub bump: u8,
    /// Schedule index; part of the config address derivation.
    pub index: u16,
    /// Fee charged on the effective swap input, in parts per million.
    pub trade_fee_rate: u64,
    /// Share of the trade fee accrued to the protocol, in parts per million.
    pub protocol_fee_rate: u64,
    /// Share of the trade fee accrued to the fund, in parts per million.
    pub fund_fee_rate: u64,
    /// Flat lamport fee charged once when a pool referencing this config
    /// is initialized.
    pub create_pool_fee: u64,
    /// Receives creation fees and may toggle pool status.
    pub protocol_owner: Pubkey,
    pub fund_owner: Pubkey,
    pub padding: [u64; 8],
}

impl AmmConfig {
    pub fn validate_rates(
        trade_fee_rate: u64,
        protocol_fee_rate: u64,
        fund_fee_rate: u64,
    ) -> Result<()> {
        require!(
            trade_fee_rate < FEE_RATE_DENOMINATOR_VALUE,
            AmmError::InvalidFeeRate
        );
        require!(
            protocol_fee_rate <= FEE_RATE_DENOMINATOR_VALUE,
            AmmError::InvalidFeeRate
        );
        require!(
            fund_fee_rate <= FEE_RATE_DENOMINATOR_VALUE,
            AmmError::InvalidFeeRate
        );
        // The carve-outs are fractions of the trade fee; together they may
        // not claim more than what was collected.
        let combined = protocol_fee_rate
            .checked_add(fund_fee_rate)
            .ok_or(AmmError::ArithmeticOverflow)?;
        require!(
            combined <= FEE_RATE_DENOMINATOR_VALUE,
            AmmError::InvalidFeeSplit
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_harness_rates() {
        assert!(AmmConfig::validate_rates(10, 1000, 25000).is_ok());
    }

    #[test]
    fn rejects_trade_fee_at_denominator() {
        assert!(AmmConfig::validate_rates(FEE_RATE_DENOMINATOR_VALUE, 0, 0).is_err());
    }

    #[test]
    fn rejects_carve_outs_over_100_percent() {
        assert!(AmmConfig::validate_rates(2500, 600_000, 500_000).is_err());
    }

    #[test]
    fn accepts_carve_outs_at_exactly_100_percent() {
        assert!(AmmConfig::validate_rates(2500, 600_000, 400_000).is_ok());
    }
}
