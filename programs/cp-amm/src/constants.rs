// AMM Program Constants

pub const AMM_CONFIG_SEED: &[u8] = b"amm_config";
pub const AUTH_SEED: &[u8] = b"vault_and_lp_mint_auth_seed";
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const POOL_LP_MINT_SEED: &[u8] = b"pool_lp_mint";
pub const OBSERVATION_SEED: &[u8] = b"observation";

/// All fee rates are expressed in parts per million of this denominator.
/// A trade_fee_rate of 2500 is 0.25%.
pub const FEE_RATE_DENOMINATOR_VALUE: u64 = 1_000_000;

pub const LP_MINT_DECIMALS: u8 = 9;
pub const ANCHOR_DISCRIMINATOR: usize = 8;
