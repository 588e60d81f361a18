use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    #[msg("Fee rate must be below the parts-per-million denominator")]
    InvalidFeeRate,

    #[msg("Protocol and fund carve-outs cannot exceed the collected trade fee")]
    InvalidFeeSplit,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Initial deposit produces zero liquidity after transfer fees")]
    InsufficientInitialLiquidity,

    #[msg("Computed amount violates the caller's slippage bound")]
    SlippageExceeded,

    #[msg("Requested liquidity exceeds the caller's balance or the pool supply")]
    InsufficientSupply,

    #[msg("Amount nets to zero after fees")]
    ZeroAmount,

    #[msg("This operation class is paused for the pool")]
    PoolPaused,

    #[msg("Pool is not open for trading yet")]
    NotApproved,

    #[msg("Only the pool creator can perform this action")]
    UnauthorizedAccess,

    #[msg("Vault account does not belong to this pool")]
    InvalidVault,

    #[msg("Token mints must differ and be supplied in canonical order")]
    InvalidMintOrder,

    #[msg("Status value sets bits beyond the defined operation classes")]
    InvalidStatusFlags,

    #[msg("Arithmetic overflow occurred")]
    ArithmeticOverflow,
}
