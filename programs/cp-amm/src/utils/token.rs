// Token plumbing: transfer-fee inspection and transfer CPIs.
//
// Vault movements always go through transfer_checked so both classic SPL
// and Token-2022 mints are handled; fee inspection reads one snapshot of
// the mint's extension state per call.

use anchor_lang::prelude::*;
use anchor_spl::token::Token;
use anchor_spl::token_2022::spl_token_2022::{
    self,
    extension::{
        transfer_fee::{TransferFeeConfig, MAX_FEE_BASIS_POINTS},
        BaseStateWithExtensions, StateWithExtensions,
    },
};
use anchor_spl::token_interface::{self, Mint, TransferChecked};

use crate::errors::*;

/// Fee a transfer of `pre_fee_amount` will withhold for this mint.
/// Classic SPL mints and Token-2022 mints without the transfer-fee
/// extension report zero.
pub fn get_transfer_fee(
    mint_account: &InterfaceAccount<'_, Mint>,
    pre_fee_amount: u64,
) -> Result<u64> {
    let mint_info = mint_account.to_account_info();
    if *mint_info.owner == Token::id() {
        return Ok(0);
    }
    let mint_data = mint_info.try_borrow_data()?;
    let mint = StateWithExtensions::<spl_token_2022::state::Mint>::unpack(&mint_data)?;

    let fee = if let Ok(transfer_fee_config) = mint.get_extension::<TransferFeeConfig>() {
        transfer_fee_config
            .calculate_epoch_fee(Clock::get()?.epoch, pre_fee_amount)
            .ok_or(AmmError::ArithmeticOverflow)?
    } else {
        0
    };
    Ok(fee)
}

/// Fee to add on top of `post_fee_amount` so that exactly that amount
/// survives the withholding. At the 100% rate the fee is the cap.
pub fn get_transfer_inverse_fee(
    mint_account: &InterfaceAccount<'_, Mint>,
    post_fee_amount: u64,
) -> Result<u64> {
    let mint_info = mint_account.to_account_info();
    if *mint_info.owner == Token::id() {
        return Ok(0);
    }
    let mint_data = mint_info.try_borrow_data()?;
    let mint = StateWithExtensions::<spl_token_2022::state::Mint>::unpack(&mint_data)?;

    let fee = if let Ok(transfer_fee_config) = mint.get_extension::<TransferFeeConfig>() {
        let epoch = Clock::get()?.epoch;
        let transfer_fee = transfer_fee_config.get_epoch_fee(epoch);
        if u16::from(transfer_fee.transfer_fee_basis_points) == MAX_FEE_BASIS_POINTS {
            u64::from(transfer_fee.maximum_fee)
        } else {
            transfer_fee_config
                .calculate_inverse_epoch_fee(epoch, post_fee_amount)
                .ok_or(AmmError::ArithmeticOverflow)?
        }
    } else {
        0
    };
    Ok(fee)
}

pub fn transfer_from_user_to_pool_vault<'info>(
    authority: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to_vault: AccountInfo<'info>,
    mint: &InterfaceAccount<'info, Mint>,
    token_program: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from,
                mint: mint.to_account_info(),
                to: to_vault,
                authority,
            },
        ),
        amount,
        mint.decimals,
    )
}

pub fn transfer_from_pool_vault_to_user<'info>(
    authority: AccountInfo<'info>,
    from_vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    mint: &InterfaceAccount<'info, Mint>,
    token_program: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: from_vault,
                mint: mint.to_account_info(),
                to,
                authority,
            },
            signer_seeds,
        ),
        amount,
        mint.decimals,
    )
}
