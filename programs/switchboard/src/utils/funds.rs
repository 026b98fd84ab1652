use anchor_lang::prelude::*;

use crate::{constants::FEE_VAULT_SPACE, errors::SwitchboardError};

/// Rent-exempt minimum of the fee vault under the current rent sysvar
pub fn vault_rent_reserve() -> Result<u64> {
    Ok(Rent::get()?.minimum_balance(FEE_VAULT_SPACE))
}

/// Lamports the vault holds above its rent-exempt reserve. The reserve is funded at
/// initialization and never leaves the vault, so deposits of any size succeed.
pub fn available_balance(vault_balance: u64, rent_reserve: u64) -> u64 {
    vault_balance.saturating_sub(rent_reserve)
}

/// Validate a withdrawal and return the amount to move: everything above the reserve.
/// Fees are not tracked per destination at this point.
pub fn withdrawal_amount(
    to: &Pubkey,
    recipient: &Pubkey,
    vault_balance: u64,
    rent_reserve: u64,
) -> Result<u64> {
    check_recipient(to, recipient)?;
    Ok(available_balance(vault_balance, rent_reserve))
}

/// Validate a native rescue of `amount` lamports out of the vault. The vault must stay
/// rent exempt afterwards.
pub fn native_rescue_amount(
    to: &Pubkey,
    recipient: &Pubkey,
    vault_balance: u64,
    rent_reserve: u64,
    amount: u64,
) -> Result<u64> {
    check_recipient(to, recipient)?;
    require!(
        amount <= available_balance(vault_balance, rent_reserve),
        SwitchboardError::InsufficientFunds
    );
    Ok(amount)
}

/// Lamports still needed to bring the vault up to its reserve
pub fn reserve_shortfall(vault_balance: u64, rent_reserve: u64) -> u64 {
    rent_reserve.saturating_sub(vault_balance)
}

/// `to` must be non-null and the supplied recipient account must be `to`
pub fn check_recipient(to: &Pubkey, recipient: &Pubkey) -> Result<()> {
    require_keys_neq!(*to, Pubkey::default(), SwitchboardError::ZeroAddress);
    require_keys_eq!(*recipient, *to, SwitchboardError::RecipientMismatch);
    Ok(())
}
