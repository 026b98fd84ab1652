use anchor_lang::prelude::*;

use crate::errors::SwitchboardError;

/// Read a keyed PDA that may not exist yet. A never-created account reads as the
/// type's default (false flags, zero fees, zero nonce).
pub fn load_or_default<T: AccountDeserialize + Default>(account: &AccountInfo) -> Result<T> {
    if account.data_is_empty() {
        return Ok(T::default());
    }

    require_keys_eq!(*account.owner, crate::ID, SwitchboardError::InvalidAccountOwner);

    let data = account.try_borrow_data()?;
    T::try_deserialize(&mut &data[..])
}
