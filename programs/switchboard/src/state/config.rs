use anchor_lang::prelude::*;

/// Singleton switchboard configuration. Its address is the switchboard identity
/// that every signed digest is bound to.
#[account]
#[derive(Default)]
pub struct SwitchboardConfig {
    /// Access-control owner allowed to grant and revoke roles
    pub owner: Pubkey,

    /// Chain slug of the chain this switchboard runs on
    pub chain_slug: u32,

    /// Seconds after proposal creation at which the execution pipeline may bypass trips
    pub timeout_in_seconds: u64,

    /// Socket program that receives sibling registrations
    pub socket_program: Pubkey,

    /// Only account allowed to pay fees in through `receive_fees`
    pub execution_manager: Pubkey,

    /// Global fuse
    pub global_tripped: bool,

    /// Re-entrancy lock, held for the duration of value transfers and socket calls
    pub locked: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Fee vault PDA bump seed
    pub fee_vault_bump: u8,
}

impl SwitchboardConfig {
    pub const SIZE: usize = 32  // owner
        + 4                     // chain_slug
        + 8                     // timeout_in_seconds
        + 32                    // socket_program
        + 32                    // execution_manager
        + 1                     // global_tripped
        + 1                     // locked
        + 1                     // bump
        + 1;                    // fee_vault_bump

    /// Set the global fuse, returning the previous value
    pub fn set_global_tripped(&mut self, tripped: bool) -> bool {
        std::mem::replace(&mut self.global_tripped, tripped)
    }

    /// Whether a proposal created at `propose_time` has outlived the timeout at `now`
    pub fn is_timed_out(&self, propose_time: i64, now: i64) -> bool {
        let elapsed = now.saturating_sub(propose_time);
        elapsed > 0 && elapsed as u64 > self.timeout_in_seconds
    }
}
