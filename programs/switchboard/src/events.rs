use anchor_lang::prelude::*;

use crate::state::Role;

/// Emitted when a source path is tripped or untripped
#[event]
pub struct PathTripped {
    pub src_chain_slug: u32,
    pub tripped: bool,
}

/// Emitted when a single proposal is tripped or untripped
#[event]
pub struct ProposalTripped {
    pub packet_id: [u8; 32],
    pub proposal_count: u64,
    pub tripped: bool,
}

/// Emitted when the global fuse changes
#[event]
pub struct SwitchboardTripped {
    pub tripped: bool,
}

#[event]
pub struct SwitchboardFeesSet {
    pub dst_chain_slug: u32,
    pub switchboard_fees: u64,
    pub verification_overhead_fees: u64,
}

#[event]
pub struct ExecutionOverheadSet {
    pub dst_chain_slug: u32,
    pub verification_overhead_fees: u64,
}

#[event]
pub struct SwitchboardInitialized {
    pub owner: Pubkey,
    pub chain_slug: u32,
    pub timeout_in_seconds: u64,
}

#[event]
pub struct TimeoutSet {
    pub timeout_in_seconds: u64,
}

#[event]
pub struct RoleGranted {
    pub role: Role,
    pub scope: u32,
    pub grantee: Pubkey,
}

#[event]
pub struct RoleRevoked {
    pub role: Role,
    pub scope: u32,
    pub grantee: Pubkey,
}

#[event]
pub struct SiblingRegistered {
    pub sibling_chain_slug: u32,
    pub initial_packet_count: u64,
    pub sibling_switchboard: [u8; 32],
}

#[event]
pub struct SiblingUpdated {
    pub sibling_chain_slug: u32,
    pub sibling_switchboard: [u8; 32],
}

#[event]
pub struct FeesReceived {
    pub dst_chain_slug: u32,
    pub amount: u64,
}

#[event]
pub struct FeesWithdrawn {
    pub to: Pubkey,
    pub amount: u64,
}

#[event]
pub struct FundsRescued {
    pub token: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}
