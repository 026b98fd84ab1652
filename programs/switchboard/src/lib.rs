use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod tests;

use instructions::*;
use state::{MinFees, Role, SiblingConfig};
use utils::signature::WatcherSignature;

declare_id!("5wBk9YJ8dT4Jc7z3Lq3mUoJZ8xC4aQmWvZ2n6PZb1tH1");

/// Switchboard validation program
///
/// Gates which cross-chain packets may execute on this chain: watcher-signed,
/// nonce-gated trips at global, path and proposal scope, plus the sibling
/// registry and fee ledger the execution pipeline reads.
#[program]
pub mod switchboard {
    use super::*;

    /// Create the switchboard configuration for this chain
    pub fn initialize(
        ctx: Context<InitializeSwitchboard>,
        chain_slug: u32,
        timeout_in_seconds: u64,
        socket_program: Pubkey,
        execution_manager: Pubkey,
    ) -> Result<()> {
        instructions::initialize::initialize(
            ctx,
            chain_slug,
            timeout_in_seconds,
            socket_program,
            execution_manager,
        )
    }

    /// Update the proposal timeout (governance only)
    pub fn set_timeout(ctx: Context<SetTimeout>, timeout_in_seconds: u64) -> Result<()> {
        instructions::initialize::set_timeout(ctx, timeout_in_seconds)
    }

    /// Grant a role for a scope (owner only)
    pub fn grant_role(
        ctx: Context<GrantRole>,
        role: Role,
        scope: u32,
        grantee: Pubkey,
    ) -> Result<()> {
        instructions::roles::grant_role(ctx, role, scope, grantee)
    }

    /// Revoke a role for a scope (owner only)
    pub fn revoke_role(
        ctx: Context<RevokeRole>,
        role: Role,
        scope: u32,
        grantee: Pubkey,
    ) -> Result<()> {
        instructions::roles::revoke_role(ctx, role, scope, grantee)
    }

    /// Trip the global fuse (trip role)
    pub fn trip_global(
        ctx: Context<SetGlobalTrip>,
        nonce: u64,
        signature: WatcherSignature,
    ) -> Result<()> {
        instructions::trip::set_global_trip(ctx, nonce, signature, true)
    }

    /// Clear the global fuse (untrip role)
    pub fn untrip(
        ctx: Context<SetGlobalTrip>,
        nonce: u64,
        signature: WatcherSignature,
    ) -> Result<()> {
        instructions::trip::set_global_trip(ctx, nonce, signature, false)
    }

    /// Trip a source path (watcher of that source chain)
    pub fn trip_path(
        ctx: Context<SetPathTrip>,
        nonce: u64,
        src_chain_slug: u32,
        signature: WatcherSignature,
    ) -> Result<()> {
        instructions::trip::set_path_trip(ctx, nonce, src_chain_slug, signature, true)
    }

    /// Clear a source path (untrip role)
    pub fn untrip_path(
        ctx: Context<SetPathTrip>,
        nonce: u64,
        src_chain_slug: u32,
        signature: WatcherSignature,
    ) -> Result<()> {
        instructions::trip::set_path_trip(ctx, nonce, src_chain_slug, signature, false)
    }

    /// Trip one proposal (watcher of the packet's origin chain)
    pub fn trip_proposal(
        ctx: Context<SetProposalTrip>,
        nonce: u64,
        packet_id: [u8; 32],
        proposal_count: u64,
        signature: WatcherSignature,
    ) -> Result<()> {
        instructions::trip::set_proposal_trip(
            ctx,
            nonce,
            packet_id,
            proposal_count,
            signature,
            true,
        )
    }

    /// Clear one proposal (untrip role)
    pub fn untrip_proposal(
        ctx: Context<SetProposalTrip>,
        nonce: u64,
        packet_id: [u8; 32],
        proposal_count: u64,
        signature: WatcherSignature,
    ) -> Result<()> {
        instructions::trip::set_proposal_trip(
            ctx,
            nonce,
            packet_id,
            proposal_count,
            signature,
            false,
        )
    }

    /// Set the fee schedule for a destination chain (fees updater of that chain)
    pub fn set_fees(
        ctx: Context<SetFees>,
        nonce: u64,
        dst_chain_slug: u32,
        switchboard_fees: u64,
        verification_overhead_fees: u64,
        signature: WatcherSignature,
    ) -> Result<()> {
        instructions::fees::set_fees(
            ctx,
            nonce,
            dst_chain_slug,
            switchboard_fees,
            verification_overhead_fees,
            signature,
        )
    }

    /// Set only the verification overhead for a destination chain
    pub fn set_execution_overhead(
        ctx: Context<SetExecutionOverhead>,
        nonce: u64,
        dst_chain_slug: u32,
        verification_overhead_fees: u64,
        signature: WatcherSignature,
    ) -> Result<()> {
        instructions::fees::set_execution_overhead(
            ctx,
            nonce,
            dst_chain_slug,
            verification_overhead_fees,
            signature,
        )
    }

    /// Pay fees into the vault (execution manager only)
    pub fn receive_fees(ctx: Context<ReceiveFees>, dst_chain_slug: u32, amount: u64) -> Result<()> {
        instructions::fees::receive_fees(ctx, dst_chain_slug, amount)
    }

    /// Withdraw everything above the vault's rent reserve (withdraw role)
    pub fn withdraw_fees(ctx: Context<WithdrawFees>, to: Pubkey) -> Result<()> {
        instructions::fees::withdraw_fees(ctx, to)
    }

    /// Extract stray lamports or SPL tokens (rescue role)
    pub fn rescue_funds(
        ctx: Context<RescueFunds>,
        token: Pubkey,
        to: Pubkey,
        amount: u64,
    ) -> Result<()> {
        instructions::rescue::rescue_funds(ctx, token, to, amount)
    }

    /// Register or reconfigure a sibling chain (governance)
    pub fn register_sibling_slug(
        ctx: Context<RegisterSiblingSlug>,
        sibling_chain_slug: u32,
        max_packet_length: u64,
        capacitor_type: u8,
        initial_packet_count: u64,
        sibling_switchboard: [u8; 32],
    ) -> Result<()> {
        instructions::sibling::register_sibling_slug(
            ctx,
            sibling_chain_slug,
            max_packet_length,
            capacitor_type,
            initial_packet_count,
            sibling_switchboard,
        )
    }

    /// Repoint a registered sibling's switchboard (governance)
    pub fn update_sibling(
        ctx: Context<UpdateSibling>,
        sibling_chain_slug: u32,
        sibling_switchboard: [u8; 32],
    ) -> Result<()> {
        instructions::sibling::update_sibling(ctx, sibling_chain_slug, sibling_switchboard)
    }

    pub fn get_min_fees(ctx: Context<GetMinFees>, dst_chain_slug: u32) -> Result<MinFees> {
        instructions::views::get_min_fees(ctx, dst_chain_slug)
    }

    pub fn get_nonce(ctx: Context<GetNonce>, signer: Pubkey) -> Result<u64> {
        instructions::views::get_nonce(ctx, signer)
    }

    pub fn is_global_tripped(ctx: Context<ReadConfig>) -> Result<bool> {
        instructions::views::is_global_tripped(ctx)
    }

    pub fn is_path_tripped(ctx: Context<IsPathTripped>, src_chain_slug: u32) -> Result<bool> {
        instructions::views::is_path_tripped(ctx, src_chain_slug)
    }

    pub fn is_proposal_tripped(
        ctx: Context<IsProposalTripped>,
        packet_id: [u8; 32],
        proposal_count: u64,
    ) -> Result<bool> {
        instructions::views::is_proposal_tripped(ctx, packet_id, proposal_count)
    }

    pub fn get_sibling(ctx: Context<GetSibling>, sibling_chain_slug: u32) -> Result<SiblingConfig> {
        instructions::views::get_sibling(ctx, sibling_chain_slug)
    }

    /// Whether a proposal created at `propose_time` is past the configured timeout
    pub fn is_timed_out(ctx: Context<ReadConfig>, propose_time: i64) -> Result<bool> {
        instructions::views::is_timed_out(ctx, propose_time)
    }
}
