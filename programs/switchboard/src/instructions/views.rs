use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{
    FeeSchedule, MinFees, PathTrip, ProposalTrip, SiblingConfig, SignerNonce, SwitchboardConfig,
};
use crate::utils::accounts::load_or_default;

// Read-only entrypoints. Keyed accounts may not exist yet; they are passed unchecked
// (address pinned by seeds) and read through `load_or_default`.

pub fn get_min_fees(ctx: Context<GetMinFees>, _dst_chain_slug: u32) -> Result<MinFees> {
    let schedule: FeeSchedule = load_or_default(&ctx.accounts.fee_schedule)?;
    Ok(schedule.min_fees())
}

pub fn get_nonce(ctx: Context<GetNonce>, _signer: Pubkey) -> Result<u64> {
    let ledger: SignerNonce = load_or_default(&ctx.accounts.signer_nonce)?;
    Ok(ledger.next_nonce)
}

pub fn is_global_tripped(ctx: Context<ReadConfig>) -> Result<bool> {
    Ok(ctx.accounts.config.global_tripped)
}

pub fn is_path_tripped(ctx: Context<IsPathTripped>, _src_chain_slug: u32) -> Result<bool> {
    let path: PathTrip = load_or_default(&ctx.accounts.path_trip)?;
    Ok(path.tripped)
}

pub fn is_proposal_tripped(
    ctx: Context<IsProposalTripped>,
    _packet_id: [u8; 32],
    _proposal_count: u64,
) -> Result<bool> {
    let proposal: ProposalTrip = load_or_default(&ctx.accounts.proposal_trip)?;
    Ok(proposal.tripped)
}

pub fn get_sibling(ctx: Context<GetSibling>, _sibling_chain_slug: u32) -> Result<SiblingConfig> {
    load_or_default(&ctx.accounts.sibling)
}

/// Timeout capability for the execution pipeline; trip flags are not consulted here
pub fn is_timed_out(ctx: Context<ReadConfig>, propose_time: i64) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.config.is_timed_out(propose_time, now))
}

#[derive(Accounts)]
pub struct ReadConfig<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwitchboardConfig>,
}

#[derive(Accounts)]
#[instruction(dst_chain_slug: u32)]
pub struct GetMinFees<'info> {
    /// CHECK: possibly uninitialized fee schedule PDA
    #[account(
        seeds = [FEES_SEED, &dst_chain_slug.to_le_bytes()],
        bump
    )]
    pub fee_schedule: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(signer: Pubkey)]
pub struct GetNonce<'info> {
    /// CHECK: possibly uninitialized nonce PDA
    #[account(
        seeds = [NONCE_SEED, signer.as_ref()],
        bump
    )]
    pub signer_nonce: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(src_chain_slug: u32)]
pub struct IsPathTripped<'info> {
    /// CHECK: possibly uninitialized path trip PDA
    #[account(
        seeds = [PATH_TRIP_SEED, &src_chain_slug.to_le_bytes()],
        bump
    )]
    pub path_trip: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(packet_id: [u8; 32], proposal_count: u64)]
pub struct IsProposalTripped<'info> {
    /// CHECK: possibly uninitialized proposal trip PDA
    #[account(
        seeds = [PROPOSAL_TRIP_SEED, packet_id.as_ref(), &proposal_count.to_le_bytes()],
        bump
    )]
    pub proposal_trip: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(sibling_chain_slug: u32)]
pub struct GetSibling<'info> {
    /// CHECK: possibly uninitialized sibling PDA
    #[account(
        seeds = [SIBLING_SEED, &sibling_chain_slug.to_le_bytes()],
        bump
    )]
    pub sibling: UncheckedAccount<'info>,
}
