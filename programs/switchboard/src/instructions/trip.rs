use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::ID as INSTRUCTIONS_SYSVAR_ID;

use crate::constants::*;
use crate::errors::SwitchboardError;
use crate::events::{PathTripped, ProposalTripped, SwitchboardTripped};
use crate::state::{PathTrip, ProposalTrip, SignerNonce, SwitchboardConfig};
use crate::utils::{
    authorize::Authorizer,
    digest::SignedAction,
    packet::packet_origin_chain,
    signature::WatcherSignature,
};

/// Trip (`tripped = true`) or clear the global fuse
pub fn set_global_trip(
    ctx: Context<SetGlobalTrip>,
    nonce: u64,
    signature: WatcherSignature,
    tripped: bool,
) -> Result<()> {
    let action = if tripped {
        SignedAction::TripGlobal
    } else {
        SignedAction::UntripGlobal
    };

    let authorizer = Authorizer::from_accounts(
        &ctx.accounts.config,
        ctx.accounts.role_grant.to_account_info(),
        ctx.accounts.instructions.to_account_info(),
    );

    ctx.accounts
        .signer_nonce
        .bind(signature.signer, ctx.bumps.signer_nonce);
    let signer = authorizer.authorize(&mut ctx.accounts.signer_nonce, &action, nonce, &signature)?;

    ctx.accounts.config.set_global_tripped(tripped);

    emit!(SwitchboardTripped { tripped });

    msg!("Global fuse set to {} by {}", tripped, signer);
    Ok(())
}

/// Trip or clear the flag for one source chain
pub fn set_path_trip(
    ctx: Context<SetPathTrip>,
    nonce: u64,
    src_chain_slug: u32,
    signature: WatcherSignature,
    tripped: bool,
) -> Result<()> {
    require!(src_chain_slug != 0, SwitchboardError::InvalidChainSlug);

    let action = if tripped {
        SignedAction::TripPath { src_chain_slug }
    } else {
        SignedAction::UntripPath { src_chain_slug }
    };

    let authorizer = Authorizer::from_accounts(
        &ctx.accounts.config,
        ctx.accounts.role_grant.to_account_info(),
        ctx.accounts.instructions.to_account_info(),
    );

    ctx.accounts
        .signer_nonce
        .bind(signature.signer, ctx.bumps.signer_nonce);
    let signer = authorizer.authorize(&mut ctx.accounts.signer_nonce, &action, nonce, &signature)?;

    ctx.accounts
        .path_trip
        .apply(src_chain_slug, tripped, ctx.bumps.path_trip);

    emit!(PathTripped {
        src_chain_slug,
        tripped,
    });

    msg!(
        "Path from chain {} set to tripped={} by {}",
        src_chain_slug,
        tripped,
        signer
    );
    Ok(())
}

/// Trip or clear the flag for one proposal. The watcher scope is the packet's
/// origin chain, decoded from the packet id.
pub fn set_proposal_trip(
    ctx: Context<SetProposalTrip>,
    nonce: u64,
    packet_id: [u8; 32],
    proposal_count: u64,
    signature: WatcherSignature,
    tripped: bool,
) -> Result<()> {
    require!(
        packet_origin_chain(&packet_id) != 0,
        SwitchboardError::InvalidChainSlug
    );

    let action = if tripped {
        SignedAction::TripProposal {
            packet_id,
            proposal_count,
        }
    } else {
        SignedAction::UntripProposal {
            packet_id,
            proposal_count,
        }
    };

    let authorizer = Authorizer::from_accounts(
        &ctx.accounts.config,
        ctx.accounts.role_grant.to_account_info(),
        ctx.accounts.instructions.to_account_info(),
    );

    ctx.accounts
        .signer_nonce
        .bind(signature.signer, ctx.bumps.signer_nonce);
    let signer = authorizer.authorize(&mut ctx.accounts.signer_nonce, &action, nonce, &signature)?;

    ctx.accounts
        .proposal_trip
        .apply(packet_id, proposal_count, tripped, ctx.bumps.proposal_trip);

    emit!(ProposalTripped {
        packet_id,
        proposal_count,
        tripped,
    });

    msg!(
        "Proposal {} of packet from chain {} set to tripped={} by {}",
        proposal_count,
        packet_origin_chain(&packet_id),
        tripped,
        signer
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(nonce: u64, signature: WatcherSignature)]
pub struct SetGlobalTrip<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwitchboardConfig>,

    #[account(
        init_if_needed,
        payer = relayer,
        space = 8 + SignerNonce::SIZE,
        seeds = [NONCE_SEED, signature.signer.as_ref()],
        bump
    )]
    pub signer_nonce: Account<'info, SignerNonce>,

    /// CHECK: inspected by `RoleGrantAccount`, which only honours live grants owned by this program
    pub role_grant: UncheckedAccount<'info>,

    /// CHECK: constrained to the instructions sysvar
    #[account(address = INSTRUCTIONS_SYSVAR_ID)]
    pub instructions: UncheckedAccount<'info>,

    #[account(mut)]
    pub relayer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(nonce: u64, src_chain_slug: u32, signature: WatcherSignature)]
pub struct SetPathTrip<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwitchboardConfig>,

    #[account(
        init_if_needed,
        payer = relayer,
        space = 8 + SignerNonce::SIZE,
        seeds = [NONCE_SEED, signature.signer.as_ref()],
        bump
    )]
    pub signer_nonce: Account<'info, SignerNonce>,

    #[account(
        init_if_needed,
        payer = relayer,
        space = 8 + PathTrip::SIZE,
        seeds = [PATH_TRIP_SEED, &src_chain_slug.to_le_bytes()],
        bump
    )]
    pub path_trip: Account<'info, PathTrip>,

    /// CHECK: inspected by `RoleGrantAccount`, which only honours live grants owned by this program
    pub role_grant: UncheckedAccount<'info>,

    /// CHECK: constrained to the instructions sysvar
    #[account(address = INSTRUCTIONS_SYSVAR_ID)]
    pub instructions: UncheckedAccount<'info>,

    #[account(mut)]
    pub relayer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(nonce: u64, packet_id: [u8; 32], proposal_count: u64, signature: WatcherSignature)]
pub struct SetProposalTrip<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwitchboardConfig>,

    #[account(
        init_if_needed,
        payer = relayer,
        space = 8 + SignerNonce::SIZE,
        seeds = [NONCE_SEED, signature.signer.as_ref()],
        bump
    )]
    pub signer_nonce: Account<'info, SignerNonce>,

    #[account(
        init_if_needed,
        payer = relayer,
        space = 8 + ProposalTrip::SIZE,
        seeds = [PROPOSAL_TRIP_SEED, packet_id.as_ref(), &proposal_count.to_le_bytes()],
        bump
    )]
    pub proposal_trip: Account<'info, ProposalTrip>,

    /// CHECK: inspected by `RoleGrantAccount`, which only honours live grants owned by this program
    pub role_grant: UncheckedAccount<'info>,

    /// CHECK: constrained to the instructions sysvar
    #[account(address = INSTRUCTIONS_SYSVAR_ID)]
    pub instructions: UncheckedAccount<'info>,

    #[account(mut)]
    pub relayer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
