use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::SwitchboardError;
use crate::events::{SiblingRegistered, SiblingUpdated};
use crate::state::{Role, SiblingConfig, SiblingRegistration, SwitchboardConfig};
use crate::utils::{
    access::{require_role, RoleGrantAccount},
    guard::ReentrancyGuard,
    socket::{self, SocketCpi},
};

/// Register (or reconfigure) a sibling chain and forward it to the socket
pub fn register_sibling_slug(
    ctx: Context<RegisterSiblingSlug>,
    sibling_chain_slug: u32,
    max_packet_length: u64,
    capacitor_type: u8,
    initial_packet_count: u64,
    sibling_switchboard: [u8; 32],
) -> Result<()> {
    require_role(
        &RoleGrantAccount::new(ctx.accounts.role_grant.to_account_info()),
        Role::Governance,
        GLOBAL_SCOPE,
        &ctx.accounts.authority.key(),
    )?;

    let registration = SiblingRegistration {
        sibling_chain_slug,
        max_packet_length,
        capacitor_type,
        initial_packet_count,
        sibling_switchboard,
    };

    let router = SocketCpi {
        socket_program: ctx.accounts.socket_program.to_account_info(),
        socket_state: ctx.accounts.socket_state.to_account_info(),
        switchboard: ctx.accounts.config.to_account_info(),
        switchboard_bump: ctx.accounts.config.bump,
    };
    let bump = ctx.bumps.sibling;

    let _guard = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    socket::register_sibling(&router, &mut ctx.accounts.sibling, &registration, bump)?;

    emit!(SiblingRegistered {
        sibling_chain_slug,
        initial_packet_count,
        sibling_switchboard,
    });

    msg!(
        "Registered sibling chain {} with initial packet count {}",
        sibling_chain_slug,
        initial_packet_count
    );
    Ok(())
}

/// Repoint the switchboard address of a registered sibling
pub fn update_sibling(
    ctx: Context<UpdateSibling>,
    sibling_chain_slug: u32,
    sibling_switchboard: [u8; 32],
) -> Result<()> {
    require_role(
        &RoleGrantAccount::new(ctx.accounts.role_grant.to_account_info()),
        Role::Governance,
        GLOBAL_SCOPE,
        &ctx.accounts.authority.key(),
    )?;

    let router = SocketCpi {
        socket_program: ctx.accounts.socket_program.to_account_info(),
        socket_state: ctx.accounts.socket_state.to_account_info(),
        switchboard: ctx.accounts.config.to_account_info(),
        switchboard_bump: ctx.accounts.config.bump,
    };

    let _guard = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    socket::update_sibling(
        &router,
        &mut ctx.accounts.sibling,
        sibling_chain_slug,
        sibling_switchboard,
    )?;

    emit!(SiblingUpdated {
        sibling_chain_slug,
        sibling_switchboard,
    });

    msg!("Updated switchboard for sibling chain {}", sibling_chain_slug);
    Ok(())
}

#[derive(Accounts)]
#[instruction(sibling_chain_slug: u32)]
pub struct RegisterSiblingSlug<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwitchboardConfig>,

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + SiblingConfig::SIZE,
        seeds = [SIBLING_SEED, &sibling_chain_slug.to_le_bytes()],
        bump
    )]
    pub sibling: Account<'info, SiblingConfig>,

    /// CHECK: inspected by `RoleGrantAccount`, which only honours live grants owned by this program
    pub role_grant: UncheckedAccount<'info>,

    /// CHECK: must be the socket program fixed at initialization
    #[account(address = config.socket_program @ SwitchboardError::InvalidSocketProgram)]
    pub socket_program: UncheckedAccount<'info>,

    /// CHECK: socket-owned state, validated by the socket program
    #[account(mut)]
    pub socket_state: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(sibling_chain_slug: u32)]
pub struct UpdateSibling<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwitchboardConfig>,

    // created empty when missing so the handler can fail with `SiblingNotRegistered`
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + SiblingConfig::SIZE,
        seeds = [SIBLING_SEED, &sibling_chain_slug.to_le_bytes()],
        bump
    )]
    pub sibling: Account<'info, SiblingConfig>,

    /// CHECK: inspected by `RoleGrantAccount`, which only honours live grants owned by this program
    pub role_grant: UncheckedAccount<'info>,

    /// CHECK: must be the socket program fixed at initialization
    #[account(address = config.socket_program @ SwitchboardError::InvalidSocketProgram)]
    pub socket_program: UncheckedAccount<'info>,

    /// CHECK: socket-owned state, validated by the socket program
    #[account(mut)]
    pub socket_state: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
