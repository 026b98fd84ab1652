use anchor_lang::prelude::*;

use crate::{
    constants::{CONFIG_SEED, GLOBAL_SCOPE, ROLE_SEED},
    errors::SwitchboardError,
    events::{RoleGranted, RoleRevoked},
    state::{Role, RoleGrant, SwitchboardConfig},
};

/// Grant `role` for `scope` to `grantee`
#[derive(Accounts)]
#[instruction(role: Role, scope: u32, grantee: Pubkey)]
pub struct GrantRole<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = owner @ SwitchboardError::UnauthorizedAuthority
    )]
    pub config: Account<'info, SwitchboardConfig>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + RoleGrant::SIZE,
        seeds = [
            ROLE_SEED,
            &role.discriminant().to_le_bytes(),
            &scope.to_le_bytes(),
            grantee.as_ref()
        ],
        bump
    )]
    pub role_grant: Account<'info, RoleGrant>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn grant_role(ctx: Context<GrantRole>, role: Role, scope: u32, grantee: Pubkey) -> Result<()> {
    validate_scope(role, scope)?;
    require_keys_neq!(grantee, Pubkey::default(), SwitchboardError::ZeroAddress);

    let grant = &mut ctx.accounts.role_grant;
    grant.role = role;
    grant.scope = scope;
    grant.grantee = grantee;
    grant.active = true;
    grant.bump = ctx.bumps.role_grant;

    emit!(RoleGranted {
        role,
        scope,
        grantee,
    });

    msg!("Granted {:?} for scope {} to {}", role, scope, grantee);
    Ok(())
}

/// Revoke a previously granted role
#[derive(Accounts)]
#[instruction(role: Role, scope: u32, grantee: Pubkey)]
pub struct RevokeRole<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = owner @ SwitchboardError::UnauthorizedAuthority
    )]
    pub config: Account<'info, SwitchboardConfig>,

    #[account(
        mut,
        seeds = [
            ROLE_SEED,
            &role.discriminant().to_le_bytes(),
            &scope.to_le_bytes(),
            grantee.as_ref()
        ],
        bump = role_grant.bump
    )]
    pub role_grant: Account<'info, RoleGrant>,

    pub owner: Signer<'info>,
}

pub fn revoke_role(
    ctx: Context<RevokeRole>,
    role: Role,
    scope: u32,
    grantee: Pubkey,
) -> Result<()> {
    ctx.accounts.role_grant.active = false;

    emit!(RoleRevoked {
        role,
        scope,
        grantee,
    });

    msg!("Revoked {:?} for scope {} from {}", role, scope, grantee);
    Ok(())
}

/// Chain-scoped roles need a real chain slug; global roles only exist in `GLOBAL_SCOPE`
fn validate_scope(role: Role, scope: u32) -> Result<()> {
    if role.is_chain_scoped() {
        require!(scope != GLOBAL_SCOPE, SwitchboardError::InvalidChainSlug);
    } else {
        require!(scope == GLOBAL_SCOPE, SwitchboardError::InvalidChainSlug);
    }
    Ok(())
}
