use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::constants::*;
use crate::errors::SwitchboardError;
use crate::events::{SwitchboardInitialized, TimeoutSet};
use crate::state::{Role, SwitchboardConfig};
use crate::utils::{
    access::{require_role, RoleGrantAccount},
    funds::{reserve_shortfall, vault_rent_reserve},
};

pub fn initialize(
    ctx: Context<InitializeSwitchboard>,
    chain_slug: u32,
    timeout_in_seconds: u64,
    socket_program: Pubkey,
    execution_manager: Pubkey,
) -> Result<()> {
    require!(chain_slug != 0, SwitchboardError::InvalidChainSlug);
    require_keys_neq!(socket_program, Pubkey::default(), SwitchboardError::ZeroAddress);
    require_keys_neq!(execution_manager, Pubkey::default(), SwitchboardError::ZeroAddress);

    let config = &mut ctx.accounts.config;
    config.owner = ctx.accounts.owner.key();
    config.chain_slug = chain_slug;
    config.timeout_in_seconds = timeout_in_seconds;
    config.socket_program = socket_program;
    config.execution_manager = execution_manager;
    config.global_tripped = false;
    config.locked = false;
    config.bump = ctx.bumps.config;
    config.fee_vault_bump = ctx.bumps.fee_vault;

    // the vault holds its rent-exempt reserve from here on
    let shortfall = reserve_shortfall(ctx.accounts.fee_vault.lamports(), vault_rent_reserve()?);
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.owner.to_account_info(),
                    to: ctx.accounts.fee_vault.to_account_info(),
                },
            ),
            shortfall,
        )?;
    }

    emit!(SwitchboardInitialized {
        owner: config.owner,
        chain_slug,
        timeout_in_seconds,
    });

    msg!("Switchboard initialized for chain: {}", chain_slug);
    Ok(())
}

pub fn set_timeout(ctx: Context<SetTimeout>, timeout_in_seconds: u64) -> Result<()> {
    require_role(
        &RoleGrantAccount::new(ctx.accounts.role_grant.to_account_info()),
        Role::Governance,
        GLOBAL_SCOPE,
        &ctx.accounts.authority.key(),
    )?;

    ctx.accounts.config.timeout_in_seconds = timeout_in_seconds;

    emit!(TimeoutSet { timeout_in_seconds });

    msg!("Timeout set to {} seconds", timeout_in_seconds);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeSwitchboard<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + SwitchboardConfig::SIZE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, SwitchboardConfig>,

    #[account(
        mut,
        seeds = [FEE_VAULT_SEED],
        bump
    )]
    pub fee_vault: SystemAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetTimeout<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwitchboardConfig>,

    /// CHECK: inspected by `RoleGrantAccount`, which only honours live grants owned by this program
    pub role_grant: UncheckedAccount<'info>,

    pub authority: Signer<'info>,
}
