use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::ID as INSTRUCTIONS_SYSVAR_ID;
use anchor_lang::system_program::{self, Transfer};

use crate::constants::*;
use crate::errors::SwitchboardError;
use crate::events::{ExecutionOverheadSet, FeesReceived, FeesWithdrawn, SwitchboardFeesSet};
use crate::state::{FeeSchedule, Role, SignerNonce, SwitchboardConfig};
use crate::utils::{
    access::{require_role, RoleGrantAccount},
    authorize::Authorizer,
    digest::SignedAction,
    funds::{vault_rent_reserve, withdrawal_amount},
    guard::ReentrancyGuard,
    signature::WatcherSignature,
};

pub fn set_fees(
    ctx: Context<SetFees>,
    nonce: u64,
    dst_chain_slug: u32,
    switchboard_fees: u64,
    verification_overhead_fees: u64,
    signature: WatcherSignature,
) -> Result<()> {
    require!(dst_chain_slug != 0, SwitchboardError::InvalidChainSlug);

    let action = SignedAction::SetFees {
        dst_chain_slug,
        switchboard_fees,
        verification_overhead_fees,
    };

    let authorizer = Authorizer::from_accounts(
        &ctx.accounts.config,
        ctx.accounts.role_grant.to_account_info(),
        ctx.accounts.instructions.to_account_info(),
    );

    ctx.accounts
        .signer_nonce
        .bind(signature.signer, ctx.bumps.signer_nonce);
    authorizer.authorize(&mut ctx.accounts.signer_nonce, &action, nonce, &signature)?;

    ctx.accounts.fee_schedule.set_fees(
        dst_chain_slug,
        switchboard_fees,
        verification_overhead_fees,
        ctx.bumps.fee_schedule,
    );

    emit!(SwitchboardFeesSet {
        dst_chain_slug,
        switchboard_fees,
        verification_overhead_fees,
    });

    msg!(
        "Fees for chain {}: switchboard={}, verification overhead={}",
        dst_chain_slug,
        switchboard_fees,
        verification_overhead_fees
    );
    Ok(())
}

pub fn set_execution_overhead(
    ctx: Context<SetExecutionOverhead>,
    nonce: u64,
    dst_chain_slug: u32,
    verification_overhead_fees: u64,
    signature: WatcherSignature,
) -> Result<()> {
    require!(dst_chain_slug != 0, SwitchboardError::InvalidChainSlug);

    let action = SignedAction::SetExecutionOverhead {
        dst_chain_slug,
        verification_overhead_fees,
    };

    let authorizer = Authorizer::from_accounts(
        &ctx.accounts.config,
        ctx.accounts.role_grant.to_account_info(),
        ctx.accounts.instructions.to_account_info(),
    );

    ctx.accounts
        .signer_nonce
        .bind(signature.signer, ctx.bumps.signer_nonce);
    authorizer.authorize(&mut ctx.accounts.signer_nonce, &action, nonce, &signature)?;

    ctx.accounts.fee_schedule.set_verification_overhead(
        dst_chain_slug,
        verification_overhead_fees,
        ctx.bumps.fee_schedule,
    );

    emit!(ExecutionOverheadSet {
        dst_chain_slug,
        verification_overhead_fees,
    });

    msg!(
        "Verification overhead for chain {} set to {}",
        dst_chain_slug,
        verification_overhead_fees
    );
    Ok(())
}

/// Accept fees from the execution manager into the vault
pub fn receive_fees(ctx: Context<ReceiveFees>, dst_chain_slug: u32, amount: u64) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.execution_manager.key(),
        ctx.accounts.config.execution_manager,
        SwitchboardError::UnauthorizedExecutionManager
    );

    let _guard = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.execution_manager.to_account_info(),
                to: ctx.accounts.fee_vault.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(FeesReceived {
        dst_chain_slug,
        amount,
    });

    msg!("Received {} lamports of fees for chain {}", amount, dst_chain_slug);
    Ok(())
}

/// Move everything the vault holds above its rent reserve to `to`
pub fn withdraw_fees(ctx: Context<WithdrawFees>, to: Pubkey) -> Result<()> {
    require_role(
        &RoleGrantAccount::new(ctx.accounts.role_grant.to_account_info()),
        Role::Withdraw,
        GLOBAL_SCOPE,
        &ctx.accounts.authority.key(),
    )?;

    let amount = withdrawal_amount(
        &to,
        &ctx.accounts.recipient.key(),
        ctx.accounts.fee_vault.lamports(),
        vault_rent_reserve()?,
    )?;
    let vault_bump = ctx.accounts.config.fee_vault_bump;

    let _guard = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.fee_vault.to_account_info(),
                to: ctx.accounts.recipient.to_account_info(),
            },
            &[&[FEE_VAULT_SEED, &[vault_bump]]],
        ),
        amount,
    )?;

    emit!(FeesWithdrawn { to, amount });

    msg!("Withdrew {} lamports of fees to {}", amount, to);
    Ok(())
}

#[derive(Accounts)]
#[instruction(
    nonce: u64,
    dst_chain_slug: u32,
    switchboard_fees: u64,
    verification_overhead_fees: u64,
    signature: WatcherSignature
)]
pub struct SetFees<'info> {
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
        space = 8 + FeeSchedule::SIZE,
        seeds = [FEES_SEED, &dst_chain_slug.to_le_bytes()],
        bump
    )]
    pub fee_schedule: Account<'info, FeeSchedule>,

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
#[instruction(
    nonce: u64,
    dst_chain_slug: u32,
    verification_overhead_fees: u64,
    signature: WatcherSignature
)]
pub struct SetExecutionOverhead<'info> {
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
        space = 8 + FeeSchedule::SIZE,
        seeds = [FEES_SEED, &dst_chain_slug.to_le_bytes()],
        bump
    )]
    pub fee_schedule: Account<'info, FeeSchedule>,

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
pub struct ReceiveFees<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwitchboardConfig>,

    #[account(
        mut,
        seeds = [FEE_VAULT_SEED],
        bump = config.fee_vault_bump
    )]
    pub fee_vault: SystemAccount<'info>,

    #[account(mut)]
    pub execution_manager: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, SwitchboardConfig>,

    /// CHECK: inspected by `RoleGrantAccount`, which only honours live grants owned by this program
    pub role_grant: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [FEE_VAULT_SEED],
        bump = config.fee_vault_bump
    )]
    pub fee_vault: SystemAccount<'info>,

    /// CHECK: lamport destination, matched against the `to` argument
    #[account(mut)]
    pub recipient: UncheckedAccount<'info>,

    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
