use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::SwitchboardError;
use crate::events::FundsRescued;
use crate::state::{Role, SwitchboardConfig};
use crate::utils::{
    access::{require_role, RoleGrantAccount},
    funds::{check_recipient, native_rescue_amount, vault_rent_reserve},
    guard::ReentrancyGuard,
};

/// Extract stray lamports (`token == NATIVE_TOKEN`) or SPL tokens held by the vault
pub fn rescue_funds(
    ctx: Context<RescueFunds>,
    token: Pubkey,
    to: Pubkey,
    amount: u64,
) -> Result<()> {
    require_role(
        &RoleGrantAccount::new(ctx.accounts.role_grant.to_account_info()),
        Role::Rescue,
        GLOBAL_SCOPE,
        &ctx.accounts.authority.key(),
    )?;

    let vault_bump = ctx.accounts.config.fee_vault_bump;
    let signer_seeds: &[&[&[u8]]] = &[&[FEE_VAULT_SEED, &[vault_bump]]];

    if token == NATIVE_TOKEN {
        let amount = native_rescue_amount(
            &to,
            &ctx.accounts.recipient.key(),
            ctx.accounts.fee_vault.lamports(),
            vault_rent_reserve()?,
            amount,
        )?;

        let _guard = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
        system_program::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.fee_vault.to_account_info(),
                    to: ctx.accounts.recipient.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
    } else {
        check_recipient(&to, &ctx.accounts.recipient.key())?;

        let (Some(mint), Some(vault_tokens), Some(recipient_tokens), Some(token_program)) = (
            ctx.accounts.mint.as_ref(),
            ctx.accounts.vault_token_account.as_ref(),
            ctx.accounts.recipient_token_account.as_ref(),
            ctx.accounts.token_program.as_ref(),
        ) else {
            return err!(SwitchboardError::MissingTokenAccounts);
        };

        require_keys_eq!(mint.key(), token, SwitchboardError::TokenMismatch);
        require_keys_eq!(vault_tokens.mint, token, SwitchboardError::TokenMismatch);
        require_keys_eq!(recipient_tokens.mint, token, SwitchboardError::TokenMismatch);
        require_keys_eq!(
            recipient_tokens.owner,
            to,
            SwitchboardError::RecipientMismatch
        );
        require!(vault_tokens.amount >= amount, SwitchboardError::InsufficientFunds);

        let cpi = CpiContext::new_with_signer(
            token_program.to_account_info(),
            token::TransferChecked {
                from: vault_tokens.to_account_info(),
                mint: mint.to_account_info(),
                to: recipient_tokens.to_account_info(),
                authority: ctx.accounts.fee_vault.to_account_info(),
            },
            signer_seeds,
        );
        let decimals = mint.decimals;

        let _guard = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
        token::transfer_checked(cpi, amount, decimals)?;
    }

    emit!(FundsRescued { token, to, amount });

    msg!("Rescued {} of {} to {}", amount, token, to);
    Ok(())
}

#[derive(Accounts)]
pub struct RescueFunds<'info> {
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

    /// CHECK: destination wallet, matched against the `to` argument
    #[account(mut)]
    pub recipient: UncheckedAccount<'info>,

    pub authority: Signer<'info>,

    pub mint: Option<Account<'info, Mint>>,

    #[account(mut)]
    pub vault_token_account: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub recipient_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Option<Program<'info, Token>>,

    pub system_program: Program<'info, System>,
}
