use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    hash::hash,
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};

use crate::{
    constants::{CONFIG_SEED, SOCKET_REGISTER_SIBLING_IX, SOCKET_USE_SIBLING_IX},
    errors::SwitchboardError,
    state::{SiblingConfig, SiblingRegistration},
};

/// Socket-side half of sibling configuration
pub trait SiblingRouter {
    fn register_sibling(&self, registration: &SiblingRegistration) -> Result<()>;
    fn use_sibling_switchboard(
        &self,
        sibling_chain_slug: u32,
        sibling_switchboard: [u8; 32],
    ) -> Result<()>;
}

/// Router that reaches the socket program by CPI, signing as the config PDA
pub struct SocketCpi<'info> {
    pub socket_program: AccountInfo<'info>,
    pub socket_state: AccountInfo<'info>,
    pub switchboard: AccountInfo<'info>,
    pub switchboard_bump: u8,
}

impl SocketCpi<'_> {
    /// Socket instruction: Anchor sighash of `ix_name` followed by borsh `args`.
    /// The config PDA must be a writable signer; the re-entrancy lock has already
    /// modified its data in this instruction.
    pub fn instruction(&self, ix_name: &str, args: &impl AnchorSerialize) -> Result<Instruction> {
        let mut data = hash(ix_name.as_bytes()).to_bytes()[..8].to_vec();
        args.serialize(&mut data)
            .map_err(|_| ErrorCode::InstructionDidNotSerialize)?;

        Ok(Instruction {
            program_id: *self.socket_program.key,
            accounts: vec![
                AccountMeta::new(*self.switchboard.key, true),
                AccountMeta::new(*self.socket_state.key, false),
            ],
            data,
        })
    }

    fn invoke(&self, ix_name: &str, args: &impl AnchorSerialize) -> Result<()> {
        let ix = self.instruction(ix_name, args)?;
        invoke_signed(
            &ix,
            &[
                self.switchboard.clone(),
                self.socket_state.clone(),
                self.socket_program.clone(),
            ],
            &[&[CONFIG_SEED, &[self.switchboard_bump]]],
        )?;
        Ok(())
    }
}

impl SiblingRouter for SocketCpi<'_> {
    fn register_sibling(&self, registration: &SiblingRegistration) -> Result<()> {
        self.invoke(SOCKET_REGISTER_SIBLING_IX, registration)
    }

    fn use_sibling_switchboard(
        &self,
        sibling_chain_slug: u32,
        sibling_switchboard: [u8; 32],
    ) -> Result<()> {
        self.invoke(SOCKET_USE_SIBLING_IX, &(sibling_chain_slug, sibling_switchboard))
    }
}

/// Validate, forward to the router, then store. A router failure leaves `sibling`
/// untouched.
pub fn register_sibling<R: SiblingRouter>(
    router: &R,
    sibling: &mut SiblingConfig,
    registration: &SiblingRegistration,
    bump: u8,
) -> Result<()> {
    require!(
        registration.sibling_chain_slug != 0,
        SwitchboardError::InvalidChainSlug
    );
    require!(
        registration.sibling_switchboard != [0u8; 32],
        SwitchboardError::ZeroAddress
    );

    router.register_sibling(registration)?;
    sibling.apply_registration(registration, bump);
    Ok(())
}

/// Repoint an already registered sibling at a new switchboard address
pub fn update_sibling<R: SiblingRouter>(
    router: &R,
    sibling: &mut SiblingConfig,
    sibling_chain_slug: u32,
    sibling_switchboard: [u8; 32],
) -> Result<()> {
    require!(sibling.registered, SwitchboardError::SiblingNotRegistered);
    require!(
        sibling.sibling_chain_slug == sibling_chain_slug,
        SwitchboardError::SiblingNotRegistered
    );
    require!(
        sibling_switchboard != [0u8; 32],
        SwitchboardError::ZeroAddress
    );

    router.use_sibling_switchboard(sibling_chain_slug, sibling_switchboard)?;
    sibling.sibling_switchboard = sibling_switchboard;
    Ok(())
}
