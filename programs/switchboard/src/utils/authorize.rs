use anchor_lang::prelude::*;

use crate::{
    state::{SignerNonce, SwitchboardConfig},
    utils::{
        access::{require_role, AccessControl, RoleGrantAccount},
        digest::SignedAction,
        signature::{InstructionSysvarVerifier, SignatureVerifier, WatcherSignature},
    },
};

/// Verifies signed actions against one switchboard instance.
///
/// Order: digest -> recover signer -> role check -> nonce check and advance. Nothing
/// is written unless every step passes.
pub struct Authorizer<V, A> {
    verifier: V,
    access: A,
    switchboard: Pubkey,
    chain_slug: u32,
}

impl<V: SignatureVerifier, A: AccessControl> Authorizer<V, A> {
    pub fn new(verifier: V, access: A, switchboard: Pubkey, chain_slug: u32) -> Self {
        Self {
            verifier,
            access,
            switchboard,
            chain_slug,
        }
    }

    /// Returns the authorized signer after advancing its nonce
    pub fn authorize(
        &self,
        nonces: &mut SignerNonce,
        action: &SignedAction,
        nonce: u64,
        signature: &WatcherSignature,
    ) -> Result<Pubkey> {
        let digest = action.digest(&self.switchboard, self.chain_slug, nonce);
        let signer = self.verifier.recover_signer(&digest, signature)?;

        let (role, scope) = action.required_role();
        require_role(&self.access, role, scope, &signer)?;

        nonces.consume(&signer, nonce)?;

        msg!(
            "Authorized {:?} from {} with nonce {}",
            action.kind(),
            signer,
            nonce
        );
        Ok(signer)
    }
}

impl<'info> Authorizer<InstructionSysvarVerifier<'info>, RoleGrantAccount<'info>> {
    /// Authorizer over the instructions sysvar and a supplied role grant account
    pub fn from_accounts(
        config: &Account<'info, SwitchboardConfig>,
        role_grant: AccountInfo<'info>,
        instructions: AccountInfo<'info>,
    ) -> Self {
        Self::new(
            InstructionSysvarVerifier::new(instructions),
            RoleGrantAccount::new(role_grant),
            config.key(),
            config.chain_slug,
        )
    }
}
