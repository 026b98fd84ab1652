use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    ed25519_program,
    sysvar::instructions::{load_current_index_checked, load_instruction_at_checked},
};

use crate::{
    constants::{
        ED25519_CURRENT_INSTRUCTION, ED25519_HEADER_SIZE, ED25519_OFFSETS_SIZE,
        ED25519_PUBKEY_SIZE, ED25519_SIGNATURE_SIZE,
    },
    errors::SwitchboardError,
};

/// Signature over an action digest, as submitted by the relayer
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct WatcherSignature {
    /// Claimed signer; only trusted once verification succeeds
    pub signer: Pubkey,

    /// Ed25519 signature (64 bytes)
    pub signature: [u8; 64],
}

/// Recovers the address that signed `digest`
pub trait SignatureVerifier {
    fn recover_signer(&self, digest: &[u8; 32], signature: &WatcherSignature) -> Result<Pubkey>;
}

/// Verifier backed by the instructions sysvar: the signature counts as recovered when an
/// earlier Ed25519 precompile instruction in the same transaction checked exactly this
/// (signer, signature, digest) triple.
pub struct InstructionSysvarVerifier<'info> {
    instructions: AccountInfo<'info>,
}

impl<'info> InstructionSysvarVerifier<'info> {
    pub fn new(instructions: AccountInfo<'info>) -> Self {
        Self { instructions }
    }
}

impl SignatureVerifier for InstructionSysvarVerifier<'_> {
    fn recover_signer(&self, digest: &[u8; 32], signature: &WatcherSignature) -> Result<Pubkey> {
        let current_index = load_current_index_checked(&self.instructions)
            .map_err(|_| SwitchboardError::InvalidSignature)?;

        for i in 0..current_index {
            let ix = load_instruction_at_checked(i as usize, &self.instructions)
                .map_err(|_| SwitchboardError::InvalidSignature)?;

            if ix.program_id == ed25519_program::ID
                && ed25519_instruction_verifies(
                    &ix.data,
                    &signature.signer,
                    &signature.signature,
                    digest,
                )
            {
                return Ok(signature.signer);
            }
        }

        msg!(
            "No matching Ed25519 instruction found for signer {}",
            signature.signer
        );
        err!(SwitchboardError::InvalidSignature)
    }
}

/// Whether Ed25519 precompile instruction data contains an entry for exactly
/// (signer, signature, message), with all three stored inline.
///
/// Layout: num_signatures (u8) || padding (u8) || num_signatures * 14-byte offset
/// records, each seven little-endian u16: signature offset, signature ix index,
/// pubkey offset, pubkey ix index, message offset, message size, message ix index.
pub fn ed25519_instruction_verifies(
    data: &[u8],
    signer: &Pubkey,
    signature: &[u8; 64],
    message: &[u8],
) -> bool {
    let Some(&count) = data.first() else {
        return false;
    };

    (0..count as usize).any(|i| {
        let start = ED25519_HEADER_SIZE + i * ED25519_OFFSETS_SIZE;
        data.get(start..start + ED25519_OFFSETS_SIZE)
            .map(|offsets| offsets_match(data, offsets, signer, signature, message))
            .unwrap_or(false)
    })
}

fn offsets_match(
    data: &[u8],
    offsets: &[u8],
    signer: &Pubkey,
    signature: &[u8; 64],
    message: &[u8],
) -> bool {
    let field = |n: usize| u16::from_le_bytes([offsets[2 * n], offsets[2 * n + 1]]);

    let signature_offset = field(0) as usize;
    let pubkey_offset = field(2) as usize;
    let message_offset = field(4) as usize;
    let message_size = field(5) as usize;

    // data referenced from other instructions is not checked here
    if [field(1), field(3), field(6)]
        .iter()
        .any(|&ix| ix != ED25519_CURRENT_INSTRUCTION)
    {
        return false;
    }

    let slice = |offset: usize, len: usize| data.get(offset..offset.checked_add(len)?);

    slice(signature_offset, ED25519_SIGNATURE_SIZE) == Some(&signature[..])
        && slice(pubkey_offset, ED25519_PUBKEY_SIZE) == Some(signer.as_ref())
        && message_size == message.len()
        && slice(message_offset, message_size) == Some(message)
}

#[cfg(test)]
pub(crate) fn ed25519_instruction_data(
    signer: &Pubkey,
    signature: &[u8; 64],
    message: &[u8],
) -> Vec<u8> {
    let pubkey_offset = (ED25519_HEADER_SIZE + ED25519_OFFSETS_SIZE) as u16;
    let signature_offset = pubkey_offset + ED25519_PUBKEY_SIZE as u16;
    let message_offset = signature_offset + ED25519_SIGNATURE_SIZE as u16;

    let mut data = vec![1u8, 0u8];
    for value in [
        signature_offset,
        ED25519_CURRENT_INSTRUCTION,
        pubkey_offset,
        ED25519_CURRENT_INSTRUCTION,
        message_offset,
        message.len() as u16,
        ED25519_CURRENT_INSTRUCTION,
    ] {
        data.extend_from_slice(&value.to_le_bytes());
    }
    data.extend_from_slice(signer.as_ref());
    data.extend_from_slice(signature);
    data.extend_from_slice(message);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_entry_verifies() {
        let signer = Pubkey::new_unique();
        let signature = [7u8; 64];
        let digest = [3u8; 32];
        let data = ed25519_instruction_data(&signer, &signature, &digest);

        assert!(ed25519_instruction_verifies(&data, &signer, &signature, &digest));
    }

    #[test]
    fn any_differing_component_fails() {
        let signer = Pubkey::new_unique();
        let signature = [7u8; 64];
        let digest = [3u8; 32];
        let data = ed25519_instruction_data(&signer, &signature, &digest);

        assert!(!ed25519_instruction_verifies(&data, &Pubkey::new_unique(), &signature, &digest));
        assert!(!ed25519_instruction_verifies(&data, &signer, &[8u8; 64], &digest));
        assert!(!ed25519_instruction_verifies(&data, &signer, &signature, &[4u8; 32]));
    }

    #[test]
    fn data_from_other_instructions_is_not_trusted() {
        let signer = Pubkey::new_unique();
        let signature = [7u8; 64];
        let digest = [3u8; 32];
        let mut data = ed25519_instruction_data(&signer, &signature, &digest);
        // signature instruction index -> 0
        data[4] = 0;
        data[5] = 0;

        assert!(!ed25519_instruction_verifies(&data, &signer, &signature, &digest));
    }

    #[test]
    fn truncated_data_is_rejected() {
        let signer = Pubkey::new_unique();
        let signature = [7u8; 64];
        let digest = [3u8; 32];
        let data = ed25519_instruction_data(&signer, &signature, &digest);

        assert!(!ed25519_instruction_verifies(&[], &signer, &signature, &digest));
        assert!(!ed25519_instruction_verifies(
            &data[..data.len() - 1],
            &signer,
            &signature,
            &digest
        ));
    }
}
