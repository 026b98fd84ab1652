use anchor_lang::prelude::*;

use crate::errors::SwitchboardError;

/// Per-signer replay counter. The next accepted nonce is exactly `next_nonce`.
#[account]
#[derive(Default)]
pub struct SignerNonce {
    /// Signer this counter belongs to
    pub signer: Pubkey,

    /// Next expected nonce, starting at 0
    pub next_nonce: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl SignerNonce {
    pub const SIZE: usize = 32  // signer
        + 8                     // next_nonce
        + 1;                    // bump

    /// Bind a freshly created counter to its signer. No-op once bound.
    pub fn bind(&mut self, signer: Pubkey, bump: u8) {
        if self.signer == Pubkey::default() {
            self.signer = signer;
            self.bump = bump;
        }
    }

    /// Accept `nonce` for `signer` and advance the counter by one.
    pub fn consume(&mut self, signer: &Pubkey, nonce: u64) -> Result<()> {
        require_keys_eq!(self.signer, *signer, SwitchboardError::InvalidNonce);

        if nonce != self.next_nonce {
            msg!(
                "Rejected nonce {} for {}: expected {}",
                nonce,
                signer,
                self.next_nonce
            );
            return err!(SwitchboardError::InvalidNonce);
        }

        self.next_nonce = self
            .next_nonce
            .checked_add(1)
            .ok_or(SwitchboardError::NonceOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(signer: Pubkey) -> SignerNonce {
        let mut ledger = SignerNonce::default();
        ledger.bind(signer, 254);
        ledger
    }

    #[test]
    fn counter_starts_at_zero() {
        assert_eq!(SignerNonce::default().next_nonce, 0);
    }

    #[test]
    fn same_nonce_only_succeeds_once() {
        let signer = Pubkey::new_unique();
        let mut ledger = bound(signer);

        ledger.consume(&signer, 0).unwrap();
        assert_eq!(ledger.next_nonce, 1);

        let err = ledger.consume(&signer, 0).unwrap_err();
        assert_eq!(err, SwitchboardError::InvalidNonce.into());
        assert_eq!(ledger.next_nonce, 1);
    }

    #[test]
    fn gaps_are_rejected() {
        let signer = Pubkey::new_unique();
        let mut ledger = bound(signer);

        let err = ledger.consume(&signer, 1).unwrap_err();
        assert_eq!(err, SwitchboardError::InvalidNonce.into());
        assert_eq!(ledger.next_nonce, 0);
    }

    #[test]
    fn counter_of_another_signer_is_rejected() {
        let mut ledger = bound(Pubkey::new_unique());
        let err = ledger.consume(&Pubkey::new_unique(), 0).unwrap_err();
        assert_eq!(err, SwitchboardError::InvalidNonce.into());
    }

    #[test]
    fn bind_only_happens_once() {
        let first = Pubkey::new_unique();
        let mut ledger = bound(first);
        ledger.bind(Pubkey::new_unique(), 1);
        assert_eq!(ledger.signer, first);
        assert_eq!(ledger.bump, 254);
    }

    #[test]
    fn exhausted_counter_fails_without_advancing() {
        let signer = Pubkey::new_unique();
        let mut ledger = bound(signer);
        ledger.next_nonce = u64::MAX;

        let err = ledger.consume(&signer, u64::MAX).unwrap_err();
        assert_eq!(err, SwitchboardError::NonceOverflow.into());
        assert_eq!(ledger.next_nonce, u64::MAX);
    }
}
