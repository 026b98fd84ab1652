use anchor_lang::prelude::*;

/// Parameters of a sibling registration, forwarded verbatim to the socket
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SiblingRegistration {
    pub sibling_chain_slug: u32,
    pub max_packet_length: u64,
    pub capacitor_type: u8,
    pub initial_packet_count: u64,
    pub sibling_switchboard: [u8; 32],
}

/// Per-remote-chain configuration established by governance
#[account]
#[derive(Default)]
pub struct SiblingConfig {
    pub sibling_chain_slug: u32,
    pub max_packet_length: u64,
    pub capacitor_type: u8,

    /// Packets counted below this watermark predate registration
    pub initial_packet_count: u64,

    /// Switchboard address on the sibling chain
    pub sibling_switchboard: [u8; 32],

    pub registered: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl SiblingConfig {
    pub const SIZE: usize = 4   // sibling_chain_slug
        + 8                     // max_packet_length
        + 1                     // capacitor_type
        + 8                     // initial_packet_count
        + 32                    // sibling_switchboard
        + 1                     // registered
        + 1;                    // bump

    /// Overwrite every field with `registration`. Last write wins.
    pub fn apply_registration(&mut self, registration: &SiblingRegistration, bump: u8) {
        self.sibling_chain_slug = registration.sibling_chain_slug;
        self.max_packet_length = registration.max_packet_length;
        self.capacitor_type = registration.capacitor_type;
        self.initial_packet_count = registration.initial_packet_count;
        self.sibling_switchboard = registration.sibling_switchboard;
        self.registered = true;
        self.bump = bump;
    }

    /// Whether a packet with this count is at or above the registration watermark
    pub fn accepts_packet_count(&self, packet_count: u64) -> bool {
        self.registered && packet_count >= self.initial_packet_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(initial_packet_count: u64, switchboard: u8) -> SiblingRegistration {
        SiblingRegistration {
            sibling_chain_slug: 42,
            max_packet_length: 10,
            capacitor_type: 1,
            initial_packet_count,
            sibling_switchboard: [switchboard; 32],
        }
    }

    #[test]
    fn unregistered_sibling_accepts_nothing() {
        assert!(!SiblingConfig::default().accepts_packet_count(0));
    }

    #[test]
    fn watermark_is_inclusive() {
        let mut sibling = SiblingConfig::default();
        sibling.apply_registration(&registration(5, 1), 255);
        assert!(!sibling.accepts_packet_count(4));
        assert!(sibling.accepts_packet_count(5));
    }

    #[test]
    fn second_registration_leaves_no_residue() {
        let mut sibling = SiblingConfig::default();
        sibling.apply_registration(&registration(5, 1), 255);
        let second = SiblingRegistration {
            max_packet_length: 99,
            capacitor_type: 2,
            ..registration(50, 2)
        };
        sibling.apply_registration(&second, 255);

        assert_eq!(sibling.initial_packet_count, 50);
        assert_eq!(sibling.max_packet_length, 99);
        assert_eq!(sibling.capacitor_type, 2);
        assert_eq!(sibling.sibling_switchboard, [2u8; 32]);
    }
}
