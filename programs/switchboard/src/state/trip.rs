use anchor_lang::prelude::*;

/// Trip flag for one source chain path
#[account]
#[derive(Default, Debug)]
pub struct PathTrip {
    pub src_chain_slug: u32,
    pub tripped: bool,
    pub bump: u8,
}

impl PathTrip {
    pub const SIZE: usize = 4   // src_chain_slug
        + 1                     // tripped
        + 1;                    // bump

    /// Write the flag, binding the key fields on first use
    pub fn apply(&mut self, src_chain_slug: u32, tripped: bool, bump: u8) {
        self.src_chain_slug = src_chain_slug;
        self.tripped = tripped;
        self.bump = bump;
    }
}

/// Trip flag for one (packet, proposal) pair
#[account]
#[derive(Default)]
pub struct ProposalTrip {
    pub packet_id: [u8; 32],
    pub proposal_count: u64,
    pub tripped: bool,
    pub bump: u8,
}

impl ProposalTrip {
    pub const SIZE: usize = 32  // packet_id
        + 8                     // proposal_count
        + 1                     // tripped
        + 1;                    // bump

    pub fn apply(&mut self, packet_id: [u8; 32], proposal_count: u64, tripped: bool, bump: u8) {
        self.packet_id = packet_id;
        self.proposal_count = proposal_count;
        self.tripped = tripped;
        self.bump = bump;
    }
}
