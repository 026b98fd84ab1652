use anchor_lang::prelude::*;

/// Fee schedule for one destination chain, in lamports
#[account]
#[derive(Default)]
pub struct FeeSchedule {
    pub dst_chain_slug: u32,
    pub switchboard_fees: u64,
    pub verification_overhead_fees: u64,
    pub bump: u8,
}

impl FeeSchedule {
    pub const SIZE: usize = 4   // dst_chain_slug
        + 8                     // switchboard_fees
        + 8                     // verification_overhead_fees
        + 1;                    // bump

    pub fn set_fees(
        &mut self,
        dst_chain_slug: u32,
        switchboard_fees: u64,
        verification_overhead_fees: u64,
        bump: u8,
    ) {
        self.dst_chain_slug = dst_chain_slug;
        self.switchboard_fees = switchboard_fees;
        self.verification_overhead_fees = verification_overhead_fees;
        self.bump = bump;
    }

    /// Update only the verification overhead, leaving the base fee untouched
    pub fn set_verification_overhead(
        &mut self,
        dst_chain_slug: u32,
        verification_overhead_fees: u64,
        bump: u8,
    ) {
        self.dst_chain_slug = dst_chain_slug;
        self.verification_overhead_fees = verification_overhead_fees;
        self.bump = bump;
    }

    pub fn min_fees(&self) -> MinFees {
        MinFees {
            switchboard_fees: self.switchboard_fees,
            verification_overhead_fees: self.verification_overhead_fees,
        }
    }
}

/// Return value of `get_min_fees`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MinFees {
    pub switchboard_fees: u64,
    pub verification_overhead_fees: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_schedule_reads_as_zero() {
        assert_eq!(FeeSchedule::default().min_fees(), MinFees::default());
    }

    #[test]
    fn overhead_update_keeps_base_fee() {
        let mut schedule = FeeSchedule::default();
        schedule.set_fees(5, 1_000, 200, 253);
        schedule.set_verification_overhead(5, 300, 253);

        assert_eq!(
            schedule.min_fees(),
            MinFees {
                switchboard_fees: 1_000,
                verification_overhead_fees: 300,
            }
        );
    }
}
