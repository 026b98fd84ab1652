use anchor_lang::prelude::*;

/// Roles recognised by the switchboard access-control registry
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Role {
    /// Signs path and proposal trips for one source chain
    #[default]
    Watcher,
    /// Trips the global fuse
    Trip,
    /// Clears any trip flag
    Untrip,
    /// Registers and repoints siblings, tunes configuration
    Governance,
    /// Withdraws accumulated fees
    Withdraw,
    /// Extracts stray funds
    Rescue,
    /// Signs fee schedule updates for one destination chain
    FeesUpdater,
}

impl Role {
    /// Stable one-byte tag used in role grant PDA seeds
    pub fn discriminant(&self) -> u8 {
        match self {
            Role::Watcher => 0,
            Role::Trip => 1,
            Role::Untrip => 2,
            Role::Governance => 3,
            Role::Withdraw => 4,
            Role::Rescue => 5,
            Role::FeesUpdater => 6,
        }
    }

    /// Watcher and fee-updater grants are bound to one chain; the rest are global
    pub fn is_chain_scoped(&self) -> bool {
        matches!(self, Role::Watcher | Role::FeesUpdater)
    }
}

/// Membership record for one (role, scope, grantee) triple
#[account]
#[derive(Default)]
pub struct RoleGrant {
    pub role: Role,

    /// Chain slug the role applies to, or `GLOBAL_SCOPE`
    pub scope: u32,

    pub grantee: Pubkey,

    /// Cleared on revocation; the account itself is kept
    pub active: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl RoleGrant {
    pub const SIZE: usize = 1   // role
        + 4                     // scope
        + 32                    // grantee
        + 1                     // active
        + 1;                    // bump

    pub fn grants(&self, role: Role, scope: u32, who: &Pubkey) -> bool {
        self.active && self.role == role && self.scope == scope && self.grantee == *who
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_watcher_and_fee_roles_are_chain_scoped() {
        assert!(Role::Watcher.is_chain_scoped());
        assert!(Role::FeesUpdater.is_chain_scoped());
        assert!(!Role::Trip.is_chain_scoped());
        assert!(!Role::Untrip.is_chain_scoped());
        assert!(!Role::Governance.is_chain_scoped());
    }

    #[test]
    fn grant_is_exact_on_every_field() {
        let grantee = Pubkey::new_unique();
        let grant = RoleGrant {
            role: Role::Watcher,
            scope: 7,
            grantee,
            active: true,
            bump: 255,
        };

        assert!(grant.grants(Role::Watcher, 7, &grantee));
        assert!(!grant.grants(Role::Watcher, 9, &grantee));
        assert!(!grant.grants(Role::Trip, 7, &grantee));
        assert!(!grant.grants(Role::Watcher, 7, &Pubkey::new_unique()));
    }

    #[test]
    fn revoked_grant_confers_nothing() {
        let grantee = Pubkey::new_unique();
        let grant = RoleGrant {
            role: Role::Governance,
            scope: 0,
            grantee,
            active: false,
            bump: 255,
        };
        assert!(!grant.grants(Role::Governance, 0, &grantee));
        assert!(!RoleGrant::default().grants(Role::Watcher, 0, &Pubkey::default()));
    }
}
