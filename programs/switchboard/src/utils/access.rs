use anchor_lang::prelude::*;

use crate::{
    errors::SwitchboardError,
    state::{Role, RoleGrant},
};

/// Policy check for (role, scope, address) membership
pub trait AccessControl {
    fn has_role(&self, role: Role, scope: u32, who: &Pubkey) -> bool;
}

/// Access control backed by a single supplied `RoleGrant` account.
/// Anything that is not a live grant owned by this program grants nothing.
pub struct RoleGrantAccount<'info> {
    account: AccountInfo<'info>,
}

impl<'info> RoleGrantAccount<'info> {
    pub fn new(account: AccountInfo<'info>) -> Self {
        Self { account }
    }
}

impl AccessControl for RoleGrantAccount<'_> {
    fn has_role(&self, role: Role, scope: u32, who: &Pubkey) -> bool {
        if self.account.owner != &crate::ID || self.account.data_is_empty() {
            return false;
        }

        let Ok(data) = self.account.try_borrow_data() else {
            return false;
        };

        RoleGrant::try_deserialize(&mut &data[..])
            .map(|grant| grant.grants(role, scope, who))
            .unwrap_or(false)
    }
}

/// Fail with `Unauthorized` unless `who` holds `role` for `scope`
pub fn require_role<A: AccessControl>(
    access: &A,
    role: Role,
    scope: u32,
    who: &Pubkey,
) -> Result<()> {
    if !access.has_role(role, scope, who) {
        msg!("{} lacks {:?} role for scope {}", who, role, scope);
        return err!(SwitchboardError::Unauthorized);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashSet;

    /// In-memory registry for tests
    #[derive(Default)]
    pub struct MockAccessControl {
        grants: HashSet<(u8, u32, Pubkey)>,
    }

    impl MockAccessControl {
        pub fn grant(&mut self, role: Role, scope: u32, who: Pubkey) {
            self.grants.insert((role.discriminant(), scope, who));
        }

        pub fn revoke(&mut self, role: Role, scope: u32, who: Pubkey) {
            self.grants.remove(&(role.discriminant(), scope, who));
        }
    }

    impl AccessControl for MockAccessControl {
        fn has_role(&self, role: Role, scope: u32, who: &Pubkey) -> bool {
            self.grants.contains(&(role.discriminant(), scope, *who))
        }
    }
}
