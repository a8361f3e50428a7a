//! Per-account membership flags and the member roster.

use crate::error::{PoolError, Role};
use crate::events::GroupEvent;
use crate::lifecycle::require_created;
use crate::txn::GroupTxn;
use rosca_reserve::Transactional;
use rosca_types::{AccountId, CallContext};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub invited: bool,
    pub is_member: bool,
    pub is_verified: bool,
}

/// Membership table. `roster` lists members in join order; the creator is first.
///
/// An invitation is consumed by joining, so `invited` and `is_member` are never
/// both set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Membership {
    records: HashMap<AccountId, MemberRecord>,
    roster: Vec<AccountId>,
}

impl Membership {
    pub(crate) fn admit_creator(&mut self, creator: AccountId) {
        let record = self.records.entry(creator).or_default();
        record.invited = false;
        if !record.is_member {
            record.is_member = true;
            self.roster.push(creator);
        }
    }

    /// Mark `account` invited. Returns false if it already was, or is a member.
    pub(crate) fn invite(&mut self, account: AccountId) -> bool {
        let record = self.records.entry(account).or_default();
        if record.invited || record.is_member {
            return false;
        }
        record.invited = true;
        true
    }

    pub(crate) fn join(&mut self, account: AccountId) -> Result<(), PoolError> {
        let record = self
            .records
            .get_mut(&account)
            .ok_or(PoolError::NotInvited(account))?;
        if record.is_member {
            return Err(PoolError::AlreadyMember(account));
        }
        if !record.invited {
            return Err(PoolError::NotInvited(account));
        }
        record.invited = false;
        record.is_member = true;
        self.roster.push(account);
        Ok(())
    }

    /// Returns true if the member was not verified before.
    pub(crate) fn mark_verified(&mut self, account: &AccountId) -> Result<bool, PoolError> {
        let record = self
            .records
            .get_mut(account)
            .filter(|r| r.is_member)
            .ok_or(PoolError::NotMember(*account))?;
        let newly = !record.is_verified;
        record.is_verified = true;
        Ok(newly)
    }

    pub fn record(&self, account: &AccountId) -> Option<MemberRecord> {
        self.records.get(account).copied()
    }

    pub fn is_member(&self, account: &AccountId) -> bool {
        self.records.get(account).is_some_and(|r| r.is_member)
    }

    pub fn is_invited(&self, account: &AccountId) -> bool {
        self.records.get(account).is_some_and(|r| r.invited)
    }

    pub fn is_verified(&self, account: &AccountId) -> bool {
        self.records.get(account).is_some_and(|r| r.is_verified)
    }

    pub fn members(&self) -> &[AccountId] {
        &self.roster
    }
}

impl<H: Transactional> GroupTxn<'_, H> {
    pub(crate) fn invite_members(
        &mut self,
        ctx: &CallContext,
        accounts: &[AccountId],
    ) -> Result<usize, PoolError> {
        require_created(self.state.lifecycle)?;
        let creator = self.state.config()?.creator;
        if ctx.caller != creator {
            return Err(PoolError::Unauthorized {
                caller: ctx.caller,
                role: Role::Creator,
            });
        }

        let mut invited = 0;
        for &account in accounts {
            if account.is_zero() {
                return Err(PoolError::InvalidConfiguration(
                    "invitee is the null account".into(),
                ));
            }
            if self.state.members.invite(account) {
                self.emit(GroupEvent::MemberInvited { account });
                invited += 1;
            }
        }
        tracing::info!(%creator, invited, "members invited");
        Ok(invited)
    }

    pub(crate) fn join_group(&mut self, ctx: &CallContext) -> Result<(), PoolError> {
        require_created(self.state.lifecycle)?;
        self.state.members.join(ctx.caller)?;
        tracing::info!(member = %ctx.caller, "member joined");
        self.emit(GroupEvent::MemberJoined {
            account: ctx.caller,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(n: u8) -> AccountId {
        AccountId::new([n; 20])
    }

    #[test]
    fn creator_is_first_member() {
        let mut m = Membership::default();
        m.admit_creator(acct(1));
        assert!(m.is_member(&acct(1)));
        assert!(!m.is_invited(&acct(1)));
        assert_eq!(m.members(), &[acct(1)]);
    }

    #[test]
    fn invite_is_idempotent_and_skips_members() {
        let mut m = Membership::default();
        m.admit_creator(acct(1));
        assert!(!m.invite(acct(1)));
        assert!(m.invite(acct(2)));
        assert!(!m.invite(acct(2)));
        assert!(!m.is_member(&acct(2)));
    }

    #[test]
    fn join_requires_invitation() {
        let mut m = Membership::default();
        assert_eq!(m.join(acct(9)), Err(PoolError::NotInvited(acct(9))));

        m.invite(acct(2));
        m.join(acct(2)).unwrap();
        assert!(!m.is_invited(&acct(2)));
        assert_eq!(m.join(acct(2)), Err(PoolError::AlreadyMember(acct(2))));
        assert_eq!(m.members(), &[acct(2)]);
    }

    #[test]
    fn verification_requires_membership() {
        let mut m = Membership::default();
        m.invite(acct(2));
        assert_eq!(
            m.mark_verified(&acct(2)),
            Err(PoolError::NotMember(acct(2)))
        );
        m.join(acct(2)).unwrap();
        assert_eq!(m.mark_verified(&acct(2)), Ok(true));
        assert_eq!(m.mark_verified(&acct(2)), Ok(false));
        assert!(m.is_verified(&acct(2)));
    }
}
