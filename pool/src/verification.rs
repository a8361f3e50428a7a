//! Verification callback from the external identity provider.

use crate::error::{PoolError, Role};
use crate::events::GroupEvent;
use crate::lifecycle::require_created;
use crate::txn::GroupTxn;
use rosca_reserve::Transactional;
use rosca_types::{AccountId, CallContext};
use rosca_verification::{Disclosure, VerificationGate};

impl<H: Transactional> GroupTxn<'_, H> {
    /// Apply a provider's disclosure about `account`.
    ///
    /// `selector` is the group the provider's proof was bound to and must be this
    /// group's account.
    pub(crate) fn on_verification_result(
        &mut self,
        ctx: &CallContext,
        account: AccountId,
        disclosure: &Disclosure,
        selector: &AccountId,
    ) -> Result<(), PoolError> {
        require_created(self.state.lifecycle)?;
        let setup = self.state.setup()?;
        if ctx.caller != setup.verification_hub {
            return Err(PoolError::Unauthorized {
                caller: ctx.caller,
                role: Role::VerificationHub,
            });
        }
        if *selector != setup.group_account {
            return Err(PoolError::WrongGroup {
                expected: setup.group_account,
                got: *selector,
            });
        }
        if !self.state.members.is_member(&account) {
            return Err(PoolError::NotMember(account));
        }

        let requirements = &self.state.config()?.identity;
        if let Err(err) = VerificationGate.evaluate(requirements, disclosure) {
            tracing::warn!(member = %account, error = %err, "disclosure rejected");
            return Err(err.into());
        }

        if self.state.members.mark_verified(&account)? {
            tracing::info!(member = %account, "member verified");
            self.emit(GroupEvent::MemberVerified { account });
        }
        Ok(())
    }
}
