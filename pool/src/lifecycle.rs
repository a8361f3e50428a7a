//! Group lifecycle: `Uninitialized` → `Initialized` → `Created`.
//!
//! `initialize` binds the group to its external accounts; `create_group` fixes the
//! schedule, identity requirements and fairness mode. Neither can be repeated and
//! the resulting configuration never changes afterwards.

use crate::distribution::DistributionState;
use crate::error::PoolError;
use crate::events::GroupEvent;
use crate::period::PeriodTracker;
use crate::txn::GroupTxn;
use rosca_reserve::{ReserveAccounts, Transactional};
use rosca_types::{AccountId, CallContext, TokenAmount};
use rosca_verification::IdentityRequirements;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Initialized,
    Created,
}

/// External accounts bound at initialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSetup {
    /// The group's own account: custody of funds and receipts.
    pub group_account: AccountId,
    pub label: String,
    pub asset: AccountId,
    pub reserve_market: AccountId,
    pub reserve_receipt: AccountId,
    /// The only account allowed to deliver verification results.
    pub verification_hub: AccountId,
    pub fee_recipient: AccountId,
    /// The only account allowed to trigger distributions.
    pub operator: AccountId,
}

impl GroupSetup {
    pub fn validate(&self) -> Result<(), PoolError> {
        let accounts = [
            ("group account", &self.group_account),
            ("asset", &self.asset),
            ("reserve market", &self.reserve_market),
            ("reserve receipt", &self.reserve_receipt),
            ("verification hub", &self.verification_hub),
            ("fee recipient", &self.fee_recipient),
            ("operator", &self.operator),
        ];
        for (name, account) in accounts {
            if account.is_zero() {
                return Err(PoolError::InvalidConfiguration(format!(
                    "{name} is the null account"
                )));
            }
        }
        Ok(())
    }

    pub fn reserve_accounts(&self) -> ReserveAccounts {
        ReserveAccounts {
            custody: self.group_account,
            asset: self.asset,
            market: self.reserve_market,
            receipt: self.reserve_receipt,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Minimum seconds between deposit-period rollovers.
    pub deposit_interval_secs: u64,
    /// Minimum seconds between distributions.
    pub distribution_interval_secs: u64,
    /// Fixed amount each member pays per period.
    pub contribution: TokenAmount,
    pub total_periods: u32,
}

impl Schedule {
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.deposit_interval_secs == 0 {
            return Err(PoolError::InvalidConfiguration(
                "deposit interval must be positive".into(),
            ));
        }
        if self.distribution_interval_secs == 0 {
            return Err(PoolError::InvalidConfiguration(
                "distribution interval must be positive".into(),
            ));
        }
        if self.contribution.is_zero() {
            return Err(PoolError::InvalidConfiguration(
                "contribution must be positive".into(),
            ));
        }
        if self.total_periods == 0 {
            return Err(PoolError::InvalidConfiguration(
                "total periods must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// How winners are constrained across distributions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessMode {
    /// Any supplied candidate may win; the operator is trusted to rotate fairly.
    #[default]
    OperatorTrust,
    /// A member cannot win again until every member has won once.
    NoRepeatWinners,
}

/// Parameters of `create_group`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateParams {
    pub creator: AccountId,
    pub schedule: Schedule,
    pub identity: IdentityRequirements,
    pub fairness: FairnessMode,
    pub invitees: Vec<AccountId>,
}

/// Configuration fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub creator: AccountId,
    pub schedule: Schedule,
    pub identity: IdentityRequirements,
    pub fairness: FairnessMode,
}

pub(crate) fn require_created(lifecycle: Lifecycle) -> Result<(), PoolError> {
    match lifecycle {
        Lifecycle::Uninitialized => Err(PoolError::NotInitialized),
        Lifecycle::Initialized => Err(PoolError::GroupNotCreated),
        Lifecycle::Created => Ok(()),
    }
}

impl<H: Transactional> GroupTxn<'_, H> {
    pub(crate) fn initialize(&mut self, setup: GroupSetup) -> Result<(), PoolError> {
        if self.state.lifecycle != Lifecycle::Uninitialized {
            return Err(PoolError::AlreadyInitialized);
        }
        setup.validate()?;

        tracing::info!(group = %setup.group_account, label = %setup.label, "group initialized");
        self.emit(GroupEvent::Initialized {
            group: setup.group_account,
            label: setup.label.clone(),
        });
        self.state.setup = Some(setup);
        self.state.lifecycle = Lifecycle::Initialized;
        Ok(())
    }

    pub(crate) fn create_group(
        &mut self,
        ctx: &CallContext,
        params: CreateParams,
    ) -> Result<(), PoolError> {
        match self.state.lifecycle {
            Lifecycle::Uninitialized => return Err(PoolError::NotInitialized),
            Lifecycle::Created => return Err(PoolError::GroupAlreadyCreated),
            Lifecycle::Initialized => {}
        }

        let CreateParams {
            creator,
            schedule,
            identity,
            fairness,
            invitees,
        } = params;
        if creator.is_zero() {
            return Err(PoolError::InvalidConfiguration(
                "creator is the null account".into(),
            ));
        }
        schedule.validate()?;
        identity
            .validate()
            .map_err(|e| PoolError::InvalidConfiguration(e.to_string()))?;

        self.state.members.admit_creator(creator);
        self.emit(GroupEvent::MemberJoined { account: creator });
        for invitee in invitees {
            if invitee.is_zero() {
                return Err(PoolError::InvalidConfiguration(
                    "invitee is the null account".into(),
                ));
            }
            if self.state.members.invite(invitee) {
                self.emit(GroupEvent::MemberInvited { account: invitee });
            }
        }

        self.state.periods = PeriodTracker::start(ctx.now);
        self.state.distribution = DistributionState::start(ctx.now);
        tracing::info!(
            %creator,
            policy = ?identity.policy,
            ?fairness,
            total_periods = schedule.total_periods,
            contribution = %schedule.contribution,
            "group created"
        );
        self.emit(GroupEvent::GroupCreated {
            creator,
            total_periods: schedule.total_periods,
            contribution: schedule.contribution,
        });
        self.state.config = Some(GroupConfig {
            creator,
            schedule,
            identity,
            fairness,
        });
        self.state.lifecycle = Lifecycle::Created;
        Ok(())
    }
}
