//! The group aggregate and its public operations.

use crate::config::GroupManifest;
use crate::distribution::{DistributionState, PayoutRecord};
use crate::error::PoolError;
use crate::events::GroupEvent;
use crate::lifecycle::{CreateParams, GroupConfig, GroupSetup, Lifecycle};
use crate::membership::{MemberRecord, Membership};
use crate::period::{PeriodState, PeriodTracker};
use crate::txn::{Detached, GroupTxn};
use rosca_reserve::{Host, Transactional};
use rosca_types::{AccountId, CallContext, Timestamp};
use rosca_verification::{ConfigId, Disclosure};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything a group persists.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GroupState {
    pub(crate) lifecycle: Lifecycle,
    pub(crate) setup: Option<GroupSetup>,
    pub(crate) config: Option<GroupConfig>,
    pub(crate) members: Membership,
    pub(crate) periods: PeriodTracker,
    pub(crate) distribution: DistributionState,
}

impl GroupState {
    pub(crate) fn setup(&self) -> Result<&GroupSetup, PoolError> {
        self.setup.as_ref().ok_or(PoolError::NotInitialized)
    }

    pub(crate) fn config(&self) -> Result<&GroupConfig, PoolError> {
        self.config.as_ref().ok_or(PoolError::GroupNotCreated)
    }
}

/// One rotating savings group.
///
/// Mutating operations take the [`CallContext`] of the current call; operations
/// that move funds also take the [`Host`]. Each operation either commits fully or
/// returns an error with no observable effect on the group or the host.
#[derive(Debug, Default)]
pub struct RotatingGroup {
    state: GroupState,
    events: Vec<GroupEvent>,
}

impl RotatingGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize and create a group in one step from a manifest.
    pub fn from_manifest(manifest: &GroupManifest, ctx: &CallContext) -> Result<Self, PoolError> {
        let mut group = Self::new();
        group.initialize(manifest.setup.clone())?;
        group.create_group(ctx, manifest.create_params()?)?;
        Ok(group)
    }

    fn execute<'h, H, T, F>(
        &mut self,
        host: &'h mut H,
        op: &'static str,
        f: F,
    ) -> Result<T, PoolError>
    where
        H: Transactional,
        F: FnOnce(&mut GroupTxn<'h, H>) -> Result<T, PoolError>,
    {
        let mut txn = GroupTxn::begin(&self.state, host);
        match f(&mut txn) {
            Ok(value) => {
                let (state, events) = txn.commit();
                self.state = state;
                self.events.extend(events);
                Ok(value)
            }
            Err(err) => {
                drop(txn);
                tracing::warn!(op, error = %err, kind = ?err.kind(), "operation rejected");
                Err(err)
            }
        }
    }

    // ── Operations ──────────────────────────────────────────────────────

    pub fn initialize(&mut self, setup: GroupSetup) -> Result<(), PoolError> {
        self.execute(&mut Detached, "initialize", |txn| txn.initialize(setup))
    }

    pub fn create_group(&mut self, ctx: &CallContext, params: CreateParams) -> Result<(), PoolError> {
        self.execute(&mut Detached, "create_group", |txn| txn.create_group(ctx, params))
    }

    /// Creator-only. Returns how many accounts were newly invited.
    pub fn invite_members(
        &mut self,
        ctx: &CallContext,
        accounts: &[AccountId],
    ) -> Result<usize, PoolError> {
        self.execute(&mut Detached, "invite_members", |txn| {
            txn.invite_members(ctx, accounts)
        })
    }

    pub fn join_group(&mut self, ctx: &CallContext) -> Result<(), PoolError> {
        self.execute(&mut Detached, "join_group", |txn| txn.join_group(ctx))
    }

    /// Callback from the verification hub with the attributes disclosed for `account`.
    pub fn on_verification_result(
        &mut self,
        ctx: &CallContext,
        account: AccountId,
        disclosure: &Disclosure,
        selector: &AccountId,
    ) -> Result<(), PoolError> {
        self.execute(&mut Detached, "on_verification_result", |txn| {
            txn.on_verification_result(ctx, account, disclosure, selector)
        })
    }

    /// Pay the caller's contribution. Returns the period it was recorded in.
    pub fn deposit<H: Host>(&mut self, host: &mut H, ctx: &CallContext) -> Result<u32, PoolError> {
        self.execute(host, "deposit", |txn| txn.deposit(ctx))
    }

    /// Operator-only. Pays the current period's pot to one of `candidates`.
    ///
    /// Unpaid deposits of earlier periods stay locked in the reserve.
    pub fn distribute_funds<H: Host>(
        &mut self,
        host: &mut H,
        ctx: &CallContext,
        candidates: &[AccountId],
    ) -> Result<PayoutRecord, PoolError> {
        self.execute(host, "distribute_funds", |txn| {
            txn.distribute_funds(ctx, candidates)
        })
    }

    // ── Views ───────────────────────────────────────────────────────────

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    pub fn setup(&self) -> Option<&GroupSetup> {
        self.state.setup.as_ref()
    }

    pub fn config(&self) -> Option<&GroupConfig> {
        self.state.config.as_ref()
    }

    pub fn member(&self, account: &AccountId) -> Option<MemberRecord> {
        self.state.members.record(account)
    }

    pub fn members(&self) -> &[AccountId] {
        self.state.members.members()
    }

    pub fn is_member(&self, account: &AccountId) -> bool {
        self.state.members.is_member(account)
    }

    pub fn is_invited(&self, account: &AccountId) -> bool {
        self.state.members.is_invited(account)
    }

    pub fn is_verified(&self, account: &AccountId) -> bool {
        self.state.members.is_verified(account)
    }

    pub fn current_period(&self) -> u32 {
        self.state.periods.current_index()
    }

    pub fn period(&self, index: u32) -> Option<&PeriodState> {
        self.state.periods.period(index)
    }

    pub fn has_deposited(&self, account: &AccountId, period: u32) -> bool {
        self.state.periods.has_deposited(period, account)
    }

    /// Earliest time a deposit advances the period.
    pub fn next_deposit_rollover_at(&self) -> Option<Timestamp> {
        let schedule = self.state.config.as_ref()?.schedule;
        Some(
            self.state
                .periods
                .next_rollover_at(schedule.deposit_interval_secs),
        )
    }

    /// Earliest time the operator may distribute.
    pub fn next_distribution_at(&self) -> Option<Timestamp> {
        let schedule = self.state.config.as_ref()?.schedule;
        Some(
            self.state
                .distribution
                .next_distribution_at(schedule.distribution_interval_secs),
        )
    }

    pub fn payouts(&self) -> &[PayoutRecord] {
        self.state.distribution.payouts()
    }

    pub fn cycle_winners(&self) -> &BTreeSet<AccountId> {
        self.state.distribution.cycle_winners()
    }

    /// Identifier of the identity requirements, for registration with the provider.
    pub fn verification_config_id(&self) -> Result<ConfigId, PoolError> {
        Ok(self.state.config()?.identity.config_id())
    }

    /// Take the events of all operations committed since the last drain.
    pub fn drain_events(&mut self) -> Vec<GroupEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Persistence ─────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Result<Vec<u8>, PoolError> {
        bincode::serialize(&self.state).map_err(|e| PoolError::Snapshot(e.to_string()))
    }

    /// Rebuild a group from [`RotatingGroup::snapshot`] output. Pending events are not restored.
    pub fn restore(bytes: &[u8]) -> Result<Self, PoolError> {
        let state = bincode::deserialize(bytes).map_err(|e| PoolError::Snapshot(e.to_string()))?;
        Ok(Self {
            state,
            events: Vec::new(),
        })
    }
}
