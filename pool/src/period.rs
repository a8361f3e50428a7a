//! Deposit periods.
//!
//! A period is a deposit window. The current period advances by exactly one when a
//! deposit arrives at least one deposit interval after the last rollover; nothing
//! else advances it. Within a period each member deposits at most once, so the
//! period total is always the contribution times the number of depositors.

use crate::error::PoolError;
use crate::events::GroupEvent;
use crate::lifecycle::require_created;
use crate::txn::GroupTxn;
use rosca_reserve::{Host, ReserveGateway};
use rosca_types::{AccountId, CallContext, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodState {
    pub deposited_by: BTreeSet<AccountId>,
    pub total_deposited: TokenAmount,
    /// Paid out of this period's deposits so far.
    pub distributed: TokenAmount,
}

impl PeriodState {
    /// Deposits of this period not yet paid out.
    pub fn undistributed(&self) -> TokenAmount {
        self.total_deposited.saturating_sub(self.distributed)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PeriodTracker {
    current: u32,
    last_rollover: Timestamp,
    periods: HashMap<u32, PeriodState>,
}

impl PeriodTracker {
    pub fn start(now: Timestamp) -> Self {
        Self {
            current: 0,
            last_rollover: now,
            periods: HashMap::new(),
        }
    }

    pub fn current_index(&self) -> u32 {
        self.current
    }

    pub fn last_rollover(&self) -> Timestamp {
        self.last_rollover
    }

    pub fn next_rollover_at(&self, interval_secs: u64) -> Timestamp {
        self.last_rollover.plus_secs(interval_secs)
    }

    /// Advance one period if the interval has fully elapsed. Returns the new index.
    pub fn roll_over_if_due(&mut self, now: Timestamp, interval_secs: u64) -> Option<u32> {
        if !self.last_rollover.has_expired(interval_secs, now) {
            return None;
        }
        self.current = self.current.saturating_add(1);
        self.last_rollover = now;
        Some(self.current)
    }

    pub fn period(&self, index: u32) -> Option<&PeriodState> {
        self.periods.get(&index)
    }

    pub fn has_deposited(&self, index: u32, account: &AccountId) -> bool {
        self.periods
            .get(&index)
            .is_some_and(|p| p.deposited_by.contains(account))
    }

    /// Record `account`'s deposit into period `index`. Returns the new period total.
    pub fn record_deposit(
        &mut self,
        index: u32,
        account: AccountId,
        amount: TokenAmount,
    ) -> Result<TokenAmount, PoolError> {
        let period = self.periods.entry(index).or_default();
        if period.deposited_by.contains(&account) {
            return Err(PoolError::AlreadyDepositedInThisPeriod {
                account,
                period: index,
            });
        }
        let total = period
            .total_deposited
            .checked_add(amount)
            .ok_or(PoolError::AmountOverflow)?;
        period.deposited_by.insert(account);
        period.total_deposited = total;
        Ok(total)
    }

    pub fn undistributed(&self, index: u32) -> TokenAmount {
        self.periods
            .get(&index)
            .map_or(TokenAmount::ZERO, PeriodState::undistributed)
    }

    pub(crate) fn mark_distributed(
        &mut self,
        index: u32,
        amount: TokenAmount,
    ) -> Result<(), PoolError> {
        let period = self.periods.entry(index).or_default();
        period.distributed = period
            .distributed
            .checked_add(amount)
            .ok_or(PoolError::AmountOverflow)?;
        Ok(())
    }

    /// Principal held in the reserve on behalf of members, across all periods.
    pub fn outstanding_principal(&self) -> Result<TokenAmount, PoolError> {
        self.periods
            .values()
            .try_fold(TokenAmount::ZERO, |acc, p| acc.checked_add(p.undistributed()))
            .ok_or(PoolError::AmountOverflow)
    }
}

impl<H: Host> GroupTxn<'_, H> {
    /// Pay the caller's contribution for the current period. Returns the period index.
    pub(crate) fn deposit(&mut self, ctx: &CallContext) -> Result<u32, PoolError> {
        require_created(self.state.lifecycle)?;
        let caller = ctx.caller;
        let GroupTxn {
            state,
            events,
            host,
            ..
        } = self;
        let setup = state.setup()?;
        let config = state.config()?;

        if !state.members.is_member(&caller) {
            return Err(PoolError::NotMember(caller));
        }
        if config.identity.policy.requires_verification() && !state.members.is_verified(&caller) {
            return Err(PoolError::NotVerified(caller));
        }

        let schedule = config.schedule;
        let accounts = setup.reserve_accounts();
        let periods = &mut state.periods;
        if let Some(index) = periods.roll_over_if_due(ctx.now, schedule.deposit_interval_secs) {
            tracing::info!(period = index, "deposit period advanced");
            events.push(GroupEvent::PeriodAdvanced {
                period: index,
                at: ctx.now,
            });
        }

        let period = periods.current_index();
        if period >= schedule.total_periods {
            return Err(PoolError::AllOperationsCompleted {
                total_periods: schedule.total_periods,
            });
        }
        if periods.has_deposited(period, &caller) {
            return Err(PoolError::AlreadyDepositedInThisPeriod {
                account: caller,
                period,
            });
        }

        let amount = schedule.contribution;
        let mut gateway = ReserveGateway::new(&mut **host, accounts);
        gateway.collect(&caller, amount)?;
        gateway.supply(amount)?;

        let total = periods.record_deposit(period, caller, amount)?;
        tracing::info!(member = %caller, period, %amount, %total, "deposit recorded");
        events.push(GroupEvent::DepositRecorded {
            account: caller,
            period,
            amount,
        });
        Ok(period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(n: u8) -> AccountId {
        AccountId::new([n; 20])
    }

    #[test]
    fn rollover_waits_for_full_interval() {
        let mut t = PeriodTracker::start(Timestamp::new(1_000));
        assert_eq!(t.roll_over_if_due(Timestamp::new(1_059), 60), None);
        assert_eq!(t.roll_over_if_due(Timestamp::new(1_060), 60), Some(1));
        assert_eq!(t.last_rollover(), Timestamp::new(1_060));
        assert_eq!(t.next_rollover_at(60), Timestamp::new(1_120));
    }

    #[test]
    fn rollover_advances_one_step_after_long_gap() {
        let mut t = PeriodTracker::start(Timestamp::new(0));
        assert_eq!(t.roll_over_if_due(Timestamp::new(10_000), 60), Some(1));
        assert_eq!(t.current_index(), 1);
    }

    #[test]
    fn duplicate_deposit_rejected() {
        let mut t = PeriodTracker::start(Timestamp::new(0));
        t.record_deposit(0, acct(1), TokenAmount::new(50)).unwrap();
        assert_eq!(
            t.record_deposit(0, acct(1), TokenAmount::new(50)),
            Err(PoolError::AlreadyDepositedInThisPeriod {
                account: acct(1),
                period: 0
            })
        );
        assert_eq!(
            t.record_deposit(1, acct(1), TokenAmount::new(50)),
            Ok(TokenAmount::new(50))
        );
    }

    #[test]
    fn total_tracks_depositors() {
        let mut t = PeriodTracker::start(Timestamp::new(0));
        for n in 1..=4 {
            t.record_deposit(0, acct(n), TokenAmount::new(25)).unwrap();
        }
        let p = t.period(0).unwrap();
        assert_eq!(p.deposited_by.len(), 4);
        assert_eq!(p.total_deposited, TokenAmount::new(100));
        assert!(t.has_deposited(0, &acct(3)));
        assert!(!t.has_deposited(0, &acct(5)));
    }

    #[test]
    fn distributed_reduces_outstanding() {
        let mut t = PeriodTracker::start(Timestamp::new(0));
        t.record_deposit(0, acct(1), TokenAmount::new(40)).unwrap();
        t.record_deposit(1, acct(1), TokenAmount::new(40)).unwrap();
        assert_eq!(t.outstanding_principal(), Ok(TokenAmount::new(80)));

        t.mark_distributed(0, TokenAmount::new(40)).unwrap();
        assert_eq!(t.undistributed(0), TokenAmount::ZERO);
        assert_eq!(t.period(0).unwrap().total_deposited, TokenAmount::new(40));
        assert_eq!(t.outstanding_principal(), Ok(TokenAmount::new(40)));
    }

    #[test]
    fn untouched_period_has_nothing_undistributed() {
        let t = PeriodTracker::start(Timestamp::new(0));
        assert!(t.undistributed(7).is_zero());
        assert!(t.period(7).is_none());
    }
}
