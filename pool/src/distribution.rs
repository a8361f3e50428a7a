//! Payouts.
//!
//! The operator triggers a distribution at most once per distribution interval.
//! The whole undistributed balance of the current period goes to one candidate
//! chosen by [`SelectionSeed`], withdrawn from the reserve straight to the winner.
//! Receipt tokens the group holds beyond the principal still owed to members are
//! yield and are swept to the fee recipient in the same operation.

use crate::error::{PoolError, Role};
use crate::events::GroupEvent;
use crate::lifecycle::{require_created, FairnessMode};
use crate::selection::SelectionSeed;
use crate::txn::GroupTxn;
use rosca_reserve::{Host, ReserveGateway};
use rosca_types::{AccountId, CallContext, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRecord {
    pub period: u32,
    pub winner: AccountId,
    pub amount: TokenAmount,
    pub yield_skimmed: TokenAmount,
    pub paid_at: Timestamp,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DistributionState {
    last_distribution: Timestamp,
    /// Winners in the current cycle; only tracked under `NoRepeatWinners`.
    cycle_winners: BTreeSet<AccountId>,
    payouts: Vec<PayoutRecord>,
}

impl DistributionState {
    pub fn start(now: Timestamp) -> Self {
        Self {
            last_distribution: now,
            ..Self::default()
        }
    }

    pub fn last_distribution(&self) -> Timestamp {
        self.last_distribution
    }

    pub fn next_distribution_at(&self, interval_secs: u64) -> Timestamp {
        self.last_distribution.plus_secs(interval_secs)
    }

    pub fn cycle_winners(&self) -> &BTreeSet<AccountId> {
        &self.cycle_winners
    }

    pub fn payouts(&self) -> &[PayoutRecord] {
        &self.payouts
    }
}

impl<H: Host> GroupTxn<'_, H> {
    /// Only the current period is paid out. Deposits of an earlier period that
    /// rolled over unpaid stay in the reserve as outstanding principal; they are
    /// never swept as yield and no operation releases them.
    pub(crate) fn distribute_funds(
        &mut self,
        ctx: &CallContext,
        candidates: &[AccountId],
    ) -> Result<PayoutRecord, PoolError> {
        require_created(self.state.lifecycle)?;
        let GroupTxn {
            state,
            events,
            host,
            ..
        } = self;
        let setup = state.setup()?.clone();
        let config = state.config()?;
        let schedule = config.schedule;
        let fairness = config.fairness;

        if ctx.caller != setup.operator {
            return Err(PoolError::Unauthorized {
                caller: ctx.caller,
                role: Role::Operator,
            });
        }
        let ready_at = state
            .distribution
            .next_distribution_at(schedule.distribution_interval_secs);
        if ctx.now < ready_at {
            return Err(PoolError::BorrowFrequencyNotReached { ready_at });
        }
        if candidates.is_empty() {
            return Err(PoolError::NoMembersProvided);
        }
        if let Some(outsider) = candidates.iter().find(|c| !state.members.is_member(c)) {
            return Err(PoolError::InvalidMember(*outsider));
        }

        let period = state.periods.current_index();
        let amount = state.periods.undistributed(period);
        if amount.is_zero() {
            return Err(PoolError::NoFundsToDistribute { period });
        }

        let eligible: Vec<AccountId> = match fairness {
            FairnessMode::OperatorTrust => candidates.to_vec(),
            FairnessMode::NoRepeatWinners => candidates
                .iter()
                .filter(|c| !state.distribution.cycle_winners.contains(*c))
                .copied()
                .collect(),
        };
        if eligible.is_empty() {
            return Err(PoolError::NoEligibleCandidates);
        }
        let seed = SelectionSeed::from_context(ctx, setup.group_account, period, eligible.len());
        let winner = *seed.pick(&eligible).ok_or(PoolError::NoMembersProvided)?;

        let mut gateway = ReserveGateway::new(&mut **host, setup.reserve_accounts());
        gateway.withdraw(amount, &winner)?;
        state.periods.mark_distributed(period, amount)?;

        let outstanding = state.periods.outstanding_principal()?;
        let yield_amount = gateway.receipt_balance().saturating_sub(outstanding);
        if !yield_amount.is_zero() {
            gateway.transfer_receipts(yield_amount, &setup.fee_recipient)?;
            tracing::info!(recipient = %setup.fee_recipient, amount = %yield_amount, "yield skimmed");
            events.push(GroupEvent::YieldSkimmed {
                recipient: setup.fee_recipient,
                amount: yield_amount,
            });
        }

        let distribution = &mut state.distribution;
        distribution.last_distribution = ctx.now;
        if fairness == FairnessMode::NoRepeatWinners {
            distribution.cycle_winners.insert(winner);
            let members = state.members.members();
            if members
                .iter()
                .all(|m| distribution.cycle_winners.contains(m))
            {
                let winners = distribution.cycle_winners.len() as u32;
                distribution.cycle_winners.clear();
                tracing::info!(winners, "every member has won; cycle restarts");
                events.push(GroupEvent::CycleCompleted { winners });
            }
        }

        let record = PayoutRecord {
            period,
            winner,
            amount,
            yield_skimmed: yield_amount,
            paid_at: ctx.now,
        };
        distribution.payouts.push(record.clone());
        tracing::info!(period, %winner, %amount, candidates = eligible.len(), "funds distributed");
        events.push(GroupEvent::FundsDistributed {
            period,
            winner,
            amount,
        });
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_window_counts_from_last_distribution() {
        let state = DistributionState::start(Timestamp::new(500));
        assert_eq!(state.last_distribution(), Timestamp::new(500));
        assert_eq!(state.next_distribution_at(100), Timestamp::new(600));
        assert!(state.payouts().is_empty());
        assert!(state.cycle_winners().is_empty());
    }
}
