//! Property-based tests for the rotating pool.

mod common;

use common::*;
use proptest::prelude::*;
use rosca_pool::{PoolError, Role, SelectionSeed};
use rosca_types::{AccountId, BlockHash, CallContext, Timestamp, TokenAmount};

const CALLERS: [AccountId; 4] = [ALICE, BOB, CAROL, DAVE];

fn arb_account() -> impl Strategy<Value = AccountId> {
    any::<[u8; 20]>().prop_map(AccountId::new)
}

proptest! {
    /// Every period total equals the contribution times its depositor count,
    /// whatever mix of deposits, rejections and time jumps happened.
    #[test]
    fn period_total_matches_depositors(
        steps in prop::collection::vec((0usize..4, 0u64..2 * WEEK), 1..40)
    ) {
        let mut pool = Pool::open(4);
        for (who, wait) in steps {
            pool.chain.advance(wait);
            let _ = pool.deposit(CALLERS[who]);

            for index in 0..=pool.group.current_period() {
                if let Some(period) = pool.group.period(index) {
                    let expected = TokenAmount::new(CONTRIBUTION)
                        .checked_mul(period.deposited_by.len() as u64)
                        .unwrap();
                    prop_assert_eq!(period.total_deposited, expected);
                    prop_assert!(!period.deposited_by.contains(&DAVE));
                }
            }
        }
    }

    /// A repeated deposit by the same account in the same block always fails.
    #[test]
    fn repeated_deposit_fails(who in 0usize..3, wait in 0u64..3 * WEEK) {
        let mut pool = Pool::open(4);
        pool.chain.advance(wait);
        let period = pool.deposit(MEMBERS[who]).unwrap();
        let second = pool.deposit(MEMBERS[who]);
        prop_assert_eq!(
            second,
            Err(PoolError::AlreadyDepositedInThisPeriod { account: MEMBERS[who], period })
        );
    }

    #[test]
    fn only_operator_distributes(caller in arb_account()) {
        prop_assume!(caller != OPERATOR);
        let mut pool = Pool::open(2);
        pool.deposit_all();
        pool.chain.advance(WEEK);
        prop_assert_eq!(
            pool.distribute_as(caller, &MEMBERS),
            Err(PoolError::Unauthorized { caller, role: Role::Operator })
        );
    }

    #[test]
    fn selection_is_a_pure_function_of_its_inputs(
        hash in any::<[u8; 32]>(),
        now in any::<u64>(),
        height in any::<u64>(),
        group in arb_account(),
        caller in arb_account(),
        period in any::<u32>(),
        count in 1usize..500,
    ) {
        let ctx = CallContext::new(caller, Timestamp::new(now), height, BlockHash::new(hash));
        let first = SelectionSeed::from_context(&ctx, group, period, count);
        let again = SelectionSeed::from_context(&ctx.with_caller(OPERATOR), group, period, count);

        let index = first.index().unwrap();
        prop_assert!(index < count);
        prop_assert_eq!(again.index(), Some(index));
    }

    /// The payout always equals the period total and lands on a listed candidate.
    #[test]
    fn payout_goes_to_a_candidate(
        depositors in prop::sample::subsequence(MEMBERS.to_vec(), 1..=3),
        candidates in prop::sample::subsequence(MEMBERS.to_vec(), 1..=3),
    ) {
        let mut pool = Pool::open(2);
        for member in &depositors {
            pool.deposit(*member).unwrap();
        }
        pool.chain.advance(WEEK);

        let payout = pool.distribute(&candidates).unwrap();
        prop_assert!(candidates.contains(&payout.winner));
        prop_assert_eq!(
            payout.amount.raw(),
            CONTRIBUTION * depositors.len() as u128
        );
        prop_assert_eq!(pool.asset_balance(&MARKET), 0);
    }
}
