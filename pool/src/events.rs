//! Events emitted by committed group operations.
//!
//! Events of a failed operation are discarded with the rest of its staged state.

use rosca_types::{AccountId, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupEvent {
    Initialized {
        group: AccountId,
        label: String,
    },
    GroupCreated {
        creator: AccountId,
        total_periods: u32,
        contribution: TokenAmount,
    },
    MemberInvited {
        account: AccountId,
    },
    MemberJoined {
        account: AccountId,
    },
    MemberVerified {
        account: AccountId,
    },
    PeriodAdvanced {
        period: u32,
        at: Timestamp,
    },
    DepositRecorded {
        account: AccountId,
        period: u32,
        amount: TokenAmount,
    },
    FundsDistributed {
        period: u32,
        winner: AccountId,
        amount: TokenAmount,
    },
    YieldSkimmed {
        recipient: AccountId,
        amount: TokenAmount,
    },
    /// Every member has won once; the winner set starts over.
    CycleCompleted {
        winners: u32,
    },
}
