use rosca_reserve::ReserveError;
use rosca_types::{AccountId, TokenAmount, Timestamp};
use rosca_verification::VerificationError;
use std::fmt;
use thiserror::Error;

/// A privileged role an operation may require.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Operator,
    Creator,
    VerificationHub,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator => write!(f, "operator"),
            Self::Creator => write!(f, "creator"),
            Self::VerificationHub => write!(f, "verification hub"),
        }
    }
}

/// Error taxonomy. Every kind aborts the whole operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Lifecycle,
    Configuration,
    Authorization,
    Membership,
    Verification,
    /// Expected; the caller may retry later.
    Period,
    ExternalCall,
    Persistence,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("group is already initialized")]
    AlreadyInitialized,

    #[error("group is not initialized")]
    NotInitialized,

    #[error("group is already created")]
    GroupAlreadyCreated,

    #[error("group is not created yet")]
    GroupNotCreated,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("{caller} is not the {role}")]
    Unauthorized { caller: AccountId, role: Role },

    #[error("{0} is not a member")]
    NotMember(AccountId),

    #[error("{0} is already a member")]
    AlreadyMember(AccountId),

    #[error("{0} has not been invited")]
    NotInvited(AccountId),

    #[error("candidate {0} is not a member")]
    InvalidMember(AccountId),

    #[error("{0} is not verified")]
    NotVerified(AccountId),

    #[error("verification requirement not met: {0}")]
    RequirementNotMet(#[from] VerificationError),

    #[error("disclosure addressed to group {got}, expected {expected}")]
    WrongGroup { expected: AccountId, got: AccountId },

    #[error("{account} already deposited in period {period}")]
    AlreadyDepositedInThisPeriod { account: AccountId, period: u32 },

    #[error("all {total_periods} periods are completed")]
    AllOperationsCompleted { total_periods: u32 },

    #[error("distribution window opens at {ready_at}")]
    BorrowFrequencyNotReached { ready_at: Timestamp },

    #[error("no candidates provided")]
    NoMembersProvided,

    #[error("no eligible candidates left in this cycle")]
    NoEligibleCandidates,

    #[error("nothing to distribute in period {period}")]
    NoFundsToDistribute { period: u32 },

    #[error("reserve released {released}, requested {requested}")]
    ReserveWithdrawShort {
        requested: TokenAmount,
        released: TokenAmount,
    },

    #[error("external call failed: {0}")]
    External(#[source] ReserveError),

    #[error("amount overflow")]
    AmountOverflow,

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("logging error: {0}")]
    Logging(String),
}

impl PoolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyInitialized
            | Self::NotInitialized
            | Self::GroupAlreadyCreated
            | Self::GroupNotCreated => ErrorKind::Lifecycle,
            Self::InvalidConfiguration(_) | Self::Config(_) | Self::Logging(_) => {
                ErrorKind::Configuration
            }
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::NotMember(_)
            | Self::AlreadyMember(_)
            | Self::NotInvited(_)
            | Self::InvalidMember(_) => ErrorKind::Membership,
            Self::NotVerified(_) | Self::RequirementNotMet(_) | Self::WrongGroup { .. } => {
                ErrorKind::Verification
            }
            Self::AlreadyDepositedInThisPeriod { .. }
            | Self::AllOperationsCompleted { .. }
            | Self::BorrowFrequencyNotReached { .. }
            | Self::NoMembersProvided
            | Self::NoEligibleCandidates
            | Self::NoFundsToDistribute { .. } => ErrorKind::Period,
            Self::ReserveWithdrawShort { .. } | Self::External(_) | Self::AmountOverflow => {
                ErrorKind::ExternalCall
            }
            Self::Snapshot(_) => ErrorKind::Persistence,
        }
    }

    /// Whether retrying the same call later can succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Period
    }
}

impl From<ReserveError> for PoolError {
    fn from(err: ReserveError) -> Self {
        match err {
            ReserveError::WithdrawShort {
                requested,
                released,
            } => Self::ReserveWithdrawShort {
                requested,
                released,
            },
            other => Self::External(other),
        }
    }
}
