//! Rotating fund pool.
//!
//! One [`RotatingGroup`] is one savings circle: a fixed set of members pay an equal
//! contribution every period, contributions earn yield in an external reserve
//! market, and at fixed intervals the operator triggers a payout of the whole pot
//! to one pseudo-randomly selected member. Yield is skimmed to a fee recipient.
//!
//! Components, leaves first:
//! - **Reserve gateway** ([`rosca_reserve::ReserveGateway`]): custody in and out.
//! - **Verification gate** ([`verification`]): applies provider disclosures.
//! - **Membership** ([`membership`]): invited / member / verified per account.
//! - **Periods** ([`period`]): deposit flags, totals, time-windowed rollover.
//! - **Lifecycle** ([`lifecycle`]): `initialize` → `create_group`, immutable config.
//! - **Distribution** ([`distribution`]): winner selection, withdrawal, fee skim.
//!
//! Every public operation is atomic: it runs against a staged copy of the group
//! state and a host savepoint, and either commits both or neither ([`txn`]).

pub mod config;
pub mod distribution;
pub mod error;
pub mod events;
pub mod group;
pub mod lifecycle;
pub mod logging;
pub mod membership;
pub mod period;
pub mod selection;
pub mod txn;
pub mod verification;

pub use config::GroupManifest;
pub use distribution::{DistributionState, PayoutRecord};
pub use error::{ErrorKind, PoolError, Role};
pub use events::GroupEvent;
pub use group::{GroupState, RotatingGroup};
pub use lifecycle::{CreateParams, FairnessMode, GroupConfig, GroupSetup, Lifecycle, Schedule};
pub use logging::{init_logging, LogFormat};
pub use membership::{MemberRecord, Membership};
pub use period::{PeriodState, PeriodTracker};
pub use selection::SelectionSeed;
