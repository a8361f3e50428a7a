//! Fundamental types for the rotating fund pool.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identifiers, token amounts, timestamps, block hashes, and the per-call
//! execution context supplied by the hosting ledger.

pub mod account;
pub mod amount;
pub mod block;
pub mod context;
pub mod error;
pub mod time;

pub use account::AccountId;
pub use amount::TokenAmount;
pub use block::BlockHash;
pub use context::CallContext;
pub use error::TypesError;
pub use time::Timestamp;
