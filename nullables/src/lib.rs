//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the pool (time, the hosting chain, the asset
//! ledger, the reserve market) is abstracted behind a trait or a plain value. This
//! crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (advance time, accrue yield, inject faults)
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod chain;
pub mod clock;
pub mod host;

pub use chain::NullChain;
pub use clock::NullClock;
pub use host::NullHost;
