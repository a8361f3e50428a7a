//! Hashing primitives for the rotating fund pool.
//!
//! - **Blake2b-256** for the winner-selection digest and the verification
//!   configuration identifier
//! - Big-endian reduction of a digest into an index range

pub mod hash;

pub use hash::{blake2b_256, blake2b_256_multi, reduce_mod};
