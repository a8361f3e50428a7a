//! Identity verification gate.
//!
//! The pool never verifies proofs itself. An external verification provider checks
//! the participant's identity proof off-ledger and calls back with the attributes it
//! disclosed. This crate decides whether those attributes satisfy the group's
//! policy:
//!
//! 1. **Policy**: one of nine levels, from "no checks" through any combination of
//!    age, nationality and gender.
//! 2. **Requirements**: the policy plus its parameters (minimum age, allowed
//!    nationalities, required gender), fixed at group creation.
//! 3. **Gate**: evaluates a disclosure against the requirements. All active checks
//!    must pass; there is no partial credit.

pub mod disclosure;
pub mod error;
pub mod gate;
pub mod policy;
pub mod requirements;

pub use disclosure::Disclosure;
pub use error::{Attribute, VerificationError};
pub use gate::VerificationGate;
pub use policy::VerificationPolicy;
pub use requirements::{ConfigId, IdentityRequirements};
