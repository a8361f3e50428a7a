//! Parsing errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid account id: {0}")]
    InvalidAccount(String),

    #[error("account id must be {expected} bytes, got {actual}")]
    AccountLength { expected: usize, actual: usize },
}
