use rosca_types::TokenAmount;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReserveError {
    #[error("asset transfer failed: {0}")]
    Asset(#[from] AssetError),

    #[error("reserve supply failed: {0}")]
    SupplyFailed(String),

    #[error("reserve withdraw failed: {0}")]
    WithdrawFailed(String),

    #[error("reserve released {released}, requested {requested}")]
    WithdrawShort {
        requested: TokenAmount,
        released: TokenAmount,
    },
}
