//! Interfaces to everything the pool does not own.
//!
//! The pool holds custody of contributions through an external asset ledger and
//! parks them in an external yield-bearing reserve market. Both are abstracted
//! behind traits so the state machine depends only on the traits; production hosts
//! bind them to a real ledger, tests bind them to `rosca-nullables`.
//!
//! Every operation of the pool is atomic. Hosts therefore also implement
//! [`Transactional`]: the pool takes a savepoint before an operation and rolls the
//! host back to it if any step fails.

pub mod error;
pub mod gateway;

pub use error::{AssetError, ReserveError};
pub use gateway::{ReserveAccounts, ReserveGateway};

use rosca_types::{AccountId, TokenAmount};

/// Fungible asset balances, allowances and transfers.
///
/// The same ledger carries the pooled asset and the reserve market's receipt
/// token; `asset` selects which.
pub trait AssetLedger {
    fn balance_of(&self, asset: &AccountId, holder: &AccountId) -> TokenAmount;

    fn allowance(&self, asset: &AccountId, owner: &AccountId, spender: &AccountId) -> TokenAmount;

    /// Set `spender`'s allowance over `owner`'s balance to exactly `amount`.
    fn approve(
        &mut self,
        asset: &AccountId,
        owner: &AccountId,
        spender: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), AssetError>;

    /// Push `amount` from `from` to `to`.
    fn transfer(
        &mut self,
        asset: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), AssetError>;

    /// Pull `amount` from `from` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        &mut self,
        asset: &AccountId,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), AssetError>;
}

/// A yield-bearing reserve market.
///
/// Supplying pulls the asset from `caller` (against a prior approval) and mints
/// receipt tokens to `on_behalf_of`; withdrawing burns the caller's receipts and
/// releases the asset to `to`.
pub trait ReserveMarket {
    fn supply(
        &mut self,
        caller: &AccountId,
        asset: &AccountId,
        amount: TokenAmount,
        on_behalf_of: &AccountId,
    ) -> Result<(), ReserveError>;

    /// Returns the amount actually released, which may be less than requested.
    fn withdraw(
        &mut self,
        caller: &AccountId,
        asset: &AccountId,
        amount: TokenAmount,
        to: &AccountId,
    ) -> Result<TokenAmount, ReserveError>;
}

/// Savepoint / rollback over the host's external state.
pub trait Transactional {
    type Savepoint;

    fn savepoint(&self) -> Self::Savepoint;

    /// Undo every external effect since `savepoint` was taken.
    fn rollback_to(&mut self, savepoint: Self::Savepoint);
}

/// Everything a pool operation may call out to.
pub trait Host: AssetLedger + ReserveMarket + Transactional {}

impl<T: AssetLedger + ReserveMarket + Transactional> Host for T {}
