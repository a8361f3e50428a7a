//! Reserve gateway: the pool's only path to its custody balances.

use crate::error::ReserveError;
use crate::{AssetLedger, ReserveMarket};
use rosca_types::{AccountId, TokenAmount};
use serde::{Deserialize, Serialize};

/// The accounts a gateway works with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveAccounts {
    /// The group's own account; holds custody and the receipt balance.
    pub custody: AccountId,
    /// The pooled asset.
    pub asset: AccountId,
    /// The reserve market (spender of the custody approval).
    pub market: AccountId,
    /// The receipt token the market mints on supply.
    pub receipt: AccountId,
}

/// Thin adapter over the asset ledger and reserve market, bound to one group.
pub struct ReserveGateway<'a, H: AssetLedger + ReserveMarket> {
    host: &'a mut H,
    accounts: ReserveAccounts,
}

impl<'a, H: AssetLedger + ReserveMarket> ReserveGateway<'a, H> {
    pub fn new(host: &'a mut H, accounts: ReserveAccounts) -> Self {
        Self { host, accounts }
    }

    /// Pull `amount` of the asset from `from` into custody.
    pub fn collect(&mut self, from: &AccountId, amount: TokenAmount) -> Result<(), ReserveError> {
        let custody = self.accounts.custody;
        self.host
            .transfer_from(&self.accounts.asset, &custody, from, &custody, amount)?;
        Ok(())
    }

    /// Approve exactly `amount` for the market, then supply it on the group's behalf.
    pub fn supply(&mut self, amount: TokenAmount) -> Result<(), ReserveError> {
        let ReserveAccounts {
            custody,
            asset,
            market,
            ..
        } = self.accounts;
        self.host.approve(&asset, &custody, &market, amount)?;
        self.host.supply(&custody, &asset, amount, &custody)?;
        tracing::debug!(%custody, %amount, "supplied to reserve");
        Ok(())
    }

    /// Withdraw exactly `amount` from the reserve straight to `recipient`.
    ///
    /// Fails with [`ReserveError::WithdrawShort`] if the market releases less.
    pub fn withdraw(
        &mut self,
        amount: TokenAmount,
        recipient: &AccountId,
    ) -> Result<TokenAmount, ReserveError> {
        let released =
            self.host
                .withdraw(&self.accounts.custody, &self.accounts.asset, amount, recipient)?;
        if released < amount {
            return Err(ReserveError::WithdrawShort {
                requested: amount,
                released,
            });
        }
        Ok(released)
    }

    /// Receipt tokens currently held by the group.
    pub fn receipt_balance(&self) -> TokenAmount {
        self.host
            .balance_of(&self.accounts.receipt, &self.accounts.custody)
    }

    /// Send `amount` of receipt tokens to `to`.
    pub fn transfer_receipts(
        &mut self,
        amount: TokenAmount,
        to: &AccountId,
    ) -> Result<(), ReserveError> {
        self.host
            .transfer(&self.accounts.receipt, &self.accounts.custody, to, amount)?;
        Ok(())
    }
}
