//! Nullable host: in-memory asset ledger and reserve market with savepoints.

use rosca_reserve::{AssetError, AssetLedger, ReserveError, ReserveMarket, Transactional};
use rosca_types::{AccountId, TokenAmount};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, Default)]
struct Ledger {
    balances: HashMap<(AccountId, AccountId), u128>,
    allowances: HashMap<(AccountId, AccountId, AccountId), u128>,
}

impl Ledger {
    fn balance(&self, asset: &AccountId, holder: &AccountId) -> u128 {
        self.balances.get(&(*asset, *holder)).copied().unwrap_or(0)
    }

    fn credit(&mut self, asset: &AccountId, holder: &AccountId, amount: u128) {
        *self.balances.entry((*asset, *holder)).or_default() += amount;
    }

    fn debit(&mut self, asset: &AccountId, holder: &AccountId, amount: u128) -> Result<(), AssetError> {
        let available = self.balance(asset, holder);
        if available < amount {
            return Err(AssetError::InsufficientBalance {
                needed: TokenAmount::new(amount),
                available: TokenAmount::new(available),
            });
        }
        self.balances.insert((*asset, *holder), available - amount);
        Ok(())
    }
}

/// Injected failures. Not affected by rollback.
#[derive(Clone, Debug, Default)]
struct Faults {
    rejected_senders: HashSet<AccountId>,
    supply_failure: Option<String>,
    withdraw_haircut: u128,
}

/// An in-memory asset ledger plus a 1:1 reserve market.
///
/// The market holds supplied assets under its own account and mints receipt
/// tokens one-for-one. [`NullHost::accrue_yield`] simulates interest by minting
/// extra receipts backed by extra market liquidity.
pub struct NullHost {
    market: AccountId,
    receipt: AccountId,
    ledger: Ledger,
    faults: Faults,
}

impl NullHost {
    pub fn new(market: AccountId, receipt: AccountId) -> Self {
        Self {
            market,
            receipt,
            ledger: Ledger::default(),
            faults: Faults::default(),
        }
    }

    /// Create `amount` of `asset` out of thin air for `holder`.
    pub fn mint(&mut self, asset: &AccountId, holder: &AccountId, amount: u128) {
        self.ledger.credit(asset, holder, amount);
    }

    /// Raw balance shortcut for assertions.
    pub fn balance(&self, asset: &AccountId, holder: &AccountId) -> u128 {
        self.ledger.balance(asset, holder)
    }

    /// Simulate interest: `holder` gains `amount` receipts, backed by new market liquidity.
    pub fn accrue_yield(&mut self, asset: &AccountId, holder: &AccountId, amount: u128) {
        let (receipt, market) = (self.receipt, self.market);
        self.ledger.credit(&receipt, holder, amount);
        self.ledger.credit(asset, &market, amount);
    }

    /// Make every transfer out of `sender` fail.
    pub fn reject_transfers_from(&mut self, sender: AccountId) {
        self.faults.rejected_senders.insert(sender);
    }

    /// Make every `supply` fail with `reason`.
    pub fn fail_supply(&mut self, reason: impl Into<String>) {
        self.faults.supply_failure = Some(reason.into());
    }

    /// Release `haircut` less than requested on every withdraw.
    pub fn set_withdraw_haircut(&mut self, haircut: u128) {
        self.faults.withdraw_haircut = haircut;
    }

    pub fn clear_faults(&mut self) {
        self.faults = Faults::default();
    }

    fn check_sender(&self, from: &AccountId) -> Result<(), AssetError> {
        if self.faults.rejected_senders.contains(from) {
            return Err(AssetError::Rejected(format!("transfers from {from} are blocked")));
        }
        Ok(())
    }
}

impl AssetLedger for NullHost {
    fn balance_of(&self, asset: &AccountId, holder: &AccountId) -> TokenAmount {
        TokenAmount::new(self.ledger.balance(asset, holder))
    }

    fn allowance(&self, asset: &AccountId, owner: &AccountId, spender: &AccountId) -> TokenAmount {
        TokenAmount::new(
            self.ledger
                .allowances
                .get(&(*asset, *owner, *spender))
                .copied()
                .unwrap_or(0),
        )
    }

    fn approve(
        &mut self,
        asset: &AccountId,
        owner: &AccountId,
        spender: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), AssetError> {
        self.ledger
            .allowances
            .insert((*asset, *owner, *spender), amount.raw());
        Ok(())
    }

    fn transfer(
        &mut self,
        asset: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), AssetError> {
        self.check_sender(from)?;
        self.ledger.debit(asset, from, amount.raw())?;
        self.ledger.credit(asset, to, amount.raw());
        Ok(())
    }

    fn transfer_from(
        &mut self,
        asset: &AccountId,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), AssetError> {
        self.check_sender(from)?;
        // Moving your own funds needs no allowance.
        if spender != from {
            let allowance = self.allowance(asset, from, spender);
            if allowance < amount {
                return Err(AssetError::InsufficientAllowance {
                    needed: amount,
                    available: allowance,
                });
            }
            self.ledger
                .allowances
                .insert((*asset, *from, *spender), allowance.raw() - amount.raw());
        }
        self.ledger.debit(asset, from, amount.raw())?;
        self.ledger.credit(asset, to, amount.raw());
        Ok(())
    }
}

impl ReserveMarket for NullHost {
    fn supply(
        &mut self,
        caller: &AccountId,
        asset: &AccountId,
        amount: TokenAmount,
        on_behalf_of: &AccountId,
    ) -> Result<(), ReserveError> {
        if let Some(reason) = &self.faults.supply_failure {
            return Err(ReserveError::SupplyFailed(reason.clone()));
        }
        let market = self.market;
        self.transfer_from(asset, &market, caller, &market, amount)?;
        let receipt = self.receipt;
        self.ledger.credit(&receipt, on_behalf_of, amount.raw());
        Ok(())
    }

    fn withdraw(
        &mut self,
        caller: &AccountId,
        asset: &AccountId,
        amount: TokenAmount,
        to: &AccountId,
    ) -> Result<TokenAmount, ReserveError> {
        let receipt = self.receipt;
        let market = self.market;
        self.ledger
            .debit(&receipt, caller, amount.raw())
            .map_err(|e| ReserveError::WithdrawFailed(e.to_string()))?;
        let released = amount.raw().saturating_sub(self.faults.withdraw_haircut);
        self.ledger
            .debit(asset, &market, released)
            .map_err(|e| ReserveError::WithdrawFailed(e.to_string()))?;
        self.ledger.credit(asset, to, released);
        Ok(TokenAmount::new(released))
    }
}

/// Savepoints are full copies of the ledger; fine for test-sized state.
pub struct HostSavepoint(Ledger);

impl Transactional for NullHost {
    type Savepoint = HostSavepoint;

    fn savepoint(&self) -> HostSavepoint {
        HostSavepoint(self.ledger.clone())
    }

    fn rollback_to(&mut self, savepoint: HostSavepoint) {
        self.ledger = savepoint.0;
    }
}
