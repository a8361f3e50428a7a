//! Nullable chain: hands out call contexts for a simulated ledger.

use crate::clock::NullClock;
use rosca_types::{AccountId, BlockHash, CallContext};
use std::cell::Cell;

/// Simulates the hosting ledger's block production.
///
/// Every call to [`NullChain::call`] lands in a new block: the height increases
/// by one and the previous-block hash is a digest of the previous height.
pub struct NullChain {
    clock: NullClock,
    height: Cell<u64>,
}

impl NullChain {
    pub fn new(start_secs: u64) -> Self {
        Self {
            clock: NullClock::new(start_secs),
            height: Cell::new(1),
        }
    }

    pub fn clock(&self) -> &NullClock {
        &self.clock
    }

    pub fn advance(&self, secs: u64) {
        self.clock.advance(secs);
    }

    pub fn height(&self) -> u64 {
        self.height.get()
    }

    /// Context for a call by `caller` in the next block.
    pub fn call(&self, caller: AccountId) -> CallContext {
        let height = self.height.get() + 1;
        self.height.set(height);
        CallContext::new(caller, self.clock.now(), height, block_hash_at(height - 1))
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new(1_000_000)
    }
}

fn block_hash_at(height: u64) -> BlockHash {
    BlockHash::new(rosca_crypto::blake2b_256_multi(&[
        b"null-chain",
        &height.to_be_bytes(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_call_is_a_new_block() {
        let chain = NullChain::new(100);
        let a = chain.call(AccountId::new([1; 20]));
        let b = chain.call(AccountId::new([1; 20]));
        assert_eq!(b.block_height, a.block_height + 1);
        assert_ne!(a.prev_block_hash, b.prev_block_hash);
        assert_eq!(a.now, b.now);
    }

    #[test]
    fn advance_moves_time() {
        let chain = NullChain::new(100);
        chain.advance(50);
        assert_eq!(chain.call(AccountId::ZERO).now.as_secs(), 150);
    }
}
