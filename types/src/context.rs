//! Per-call execution context.

use crate::{AccountId, BlockHash, Timestamp};
use serde::{Deserialize, Serialize};

/// What the hosting ledger tells an operation about the call it is running in:
/// who is calling, the current time, the current block height, and the hash of
/// the previous block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: AccountId,
    pub now: Timestamp,
    pub block_height: u64,
    pub prev_block_hash: BlockHash,
}

impl CallContext {
    pub fn new(
        caller: AccountId,
        now: Timestamp,
        block_height: u64,
        prev_block_hash: BlockHash,
    ) -> Self {
        Self {
            caller,
            now,
            block_height,
            prev_block_hash,
        }
    }

    /// Same block, different caller.
    pub fn with_caller(&self, caller: AccountId) -> Self {
        Self { caller, ..*self }
    }
}
