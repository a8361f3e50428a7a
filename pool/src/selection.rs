//! Pseudo-random winner selection.
//!
//! The seed mixes block-level data with the group account, the period index and
//! the candidate count, so selections differ across groups and periods sharing
//! one block. Anyone holding the same inputs reproduces the choice. The inputs are
//! observable and partly influenceable by block producers; this is not a
//! manipulation-resistant source of randomness.

use rosca_crypto::{blake2b_256_multi, reduce_mod};
use rosca_types::{AccountId, BlockHash, CallContext, Timestamp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionSeed {
    pub prev_block_hash: BlockHash,
    pub now: Timestamp,
    pub block_height: u64,
    pub group: AccountId,
    pub period: u32,
    pub candidate_count: u64,
}

impl SelectionSeed {
    pub fn from_context(
        ctx: &CallContext,
        group: AccountId,
        period: u32,
        candidate_count: usize,
    ) -> Self {
        Self {
            prev_block_hash: ctx.prev_block_hash,
            now: ctx.now,
            block_height: ctx.block_height,
            group,
            period,
            candidate_count: candidate_count as u64,
        }
    }

    pub fn digest(&self) -> [u8; 32] {
        blake2b_256_multi(&[
            self.prev_block_hash.as_bytes(),
            &self.now.as_secs().to_be_bytes(),
            &self.block_height.to_be_bytes(),
            self.group.as_bytes(),
            &self.period.to_be_bytes(),
            &self.candidate_count.to_be_bytes(),
        ])
    }

    /// Index into a candidate list of `candidate_count` entries, or `None` if empty.
    pub fn index(&self) -> Option<usize> {
        reduce_mod(&self.digest(), self.candidate_count).map(|i| i as usize)
    }

    /// The selected candidate. `candidates.len()` must equal `candidate_count`.
    pub fn pick<'a>(&self, candidates: &'a [AccountId]) -> Option<&'a AccountId> {
        if candidates.len() as u64 != self.candidate_count {
            return None;
        }
        candidates.get(self.index()?)
    }
}
