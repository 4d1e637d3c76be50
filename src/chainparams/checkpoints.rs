//! Hard-coded checkpoints
//!
//! A checkpoint pins the block hash at a height; no reorganization may
//! replace a block at or below the last checkpoint. The transaction counts
//! only feed sync-progress estimates.

use serde::Serialize;

use super::ParamsError;
use crate::constants::{SECONDS_PER_DAY, SIGCHECK_VERIFICATION_FACTOR};
use crate::crypto::Hash256;

/// A (height, hash) anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckpointEntry {
    pub height: u32,
    pub hash: Hash256,
}

/// Ordered checkpoints plus sync-progress metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointTable {
    entries: Vec<CheckpointEntry>,
    /// UNIX timestamp of the last checkpoint block
    pub last_checkpoint_time: u64,
    /// Total transactions between genesis and the last checkpoint
    pub transactions_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

impl CheckpointTable {
    /// Build a table, requiring strictly increasing heights starting at 0
    pub fn new(
        entries: Vec<CheckpointEntry>,
        last_checkpoint_time: u64,
        transactions_last_checkpoint: u64,
        transactions_per_day: f64,
    ) -> Result<Self, ParamsError> {
        let table = Self {
            entries,
            last_checkpoint_time,
            transactions_last_checkpoint,
            transactions_per_day,
        };
        table.validate()?;
        Ok(table)
    }

    /// Table over compiled-in entries; ordering is checked by [`Self::validate`]
    /// when the registry is built
    pub fn from_static(
        entries: &[CheckpointEntry],
        last_checkpoint_time: u64,
        transactions_last_checkpoint: u64,
        transactions_per_day: f64,
    ) -> Self {
        Self {
            entries: entries.to_vec(),
            last_checkpoint_time,
            transactions_last_checkpoint,
            transactions_per_day,
        }
    }

    /// Check ordering and the height-0 anchor
    pub fn validate(&self) -> Result<(), ParamsError> {
        let first = self.entries.first().ok_or(ParamsError::EmptyCheckpoints)?;
        if first.height != 0 {
            return Err(ParamsError::MissingGenesisCheckpoint(first.height));
        }
        for pair in self.entries.windows(2) {
            if pair[1].height <= pair[0].height {
                return Err(ParamsError::CheckpointOrder {
                    previous: pair[0].height,
                    height: pair[1].height,
                });
            }
        }
        Ok(())
    }

    /// Check that height 0 is anchored to `genesis_hash`
    pub fn validate_anchor(&self, genesis_hash: &Hash256) -> Result<(), ParamsError> {
        self.validate()?;
        match self.lookup(0) {
            Some(found) if found == *genesis_hash => Ok(()),
            Some(found) => Err(ParamsError::CheckpointGenesisMismatch {
                expected: *genesis_hash,
                found,
            }),
            None => Err(ParamsError::EmptyCheckpoints),
        }
    }

    pub fn entries(&self) -> &[CheckpointEntry] {
        &self.entries
    }

    pub fn lookup(&self, height: u32) -> Option<Hash256> {
        self.entries
            .binary_search_by_key(&height, |entry| entry.height)
            .ok()
            .map(|index| self.entries[index].hash)
    }

    pub fn last_checkpoint(&self) -> Option<&CheckpointEntry> {
        self.entries.last()
    }

    pub fn last_checkpoint_height(&self) -> u32 {
        self.last_checkpoint().map_or(0, |entry| entry.height)
    }

    /// A block passes unless a checkpoint at its height names another hash
    pub fn check_block(&self, height: u32, hash: &Hash256) -> bool {
        self.lookup(height).map_or(true, |expected| expected == *hash)
    }

    /// Whether a reorganization replacing blocks from `fork_height` upwards
    /// is permitted; nothing at or below the last checkpoint may change
    pub fn allows_reorg_at(&self, fork_height: u32) -> bool {
        fork_height > self.last_checkpoint_height()
    }

    /// Rough fraction of the chain's transactions processed at `current_height`
    ///
    /// Informational only; clamped to `[0, 1]`.
    pub fn estimate_progress(&self, current_height: u32, now: u64, target_spacing: u64) -> f64 {
        let blocks_per_day = SECONDS_PER_DAY as f64 / target_spacing.max(1) as f64;
        let checkpoint_txs = self.transactions_last_checkpoint as f64;
        let checkpoint_height = self.last_checkpoint_height();

        let processed = if current_height >= checkpoint_height {
            let blocks_after = (current_height - checkpoint_height) as f64;
            checkpoint_txs + blocks_after * self.transactions_per_day / blocks_per_day
        } else {
            checkpoint_txs * current_height as f64 / checkpoint_height as f64
        };

        let days_since = now.saturating_sub(self.last_checkpoint_time) as f64 / SECONDS_PER_DAY as f64;
        let total = checkpoint_txs + days_since * self.transactions_per_day;
        if total <= 0.0 {
            return 1.0;
        }
        (processed / total).clamp(0.0, 1.0)
    }

    /// Verification progress weighted by signature-check cost
    ///
    /// Transactions before the last checkpoint count once, later ones count
    /// [`SIGCHECK_VERIFICATION_FACTOR`] times.
    pub fn verification_progress(&self, chain_tx: u64, block_time: u64, now: u64) -> f64 {
        let checkpoint_txs = self.transactions_last_checkpoint as f64;
        let per_second = self.transactions_per_day / SECONDS_PER_DAY as f64;

        let (work_before, work_after) = if chain_tx <= self.transactions_last_checkpoint {
            let cheap_before = chain_tx as f64;
            let cheap_after = checkpoint_txs - cheap_before;
            let expensive_after = now.saturating_sub(self.last_checkpoint_time) as f64 * per_second;
            (
                cheap_before,
                cheap_after + expensive_after * SIGCHECK_VERIFICATION_FACTOR,
            )
        } else {
            let expensive_before = (chain_tx - self.transactions_last_checkpoint) as f64;
            let expensive_after = now.saturating_sub(block_time) as f64 * per_second;
            (
                checkpoint_txs + expensive_before * SIGCHECK_VERIFICATION_FACTOR,
                expensive_after * SIGCHECK_VERIFICATION_FACTOR,
            )
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 1.0;
        }
        work_before / total
    }
}
