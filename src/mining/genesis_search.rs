//! Offline genesis search
//!
//! Finds a nonce (and if needed a later timestamp) that makes a template
//! header meet its own compact target. Used when bringing up a new network,
//! never on the node's startup path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, trace};

use crate::consensus::{BlockHeader, HeaderHasher, Target};
use crate::crypto::Hash256;

/// Nonces between progress reports
pub const PROGRESS_MASK: u32 = 0xfff;

/// Search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Header meeting its target, with its hash
    Found { header: BlockHeader, hash: Hash256 },
    /// Search was interrupted
    Interrupted,
    /// The template's bits decode to a zero target that nothing can meet
    InvalidTarget,
}

/// Genesis searcher
#[derive(Debug, Clone, Default)]
pub struct GenesisSearch {
    /// Stop signal
    stop_signal: Arc<AtomicBool>,
}

impl GenesisSearch {
    pub fn new() -> Self {
        Self {
            stop_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a stop signal handle
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_signal)
    }

    pub fn stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.stop_signal.store(false, Ordering::SeqCst);
    }

    /// Search from `template`'s nonce upwards
    pub fn search(&self, template: BlockHeader, hasher: &dyn HeaderHasher) -> SearchResult {
        self.search_with_progress(template, hasher, |header, hash| {
            trace!(nonce = header.nonce, hash = %hash, "Genesis search progress");
        })
    }

    /// Search, calling `progress` with the current header and hash every
    /// 4096 nonces
    ///
    /// The nonce wraps around to 0 and bumps the header time by one second.
    pub fn search_with_progress<F>(
        &self,
        mut header: BlockHeader,
        hasher: &dyn HeaderHasher,
        mut progress: F,
    ) -> SearchResult
    where
        F: FnMut(&BlockHeader, &Hash256),
    {
        let target = Target::from_compact(header.bits);
        if target == Target::ZERO {
            return SearchResult::InvalidTarget;
        }

        loop {
            if self.stop_signal.load(Ordering::SeqCst) {
                return SearchResult::Interrupted;
            }

            let hash = header.hash_with(hasher);
            if target.is_met_by(&hash) {
                info!(
                    time = header.time,
                    nonce = header.nonce,
                    hash = %hash,
                    merkle_root = %header.merkle_root,
                    "Genesis block found"
                );
                return SearchResult::Found { header, hash };
            }

            if header.nonce & PROGRESS_MASK == 0 {
                progress(&header, &hash);
            }

            header.nonce = header.nonce.wrapping_add(1);
            if header.nonce == 0 {
                header.time = header.time.wrapping_add(1);
                info!(time = header.time, "Nonce wrapped, incrementing time");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::DoubleSha256;

    /// Meets any target only at one (time, nonce)
    struct OnlyAt {
        time: u32,
        nonce: u32,
    }

    impl HeaderHasher for OnlyAt {
        fn hash_header(&self, header: &BlockHeader) -> Hash256 {
            if header.time == self.time && header.nonce == self.nonce {
                Hash256::zero()
            } else {
                Hash256::from_bytes([0xff; 32])
            }
        }
    }

    fn template(bits: u32, time: u32, nonce: u32) -> BlockHeader {
        BlockHeader::new(1, Hash256::zero(), Hash256::zero(), time, bits, nonce)
    }

    #[test]
    fn test_nonce_wrap_increments_time() {
        let hasher = OnlyAt { time: 1001, nonce: 1 };
        let result = GenesisSearch::new().search(template(0x207fffff, 1000, u32::MAX - 1), &hasher);

        match result {
            SearchResult::Found { header, hash } => {
                assert_eq!(header.time, 1001);
                assert_eq!(header.nonce, 1);
                assert!(hash.is_zero());
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_finds_easy_target_with_sha256d() {
        let result = GenesisSearch::new().search(template(0x207fffff, 1552053992, 0), &DoubleSha256);
        let SearchResult::Found { header, hash } = result else {
            panic!("search did not finish");
        };
        assert_eq!(hash, header.hash_with(&DoubleSha256));
        assert!(Target::from_compact(header.bits).is_met_by(&hash));
    }

    #[test]
    fn test_progress_callback_every_4096_nonces() {
        let hasher = OnlyAt { time: 1, nonce: 10_000 };
        let mut reports = Vec::new();
        let result = GenesisSearch::new().search_with_progress(template(0x207fffff, 1, 0), &hasher, |header, _| {
            reports.push(header.nonce)
        });

        assert!(matches!(result, SearchResult::Found { .. }));
        assert_eq!(reports, vec![0, 4096, 8192]);
    }

    #[test]
    fn test_interrupted() {
        let search = GenesisSearch::new();
        search.stop();
        let hasher = OnlyAt { time: 0, nonce: 0 };
        assert_eq!(search.search(template(0x207fffff, 0, 0), &hasher), SearchResult::Interrupted);

        search.reset();
        assert!(!search.stop_signal().load(Ordering::SeqCst));
    }

    #[test]
    fn test_zero_target_rejected() {
        let hasher = OnlyAt { time: 0, nonce: 0 };
        assert_eq!(
            GenesisSearch::new().search(template(0, 0, 0), &hasher),
            SearchResult::InvalidTarget
        );
    }
}
