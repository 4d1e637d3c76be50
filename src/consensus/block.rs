//! Block header and block structure
//!
//! The header identity hash is the chain's proof-of-work digest, which is
//! supplied through [`HeaderHasher`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Transaction;
use crate::crypto::{compute_merkle_root, sha256d, Hash256};

/// Serialized header length
pub const HEADER_SIZE: usize = 80;

/// Block header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Protocol version
    pub version: i32,
    /// Hash of the previous block
    pub prev_hash: Hash256,
    /// Merkle root of all transactions
    pub merkle_root: Hash256,
    /// Block timestamp (seconds since Unix epoch)
    pub time: u32,
    /// Difficulty target (compact representation)
    pub bits: u32,
    /// Nonce used for PoW
    pub nonce: u32,
}

impl BlockHeader {
    pub fn new(
        version: i32,
        prev_hash: Hash256,
        merkle_root: Hash256,
        time: u32,
        bits: u32,
        nonce: u32,
    ) -> Self {
        Self {
            version,
            prev_hash,
            merkle_root,
            time,
            bits,
            nonce,
        }
    }

    /// The 80-byte preimage the proof-of-work digest is computed over
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(self.prev_hash.as_bytes());
        bytes[36..68].copy_from_slice(self.merkle_root.as_bytes());
        bytes[68..72].copy_from_slice(&self.time.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.bits.to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    pub fn hash_with(&self, hasher: &dyn HeaderHasher) -> Hash256 {
        hasher.hash_header(self)
    }
}

/// Header identity digest
///
/// Implementations must be pure: the same header always yields the same hash.
pub trait HeaderHasher: Send + Sync {
    fn hash_header(&self, header: &BlockHeader) -> Hash256;
}

/// Double SHA-256 over the 80-byte header
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleSha256;

impl HeaderHasher for DoubleSha256 {
    fn hash_header(&self, header: &BlockHeader) -> Hash256 {
        sha256d(&header.to_bytes())
    }
}

/// Serves known digests for specific header preimages and delegates
/// everything else to `fallback`
///
/// Lets tooling and tests reproduce a network's published genesis identity
/// without linking the node's proof-of-work digest.
#[derive(Debug, Clone, Default)]
pub struct PinnedDigests<H> {
    pinned: HashMap<[u8; HEADER_SIZE], Hash256>,
    fallback: H,
}

impl<H: HeaderHasher> PinnedDigests<H> {
    pub fn new(fallback: H) -> Self {
        Self {
            pinned: HashMap::new(),
            fallback,
        }
    }

    pub fn pin(mut self, preimage: [u8; HEADER_SIZE], hash: Hash256) -> Self {
        self.pinned.insert(preimage, hash);
        self
    }

    /// Pin a hex preimage to a display-order hex hash
    pub fn pin_hex(self, preimage: &str, hash: &str) -> Result<Self, hex::FromHexError> {
        let bytes: [u8; HEADER_SIZE] = hex::decode(preimage)?
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(self.pin(bytes, Hash256::from_hex(hash)?))
    }
}

impl<H: HeaderHasher> HeaderHasher for PinnedDigests<H> {
    fn hash_header(&self, header: &BlockHeader) -> Hash256 {
        self.pinned
            .get(&header.to_bytes())
            .copied()
            .unwrap_or_else(|| self.fallback.hash_header(header))
    }
}

/// A complete block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    /// Merkle root recomputed from the transactions
    pub fn compute_merkle_root(&self) -> Hash256 {
        let txids: Vec<Hash256> = self.transactions.iter().map(Transaction::txid).collect();
        compute_merkle_root(&txids)
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.header.prev_hash.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::Script;

    fn sample_header() -> BlockHeader {
        BlockHeader::new(1, Hash256::zero(), Hash256::zero(), 1234567890, 0x1d00ffff, 42)
    }

    #[test]
    fn test_header_serialization_layout() {
        let bytes = sample_header().to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[0..4], &1i32.to_le_bytes());
        assert_eq!(&bytes[68..72], &1234567890u32.to_le_bytes());
        assert_eq!(&bytes[72..76], &[0xff, 0xff, 0x00, 0x1d]);
        assert_eq!(&bytes[76..80], &42u32.to_le_bytes());
    }

    #[test]
    fn test_double_sha256_hasher() {
        let header = sample_header();
        assert_eq!(header.hash_with(&DoubleSha256), sha256d(&header.to_bytes()));
    }

    #[test]
    fn test_nonce_changes_hash() {
        let a = sample_header();
        let mut b = a;
        b.nonce += 1;
        assert_ne!(a.hash_with(&DoubleSha256), b.hash_with(&DoubleSha256));
    }

    #[test]
    fn test_pinned_digest_and_fallback() {
        let header = sample_header();
        let pinned = Hash256::from_bytes([7u8; 32]);
        let hasher = PinnedDigests::new(DoubleSha256).pin(header.to_bytes(), pinned);
        assert_eq!(header.hash_with(&hasher), pinned);

        let mut other = header;
        other.nonce += 1;
        assert_eq!(other.hash_with(&hasher), other.hash_with(&DoubleSha256));
    }

    #[test]
    fn test_pin_hex_rejects_short_preimage() {
        let hash = "00".repeat(32);
        assert!(PinnedDigests::new(DoubleSha256).pin_hex("0100", &hash).is_err());
    }

    #[test]
    fn test_genesis_block_detection() {
        let tx = Transaction::coinbase(Script::new().push_int(1), 1, Script::new());
        let mut header = sample_header();
        let block = Block::new(header, vec![tx.clone()]);
        assert!(block.is_genesis());
        assert_eq!(block.compute_merkle_root(), tx.txid());

        header.prev_hash = tx.txid();
        assert!(!Block::new(header, vec![tx]).is_genesis());
    }
}
