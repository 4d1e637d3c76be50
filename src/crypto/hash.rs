//! SHA-256 hashing primitives
//!
//! Hashes are stored in internal (little-endian) byte order and displayed
//! byte-reversed, the way the whole chain family prints block and
//! transaction ids.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// 32-byte hash in internal byte order
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Zero hash (genesis previous-block hash)
    pub const fn zero() -> Self {
        Hash256([0u8; 32])
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }

    /// Hash from display-order bytes, usable on `hex!` literals in const items
    pub const fn from_display_bytes(mut bytes: [u8; 32]) -> Self {
        let mut i = 0;
        while i < 16 {
            let tmp = bytes[i];
            bytes[i] = bytes[31 - i];
            bytes[31 - i] = tmp;
            i += 1;
        }
        Hash256(bytes)
    }

    /// Parse a display-order (byte-reversed) hex string
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(hex)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        arr.reverse();
        Ok(Hash256(arr))
    }

    /// Display-order hex string
    pub fn to_hex(&self) -> String {
        let mut display = self.0;
        display.reverse();
        hex::encode(display)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Big-endian view, i.e. the number a target is compared against
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut be = self.0;
        be.reverse();
        be
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Hash256 {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Hash256 {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash256::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Single SHA-256 of arbitrary bytes
pub fn sha256(data: &[u8]) -> Hash256 {
    Hash256(Sha256::digest(data).into())
}

/// SHA-256 applied twice
pub fn sha256d(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    Hash256(Sha256::digest(first).into())
}

/// Hash two nodes together (for the Merkle tree)
pub fn hash_pair(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut data = Vec::with_capacity(64);
    data.extend_from_slice(&left.0);
    data.extend_from_slice(&right.0);
    sha256(&data)
}
