//! Cryptography module - SHA-256 hashing, Merkle roots, secp256k1 keys

mod hash;
mod keys;
mod merkle;

pub use hash::*;
pub use keys::*;
pub use merkle::*;
