//! 256-bit proof-of-work targets and their compact encoding

use serde::{Serialize, Serializer};
use std::fmt;

use crate::crypto::Hash256;

/// Big-endian 256-bit target; a hash meets it when `hash <= target`
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(pub [u8; 32]);

impl Target {
    pub const ZERO: Target = Target([0u8; 32]);
    pub const MAX: Target = Target([0xffu8; 32]);

    /// All-ones shifted right by `shift` bits, e.g. `~0 >> 20`
    pub fn max_shr(shift: u32) -> Self {
        let mut target = [0u8; 32];
        if shift >= 256 {
            return Target(target);
        }
        let zero_bytes = (shift / 8) as usize;
        target[zero_bytes] = 0xff >> (shift % 8);
        for byte in target.iter_mut().skip(zero_bytes + 1) {
            *byte = 0xff;
        }
        Target(target)
    }

    /// Decode a compact `nBits` value
    ///
    /// Negative or overflowing encodings decode to zero, which no hash meets.
    pub fn from_compact(compact: u32) -> Self {
        let size = (compact >> 24) as i64;
        let word = compact & 0x007f_ffff;
        let mut target = [0u8; 32];

        if compact & 0x0080_0000 != 0 && word != 0 {
            return Target::ZERO;
        }

        if size <= 3 {
            let value = word >> (8 * (3 - size));
            target[29..32].copy_from_slice(&value.to_be_bytes()[1..4]);
            return Target(target);
        }

        let mantissa = word.to_be_bytes();
        for (i, &byte) in mantissa[1..4].iter().enumerate() {
            let index = 32 - size + i as i64;
            if index < 0 {
                if byte != 0 {
                    return Target::ZERO;
                }
                continue;
            }
            target[index as usize] = byte;
        }
        Target(target)
    }

    /// Encode as compact `nBits`
    pub fn to_compact(&self) -> u32 {
        let first_nonzero = match self.0.iter().position(|&b| b != 0) {
            Some(i) => i,
            None => return 0,
        };

        let mut size = (32 - first_nonzero) as u32;
        let byte_at = |i: usize| self.0.get(i).copied().unwrap_or(0) as u32;
        let mut mantissa = (byte_at(first_nonzero) << 16)
            | (byte_at(first_nonzero + 1) << 8)
            | byte_at(first_nonzero + 2);

        // Keep the sign bit clear
        if mantissa & 0x0080_0000 != 0 {
            mantissa >>= 8;
            size += 1;
        }

        (size << 24) | mantissa
    }

    /// Check whether a hash satisfies this target
    pub fn is_met_by(&self, hash: &Hash256) -> bool {
        hash.to_be_bytes() <= self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.to_hex())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
