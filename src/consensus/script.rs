//! Minimal script builder
//!
//! Only what the genesis coinbase needs: integer pushes, data pushes and
//! opcodes, encoded exactly as the reference client encodes them.

use serde::{Deserialize, Serialize};

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_CHECKSIG: u8 = 0xac;

/// Raw script bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Push an integer, using the small-integer opcodes where possible
    pub fn push_int(self, n: i64) -> Self {
        if n == -1 || (1..=16).contains(&n) {
            self.push_opcode((n + (OP_1 as i64 - 1)) as u8)
        } else if n == 0 {
            self.push_opcode(OP_0)
        } else {
            self.push_num(n)
        }
    }

    /// Push an integer as its script-number serialization, never as an opcode
    pub fn push_num(self, n: i64) -> Self {
        self.push_slice(&script_num(n))
    }

    /// Push data with the shortest length prefix
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.0.push(opcode);
        self
    }

    /// Pay-to-pubkey script: `<pubkey> OP_CHECKSIG`
    pub fn pay_to_pubkey(pubkey: &[u8]) -> Self {
        Self::new().push_slice(pubkey).push_opcode(OP_CHECKSIG)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Little-endian sign-magnitude encoding used for script numbers
pub fn script_num(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }

    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    // The top bit of the last byte carries the sign
    if let Some(last) = out.last_mut() {
        if *last & 0x80 != 0 {
            out.push(if negative { 0x80 } else { 0x00 });
        } else if negative {
            *last |= 0x80;
        }
    }
    out
}
