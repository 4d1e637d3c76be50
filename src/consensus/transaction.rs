//! Transaction structure and canonical encoding
//!
//! Transaction ids are a single SHA-256 of the encoding below.

use serde::{Deserialize, Serialize};

use super::Script;
use crate::constants::Amount;
use crate::crypto::{sha256, Hash256};

/// Reference to a previous output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: Hash256,
    pub vout: u32,
}

impl OutPoint {
    /// The outpoint carried by coinbase inputs
    pub const fn null() -> Self {
        Self {
            txid: Hash256::zero(),
            vout: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

/// A transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    /// Amount in base units
    pub value: Amount,
    pub script_pubkey: Script,
}

/// A complete transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Create a coinbase transaction with a single input and output
    pub fn coinbase(script_sig: Script, value: Amount, script_pubkey: Script) -> Self {
        Self {
            version: 1,
            inputs: vec![TxIn {
                prevout: OutPoint::null(),
                script_sig,
                sequence: u32::MAX,
            }],
            outputs: vec![TxOut {
                value,
                script_pubkey,
            }],
            lock_time: 0,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    /// Canonical byte encoding
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        bytes.extend_from_slice(&self.version.to_le_bytes());

        write_compact_size(&mut bytes, self.inputs.len() as u64);
        for input in &self.inputs {
            bytes.extend_from_slice(input.prevout.txid.as_bytes());
            bytes.extend_from_slice(&input.prevout.vout.to_le_bytes());
            write_script(&mut bytes, &input.script_sig);
            bytes.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut bytes, self.outputs.len() as u64);
        for output in &self.outputs {
            bytes.extend_from_slice(&output.value.to_le_bytes());
            write_script(&mut bytes, &output.script_pubkey);
        }

        bytes.extend_from_slice(&self.lock_time.to_le_bytes());
        bytes
    }

    /// Transaction id
    pub fn txid(&self) -> Hash256 {
        sha256(&self.to_bytes())
    }

    pub fn total_output_value(&self) -> Amount {
        self.outputs.iter().map(|o| o.value).sum()
    }
}

/// Variable-length integer prefix
pub fn write_compact_size(bytes: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        bytes.push(n as u8);
    } else if n <= 0xffff {
        bytes.push(0xfd);
        bytes.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        bytes.push(0xfe);
        bytes.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        bytes.push(0xff);
        bytes.extend_from_slice(&n.to_le_bytes());
    }
}

fn write_script(bytes: &mut Vec<u8>, script: &Script) {
    write_compact_size(bytes, script.len() as u64);
    bytes.extend_from_slice(script.as_bytes());
}
