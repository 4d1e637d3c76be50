//! VHS chain parameters core
//!
//! The single source of truth for the consensus constants of every VHS
//! network: genesis identity, proof-of-work limits, address prefixes,
//! checkpoints and peer-discovery seeds. Node bootstrap selects one network
//! exactly once; everything else reads the active parameters through the
//! registry for the lifetime of the process.

pub mod chainparams;
pub mod consensus;
pub mod crypto;
pub mod mining;
pub mod p2p;

pub use chainparams::{
    modifiable_params, params, select_network, CheckpointTable, NetworkId, NetworkRegistry,
    ParameterSet, ParamsError,
};

/// Protocol constants shared by every network
pub mod constants {
    /// Monetary amount in base units
    pub type Amount = i64;

    /// Base units per coin (8 decimal places)
    pub const COIN: Amount = 100_000_000;

    pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

    pub const ONE_WEEK: u64 = 7 * SECONDS_PER_DAY;

    /// Compact bits pushed first in every genesis coinbase scriptSig
    pub const GENESIS_COINBASE_BITS: i64 = 486_604_799;

    /// Script number pushed after the bits in the genesis coinbase
    pub const GENESIS_COINBASE_EXTRA_NONCE: i64 = 4;

    /// Relative cost of verifying a transaction after the last checkpoint
    pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;
}
