use thiserror::Error;

use super::{Base58Type, NetworkId};
use crate::crypto::Hash256;

/// Chain parameter errors
///
/// Every variant is a deployment or programming defect. The registry's
/// fatal entry points turn them into a panic; the `try_*` variants hand
/// them back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    #[error("Invalid combination of -regtest and -testnet")]
    ConflictingNetworkFlags,
    #[error("Chain parameters read before a network was selected")]
    NotSelected,
    #[error("Network {active} already selected, cannot select {requested}")]
    AlreadySelected {
        active: NetworkId,
        requested: NetworkId,
    },
    #[error("Parameters are only modifiable on unittest, active network is {0}")]
    NotModifiable(NetworkId),
    #[error("Network registry not initialised")]
    RegistryNotInitialised,
    #[error("Genesis {field} mismatch on {network}: expected {expected}, computed {computed}")]
    GenesisMismatch {
        network: NetworkId,
        field: &'static str,
        expected: Hash256,
        computed: Hash256,
    },
    #[error("Checkpoint table is empty")]
    EmptyCheckpoints,
    #[error("Checkpoint heights must be strictly increasing: {previous} then {height}")]
    CheckpointOrder { previous: u32, height: u32 },
    #[error("First checkpoint must be at height 0, found {0}")]
    MissingGenesisCheckpoint(u32),
    #[error("Checkpoint at height 0 is {found}, genesis is {expected}")]
    CheckpointGenesisMismatch { expected: Hash256, found: Hash256 },
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Invalid base58check string: {0}")]
    InvalidBase58(String),
    #[error("Address prefix does not match {0:?}")]
    PrefixMismatch(Base58Type),
}
