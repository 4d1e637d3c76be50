//! Chain parameters - network profiles, genesis identity, checkpoints and
//! network selection

mod base58;
mod checkpoints;
mod error;
mod genesis;
mod network;
mod params;
mod profiles;
mod registry;

pub use base58::*;
pub use checkpoints::*;
pub use error::*;
pub use genesis::*;
pub use network::*;
pub use params::*;
pub use profiles::*;
pub use registry::*;
