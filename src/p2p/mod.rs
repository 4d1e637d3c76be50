//! P2P bootstrap data - fixed seeds and DNS seeds

mod seeds;

pub use seeds::*;
