//! Offline mining tools

mod genesis_search;

pub use genesis_search::*;
