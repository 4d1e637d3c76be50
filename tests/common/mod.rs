//! Shared test fixtures
#![allow(dead_code)]

use vhs_chainparams::chainparams::NetworkRegistry;
use vhs_chainparams::consensus::{DoubleSha256, PinnedDigests};

pub const MAIN_GENESIS_PREIMAGE: &str = "010000000000000000000000000000000000000000000000000000000000000000000000652b09b12b89d0a659d3d9b01f1a79be4569cf9f76bc361c3f48b0cf012eade3e676825cf0ff0f1e70ea3800";
pub const MAIN_GENESIS_HASH: &str = "00000e766077229965499049eb2b8c05e776048555e9b2768d253e3a0a3ba4e0";

pub const REGTEST_GENESIS_PREIMAGE: &str = "010000000000000000000000000000000000000000000000000000000000000000000000652b09b12b89d0a659d3d9b01f1a79be4569cf9f76bc361c3f48b0cf012eade3e876825cffff7f207b014400";
pub const REGTEST_GENESIS_HASH: &str = "000003b994bb5b9c0c07f9ae6646710766a8e00ee1df9ede2d4ad34cdf462f0a";

pub const MERKLE_ROOT: &str = "e3ad2e01cfb0483f1c36bc769fcf6945be791a1fb0d9d359a6d0892bb1092b65";

/// Header digest double: the published genesis digests for their exact
/// preimages, double SHA-256 for anything else
pub fn pinned_hasher() -> PinnedDigests<DoubleSha256> {
    PinnedDigests::new(DoubleSha256)
        .pin_hex(MAIN_GENESIS_PREIMAGE, MAIN_GENESIS_HASH)
        .unwrap()
        .pin_hex(REGTEST_GENESIS_PREIMAGE, REGTEST_GENESIS_HASH)
        .unwrap()
}

pub fn fresh_registry() -> NetworkRegistry {
    NetworkRegistry::new(&pinned_hasher())
}
