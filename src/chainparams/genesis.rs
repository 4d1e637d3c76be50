//! Genesis block construction and verification
//!
//! Rebuilds the genesis block from its [`GenesisDescriptor`] byte for byte,
//! so the hard-coded identity can be checked at startup.

use hex_lit::hex;
use tracing::debug;

use super::{GenesisDescriptor, ParameterSet, ParamsError};
use crate::consensus::{
    Block, BlockHeader, DoubleSha256, HeaderHasher, PinnedDigests, Script, Transaction, HEADER_SIZE,
};
use crate::constants::{GENESIS_COINBASE_BITS, GENESIS_COINBASE_EXTRA_NONCE};
use crate::crypto::Hash256;

/// Published Main/Testnet/UnitTest genesis header
pub const MAIN_GENESIS_HEADER: [u8; HEADER_SIZE] = hex!(
    "010000000000000000000000000000000000000000000000000000000000000000000000652b09b12b89d0a659d3d9b01f1a79be4569cf9f76bc361c3f48b0cf012eade3e676825cf0ff0f1e70ea3800"
);

/// Published Regtest genesis header
pub const REGTEST_GENESIS_HEADER: [u8; HEADER_SIZE] = hex!(
    "010000000000000000000000000000000000000000000000000000000000000000000000652b09b12b89d0a659d3d9b01f1a79be4569cf9f76bc361c3f48b0cf012eade3e876825cffff7f207b014400"
);

/// Header hasher that knows the published genesis digests
///
/// The published hashes come from the chain's proof-of-work digest, which
/// this crate does not implement. The two hashes below are looked up, not
/// computed: only the exact published header bytes map to them, and every
/// other header is double-SHA-256. Passing verification with this hasher
/// therefore proves the rebuilt header bytes did not drift from the published
/// ones; it does not recompute the published header hash. The Merkle root is
/// always computed.
pub fn published_genesis_digests() -> PinnedDigests<DoubleSha256> {
    PinnedDigests::new(DoubleSha256)
        .pin(
            MAIN_GENESIS_HEADER,
            Hash256::from_display_bytes(hex!("00000e766077229965499049eb2b8c05e776048555e9b2768d253e3a0a3ba4e0")),
        )
        .pin(
            REGTEST_GENESIS_HEADER,
            Hash256::from_display_bytes(hex!("000003b994bb5b9c0c07f9ae6646710766a8e00ee1df9ede2d4ad34cdf462f0a")),
        )
}

/// The rebuilt genesis block and its computed identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisBlock {
    pub block: Block,
    pub hash: Hash256,
    pub merkle_root: Hash256,
}

impl GenesisBlock {
    pub fn header(&self) -> &BlockHeader {
        &self.block.header
    }

    pub fn coinbase(&self) -> &Transaction {
        &self.block.transactions[0]
    }
}

/// The single coinbase transaction of a genesis block
pub fn genesis_coinbase(descriptor: &GenesisDescriptor) -> Transaction {
    let script_sig = Script::new()
        .push_int(GENESIS_COINBASE_BITS)
        .push_num(GENESIS_COINBASE_EXTRA_NONCE)
        .push_slice(descriptor.timestamp_text.as_bytes());

    Transaction::coinbase(script_sig, descriptor.subsidy, descriptor.output_script())
}

/// Build the genesis block described by `descriptor`
pub fn build_genesis(descriptor: &GenesisDescriptor, hasher: &dyn HeaderHasher) -> GenesisBlock {
    let coinbase = genesis_coinbase(descriptor);
    let merkle_root = coinbase.txid();

    let header = BlockHeader::new(
        descriptor.version,
        Hash256::zero(),
        merkle_root,
        descriptor.time,
        descriptor.bits,
        descriptor.nonce,
    );
    let hash = header.hash_with(hasher);

    GenesisBlock {
        block: Block::new(header, vec![coinbase]),
        hash,
        merkle_root,
    }
}

/// Rebuild the genesis block of `params` and compare it with the expected
/// identity, Merkle root first
pub fn verify_genesis(
    params: &ParameterSet,
    hasher: &dyn HeaderHasher,
) -> Result<GenesisBlock, ParamsError> {
    let genesis = build_genesis(&params.genesis, hasher);
    let expected = &params.genesis;

    if genesis.merkle_root != expected.expected_merkle_root {
        return Err(ParamsError::GenesisMismatch {
            network: params.network_id,
            field: "merkle root",
            expected: expected.expected_merkle_root,
            computed: genesis.merkle_root,
        });
    }
    if genesis.hash != expected.expected_hash {
        return Err(ParamsError::GenesisMismatch {
            network: params.network_id,
            field: "hash",
            expected: expected.expected_hash,
            computed: genesis.hash,
        });
    }

    debug!(
        network = %params.network_id,
        hash = %genesis.hash,
        merkle_root = %genesis.merkle_root,
        "Genesis block verified"
    );
    Ok(genesis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::{build_profile, NetworkId};
    use crate::constants::COIN;

    #[test]
    fn test_coinbase_script_sig_layout() {
        let main = build_profile(NetworkId::Main);
        let coinbase = genesis_coinbase(&main.genesis);
        let script = coinbase.inputs[0].script_sig.as_bytes();

        assert_eq!(&script[..7], &[0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04]);
        assert_eq!(script[7], 57);
        assert_eq!(&script[8..], main.genesis.timestamp_text.as_bytes());
        assert!(coinbase.is_coinbase());
        assert_eq!(coinbase.outputs[0].value, 10_000 * COIN);
    }

    #[test]
    fn test_merkle_root_is_coinbase_txid() {
        let main = build_profile(NetworkId::Main);
        let genesis = build_genesis(&main.genesis, &DoubleSha256);
        assert_eq!(genesis.merkle_root, genesis.coinbase().txid());
        assert_eq!(genesis.merkle_root, genesis.block.compute_merkle_root());
        assert_eq!(
            genesis.merkle_root.to_hex(),
            "e3ad2e01cfb0483f1c36bc769fcf6945be791a1fb0d9d359a6d0892bb1092b65"
        );
        assert!(genesis.block.is_genesis());
    }

    #[test]
    fn test_regtest_shares_coinbase_with_main() {
        let main = build_genesis(&build_profile(NetworkId::Main).genesis, &DoubleSha256);
        let regtest = build_genesis(&build_profile(NetworkId::Regtest).genesis, &DoubleSha256);
        assert_eq!(main.merkle_root, regtest.merkle_root);
        assert_eq!(regtest.header().bits, 0x207fffff);
        assert_eq!(regtest.header().nonce, 4456827);
    }

    #[test]
    fn test_header_preimages() {
        let main = build_genesis(&build_profile(NetworkId::Main).genesis, &DoubleSha256);
        let regtest = build_genesis(&build_profile(NetworkId::Regtest).genesis, &DoubleSha256);
        assert_eq!(main.header().to_bytes(), MAIN_GENESIS_HEADER);
        assert_eq!(regtest.header().to_bytes(), REGTEST_GENESIS_HEADER);

        let testnet = build_genesis(&build_profile(NetworkId::Testnet).genesis, &DoubleSha256);
        assert_eq!(testnet.header().to_bytes(), MAIN_GENESIS_HEADER);
    }

    #[test]
    fn test_every_profile_verifies() {
        let hasher = published_genesis_digests();
        for id in NetworkId::ALL {
            let params = build_profile(id);
            let genesis = verify_genesis(&params, &hasher).unwrap();
            assert_eq!(genesis.hash, params.genesis_hash());
        }
    }

    #[test]
    fn test_published_digests_are_lookups() {
        let hasher = published_genesis_digests();
        let main = build_genesis(&build_profile(NetworkId::Main).genesis, &hasher);
        assert_eq!(main.hash.to_hex(), "00000e766077229965499049eb2b8c05e776048555e9b2768d253e3a0a3ba4e0");

        // one nonce off falls through to double SHA-256
        let mut drifted = *main.header();
        drifted.nonce += 1;
        assert_eq!(hasher.hash_header(&drifted), DoubleSha256.hash_header(&drifted));
        assert_ne!(hasher.hash_header(&drifted), main.hash);
    }

    #[test]
    fn test_wrong_hasher_is_hash_mismatch() {
        let main = build_profile(NetworkId::Main);
        let err = verify_genesis(&main, &DoubleSha256).unwrap_err();
        assert!(matches!(
            err,
            ParamsError::GenesisMismatch { field: "hash", network: NetworkId::Main, .. }
        ));
    }

    #[test]
    fn test_altered_text_is_merkle_mismatch() {
        let mut main = build_profile(NetworkId::Main);
        main.genesis.timestamp_text = "Some other headline";
        let err = verify_genesis(&main, &DoubleSha256).unwrap_err();
        assert!(matches!(err, ParamsError::GenesisMismatch { field: "merkle root", .. }));
    }
}
