//! The per-network parameter record
//!
//! A [`ParameterSet`] is built once per network by the profile builders and
//! never changes afterwards, except for the unit-test network whose few
//! tunable fields go through [`super::ModifiableParams`].

use std::sync::Arc;

use super::{Base58Prefixes, CheckpointTable, NetworkId, ParamsError};
use crate::consensus::{Script, Target};
use crate::constants::{Amount, SECONDS_PER_DAY};
use crate::crypto::{parse_public_key, Hash256, PublicKeyBytes};
use crate::p2p::{DnsSeed, SeedAddress, SeedSpec};

/// Block version upgrade thresholds, counted over the last `window` blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeMajority {
    /// Blocks of the new version needed before its rules are enforced
    pub enforce: u32,
    /// Blocks of the new version needed before old versions are rejected
    pub reject_outdated: u32,
    /// Sample window
    pub window: u32,
}

/// A public key receiving a percentage of each block reward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRecipient {
    pub pubkey: PublicKeyBytes,
    pub percent: u32,
}

/// Node policy switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyFlags {
    pub require_rpc_password: bool,
    pub mining_requires_peers: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub skip_proof_of_work_check: bool,
    /// RPC still reports the deprecated `testnet` field
    pub testnet_to_be_deprecated_field_rpc: bool,
    pub headers_first_syncing_active: bool,
}

/// Everything needed to rebuild the genesis block, plus the identity it must
/// reproduce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisDescriptor {
    /// Headline embedded in the coinbase scriptSig
    pub timestamp_text: &'static str,
    /// Value of the single coinbase output
    pub subsidy: Amount,
    /// Key the subsidy is paid to
    pub output_pubkey: PublicKeyBytes,
    pub version: i32,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
    pub expected_hash: Hash256,
    pub expected_merkle_root: Hash256,
}

impl GenesisDescriptor {
    /// `push(pubkey) OP_CHECKSIG`
    pub fn output_script(&self) -> Script {
        Script::pay_to_pubkey(&self.output_pubkey)
    }
}

/// Consensus and policy constants of one network
#[derive(Debug, Clone)]
pub struct ParameterSet {
    pub network_id: NetworkId,
    /// P2P message start bytes
    pub message_start: [u8; 4],
    pub alert_pubkey: PublicKeyBytes,
    pub dev_fee: FeeRecipient,
    pub fund_fee: FeeRecipient,
    pub default_port: u16,

    /// Easiest target a block may claim
    pub pow_limit: Target,
    /// Target used for the first blocks of the chain
    pub start_work: Target,
    pub max_reorganization_depth: u32,
    pub majority: UpgradeMajority,
    /// Default miner thread count, 0 = one per core
    pub miner_threads: u32,
    /// Seconds between blocks
    pub target_spacing: u64,
    /// Blocks paying the minimal reward at chain start
    pub anti_instamine_time: u32,
    pub coinbase_maturity: u32,
    pub masternode_count_drift: u32,
    pub max_money_out: Amount,

    pub start_masternode_payments_block: u32,
    pub last_pow_block: u32,
    pub modifier_update_block: u32,

    pub genesis: GenesisDescriptor,
    pub base58_prefixes: Base58Prefixes,

    /// Hard-coded seed nodes in wire form
    pub fixed_seed_specs: &'static [SeedSpec],
    /// `fixed_seed_specs` converted with randomized last-seen times, filled
    /// in when the registry is built
    pub fixed_seeds: Vec<SeedAddress>,
    pub dns_seeds: &'static [DnsSeed],

    pub policy: PolicyFlags,

    pub pool_max_transactions: u32,
    pub spork_pubkey: PublicKeyBytes,
    pub obfuscation_pool_dummy_address: &'static str,
    /// UNIX time masternode payments start
    pub start_masternode_payments: u64,

    pub checkpoints: Arc<CheckpointTable>,
}

impl ParameterSet {
    /// Short network id (`main`, `test`, `regtest`, `unittest`)
    pub fn network_str(&self) -> &'static str {
        self.network_id.as_str()
    }

    pub fn genesis_hash(&self) -> Hash256 {
        self.genesis.expected_hash
    }

    pub fn blocks_per_day(&self) -> u64 {
        SECONDS_PER_DAY / self.target_spacing.max(1)
    }

    /// Whether `amount` is a valid monetary value on this network
    pub fn money_range(&self, amount: Amount) -> bool {
        (0..=self.max_money_out).contains(&amount)
    }

    pub fn checkpoints(&self) -> &CheckpointTable {
        &self.checkpoints
    }

    /// All public keys compiled into the profile, labelled
    pub fn hardcoded_keys(&self) -> [(&'static str, &PublicKeyBytes); 5] {
        [
            ("alert", &self.alert_pubkey),
            ("dev fee", &self.dev_fee.pubkey),
            ("fund fee", &self.fund_fee.pubkey),
            ("spork", &self.spork_pubkey),
            ("genesis output", &self.genesis.output_pubkey),
        ]
    }

    /// Every hard-coded key must be a point on secp256k1
    pub fn verify_keys(&self) -> Result<(), ParamsError> {
        for (_, key) in self.hardcoded_keys() {
            parse_public_key(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::build_profile;
    use crate::constants::COIN;

    #[test]
    fn test_money_range() {
        let main = build_profile(NetworkId::Main);
        assert!(main.money_range(0));
        assert!(main.money_range(1_432_200 * COIN));
        assert!(!main.money_range(1_432_200 * COIN + 1));
        assert!(!main.money_range(-1));
    }

    #[test]
    fn test_blocks_per_day() {
        assert_eq!(build_profile(NetworkId::Main).blocks_per_day(), 720);
        assert_eq!(build_profile(NetworkId::Testnet).blocks_per_day(), 1440);
    }

    #[test]
    fn test_hardcoded_keys_are_valid() {
        for id in NetworkId::ALL {
            build_profile(id).verify_keys().unwrap();
        }
    }

    #[test]
    fn test_corrupt_key_is_rejected() {
        let mut params = build_profile(NetworkId::Main);
        params.spork_pubkey[64] ^= 0x01;
        assert!(matches!(
            params.verify_keys(),
            Err(ParamsError::InvalidPublicKey(_))
        ));
    }
}
