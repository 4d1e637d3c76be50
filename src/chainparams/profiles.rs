//! Network profiles
//!
//! Main is built in full; the other networks are Main with explicit
//! overrides applied on top. Regtest starts from the Testnet record.

use hex_lit::hex;
use std::sync::Arc;

use super::{
    Base58Prefixes, CheckpointEntry, CheckpointTable, FeeRecipient, GenesisDescriptor, NetworkId,
    ParameterSet, PolicyFlags, UpgradeMajority,
};
use crate::consensus::Target;
use crate::constants::COIN;
use crate::crypto::{Hash256, PublicKeyBytes};
use crate::p2p::{MAIN_DNS_SEEDS, MAIN_FIXED_SEEDS, TESTNET_FIXED_SEEDS};

const MAIN_GENESIS_HASH: Hash256 =
    Hash256::from_display_bytes(hex!("00000e766077229965499049eb2b8c05e776048555e9b2768d253e3a0a3ba4e0"));
const REGTEST_GENESIS_HASH: Hash256 =
    Hash256::from_display_bytes(hex!("000003b994bb5b9c0c07f9ae6646710766a8e00ee1df9ede2d4ad34cdf462f0a"));
const GENESIS_MERKLE_ROOT: Hash256 =
    Hash256::from_display_bytes(hex!("e3ad2e01cfb0483f1c36bc769fcf6945be791a1fb0d9d359a6d0892bb1092b65"));

const GENESIS_TIMESTAMP_TEXT: &str = "Social Investment Platform Etoro Launches in 30 US States";

const GENESIS_OUTPUT_KEY: PublicKeyBytes = hex!(
    "04f51beb87c2c47d0142e2aa8088003c00b60d0c71a7a40cf6042b57da37c00633e20e2de18b61ed4f734e25b61048f3864a668508bcece58b21f0c23fb1ee20fc"
);
const MAIN_ALERT_KEY: PublicKeyBytes = hex!(
    "04c6d5b3d44ddb1d4b2e7b8cd54e474704e9c5f6c9b20a1054ebd2354f8ac62426cb2d30c918c91a426eff46c3dcfe4cdaa8a12798df10c2bd693bcfa3ec11fe26"
);
const DEV_FEE_KEY: PublicKeyBytes = hex!(
    "044c0066bda6a59c2f395e95906fdb34dc76e838e953ed8c8f1b3291a57dff5cd3bfe7e98f490941407f82931e4250cdc18334a2bb2847a1eb1bd199e5368f8f8b"
);
const FUND_FEE_KEY: PublicKeyBytes = hex!(
    "0440e4276373938ce8a5f8bbfc6c99927149aecd69b2a6f3da5dd424a347699b5da3bd30cab427f23666c60714dab6c182787f5d699800ba2efb5174d4c0ccdbb5"
);
const MAIN_SPORK_KEY: PublicKeyBytes = hex!(
    "04600ae18baf7e32a2cd8caba8081e5b696af20fc11e7de17f0a3365f10853a47ef413a3dae10fed7ed8c1e0b0ce508f9b328a242679dc506fbd9ba078ebd287f8"
);
const TESTNET_ALERT_KEY: PublicKeyBytes = hex!(
    "04dd42c7eb18273f3c68887f922b035a6a21465d79dd4a92373814d9a94c116b58174630ea4b2dd5bd36b454efd7b82e47a3bc0a140a9f4731695cbeeb5f1715d7"
);
const TESTNET_SPORK_KEY: PublicKeyBytes = hex!(
    "04d52f7564e5e86d07f17b11da7936c1f721d4a82f51eaaf0b9c1f7dad47c524235a3dce703a61aa1b7556099cbecb7b4d08f32cb041492057152d8e84d4998748"
);

fn main_checkpoints() -> CheckpointTable {
    CheckpointTable::from_static(
        &[CheckpointEntry { height: 0, hash: MAIN_GENESIS_HASH }],
        1552053990,
        0,
        2000.0,
    )
}

// Same height-0 literal as main
fn testnet_checkpoints() -> CheckpointTable {
    CheckpointTable::from_static(
        &[CheckpointEntry { height: 0, hash: MAIN_GENESIS_HASH }],
        1552053990,
        0,
        250.0,
    )
}

fn regtest_checkpoints() -> CheckpointTable {
    CheckpointTable::from_static(
        &[CheckpointEntry { height: 0, hash: REGTEST_GENESIS_HASH }],
        1552053992,
        0,
        100.0,
    )
}

/// The production network
pub fn build_main_profile() -> ParameterSet {
    ParameterSet {
        network_id: NetworkId::Main,
        message_start: [0x6f, 0x70, 0x71, 0x73],
        alert_pubkey: MAIN_ALERT_KEY,
        dev_fee: FeeRecipient { pubkey: DEV_FEE_KEY, percent: 5 },
        fund_fee: FeeRecipient { pubkey: FUND_FEE_KEY, percent: 5 },
        default_port: 13200,

        pow_limit: Target::max_shr(20),
        start_work: Target::max_shr(24),
        max_reorganization_depth: 100,
        majority: UpgradeMajority {
            enforce: 750,
            reject_outdated: 950,
            window: 1000,
        },
        miner_threads: 0,
        target_spacing: 2 * 60,
        anti_instamine_time: 10,
        coinbase_maturity: 50,
        masternode_count_drift: 3,
        max_money_out: 1_432_200 * COIN,

        start_masternode_payments_block: 250,
        last_pow_block: 64800,
        modifier_update_block: u32::MAX,

        genesis: GenesisDescriptor {
            timestamp_text: GENESIS_TIMESTAMP_TEXT,
            subsidy: 10_000 * COIN,
            output_pubkey: GENESIS_OUTPUT_KEY,
            version: 1,
            time: 1552053990,
            bits: 0x1e0ffff0,
            nonce: 3730032,
            expected_hash: MAIN_GENESIS_HASH,
            expected_merkle_root: GENESIS_MERKLE_ROOT,
        },
        base58_prefixes: Base58Prefixes {
            pubkey_address: vec![71],
            script_address: vec![18],
            secret_key: vec![233],
            ext_public_key: vec![0x02, 0x3d, 0x35, 0x37],
            ext_secret_key: vec![0x02, 0x31, 0x51, 0x2a],
            ext_coin_type: vec![0x80, 0x00, 0x07, 0x99],
        },

        fixed_seed_specs: MAIN_FIXED_SEEDS,
        fixed_seeds: Vec::new(),
        dns_seeds: MAIN_DNS_SEEDS,

        policy: PolicyFlags {
            require_rpc_password: true,
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            skip_proof_of_work_check: false,
            testnet_to_be_deprecated_field_rpc: false,
            headers_first_syncing_active: false,
        },

        pool_max_transactions: 3,
        spork_pubkey: MAIN_SPORK_KEY,
        obfuscation_pool_dummy_address: "VPGfxo1fS8hrsowprmo8gpJAvmAd1N35cp",
        start_masternode_payments: 1552053990,

        checkpoints: Arc::new(main_checkpoints()),
    }
}

/// Public test network: Main with relaxed limits and its own keys
pub fn apply_testnet_overrides(mut params: ParameterSet) -> ParameterSet {
    params.network_id = NetworkId::Testnet;
    params.message_start = [0xa2, 0x59, 0xa9, 0x9a];

    params.pow_limit = Target::max_shr(1);
    params.start_work = params.pow_limit;

    params.alert_pubkey = TESTNET_ALERT_KEY;
    params.default_port = 51112;
    params.majority = UpgradeMajority {
        enforce: 51,
        reject_outdated: 75,
        window: 100,
    };
    params.miner_threads = 0;
    params.target_spacing = 60;
    params.last_pow_block = u32::MAX;
    params.coinbase_maturity = 15;
    params.masternode_count_drift = 4;
    params.modifier_update_block = u32::MAX;
    params.max_money_out = 1_000_000_000 * COIN;

    params.genesis.time = 1552053990;
    params.genesis.nonce = 3730032;
    params.genesis.expected_hash = MAIN_GENESIS_HASH;

    params.fixed_seed_specs = TESTNET_FIXED_SEEDS;
    params.fixed_seeds.clear();
    params.dns_seeds = &[];

    params.base58_prefixes = Base58Prefixes {
        pubkey_address: vec![128],
        script_address: vec![11],
        secret_key: vec![240],
        ext_public_key: vec![0x3a, 0x80, 0x51, 0xc0],
        ext_secret_key: vec![0x3a, 0x81, 0x88, 0xf7],
        ext_coin_type: vec![0x80, 0x00, 0x00, 0x01],
    };

    params.policy.require_rpc_password = true;
    params.policy.mining_requires_peers = false;
    params.policy.default_consistency_checks = false;
    params.policy.require_standard = false;
    params.policy.mine_blocks_on_demand = false;
    params.policy.testnet_to_be_deprecated_field_rpc = true;

    params.pool_max_transactions = 2;
    params.spork_pubkey = TESTNET_SPORK_KEY;
    params.obfuscation_pool_dummy_address = "tk7oN9aE8Foa8gqoJCYx4UcrWnEaFvr3Co";
    params.start_masternode_payments = 1536512409;

    params.checkpoints = Arc::new(testnet_checkpoints());
    params
}

/// Local regression-test network, applied on top of the Testnet record
pub fn apply_regtest_overrides(mut params: ParameterSet) -> ParameterSet {
    params.network_id = NetworkId::Regtest;
    params.message_start = [0xa4, 0x5f, 0x7e, 0x2c];

    params.start_work = Target::max_shr(20);
    params.majority = UpgradeMajority {
        enforce: 750,
        reject_outdated: 950,
        window: 1000,
    };
    params.miner_threads = 1;
    params.target_spacing = 60;
    params.pow_limit = Target::max_shr(1);

    params.genesis.time = 1552053992;
    params.genesis.bits = 0x207fffff;
    params.genesis.nonce = 4456827;
    params.genesis.expected_hash = REGTEST_GENESIS_HASH;
    params.default_port = 61112;

    params.fixed_seed_specs = &[];
    params.fixed_seeds.clear();
    params.dns_seeds = &[];

    params.policy.require_rpc_password = false;
    params.policy.mining_requires_peers = false;
    params.policy.default_consistency_checks = true;
    params.policy.require_standard = false;
    params.policy.mine_blocks_on_demand = true;
    params.policy.testnet_to_be_deprecated_field_rpc = false;

    params.checkpoints = Arc::new(regtest_checkpoints());
    params
}

/// In-process unit-test network: Main consensus, no seeds, relaxed policy.
/// Keeps Main's checkpoint table.
pub fn apply_unittest_overrides(mut params: ParameterSet) -> ParameterSet {
    params.network_id = NetworkId::UnitTest;
    params.default_port = 31112;

    params.fixed_seed_specs = &[];
    params.fixed_seeds.clear();
    params.dns_seeds = &[];

    params.policy.require_rpc_password = false;
    params.policy.mining_requires_peers = false;
    params.policy.default_consistency_checks = true;
    params.policy.mine_blocks_on_demand = true;
    params
}

/// Build the profile of `id`; seeds are left unconverted
pub fn build_profile(id: NetworkId) -> ParameterSet {
    match id {
        NetworkId::Main => build_main_profile(),
        NetworkId::Testnet => apply_testnet_overrides(build_main_profile()),
        NetworkId::Regtest => apply_regtest_overrides(apply_testnet_overrides(build_main_profile())),
        NetworkId::UnitTest => apply_unittest_overrides(build_main_profile()),
    }
}
