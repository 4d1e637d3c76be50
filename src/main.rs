//! VHS chain parameters tool
//!
//! Selects a network the way node bootstrap does and prints its parameters,
//! or searches for a new genesis nonce offline.

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vhs_chainparams::chainparams::{
    build_genesis, build_profile, init_global, published_genesis_digests, select_network,
    Base58Type, NetworkId, ParamsError,
};
use vhs_chainparams::consensus::{DoubleSha256, Target};
use vhs_chainparams::constants::COIN;
use vhs_chainparams::mining::{GenesisSearch, SearchResult};
use vhs_chainparams::p2p::unix_now;

#[derive(Debug, Parser)]
#[command(name = "vhs-chainparams", version, about = "VHS chain parameters")]
struct Cli {
    /// Network to select (main, test, regtest, unittest)
    #[arg(long, env = "VHS_NETWORK", global = true)]
    network: Option<String>,

    /// Use the public test network
    #[arg(long, global = true)]
    testnet: bool,

    /// Use the regression test network
    #[arg(long, global = true)]
    regtest: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the selected network's parameters
    Describe {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Search for a genesis nonce using double SHA-256 headers
    MineGenesis {
        /// Header time, defaults to the network's genesis time
        #[arg(long)]
        time: Option<u32>,
        /// Compact target, e.g. 0x1e0ffff0; defaults to the network's genesis bits
        #[arg(long, value_parser = parse_bits)]
        bits: Option<u32>,
        #[arg(long, default_value_t = 0)]
        start_nonce: u32,
    },
}

fn parse_bits(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid compact bits {s}: {e}"))
}

/// The legacy switches take precedence over `--network` / `VHS_NETWORK`
fn resolve_network(cli: &Cli) -> Result<NetworkId, ParamsError> {
    if cli.testnet || cli.regtest {
        return NetworkId::from_flags(cli.testnet, cli.regtest);
    }
    match &cli.network {
        Some(name) => name.parse(),
        None => Ok(NetworkId::Main),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let network = resolve_network(&cli)?;

    match cli.command {
        Command::Describe { json } => describe(network, json)?,
        Command::MineGenesis {
            time,
            bits,
            start_nonce,
        } => mine_genesis(network, time, bits, start_nonce),
    }
    Ok(())
}

fn describe(network: NetworkId, as_json: bool) -> Result<(), serde_json::Error> {
    init_global(&published_genesis_digests());
    let params = select_network(network);
    let checkpoints = params.checkpoints();
    let progress = checkpoints.estimate_progress(0, unix_now(), params.target_spacing);

    if as_json {
        let report = json!({
            "network": params.network_id,
            "test_network": params.network_id.is_test_network(),
            "message_start": hex::encode(params.message_start),
            "default_port": params.default_port,
            "pow_limit": params.pow_limit,
            "start_work": params.start_work,
            "target_spacing": params.target_spacing,
            "coinbase_maturity": params.coinbase_maturity,
            "max_reorganization_depth": params.max_reorganization_depth,
            "max_money_out": params.max_money_out,
            "last_pow_block": params.last_pow_block,
            "majority": {
                "enforce": params.majority.enforce,
                "reject_outdated": params.majority.reject_outdated,
                "window": params.majority.window,
            },
            "genesis": {
                "hash": params.genesis.expected_hash,
                "merkle_root": params.genesis.expected_merkle_root,
                "time": params.genesis.time,
                "bits": format!("{:#010x}", params.genesis.bits),
                "nonce": params.genesis.nonce,
            },
            "base58_prefixes": &params.base58_prefixes,
            "fixed_seeds": params
                .fixed_seeds
                .iter()
                .map(|seed| seed.socket_addr().to_string())
                .collect::<Vec<_>>(),
            "dns_seeds": params
                .dns_seeds
                .iter()
                .map(|seed| json!({ "name": seed.name, "host": seed.host }))
                .collect::<Vec<_>>(),
            "checkpoints": checkpoints,
            "spork_pubkey": hex::encode(params.spork_pubkey),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let kind = if params.network_id.is_test_network() { "test" } else { "production" };
    println!("Network:        {} ({kind})", params.network_id);
    println!("Magic:          {}", hex::encode(params.message_start));
    println!("Port:           {}", params.default_port);
    println!("PoW limit:      {}", params.pow_limit);
    println!("Block spacing:  {}s ({} blocks/day)", params.target_spacing, params.blocks_per_day());
    println!("Max money:      {} VHS", params.max_money_out / COIN);
    println!("Genesis:        {}", params.genesis.expected_hash);
    println!("Merkle root:    {}", params.genesis.expected_merkle_root);
    println!(
        "Address prefix: {:?}",
        params.base58_prefixes.get(Base58Type::PubkeyAddress)
    );
    println!("Fixed seeds:    {}", params.fixed_seeds.len());
    let dns_names: Vec<&str> = params.dns_seeds.iter().map(|seed| seed.name).collect();
    println!("DNS seeds:      {} [{}]", dns_names.len(), dns_names.join(", "));
    println!(
        "Checkpoints:    {} (last at height {}, sync estimate from genesis {:.4})",
        checkpoints.entries().len(),
        checkpoints.last_checkpoint_height(),
        progress
    );
    Ok(())
}

fn mine_genesis(network: NetworkId, time: Option<u32>, bits: Option<u32>, start_nonce: u32) {
    let params = build_profile(network);
    let mut header = *build_genesis(&params.genesis, &DoubleSha256).header();
    header.time = time.unwrap_or(header.time);
    header.bits = bits.unwrap_or(header.bits);
    header.nonce = start_nonce;

    info!(
        network = %network,
        target = %Target::from_compact(header.bits),
        "Searching for genesis block"
    );

    let search = GenesisSearch::new();
    match search.search_with_progress(header, &DoubleSha256, |header, hash| {
        if header.nonce & 0xfffff == 0 {
            info!(nonce = header.nonce, hash = %hash, "Still searching");
        }
    }) {
        SearchResult::Found { header, hash } => {
            println!("Time:         {}", header.time);
            println!("Nonce:        {}", header.nonce);
            println!("Hash:         {hash}");
            println!("Merkle root:  {}", header.merkle_root);
        }
        SearchResult::Interrupted => println!("Search interrupted"),
        SearchResult::InvalidTarget => println!("Bits {:#010x} decode to a zero target", header.bits),
    }
}
