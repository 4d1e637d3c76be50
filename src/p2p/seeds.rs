//! Seed Node Configuration
//!
//! Hardcoded bootstrap nodes for initial peer discovery. Fixed seeds are
//! given a random last-seen time one to two weeks in the past, so any
//! address learned from a live peer is preferred over them.

use rand::Rng;
use std::net::{Ipv6Addr, SocketAddr};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::ONE_WEEK;

/// A fixed seed in wire form: IPv6 (or IPv4-mapped) address and port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSpec {
    pub addr: [u8; 16],
    pub port: u16,
}

impl SeedSpec {
    /// IPv4 seed, stored as an IPv4-mapped IPv6 address
    pub const fn ipv4(a: u8, b: u8, c: u8, d: u8, port: u16) -> Self {
        Self {
            addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d],
            port,
        }
    }
}

/// A seed ready for the address manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAddress {
    pub ip: Ipv6Addr,
    pub port: u16,
    /// UNIX time this address was supposedly last seen
    pub last_seen: u64,
}

impl SeedAddress {
    /// Socket address, unmapping IPv4-mapped addresses
    pub fn socket_addr(&self) -> SocketAddr {
        match self.ip.to_ipv4_mapped() {
            Some(v4) => SocketAddr::from((v4, self.port)),
            None => SocketAddr::from((self.ip, self.port)),
        }
    }
}

/// A DNS seed; the VHS operators publish plain IPs here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

/// Mainnet fixed seeds
///
/// Derived from the DNS seed hosts below on the mainnet port; no separate
/// fixed-seed list is published for VHS.
pub const MAIN_FIXED_SEEDS: &[SeedSpec] = &[
    SeedSpec::ipv4(92, 63, 103, 206, 13200),
    SeedSpec::ipv4(80, 87, 197, 162, 13200),
    SeedSpec::ipv4(37, 143, 9, 193, 13200),
    SeedSpec::ipv4(37, 143, 10, 155, 13200),
];

/// Testnet has no fixed seeds
pub const TESTNET_FIXED_SEEDS: &[SeedSpec] = &[];

/// Mainnet DNS seeds
pub const MAIN_DNS_SEEDS: &[DnsSeed] = &[
    DnsSeed { name: "92.63.103.206", host: "92.63.103.206" },
    DnsSeed { name: "80.87.197.162", host: "80.87.197.162" },
    DnsSeed { name: "37.143.9.193", host: "37.143.9.193" },
    DnsSeed { name: "37.143.10.155", host: "37.143.10.155" },
];

/// Convert fixed seed specs into addresses with a last-seen time in
/// `[now - 2 weeks, now - 1 week]`
pub fn convert_seeds<R: Rng + ?Sized>(specs: &[SeedSpec], now: u64, rng: &mut R) -> Vec<SeedAddress> {
    specs
        .iter()
        .map(|spec| SeedAddress {
            ip: Ipv6Addr::from(spec.addr),
            port: spec.port,
            last_seen: now
                .saturating_sub(rng.gen_range(0..ONE_WEEK))
                .saturating_sub(ONE_WEEK),
        })
        .collect()
}

/// Parse seed host to SocketAddr
pub fn parse_seed(host: &str, port: u16) -> Option<SocketAddr> {
    host.parse::<std::net::IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, port))
}

/// DNS seeds whose host is an IP literal, as socket addresses; names that
/// need resolving are left to the resolver
pub fn literal_seed_addresses(seeds: &[DnsSeed], port: u16) -> Vec<SocketAddr> {
    seeds
        .iter()
        .filter_map(|seed| parse_seed(seed.host, port))
        .collect()
}

/// Current UNIX time in seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
