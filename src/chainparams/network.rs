//! Network identifiers and how bootstrap decodes them

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::ParamsError;

/// One of the four supported networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Main,
    Testnet,
    Regtest,
    UnitTest,
}

impl NetworkId {
    pub const ALL: [NetworkId; 4] = [
        NetworkId::Main,
        NetworkId::Testnet,
        NetworkId::Regtest,
        NetworkId::UnitTest,
    ];

    /// Short network id string (`main`, `test`, `regtest`, `unittest`)
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Testnet => "test",
            NetworkId::Regtest => "regtest",
            NetworkId::UnitTest => "unittest",
        }
    }

    /// Decode the legacy `-testnet` / `-regtest` switches
    pub fn from_flags(testnet: bool, regtest: bool) -> Result<Self, ParamsError> {
        match (testnet, regtest) {
            (true, true) => Err(ParamsError::ConflictingNetworkFlags),
            (true, false) => Ok(NetworkId::Testnet),
            (false, true) => Ok(NetworkId::Regtest),
            (false, false) => Ok(NetworkId::Main),
        }
    }

    /// Test networks relax policy and never carry real value
    pub fn is_test_network(&self) -> bool {
        !matches!(self, NetworkId::Main)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkId::Main),
            "test" | "testnet" => Ok(NetworkId::Testnet),
            "regtest" => Ok(NetworkId::Regtest),
            "unittest" => Ok(NetworkId::UnitTest),
            _ => Err(ParamsError::UnknownNetwork(s.to_string())),
        }
    }
}
