//! Base58 address prefixes
//!
//! The prefix bytes are prepended to a key or script hash before
//! Base58Check encoding, so every network gets visually distinct addresses.

use serde::Serialize;

use super::ParamsError;

/// Kind of Base58-encoded object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
    ExtCoinType,
}

/// Per-network prefix table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
    pub ext_coin_type: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
            Base58Type::ExtCoinType => &self.ext_coin_type,
        }
    }

    /// Base58Check-encode `payload` behind the prefix for `kind`
    pub fn encode_check(&self, kind: Base58Type, payload: &[u8]) -> String {
        let mut data = self.get(kind).to_vec();
        data.extend_from_slice(payload);
        bs58::encode(data).with_check().into_string()
    }

    /// Decode a Base58Check string and strip the prefix for `kind`
    pub fn decode_check(&self, kind: Base58Type, encoded: &str) -> Result<Vec<u8>, ParamsError> {
        let data = bs58::decode(encoded)
            .with_check(None)
            .into_vec()
            .map_err(|_| ParamsError::InvalidBase58(encoded.to_string()))?;

        let prefix = self.get(kind);
        match data.strip_prefix(prefix) {
            Some(payload) => Ok(payload.to_vec()),
            None => Err(ParamsError::PrefixMismatch(kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Base58Prefixes {
        Base58Prefixes {
            pubkey_address: vec![128],
            script_address: vec![11],
            secret_key: vec![240],
            ext_public_key: vec![0x3a, 0x80, 0x51, 0xc0],
            ext_secret_key: vec![0x3a, 0x81, 0x88, 0xf7],
            ext_coin_type: vec![0x80, 0x00, 0x00, 0x01],
        }
    }

    #[test]
    fn test_get_by_kind() {
        let table = prefixes();
        assert_eq!(table.get(Base58Type::PubkeyAddress), &[128]);
        assert_eq!(table.get(Base58Type::ExtCoinType), &[0x80, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_decode_known_address() {
        let table = prefixes();
        let payload = table
            .decode_check(Base58Type::PubkeyAddress, "tk7oN9aE8Foa8gqoJCYx4UcrWnEaFvr3Co")
            .unwrap();
        assert_eq!(payload.len(), 20);
        assert_eq!(
            table.encode_check(Base58Type::PubkeyAddress, &payload),
            "tk7oN9aE8Foa8gqoJCYx4UcrWnEaFvr3Co"
        );
    }

    #[test]
    fn test_prefix_mismatch() {
        let table = prefixes();
        let encoded = table.encode_check(Base58Type::ScriptAddress, &[7u8; 20]);
        assert_eq!(
            table.decode_check(Base58Type::PubkeyAddress, &encoded),
            Err(ParamsError::PrefixMismatch(Base58Type::PubkeyAddress))
        );
    }

    #[test]
    fn test_bad_checksum() {
        let table = prefixes();
        assert!(matches!(
            table.decode_check(Base58Type::PubkeyAddress, "tk7oN9aE8Foa8gqoJCYx4UcrWnEaFvr3Cp"),
            Err(ParamsError::InvalidBase58(_))
        ));
    }
}
