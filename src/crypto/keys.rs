//! secp256k1 public keys embedded in the network profiles
//!
//! Fee recipients, the alert key and the spork key are hard-coded as
//! uncompressed SEC1 points.

use k256::PublicKey;

use crate::chainparams::ParamsError;

/// Uncompressed SEC1 public key bytes
pub type PublicKeyBytes = [u8; 65];

/// Parse SEC1 public key bytes, rejecting points off the curve
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey, ParamsError> {
    PublicKey::from_sec1_bytes(bytes).map_err(|_| ParamsError::InvalidPublicKey(hex::encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_lit::hex;
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    // secp256k1 generator point, uncompressed
    const GENERATOR: PublicKeyBytes = hex!(
        "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
    );

    #[test]
    fn test_parse_valid_key() {
        let key = parse_public_key(&GENERATOR).unwrap();
        assert_eq!(key.to_encoded_point(false).as_bytes(), &GENERATOR[..]);
    }

    #[test]
    fn test_reject_off_curve_key() {
        let mut bad = GENERATOR;
        bad[64] ^= 0x01;
        assert!(matches!(
            parse_public_key(&bad),
            Err(ParamsError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_reject_truncated_key() {
        assert!(parse_public_key(&GENERATOR[..33]).is_err());
    }
}
