//! secp256k1 public key.
//!
//! Supports compressed/uncompressed SEC1 serialization, signature
//! verification and recovery from a compact signature.

use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, ProjectivePoint};
use std::fmt;

use crate::curve::{CurveProvider, Secp256k1};
use crate::ec::recovery::{recover_public_key, RecoveryParam};
use crate::ec::signature::Signature;
use crate::ec::verifier::verify;
use crate::hash::sha256;
use crate::EccError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key. Never the point at infinity.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    point: ProjectivePoint,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        if bytes.is_empty() {
            return Err(EccError::InvalidPublicKey("pubkey string is empty".to_string()));
        }
        if bytes.len() != COMPRESSED_LEN && bytes.len() != UNCOMPRESSED_LEN {
            return Err(EccError::InvalidPublicKey(format!(
                "pubkey length {} is neither {} nor {}",
                bytes.len(),
                COMPRESSED_LEN,
                UNCOMPRESSED_LEN
            )));
        }
        let encoded = EncodedPoint::from_bytes(bytes)
            .map_err(|e| EccError::InvalidPublicKey(e.to_string()))?;
        let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        let affine = affine.ok_or(EccError::PointNotOnCurve)?;
        Self::from_point(ProjectivePoint::from(affine))
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Wrap a curve point, rejecting the point at infinity.
    pub fn from_point(point: ProjectivePoint) -> Result<Self, EccError> {
        if Secp256k1.is_infinity(&point) {
            return Err(EccError::InvalidPublicKey("point at infinity".to_string()));
        }
        Ok(PublicKey { point })
    }

    /// Recover the key that produced `signature` over a 32-byte digest.
    pub fn recover(
        digest: &[u8],
        signature: &Signature,
        recovery_param: RecoveryParam,
    ) -> Result<Self, EccError> {
        let point = recover_public_key(&Secp256k1, digest, signature, recovery_param)?;
        Self::from_point(point)
    }

    /// The underlying curve point.
    pub fn point(&self) -> &ProjectivePoint {
        &self.point
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the 32-byte X coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let encoded = self.point.to_affine().to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let encoded = self.point.to_affine().to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Serialize the public key as a lowercase hexadecimal string (compressed format).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Verify an ECDSA signature over a 32-byte digest.
    ///
    /// # Returns
    /// `Ok(true)` if the signature is valid for this digest and key, `Ok(false)`
    /// if not, or an error if the digest is not 32 bytes.
    pub fn verify_digest(&self, digest: &[u8], sig: &Signature) -> Result<bool, EccError> {
        verify(&Secp256k1, digest, sig, &self.point)
    }

    /// Verify an ECDSA signature over the SHA-256 of `message`.
    pub fn verify_message(&self, message: &[u8], sig: &Signature) -> bool {
        Secp256k1.verify_raw(&sha256(message), sig, &self.point)
    }

    /// Verify an ECDSA signature over the SHA-256 of a hex-encoded message.
    pub fn verify_hex(&self, message_hex: &str, sig: &Signature) -> Result<bool, EccError> {
        let message = hex::decode(message_hex)?;
        Ok(self.verify_message(&message, sig))
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED_EVEN: &str =
        "02ce0b14fb842b1ba549fdd675c98075f12e9c510f8ef52bd021a9a1f4809d3b4d";
    const COMPRESSED_ODD: &str =
        "032689c7c2dab13309fb143e0e8fe396342521887e976690b6b47f5b2a4b7d448e";
    const UNCOMPRESSED: &str = "0411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3";

    /// Test parsing various valid and invalid public key formats.
    #[test]
    fn test_pub_keys() {
        let mut x_changed = hex::decode(UNCOMPRESSED).unwrap();
        x_changed[1] = 0x15;

        let tests: Vec<(&str, Vec<u8>, bool)> = vec![
            ("uncompressed ok", hex::decode(UNCOMPRESSED).unwrap(), true),
            ("uncompressed x changed", x_changed, false),
            ("compressed ok (ybit = 0)", hex::decode(COMPRESSED_EVEN).unwrap(), true),
            ("compressed ok (ybit = 1)", hex::decode(COMPRESSED_ODD).unwrap(), true),
            ("wrong length", vec![0x05], false),
            ("identity", vec![0x00], false),
            ("empty", vec![], false),
        ];

        for (name, key, is_valid) in &tests {
            let result = PublicKey::from_bytes(key);
            assert_eq!(result.is_ok(), *is_valid, "{}: {:?}", name, result.err());
        }
    }

    #[test]
    fn test_rejects_infinity() {
        assert!(matches!(
            PublicKey::from_point(ProjectivePoint::IDENTITY),
            Err(EccError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_public_key_is_equal() {
        let pk1 = PublicKey::from_hex(COMPRESSED_ODD).unwrap();
        let pk2 = PublicKey::from_hex(COMPRESSED_EVEN).unwrap();
        assert_eq!(pk1, pk1);
        assert_ne!(pk1, pk2);

        let uncompressed = PublicKey::from_hex(UNCOMPRESSED).unwrap();
        let again = PublicKey::from_bytes(&uncompressed.to_compressed()).unwrap();
        assert_eq!(uncompressed, again);
        assert_eq!(hex::encode(again.to_uncompressed()), UNCOMPRESSED);
    }

    #[test]
    fn test_display() {
        let pk = PublicKey::from_hex(COMPRESSED_EVEN).unwrap();
        assert_eq!(format!("{}", pk), COMPRESSED_EVEN);
        assert_eq!(pk.to_compressed().to_vec(), hex::decode(COMPRESSED_EVEN).unwrap());
    }

    #[test]
    fn test_verify_and_recover() {
        let secret = [0x21u8; 32];
        let pk = PublicKey::from_point(Secp256k1.public_point(&secret).unwrap()).unwrap();
        let digest = sha256(b"public key");
        let sig = Secp256k1.sign_raw(&digest, &secret, 0).unwrap();

        assert!(pk.verify_digest(&digest, &sig).unwrap());
        assert!(pk.verify_message(b"public key", &sig));
        assert!(!pk.verify_message(b"public kez", &sig));
        assert!(pk.verify_hex(&hex::encode(b"public key"), &sig).unwrap());
        assert!(pk.verify_hex("0g", &sig).is_err());
        assert!(pk.verify_digest(&digest[..16], &sig).is_err());

        let recovered: Vec<PublicKey> = (0..2u8)
            .filter_map(|p| PublicKey::recover(&digest, &sig, RecoveryParam::new(p).unwrap()).ok())
            .collect();
        assert!(recovered.contains(&pk));
    }
}
