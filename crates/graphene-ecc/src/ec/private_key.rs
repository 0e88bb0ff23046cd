//! secp256k1 private key with canonical compact signing.

use std::fmt;

use zeroize::Zeroize;

use crate::curve::{CurveProvider, Secp256k1};
use crate::ec::public_key::PublicKey;
use crate::ec::signature::CompactSignature;
use crate::ec::signer::CanonicalSigner;
use crate::hash::sha256;
use crate::EccError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A secp256k1 private key.
///
/// The scalar is wiped from memory when the key is dropped.
#[derive(Clone)]
pub struct PrivateKey {
    secret: [u8; PRIVATE_KEY_BYTES_LEN],
    public: PublicKey,
}

impl PrivateKey {
    /// Create a private key from raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256k1,
    /// or an error if the scalar is zero or out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        let secret: [u8; PRIVATE_KEY_BYTES_LEN] = bytes.try_into().map_err(|_| {
            EccError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            ))
        })?;
        let public = PublicKey::from_point(Secp256k1.public_point(&secret)?)?;
        Ok(PrivateKey { secret, public })
    }

    /// Create a private key from a hexadecimal string.
    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        if hex_str.is_empty() {
            return Err(EccError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.secret)
    }

    /// The corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        self.public
    }

    /// Sign a 32-byte digest, producing a canonical compact signature.
    ///
    /// Uses the default signer configuration; build a [`CanonicalSigner`] to
    /// change the attempt bound.
    pub fn sign_digest(&self, digest: &[u8]) -> Result<CompactSignature, EccError> {
        self.sign_digest_with(&CanonicalSigner::default(), digest)
    }

    /// Sign a 32-byte digest with an explicitly configured signer.
    pub fn sign_digest_with(
        &self,
        signer: &CanonicalSigner,
        digest: &[u8],
    ) -> Result<CompactSignature, EccError> {
        signer.sign_digest(digest, &self.secret)
    }

    /// Sign the SHA-256 of `message`.
    pub fn sign_message(&self, message: &[u8]) -> Result<CompactSignature, EccError> {
        self.sign_digest(&sha256(message))
    }

    /// Sign the SHA-256 of a hex-encoded message.
    pub fn sign_hex(&self, message_hex: &str) -> Result<CompactSignature, EccError> {
        let message = hex::decode(message_hex)?;
        self.sign_message(&message)
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.secret == other.secret
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public.to_hex())
            .finish_non_exhaustive()
    }
}
