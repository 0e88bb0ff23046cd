/// Graphene ECC - secp256k1 signatures for Graphene-style ledgers.
///
/// This crate provides:
/// - Strict compact, DER and script signature encoding/decoding
/// - Public key recovery from compact signatures
/// - Canonical compact signing with bounded deterministic nonce retries
/// - ECDSA verification behind an injectable curve provider

pub mod curve;
pub mod ec;
pub mod hash;
pub mod util;

mod error;
pub use error::EccError;
