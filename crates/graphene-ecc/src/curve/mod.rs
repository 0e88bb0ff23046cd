//! Elliptic curve collaborator consumed by recovery, signing and verification.
//!
//! The signature engine never performs point arithmetic itself: it asks a
//! [`CurveProvider`] for it. [`Secp256k1`] is the production implementation;
//! tests substitute deterministic stand-ins.

mod nonce;
pub mod secp256k1;

pub use secp256k1::Secp256k1;

use std::fmt::Debug;

use crate::ec::signature::Signature;
use crate::EccError;

/// Curve arithmetic and the raw ECDSA primitives.
///
/// Scalars are passed as 32-byte big-endian integers and are reduced modulo
/// the group order by the provider.
pub trait CurveProvider {
    /// A point on the curve, including the point at infinity.
    type Point: Clone + PartialEq + Debug;

    /// The group order `n`.
    fn order(&self) -> [u8; 32];

    /// The base point `G`.
    fn generator(&self) -> Self::Point;

    /// The point with x-coordinate `x` whose y-coordinate has parity `y_odd`.
    ///
    /// Returns `None` if `x` is not the x-coordinate of a curve point.
    fn lift_x(&self, x: &[u8; 32], y_odd: bool) -> Option<Self::Point>;

    /// Scalar multiplication `k * point`.
    fn multiply(&self, point: &Self::Point, k: &[u8; 32]) -> Self::Point;

    /// Point addition `a + b`.
    fn add(&self, a: &Self::Point, b: &Self::Point) -> Self::Point;

    /// Point negation `-p`.
    fn negate(&self, p: &Self::Point) -> Self::Point;

    /// Modular inverse of `k` modulo the group order; `None` for zero.
    fn mod_inverse(&self, k: &[u8; 32]) -> Option<[u8; 32]>;

    /// Whether `p` is the point at infinity.
    fn is_infinity(&self, p: &Self::Point) -> bool;

    /// The public point `d * G` for the secret scalar `d`.
    fn public_point(&self, secret: &[u8; 32]) -> Result<Self::Point, EccError>;

    /// Produce a low-S ECDSA signature over `digest`.
    ///
    /// `nonce` perturbs the deterministic nonce so that callers can ask for
    /// a different signature over the same digest.
    fn sign_raw(
        &self,
        digest: &[u8; 32],
        secret: &[u8; 32],
        nonce: u32,
    ) -> Result<Signature, EccError>;

    /// Check `signature` over `digest` against the public point `q`.
    fn verify_raw(&self, digest: &[u8; 32], signature: &Signature, q: &Self::Point) -> bool;
}
