//! secp256k1 curve provider backed by `k256`.
//!
//! Points are `k256::ProjectivePoint`; scalars cross the trait boundary as
//! 32-byte big-endian arrays and are reduced modulo `n` on the way in.

use k256::ecdsa::hazmat::{verify_prehashed, SignPrimitive};
use k256::ecdsa::Signature as EcdsaSignature;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::FromEncodedPoint;
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};

use super::nonce::generate_k;
use super::CurveProvider;
use crate::ec::signature::Signature;
use crate::util::{is_less_than, is_zero};
use crate::EccError;

/// The secp256k1 curve order N.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
pub const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (N/2); `sign_raw` never yields a larger S.
pub const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// The secp256k1 curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Secp256k1;

impl Secp256k1 {
    /// Validate a secret scalar: it must lie in `[1, n)`.
    fn secret_scalar(secret: &[u8; 32]) -> Result<Scalar, EccError> {
        if is_zero(secret) {
            return Err(EccError::InvalidPrivateKey("scalar is zero".to_string()));
        }
        if !is_less_than(secret, &CURVE_ORDER) {
            return Err(EccError::InvalidPrivateKey("scalar is >= curve.N".to_string()));
        }
        Ok(reduce(secret))
    }
}

impl CurveProvider for Secp256k1 {
    type Point = ProjectivePoint;

    fn order(&self) -> [u8; 32] {
        CURVE_ORDER
    }

    fn generator(&self) -> ProjectivePoint {
        ProjectivePoint::GENERATOR
    }

    fn lift_x(&self, x: &[u8; 32], y_odd: bool) -> Option<ProjectivePoint> {
        let mut sec1 = [0u8; 33];
        sec1[0] = if y_odd { 0x03 } else { 0x02 };
        sec1[1..].copy_from_slice(x);
        let encoded = EncodedPoint::from_bytes(sec1).ok()?;
        let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        affine.map(ProjectivePoint::from)
    }

    fn multiply(&self, point: &ProjectivePoint, k: &[u8; 32]) -> ProjectivePoint {
        *point * reduce(k)
    }

    fn add(&self, a: &ProjectivePoint, b: &ProjectivePoint) -> ProjectivePoint {
        *a + *b
    }

    fn negate(&self, p: &ProjectivePoint) -> ProjectivePoint {
        -*p
    }

    fn mod_inverse(&self, k: &[u8; 32]) -> Option<[u8; 32]> {
        let inv: Option<Scalar> = reduce(k).invert().into();
        inv.map(|s| scalar_bytes(&s))
    }

    fn is_infinity(&self, p: &ProjectivePoint) -> bool {
        *p == ProjectivePoint::IDENTITY
    }

    fn public_point(&self, secret: &[u8; 32]) -> Result<ProjectivePoint, EccError> {
        let d = Self::secret_scalar(secret)?;
        Ok(ProjectivePoint::GENERATOR * d)
    }

    fn sign_raw(
        &self,
        digest: &[u8; 32],
        secret: &[u8; 32],
        nonce: u32,
    ) -> Result<Signature, EccError> {
        let d = Self::secret_scalar(secret)?;
        let k = reduce(&generate_k(digest, secret, nonce, &CURVE_ORDER));

        // k256 returns the low-S form (BIP-62)
        let (sig, _) = d
            .try_sign_prehashed(k, &FieldBytes::from(*digest))
            .map_err(|e| EccError::OutOfRange(format!("signing failed: {}", e)))?;

        let (r, s) = sig.split_bytes();
        let mut r_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&r);
        s_bytes.copy_from_slice(&s);
        Ok(Signature::new(r_bytes, s_bytes))
    }

    fn verify_raw(&self, digest: &[u8; 32], signature: &Signature, q: &ProjectivePoint) -> bool {
        if self.is_infinity(q) {
            return false;
        }
        // from_scalars rejects r or s outside [1, n)
        let sig = match EcdsaSignature::from_scalars(*signature.r(), *signature.s()) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        verify_prehashed(q, &FieldBytes::from(*digest), &sig).is_ok()
    }
}

/// Interpret 32 big-endian bytes as an integer reduced modulo `n`.
fn reduce(bytes: &[u8; 32]) -> Scalar {
    let uint = k256::U256::from_be_slice(bytes);
    <Scalar as Reduce<k256::U256>>::reduce(uint)
}

fn scalar_bytes(s: &Scalar) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&s.to_bytes());
    out
}
