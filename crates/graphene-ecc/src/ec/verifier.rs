//! ECDSA verification against an explicit public key.

use crate::curve::CurveProvider;
use crate::ec::signature::Signature;
use crate::EccError;

/// Check `signature` over a 32-byte `digest` against `public`.
///
/// A signature that simply does not verify is `Ok(false)`; only a digest of
/// the wrong length is an error.
pub fn verify<C: CurveProvider>(
    curve: &C,
    digest: &[u8],
    signature: &Signature,
    public: &C::Point,
) -> Result<bool, EccError> {
    let digest: &[u8; 32] = digest.try_into().map_err(|_| EccError::InvalidLength {
        expected: 32,
        got: digest.len(),
    })?;
    Ok(curve.verify_raw(digest, signature, public))
}
