//! Public key recovery from a signature, its digest and a recovery parameter.

use std::fmt;

use crate::curve::CurveProvider;
use crate::ec::signature::Signature;
use crate::util::{checked_add_be, is_less_than, is_zero};
use crate::EccError;

/// Identifies which candidate point `R` produced a signature.
///
/// - bit 0: the y-coordinate of `R` is odd;
/// - bit 1: the x-coordinate of `R` was at least `n`, so `r = x - n` and
///   `n` must be added back. This happens with negligible probability but
///   is still honoured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecoveryParam(pub(crate) u8);

impl RecoveryParam {
    /// Create a recovery parameter, which must be in `0..=3`.
    pub fn new(value: u8) -> Result<Self, EccError> {
        if value & 3 != value {
            return Err(EccError::OutOfRange(format!(
                "recovery parameter {} is more than two bits",
                value
            )));
        }
        Ok(RecoveryParam(value))
    }

    /// Whether the y-coordinate of `R` is odd.
    pub fn is_y_odd(self) -> bool {
        self.0 & 1 != 0
    }

    /// Whether `r` must be lifted by the curve order before recovery.
    pub fn is_second_key(self) -> bool {
        self.0 & 2 != 0
    }

    /// The raw value, without any compact header offsets.
    pub fn to_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RecoveryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for RecoveryParam {
    type Error = EccError;

    fn try_from(value: u8) -> Result<Self, EccError> {
        RecoveryParam::new(value)
    }
}

/// Recover the candidate public key point for `signature` over `digest`.
///
/// Computes `Q = r^-1 (sR - eG)` where `R` is the point selected by
/// `recovery_param`. The result is *a* public key, not an authenticated one:
/// callers matching against a known key must compare it themselves.
///
/// # Arguments
/// * `curve` - The curve provider.
/// * `digest` - The 32-byte digest that was signed.
/// * `signature` - The signature.
/// * `recovery_param` - Selects the candidate `R`.
///
/// # Returns
/// The recovered point, or an error if the digest length is wrong or no valid
/// point corresponds to the inputs.
pub fn recover_public_key<C: CurveProvider>(
    curve: &C,
    digest: &[u8],
    signature: &Signature,
    recovery_param: RecoveryParam,
) -> Result<C::Point, EccError> {
    let digest: &[u8; 32] = digest.try_into().map_err(|_| EccError::InvalidLength {
        expected: 32,
        got: digest.len(),
    })?;

    let order = curve.order();
    let (r, s) = (signature.r(), signature.s());
    if is_zero(r) || !is_less_than(r, &order) {
        return Err(EccError::OutOfRange("invalid r value".to_string()));
    }
    if is_zero(s) || !is_less_than(s, &order) {
        return Err(EccError::OutOfRange("invalid s value".to_string()));
    }

    // x = r + jn
    let x = if recovery_param.is_second_key() {
        checked_add_be(r, &order).ok_or(EccError::PointNotOnCurve)?
    } else {
        *r
    };
    let big_r = curve
        .lift_x(&x, recovery_param.is_y_odd())
        .ok_or(EccError::PointNotOnCurve)?;

    let s_r = curve.multiply(&big_r, s);
    let e_g = curve.multiply(&curve.generator(), digest);
    let r_inv = curve
        .mod_inverse(r)
        .ok_or_else(|| EccError::OutOfRange("r has no inverse".to_string()))?;

    let q = curve.multiply(&curve.add(&s_r, &curve.negate(&e_g)), &r_inv);
    if curve.is_infinity(&q) {
        return Err(EccError::PointNotOnCurve);
    }
    Ok(q)
}
