/// Unified error type for signature encoding, recovery, signing and key handling.
///
/// Decode errors name the rule that was violated; nothing is ever partially decoded.
/// A failed verification is not an error and is reported as `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum EccError {
    #[error("invalid length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("value out of range: {0}")]
    OutOfRange(String),

    #[error("malformed DER signature: {0}")]
    MalformedDer(String),

    #[error("invalid sequence length: declared {declared}, actual {actual}")]
    BadSequenceLength { declared: usize, actual: usize },

    #[error("invalid DER encoding: consumed {consumed} of {len} bytes")]
    TrailingData { consumed: usize, len: usize },

    #[error("{0} value excessively padded")]
    ExcessPadding(&'static str),

    #[error("{0} length is zero")]
    ZeroLength(&'static str),

    #[error("invalid hash type: {0:#04x}")]
    InvalidHashType(u8),

    #[error("unable to find valid recovery factor")]
    RecoveryParamNotFound,

    #[error("no canonical signature after {attempts} attempts")]
    SigningAttemptsExhausted { attempts: u32 },

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("point not on curve")]
    PointNotOnCurve,

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for EccError {
    fn from(e: hex::FromHexError) -> Self {
        EccError::InvalidHex(e.to_string())
    }
}
