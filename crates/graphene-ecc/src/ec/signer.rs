//! Canonical signing: retry deterministic nonces until the signature packs
//! losslessly into the compact form, then embed the recovery parameter.
//!
//! A signature is canonical when both `r` and `s` DER-encode to exactly
//! 32 bytes: no sign-padding byte and no short value. Roughly one attempt
//! in four succeeds, so the retry loop is short but is still bounded by
//! [`SignerConfig::max_attempts`].

use log::{error, trace, warn};
use serde::{Deserialize, Serialize};

use crate::curve::{CurveProvider, Secp256k1};
use crate::ec::recovery::{recover_public_key, RecoveryParam};
use crate::ec::signature::{CompactSignature, Signature};
use crate::EccError;

/// Default upper bound on signing attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 256;

/// Default number of attempts between retry warnings.
pub const DEFAULT_WARN_INTERVAL: u32 = 10;

/// Width of each canonical DER integer field.
const CANONICAL_FIELD_LEN: usize = 32;

/// Canonical signer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Attempts after which signing fails with `SigningAttemptsExhausted`.
    pub max_attempts: u32,
    /// Log a warning every this many attempts; `0` disables the warning.
    pub warn_interval: u32,
}

impl SignerConfig {
    /// Create a configuration with an explicit attempt bound and warning interval.
    pub fn new(max_attempts: u32, warn_interval: u32) -> Self {
        SignerConfig {
            max_attempts,
            warn_interval,
        }
    }

    /// Replace the attempt bound.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Replace the warning interval.
    pub fn with_warn_interval(mut self, warn_interval: u32) -> Self {
        self.warn_interval = warn_interval;
        self
    }
}

impl Default for SignerConfig {
    fn default() -> Self {
        SignerConfig::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_WARN_INTERVAL)
    }
}

/// Parity of the nonce point `R` for a freshly produced signature.
///
/// A signer never reduces `r` modulo `n` in practice, so only the two
/// low recovery parameters are candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Candidate {
    Even,
    Odd,
}

impl Candidate {
    const ALL: [Candidate; 2] = [Candidate::Even, Candidate::Odd];

    fn recovery_param(self) -> RecoveryParam {
        match self {
            Candidate::Even => RecoveryParam(0),
            Candidate::Odd => RecoveryParam(1),
        }
    }
}

/// Steps of the signing loop.
#[derive(Debug)]
enum State {
    Attempt { nonce: u32 },
    Measure { nonce: u32, signature: Signature },
    Retry { nonce: u32 },
    Accept { nonce: u32, signature: Signature },
}

/// Produces canonical compact signatures over 32-byte digests.
#[derive(Clone, Debug)]
pub struct CanonicalSigner<C: CurveProvider = Secp256k1> {
    curve: C,
    config: SignerConfig,
}

impl<C: CurveProvider> CanonicalSigner<C> {
    /// Create a signer over the given curve provider.
    pub fn new(curve: C, config: SignerConfig) -> Self {
        CanonicalSigner { curve, config }
    }

    /// The curve provider.
    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// The signer configuration.
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Sign a 32-byte digest with the secret scalar.
    ///
    /// # Arguments
    /// * `digest` - The message digest; must be exactly 32 bytes.
    /// * `secret` - The private scalar, in `[1, n)`.
    ///
    /// # Returns
    /// A compressed-key `CompactSignature` whose `r` and `s` both DER-encode
    /// to 32 bytes and whose recovery parameter recovers the signer's key.
    pub fn sign_digest(
        &self,
        digest: &[u8],
        secret: &[u8; 32],
    ) -> Result<CompactSignature, EccError> {
        let digest: &[u8; 32] = digest.try_into().map_err(|_| EccError::InvalidLength {
            expected: 32,
            got: digest.len(),
        })?;
        let public = self.curve.public_point(secret)?;

        let signature = self.find_canonical(digest, secret)?;
        let recovery_param = self.find_recovery_param(digest, &signature, &public)?;

        Ok(CompactSignature {
            compressed: true,
            recovery_param,
            signature,
        })
    }

    fn find_canonical(&self, digest: &[u8; 32], secret: &[u8; 32]) -> Result<Signature, EccError> {
        let mut state = State::Attempt { nonce: 0 };
        loop {
            state = match state {
                State::Attempt { nonce } => {
                    if nonce >= self.config.max_attempts {
                        error!("no canonical signature after {} attempts", nonce);
                        return Err(EccError::SigningAttemptsExhausted { attempts: nonce });
                    }
                    let signature = self.curve.sign_raw(digest, secret, nonce)?;
                    State::Measure { nonce, signature }
                }
                State::Measure { nonce, signature } => {
                    let (len_r, len_s) = signature.der_field_lengths();
                    if len_r == CANONICAL_FIELD_LEN && len_s == CANONICAL_FIELD_LEN {
                        State::Accept { nonce, signature }
                    } else {
                        State::Retry { nonce }
                    }
                }
                State::Retry { nonce } => {
                    let attempts = nonce + 1;
                    if self.config.warn_interval > 0 && attempts % self.config.warn_interval == 0 {
                        warn!("{} attempts to find canonical signature", attempts);
                    }
                    State::Attempt { nonce: attempts }
                }
                State::Accept { nonce, signature } => {
                    trace!("canonical signature found on attempt {}", nonce + 1);
                    return Ok(signature);
                }
            };
        }
    }

    fn find_recovery_param(
        &self,
        digest: &[u8; 32],
        signature: &Signature,
        public: &C::Point,
    ) -> Result<RecoveryParam, EccError> {
        for candidate in Candidate::ALL {
            let param = candidate.recovery_param();
            if let Ok(q) = recover_public_key(&self.curve, digest, signature, param) {
                if q == *public {
                    return Ok(param);
                }
            }
        }
        error!("no recovery parameter reproduces the signer's public key");
        Err(EccError::RecoveryParamNotFound)
    }
}

impl Default for CanonicalSigner<Secp256k1> {
    fn default() -> Self {
        CanonicalSigner::new(Secp256k1, SignerConfig::default())
    }
}
