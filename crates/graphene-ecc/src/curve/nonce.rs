//! RFC 6979 deterministic nonce generation (HMAC-SHA256).
//!
//! A non-zero `counter` first re-hashes the digest with `counter` zero bytes
//! appended, giving the canonical signer a fresh nonce for every retry while
//! staying deterministic.

use k256::FieldBytes;
use sha2::Sha256;

use crate::hash::sha256;

/// The digest fed to the nonce generator for retry `counter`.
pub(crate) fn nonce_digest(digest: &[u8; 32], counter: u32) -> [u8; 32] {
    if counter == 0 {
        return *digest;
    }
    let mut buf = Vec::with_capacity(32 + counter as usize);
    buf.extend_from_slice(digest);
    buf.resize(32 + counter as usize, 0);
    sha256(&buf)
}

/// Generate the nonce `k` for signing `digest` with `secret`.
///
/// # Arguments
/// * `digest` - The 32-byte message digest being signed.
/// * `secret` - The 32-byte private scalar.
/// * `counter` - Retry counter; `0` yields the plain RFC 6979 nonce.
/// * `order` - The curve order `n`.
///
/// # Returns
/// A nonce in `[1, n)`.
pub(crate) fn generate_k(
    digest: &[u8; 32],
    secret: &[u8; 32],
    counter: u32,
    order: &[u8; 32],
) -> [u8; 32] {
    let h = nonce_digest(digest, counter);
    let k = rfc6979::generate_k::<Sha256, _>(
        &FieldBytes::from(*secret),
        &FieldBytes::from(*order),
        &FieldBytes::from(h),
        &[],
    );
    let mut out = [0u8; 32];
    out.copy_from_slice(&k);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::secp256k1::CURVE_ORDER;

    fn digest() -> [u8; 32] {
        sha256(b"sample")
    }

    /// k for key 1 / "Satoshi Nakamoto", a widely published RFC 6979 vector.
    #[test]
    fn test_rfc6979_known_k() {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let h = sha256(b"Satoshi Nakamoto");
        let k = generate_k(&h, &secret, 0, &CURVE_ORDER);
        assert_eq!(
            hex::encode(k),
            "8f8a276c19f4149656b280621e358cce24f5f52542772691ee69063b74f15d15"
        );
    }

    #[test]
    fn test_counter_changes_nonce() {
        let secret = [0x11u8; 32];
        let k0 = generate_k(&digest(), &secret, 0, &CURVE_ORDER);
        let k1 = generate_k(&digest(), &secret, 1, &CURVE_ORDER);
        let k1_again = generate_k(&digest(), &secret, 1, &CURVE_ORDER);
        assert_ne!(k0, k1);
        assert_eq!(k1, k1_again);
    }

    #[test]
    fn test_nonce_digest_appends_zero_bytes() {
        let d = digest();
        assert_eq!(nonce_digest(&d, 0), d);

        let mut padded = d.to_vec();
        padded.extend_from_slice(&[0u8; 3]);
        assert_eq!(nonce_digest(&d, 3), sha256(&padded));
    }
}
