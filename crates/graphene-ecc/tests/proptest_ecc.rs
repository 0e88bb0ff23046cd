use proptest::prelude::*;

use graphene_ecc::ec::private_key::PrivateKey;
use graphene_ecc::ec::recovery::RecoveryParam;
use graphene_ecc::ec::signature::{
    CompactSignature, ScriptSignature, Signature, SIGHASH_ALL, SIGHASH_ANYONECANPAY, SIGHASH_SINGLE,
};
use graphene_ecc::hash::sha256;

/// A 32-byte value with a random run of leading zero bytes, so DER sees
/// short integers as well as ones that need a sign-padding byte.
fn scalar_bytes() -> impl Strategy<Value = [u8; 32]> {
    (prop::array::uniform32(any::<u8>()), 0usize..32).prop_map(|(mut value, zeros)| {
        for byte in value.iter_mut().take(zeros) {
            *byte = 0;
        }
        value
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn canonical_sign_recover_verify(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let digest = sha256(&msg);
            let compact = pk.sign_digest(&digest).unwrap();
            let pub_key = pk.pub_key();

            prop_assert!(compact.compressed);
            prop_assert!(compact.recovery_param.to_u8() < 2);
            prop_assert!(pub_key.verify_digest(&digest, &compact.signature).unwrap());
            prop_assert_eq!(compact.recover_public_key(&digest).unwrap(), pub_key);

            // Canonical: both DER integers are exactly 32 bytes
            let der = compact.signature.to_der();
            prop_assert_eq!(der.len(), 70);
            prop_assert_eq!(der[3], 32);
            prop_assert_eq!(der[37], 32);
        }
    }

    #[test]
    fn compact_bytes_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let compact = pk.sign_message(&msg).unwrap();
            let bytes = compact.to_bytes();
            prop_assert_eq!(CompactSignature::from_bytes(&bytes).unwrap(), compact.clone());
            prop_assert_eq!(CompactSignature::from_hex(&compact.to_hex()).unwrap(), compact);
        }
    }

    #[test]
    fn der_and_script_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let sig = pk.sign_message(&msg).unwrap().signature;
            prop_assert_eq!(Signature::from_der(&sig.to_der()).unwrap(), sig.clone());

            let script = ScriptSignature::from_bytes(&sig.to_script_signature(SIGHASH_ALL)).unwrap();
            prop_assert_eq!(script.hash_type, SIGHASH_ALL);
            prop_assert_eq!(script.signature, sig);
        }
    }

    #[test]
    fn der_decoder_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..80)) {
        if let Ok(sig) = Signature::from_der(&bytes) {
            prop_assert_eq!(sig.to_der(), bytes);
        }
    }

    #[test]
    fn any_valid_signature_roundtrips(
        r in scalar_bytes(),
        s in scalar_bytes(),
        param in 0u8..4,
        compressed in any::<bool>()
    ) {
        // Zero or >= n values are rejected up front and have nothing to round-trip.
        if let Ok(sig) = Signature::from_scalars(r, s) {
            let der = sig.to_der();
            prop_assert_eq!(Signature::from_der(&der).unwrap(), sig.clone());
            prop_assert_eq!(Signature::from_der_hex(&sig.to_der_hex()).unwrap(), sig.clone());

            let compact = CompactSignature {
                compressed,
                recovery_param: RecoveryParam::new(param).unwrap(),
                signature: sig.clone(),
            };
            prop_assert_eq!(CompactSignature::from_bytes(&compact.to_bytes()).unwrap(), compact);

            let hash_type = SIGHASH_SINGLE | SIGHASH_ANYONECANPAY;
            let script = ScriptSignature::from_bytes(&sig.to_script_signature(hash_type)).unwrap();
            prop_assert_eq!(script.hash_type, hash_type);
            prop_assert_eq!(script.signature, sig);
        }
    }
}
