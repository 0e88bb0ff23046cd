/// ECDSA signatures on secp256k1.
///
/// Provides the signature codec (compact, DER, script), public key recovery,
/// canonical compact signing, verification, and the key types built on them.

pub mod private_key;
pub mod public_key;
pub mod recovery;
pub mod signature;
pub mod signer;
pub mod verifier;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use recovery::{recover_public_key, RecoveryParam};
pub use signature::{CompactSignature, ScriptSignature, Signature};
pub use signer::{CanonicalSigner, SignerConfig};
pub use verifier::verify;
