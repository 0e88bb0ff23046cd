//! ECDSA signature codec: compact, DER and script signature forms.
//!
//! Decoding is strict: every structural rule is checked, `r` and `s` must lie
//! in `[1, n)`, and nothing is ever returned half-decoded.

use crate::curve::secp256k1::CURVE_ORDER;
use crate::ec::public_key::PublicKey;
use crate::ec::recovery::RecoveryParam;
use crate::hash::sha256;
use crate::util::{is_less_than, is_zero, to_32_bytes, trim_leading_zeros, ByteReader};
use crate::EccError;

/// Length of a compact signature in bytes.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

/// Offset added to the compact header byte.
const COMPACT_HEADER_BASE: u8 = 27;

/// Compact header flag marking a compressed public key.
const COMPACT_COMPRESSED_FLAG: u8 = 4;

const DER_SEQUENCE: u8 = 0x30;
const DER_INTEGER: u8 = 0x02;

/// Sign all inputs and all outputs.
pub const SIGHASH_ALL: u8 = 0x01;

/// Sign all inputs but no outputs.
pub const SIGHASH_NONE: u8 = 0x02;

/// Sign all inputs and the output with the same index.
pub const SIGHASH_SINGLE: u8 = 0x03;

/// Combined with another flag: only sign the current input.
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// An ECDSA signature with R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    ///
    /// No range check is applied; use one of the decoders for untrusted input.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Build a signature from untrusted R and S values, enforcing `1 <= r, s < n`.
    pub fn from_scalars(r: [u8; 32], s: [u8; 32]) -> Result<Self, EccError> {
        check_range(&r, "R")?;
        check_range(&s, "S")?;
        Ok(Signature { r, s })
    }

    /// Parse a DER-encoded ECDSA signature.
    ///
    /// Expected format: 0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>
    ///
    /// # Arguments
    /// * `bytes` - DER-encoded signature bytes, with nothing after the sequence.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or the first structural rule that failed.
    pub fn from_der(bytes: &[u8]) -> Result<Self, EccError> {
        let mut reader = ByteReader::new(bytes);

        reader.expect_tag(DER_SEQUENCE, "a DER sequence")?;
        let declared = reader.read_u8()? as usize;
        if declared != bytes.len() - 2 {
            return Err(EccError::BadSequenceLength {
                declared,
                actual: bytes.len() - 2,
            });
        }

        reader.expect_tag(DER_INTEGER, "a DER integer")?;
        let r_len = reader.read_u8()? as usize;
        if r_len == 0 {
            return Err(EccError::ZeroLength("R"));
        }
        let r_bytes = reader.read_bytes(r_len)?;

        reader.expect_tag(DER_INTEGER, "a DER integer (2)")?;
        let s_len = reader.read_u8()? as usize;
        if s_len == 0 {
            return Err(EccError::ZeroLength("S"));
        }
        if s_len > reader.remaining() {
            return Err(EccError::MalformedDer(format!(
                "S length {} overruns buffer ({} bytes left)",
                s_len,
                reader.remaining()
            )));
        }
        let s_bytes = reader.read_bytes(s_len)?;

        check_padding(r_bytes, "R")?;
        check_padding(s_bytes, "S")?;

        if reader.remaining() != 0 {
            return Err(EccError::TrailingData {
                consumed: reader.position(),
                len: bytes.len(),
            });
        }

        let r = der_integer_to_32(r_bytes, "R")?;
        let s = der_integer_to_32(s_bytes, "S")?;
        Signature::from_scalars(r, s)
    }

    /// Parse a hex-encoded DER signature.
    pub fn from_der_hex(hex_str: &str) -> Result<Self, EccError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_der(&bytes)
    }

    /// Serialize the signature in DER format.
    ///
    /// Output format: 0x30 <len> 0x02 <r_len> <r_bytes> 0x02 <s_len> <s_bytes>
    /// Each integer uses the minimal encoding, with a single 0x00 pad byte
    /// only when its high bit is set.
    pub fn to_der(&self) -> Vec<u8> {
        let rb = canonicalize_int(&self.r);
        let sb = canonicalize_int(&self.s);

        let total_len = 6 + rb.len() + sb.len();
        let mut out = Vec::with_capacity(total_len);
        out.push(DER_SEQUENCE);
        out.push((total_len - 2) as u8);
        out.push(DER_INTEGER);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(DER_INTEGER);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }

    /// Serialize the signature as a lowercase DER hex string.
    pub fn to_der_hex(&self) -> String {
        hex::encode(self.to_der())
    }

    /// Parse a 65-byte compact signature, discarding the header information.
    pub fn from_compact(bytes: &[u8]) -> Result<Self, EccError> {
        Ok(CompactSignature::from_bytes(bytes)?.signature)
    }

    /// Serialize the signature in 65-byte compact format.
    ///
    /// Format: <27 + recovery_param + 4 (if compressed)> <32-byte R> <32-byte S>
    pub fn to_compact(&self, recovery_param: RecoveryParam, compressed: bool) -> [u8; 65] {
        let mut header = recovery_param.to_u8();
        if compressed {
            header += COMPACT_COMPRESSED_FLAG;
        }
        header += COMPACT_HEADER_BASE;

        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out[0] = header;
        out[1..33].copy_from_slice(&self.r);
        out[33..65].copy_from_slice(&self.s);
        out
    }

    /// Serialize as a script signature: DER followed by the hash type byte.
    pub fn to_script_signature(&self, hash_type: u8) -> Vec<u8> {
        let mut out = self.to_der();
        out.push(hash_type);
        out
    }

    /// Lengths of the DER integer fields for R and S, read back from the encoding.
    pub(crate) fn der_field_lengths(&self) -> (usize, usize) {
        let der = self.to_der();
        let len_r = der[3] as usize;
        let len_s = der[5 + len_r] as usize;
        (len_r, len_s)
    }
}

/// A signature together with the header of its compact encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactSignature {
    /// Whether the signer's public key is to be serialized compressed.
    pub compressed: bool,
    /// Recovery parameter, without the header offsets.
    pub recovery_param: RecoveryParam,
    /// The R and S components.
    pub signature: Signature,
}

impl CompactSignature {
    /// Parse a 65-byte compact signature.
    ///
    /// Format: <header> <32-byte R> <32-byte S> where
    /// header = 27 + recovery_param + 4 (if compressed).
    ///
    /// # Arguments
    /// * `bytes` - 65-byte compact signature.
    ///
    /// # Returns
    /// `Ok(CompactSignature)` on success, or an error if the length, header or
    /// R/S range is invalid.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        if bytes.len() != COMPACT_SIGNATURE_LEN {
            return Err(EccError::InvalidLength {
                expected: COMPACT_SIGNATURE_LEN,
                got: bytes.len(),
            });
        }

        let header = bytes[0];
        let i = header.checked_sub(COMPACT_HEADER_BASE).ok_or_else(|| {
            EccError::OutOfRange(format!("compact header {} is below 27", header))
        })?;
        // At most 3 bits
        if i != i & 7 {
            return Err(EccError::OutOfRange(format!(
                "compact header {} is above 34",
                header
            )));
        }

        let compressed = i & COMPACT_COMPRESSED_FLAG != 0;
        let recovery_param = RecoveryParam::new(i & 3)?;

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[1..33]);
        s.copy_from_slice(&bytes[33..65]);

        Ok(CompactSignature {
            compressed,
            recovery_param,
            signature: Signature::from_scalars(r, s)?,
        })
    }

    /// Parse a hex-encoded compact signature.
    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize to the 65-byte compact form.
    pub fn to_bytes(&self) -> [u8; 65] {
        self.signature.to_compact(self.recovery_param, self.compressed)
    }

    /// Serialize to a lowercase hex string of the compact form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Recover the signer's public key from a 32-byte digest.
    ///
    /// The result is only the key this signature points at; whether it belongs
    /// to the expected signer is for the caller to check.
    pub fn recover_public_key(&self, digest: &[u8]) -> Result<PublicKey, EccError> {
        PublicKey::recover(digest, &self.signature, self.recovery_param)
    }

    /// Recover the signer's public key from an un-hashed message.
    pub fn recover_public_key_from_message(&self, message: &[u8]) -> Result<PublicKey, EccError> {
        self.recover_public_key(&sha256(message))
    }
}

/// A DER signature with the trailing hash type byte used in scripts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptSignature {
    /// The decoded signature.
    pub signature: Signature,
    /// The raw hash type byte, including the ANYONECANPAY bit.
    pub hash_type: u8,
}

impl ScriptSignature {
    /// Parse a script signature (DER body plus one hash type byte).
    ///
    /// The hash type is validated before the DER body: with the
    /// ANYONECANPAY bit masked off it must be ALL, NONE or SINGLE.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        let (hash_type, body) = match bytes.split_last() {
            Some((last, body)) => (*last, body),
            None => return Err(EccError::InvalidLength { expected: 1, got: 0 }),
        };

        let base = hash_type & !SIGHASH_ANYONECANPAY;
        if base == 0x00 || base >= 0x04 {
            return Err(EccError::InvalidHashType(hash_type));
        }

        Ok(ScriptSignature {
            signature: Signature::from_der(body)?,
            hash_type,
        })
    }

    /// Parse a hex-encoded script signature.
    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize to DER followed by the hash type byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.signature.to_script_signature(self.hash_type)
    }

    /// Serialize to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// Enforce `1 <= val < n`.
fn check_range(val: &[u8; 32], name: &str) -> Result<(), EccError> {
    if is_zero(val) {
        return Err(EccError::OutOfRange(format!("signature {} is zero", name)));
    }
    if !is_less_than(val, &CURVE_ORDER) {
        return Err(EccError::OutOfRange(format!(
            "signature {} is >= curve.N",
            name
        )));
    }
    Ok(())
}

/// Reject a leading 0x00 that is not needed to keep the value non-negative.
fn check_padding(field: &[u8], name: &'static str) -> Result<(), EccError> {
    if field.len() > 1 && field[0] == 0x00 && field[1] & 0x80 == 0 {
        return Err(EccError::ExcessPadding(name));
    }
    Ok(())
}

/// Convert DER integer content to a 32-byte unsigned value.
fn der_integer_to_32(field: &[u8], name: &str) -> Result<[u8; 32], EccError> {
    if field[0] & 0x80 != 0 {
        return Err(EccError::MalformedDer(format!("{} value is negative", name)));
    }
    to_32_bytes(field).ok_or_else(|| {
        EccError::OutOfRange(format!("{} value does not fit in 32 bytes", name))
    })
}

/// Canonicalize an integer for DER encoding.
///
/// Strips leading zeros from the big-endian representation and adds
/// a 0x00 padding byte if the high bit is set (to prevent interpretation
/// as a negative number).
fn canonicalize_int(val: &[u8; 32]) -> Vec<u8> {
    let trimmed = trim_leading_zeros(val);

    if trimmed[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(trimmed.len() + 1);
        out.push(0x00);
        out.extend_from_slice(trimmed);
        out
    } else {
        trimmed.to_vec()
    }
}
