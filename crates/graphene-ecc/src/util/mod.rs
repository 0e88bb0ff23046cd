//! Byte-level helpers shared by the signature codec and the curve provider.
//!
//! Provides a bounds-checked cursor over encoded signatures and a small set of
//! operations on fixed-width 32-byte big-endian unsigned integers.

use crate::EccError;

// ---------------------------------------------------------------------------
// ByteReader
// ---------------------------------------------------------------------------

/// A cursor-based reader over an encoded signature.
///
/// Every read is bounds checked, so truncated input surfaces as an error
/// instead of a panic.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new reader over the given byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from.
    ///
    /// # Returns
    /// A `ByteReader` positioned at the start of the data.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], EccError> {
        if self.pos + n > self.data.len() {
            return Err(EccError::MalformedDer(format!(
                "unexpected end of data at offset {}",
                self.pos
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, EccError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a single byte and check that it equals `tag`.
    ///
    /// # Arguments
    /// * `tag` - The expected byte value.
    /// * `what` - Description used in the error message.
    pub fn expect_tag(&mut self, tag: u8, what: &str) -> Result<(), EccError> {
        let b = self.read_u8()?;
        if b != tag {
            return Err(EccError::MalformedDer(format!(
                "expected {} (0x{:02x}), found 0x{:02x}",
                what, tag, b
            )));
        }
        Ok(())
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// 32-byte big-endian integers
// ---------------------------------------------------------------------------

/// Check if a 32-byte big-endian integer is zero.
pub fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

/// Compare two 32-byte big-endian integers: a < b.
pub fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a < b
}

/// Compare two 32-byte big-endian integers: a > b.
pub fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a > b
}

/// Compute `a + b`.
///
/// # Returns
/// `None` if the sum does not fit in 256 bits.
pub fn checked_add_be(a: &[u8; 32], b: &[u8; 32]) -> Option<[u8; 32]> {
    let mut result = [0u8; 32];
    let mut carry: u16 = 0;
    for i in (0..32).rev() {
        let sum = a[i] as u16 + b[i] as u16 + carry;
        result[i] = sum as u8;
        carry = sum >> 8;
    }
    if carry != 0 {
        None
    } else {
        Some(result)
    }
}

/// Strip leading zero bytes, keeping at least one byte.
pub fn trim_leading_zeros(val: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < val.len() && val[start] == 0 {
        start += 1;
    }
    &val[start..]
}

/// Convert a variable-length big-endian byte slice to a fixed 32-byte array.
///
/// Leading zero bytes are ignored and the result is left-padded.
///
/// # Returns
/// `None` if the value needs more than 32 bytes.
pub fn to_32_bytes(bytes: &[u8]) -> Option<[u8; 32]> {
    let trimmed = trim_leading_zeros(bytes);
    if trimmed.len() > 32 {
        return None;
    }
    let mut out = [0u8; 32];
    out[32 - trimmed.len()..].copy_from_slice(trimmed);
    Some(out)
}
