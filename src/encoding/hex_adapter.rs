//! Fixed-width hexadecimal adapter.
//!
//! Values are rendered big-endian, zero-padded to `ceil(bitlength / 8)` bytes,
//! so every share of a pool has the same textual width.
//!
//! # Security
//! - Intermediate byte buffers are zeroized on drop.

use num_bigint::BigUint;
use zeroize::Zeroizing;

use super::{EncodingError, ValueAdapter};
use crate::core::primes::get_prime;

/// Registry name.
pub const NAME: &str = "hex";

/// Values written as lowercase big-endian hexadecimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexAdapter {
    bitlength: usize,
    width: usize,
    p: BigUint,
}

impl HexAdapter {
    /// Creates a hex adapter for `bitlength`.
    pub fn new(bitlength: usize) -> Result<Self, EncodingError> {
        Ok(Self {
            bitlength,
            width: bitlength.div_ceil(8),
            p: get_prime(bitlength)?,
        })
    }

    /// Registry constructor.
    pub fn boxed(bitlength: usize) -> Result<Box<dyn ValueAdapter>, EncodingError> {
        Ok(Box::new(Self::new(bitlength)?))
    }

    /// Encoded width in bytes.
    pub fn width(&self) -> usize {
        self.width
    }
}

impl ValueAdapter for HexAdapter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn bitlength(&self) -> usize {
        self.bitlength
    }

    fn modulus(&self) -> &BigUint {
        &self.p
    }

    fn to_value(&self, text: &str) -> Result<BigUint, EncodingError> {
        let text = text.trim();
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        if digits.is_empty() {
            return Err(EncodingError::InvalidFormat);
        }
        let bytes = Zeroizing::new(hex::decode(digits).map_err(|_| EncodingError::InvalidFormat)?);
        let value = BigUint::from_bytes_be(&bytes);
        if value >= self.p {
            return Err(EncodingError::OutOfRange);
        }
        Ok(value)
    }

    fn from_value(&self, value: &BigUint) -> Result<String, EncodingError> {
        if value >= &self.p {
            return Err(EncodingError::OutOfRange);
        }
        let raw = Zeroizing::new(value.to_bytes_be());
        let mut padded = Zeroizing::new(vec![0u8; self.width]);
        // value < p < 2^bitlength, so raw never exceeds the width
        let start = self.width.saturating_sub(raw.len());
        padded[start..].copy_from_slice(&raw[raw.len() - (self.width - start)..]);
        Ok(hex::encode(&padded[..]))
    }
}
