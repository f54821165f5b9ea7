//! BIP39 mnemonic adapter.
//!
//! A value is the big-endian entropy of an English BIP39 phrase, so a share of
//! a 256-bit secret reads as 24 words. Only the bit-lengths BIP39 defines
//! entropy for are supported.
//!
//! # Security
//! - Entropy buffers are zeroized on drop.

use bip39::Mnemonic;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use super::{EncodingError, ValueAdapter};
use crate::core::primes::get_prime;

/// Registry name.
pub const NAME: &str = "bip39";

/// Entropy sizes with a BIP39 word count (12, 15, 18, 21, 24 words).
const BIP39_BITLENGTHS: [usize; 5] = [128, 160, 192, 224, 256];

/// Values written as BIP39 mnemonic phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bip39Adapter {
    bitlength: usize,
    p: BigUint,
}

impl Bip39Adapter {
    /// Creates a mnemonic adapter for `bitlength`.
    ///
    /// # Returns
    /// * `Err(EncodingError::UnsupportedBitlength)` unless `bitlength` is one
    ///   of 128, 160, 192, 224 or 256.
    pub fn new(bitlength: usize) -> Result<Self, EncodingError> {
        if !BIP39_BITLENGTHS.contains(&bitlength) {
            return Err(EncodingError::UnsupportedBitlength);
        }
        Ok(Self {
            bitlength,
            p: get_prime(bitlength)?,
        })
    }

    /// Registry constructor.
    pub fn boxed(bitlength: usize) -> Result<Box<dyn ValueAdapter>, EncodingError> {
        Ok(Box::new(Self::new(bitlength)?))
    }

    /// Number of words in a phrase for this bit-length.
    pub fn word_count(&self) -> usize {
        self.bitlength / 32 * 3
    }
}

impl ValueAdapter for Bip39Adapter {
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
        let mnemonic = Mnemonic::parse(text.trim()).map_err(|err| {
            log::debug!("Invalid BIP39 mnemonic: {}", err);
            EncodingError::InvalidFormat
        })?;
        let entropy = Zeroizing::new(mnemonic.to_entropy());
        if entropy.len() * 8 != self.bitlength {
            log::debug!(
                "Mnemonic has incorrect bit-length ({} instead of {})",
                entropy.len() * 8,
                self.bitlength
            );
            return Err(EncodingError::OutOfRange);
        }
        let value = BigUint::from_bytes_be(&entropy);
        if value >= self.p {
            return Err(EncodingError::OutOfRange);
        }
        Ok(value)
    }

    fn from_value(&self, value: &BigUint) -> Result<String, EncodingError> {
        if value >= &self.p {
            return Err(EncodingError::OutOfRange);
        }
        let width = self.bitlength / 8;
        let raw = Zeroizing::new(value.to_bytes_be());
        let mut entropy = Zeroizing::new(vec![0u8; width]);
        // value < p < 2^bitlength, so raw fits in the width
        entropy[width - raw.len()..].copy_from_slice(&raw);
        let mnemonic = Mnemonic::from_entropy(&entropy).map_err(|_| EncodingError::OutOfRange)?;
        Ok(mnemonic.to_string())
    }
}
