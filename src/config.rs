//! Configuration management.
//!
//! Defines the user-configurable settings for share generation and share
//! text encoding.

use num_bigint::BigUint;

use crate::core::primes::get_prime;
use crate::encoding::{AdapterRegistry, EncodingError, Separator, ShareCodec, ValueAdapter};
use crate::mpc::{MpcError, Shamir};

/// Main configuration structure.
///
/// This struct should be populated by the host application (CLI/GUI) and passed
/// to the respective modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShamirConfig {
    /// Secret size in bits; selects the prime modulus.
    pub bitlength: usize,

    /// Name of the value adapter used for share text (e.g. "int", "hex").
    pub adapter: String,

    /// Separator between share path and value.
    pub separator: Separator,

    /// If set, share indices are sampled from `1..=rand_indices`.
    pub rand_indices: Option<u64>,
}

impl Default for ShamirConfig {
    fn default() -> Self {
        Self {
            bitlength: 256,
            adapter: String::from("int"),
            separator: Separator::Whitespace,
            rand_indices: None,
        }
    }
}

impl ShamirConfig {
    /// The prime modulus for the configured bit-length.
    pub fn modulus(&self) -> Result<BigUint, MpcError> {
        Ok(get_prime(self.bitlength)?)
    }

    /// An engine over the configured prime.
    pub fn engine(&self) -> Result<Shamir, MpcError> {
        Shamir::new(self.modulus()?)
    }

    /// A share codec using the configured separator.
    pub fn codec(&self) -> ShareCodec {
        ShareCodec::new(self.separator.clone())
    }

    /// Builds the configured adapter from `registry`.
    pub fn adapter(&self, registry: &AdapterRegistry) -> Result<Box<dyn ValueAdapter>, EncodingError> {
        registry.build(&self.adapter, self.bitlength)
    }
}
