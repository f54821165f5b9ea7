//! Text encodings for shares.
//!
//! A share crosses the library boundary as a line of text: an optional path,
//! a separator, and the value rendered by a `ValueAdapter`. Adapters are tied
//! to a bit-length and validate values against that bit-length's prime.
//!
//! # Components
//! - `int_adapter`: decimal integers.
//! - `bip39_adapter`: BIP39 mnemonic phrases.
//! - `hex_adapter`: fixed-width big-endian hexadecimal.
//! - `share_codec`: parsing and formatting of whole share lines.
//!
//! # Design
//! Adapters are looked up through an explicit `AdapterRegistry` owned by the
//! caller. There is no process-wide registry.

pub mod bip39_adapter;
pub mod hex_adapter;
pub mod int_adapter;
pub mod share_codec;

pub use bip39_adapter::Bip39Adapter;
pub use hex_adapter::HexAdapter;
pub use int_adapter::IntAdapter;
pub use share_codec::{Separator, ShareCodec};

use core::fmt;
use std::collections::BTreeMap;

use num_bigint::BigUint;

use crate::core::FieldError;

/// Errors raised while encoding or decoding shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// The text could not be parsed at all.
    InvalidFormat,
    /// The value is not in `[0, p)` for the adapter's prime.
    OutOfRange,
    /// The path part of a share line is malformed or contains 0.
    InvalidPath,
    /// No adapter registered under the requested name.
    UnknownAdapter,
    /// No prime is tabulated for the requested bit-length.
    UnsupportedBitlength,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidFormat => write!(f, "Unable to parse share string"),
            EncodingError::OutOfRange => write!(f, "Value not properly represented by bit-length"),
            EncodingError::InvalidPath => write!(f, "Invalid share path"),
            EncodingError::UnknownAdapter => write!(f, "Unknown adapter type"),
            EncodingError::UnsupportedBitlength => write!(f, "Unsupported bit-length"),
        }
    }
}

impl std::error::Error for EncodingError {}

impl From<FieldError> for EncodingError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::UnsupportedBitlength => EncodingError::UnsupportedBitlength,
            _ => EncodingError::OutOfRange,
        }
    }
}

/// Converts between a textual format and field elements of a fixed bit-length.
pub trait ValueAdapter {
    /// Registry name of the adapter, e.g. `"int"`.
    fn name(&self) -> &'static str;

    /// Bit-length the adapter was built for.
    fn bitlength(&self) -> usize;

    /// The prime values are validated against.
    fn modulus(&self) -> &BigUint;

    /// Decodes `text` into a value in `[0, p)`.
    fn to_value(&self, text: &str) -> Result<BigUint, EncodingError>;

    /// Encodes a value in `[0, p)`.
    fn from_value(&self, value: &BigUint) -> Result<String, EncodingError>;
}

/// Builds an adapter for a bit-length.
pub type AdapterCtor = fn(usize) -> Result<Box<dyn ValueAdapter>, EncodingError>;

/// Name to constructor table for value adapters.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<&'static str, AdapterCtor>,
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.adapters.keys()).finish()
    }
}

impl AdapterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in `"int"`, `"bip39"` and `"hex"` adapters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(int_adapter::NAME, IntAdapter::boxed);
        registry.register(bip39_adapter::NAME, Bip39Adapter::boxed);
        registry.register(hex_adapter::NAME, HexAdapter::boxed);
        registry
    }

    /// Registers `ctor` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, ctor: AdapterCtor) {
        self.adapters.insert(name, ctor);
    }

    /// Registered adapter names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.adapters.keys().copied()
    }

    /// Builds the adapter `name` for `bitlength`.
    ///
    /// # Returns
    /// * `Err(EncodingError::UnknownAdapter)` if `name` is not registered.
    /// * `Err(EncodingError::UnsupportedBitlength)` if no prime is tabulated.
    pub fn build(&self, name: &str, bitlength: usize) -> Result<Box<dyn ValueAdapter>, EncodingError> {
        let ctor = self.adapters.get(name).ok_or(EncodingError::UnknownAdapter)?;
        ctor(bitlength)
    }
}
