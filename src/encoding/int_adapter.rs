//! Decimal integer adapter.

use num_bigint::{BigInt, BigUint};

use super::{EncodingError, ValueAdapter};
use crate::core::{field::canonical_repr, primes::get_prime};

/// Registry name.
pub const NAME: &str = "int";

/// Values written as plain decimal integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntAdapter {
    bitlength: usize,
    p: BigUint,
}

impl IntAdapter {
    /// Creates a decimal adapter for `bitlength`.
    pub fn new(bitlength: usize) -> Result<Self, EncodingError> {
        Ok(Self {
            bitlength,
            p: get_prime(bitlength)?,
        })
    }

    /// Registry constructor.
    pub fn boxed(bitlength: usize) -> Result<Box<dyn ValueAdapter>, EncodingError> {
        Ok(Box::new(Self::new(bitlength)?))
    }

    fn validate(&self, value: &BigInt) -> Result<(), EncodingError> {
        if canonical_repr(value, &self.p) {
            Ok(())
        } else {
            log::debug!("Integer value not properly represented by bit-length {}", self.bitlength);
            Err(EncodingError::OutOfRange)
        }
    }
}

impl ValueAdapter for IntAdapter {
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
        let value: BigInt = text.trim().parse().map_err(|_| EncodingError::InvalidFormat)?;
        self.validate(&value)?;
        value.to_biguint().ok_or(EncodingError::OutOfRange)
    }

    fn from_value(&self, value: &BigUint) -> Result<String, EncodingError> {
        self.validate(&BigInt::from(value.clone()))?;
        Ok(value.to_str_radix(10))
    }
}
