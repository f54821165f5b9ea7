//! Prime-field primitives.
//!
//! - `field`: polynomial evaluation and Lagrange interpolation modulo a prime.
//! - `primes`: the bit-length to prime modulus lookup table.

pub mod field;
pub mod primes;

use core::fmt;

/// Errors raised by the field layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Two interpolation points share the same x-coordinate (mod p).
    DuplicatePoint,
    /// A difference of x-coordinates has no inverse (modulus not prime).
    NonInvertible,
    /// The x and y coordinate slices differ in length.
    LengthMismatch,
    /// The modulus is smaller than 2.
    InvalidModulus,
    /// No prime is tabulated for the requested bit-length.
    UnsupportedBitlength,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::DuplicatePoint => write!(f, "Duplicate x-coordinate in interpolation points"),
            FieldError::NonInvertible => write!(f, "Modular inverse does not exist"),
            FieldError::LengthMismatch => write!(f, "Coordinate lists differ in length"),
            FieldError::InvalidModulus => write!(f, "Modulus must be at least 2"),
            FieldError::UnsupportedBitlength => write!(f, "Unsupported bit-length"),
        }
    }
}

impl std::error::Error for FieldError {}
