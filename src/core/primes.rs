//! Prime moduli for fixed bit-lengths.
//!
//! Each entry is the largest prime below `2^bits`, stored as the offset `k`
//! with `p = 2^bits - k` (OEIS A013603). The engine itself never consults this
//! table; it is how host code picks a modulus for a given secret size.

use num_bigint::BigUint;
use num_traits::One;

use super::FieldError;

const PRIME_OFFSETS: &[(usize, u32)] = &[
    (2, 1),
    (3, 1),
    (4, 3),
    (5, 1),
    (6, 3),
    (7, 1),
    (8, 5),
    (16, 15),
    (32, 5),
    (64, 59),
    (128, 159),
    (160, 47),
    (192, 237),
    (224, 63),
    (256, 189),
];

fn offset(bitlength: usize) -> Result<u32, FieldError> {
    PRIME_OFFSETS
        .iter()
        .find(|(bits, _)| *bits == bitlength)
        .map(|(_, k)| *k)
        .ok_or(FieldError::UnsupportedBitlength)
}

/// Bit-lengths for which a prime is tabulated.
pub fn valid_bitlengths() -> impl Iterator<Item = usize> {
    PRIME_OFFSETS.iter().map(|(bits, _)| *bits)
}

/// Returns a prime able to represent (almost) every value of `bitlength` bits.
pub fn get_prime(bitlength: usize) -> Result<BigUint, FieldError> {
    let k = offset(bitlength)?;
    Ok((BigUint::one() << bitlength) - BigUint::from(k))
}

/// Concise rendering of the prime for `bitlength`, e.g. `"2^256 - 189"`.
pub fn format_prime(bitlength: usize) -> Result<String, FieldError> {
    let k = offset(bitlength)?;
    Ok(format!("2^{} - {}", bitlength, k))
}
