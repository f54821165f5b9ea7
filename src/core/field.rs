//! Arithmetic over Z/pZ.
//!
//! All values are arbitrary-precision integers. Results are always returned in
//! canonical form, i.e. in `[0, p)`. Evaluation points are signed so callers may
//! pass negative or out-of-range x-coordinates; they are reduced before use.
//!
//! # Caveat
//! Interpolating through fewer points than the degree of the hidden polynomial
//! plus one still yields a value (the lowest-degree curve through the points).
//! Nothing here can tell that apart from the real secret.

use std::collections::BTreeSet;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use super::FieldError;

/// Returns whether `value` is in canonical representation for modulus `p`.
pub fn canonical_repr(value: &BigInt, p: &BigUint) -> bool {
    !value.is_negative() && value.magnitude() < p
}

/// Reduces a signed integer into `[0, p)`.
pub fn reduce(x: &BigInt, p: &BigUint) -> BigUint {
    let modulus = BigInt::from(p.clone());
    let mut r = x % &modulus;
    if r.is_negative() {
        r += &modulus;
    }
    r.magnitude().clone()
}

/// `(a - b) mod p` for canonical `a`, `b`.
#[inline]
fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a + p - b) % p
}

/// Evaluates a polynomial at a given point x using Horner's method.
///
/// f(x) = c[0] + c[1]*x + ... + c[k]*x^k  (mod p)
///
/// # Arguments
/// * `coeffs` - Coefficients [c0, c1, ..., ck]
/// * `x` - The point to evaluate at (any integer)
/// * `p` - The modulus
///
/// # Returns
/// * The value f(x) in `[0, p)`. An empty coefficient list evaluates to 0.
pub fn eval_poly(coeffs: &[BigUint], x: &BigInt, p: &BigUint) -> BigUint {
    let x = reduce(x, p);
    let mut accum = BigUint::zero();
    for coeff in coeffs.iter().rev() {
        accum = (accum * &x + coeff) % p;
    }
    accum
}

/// Evaluates at `x` the unique polynomial of degree `< xs.len()` through the
/// points `(xs[i], ys[i])`, using Lagrange's formula over Z/pZ.
///
/// # Returns
/// * `Ok(value)` in `[0, p)`.
/// * `Err(FieldError::DuplicatePoint)` if two x-coordinates agree mod p.
/// * `Err(FieldError::NonInvertible)` if `p` is composite and a difference of
///   x-coordinates shares a factor with it.
pub fn interpolate(
    x: &BigInt,
    xs: &[BigInt],
    ys: &[BigUint],
    p: &BigUint,
) -> Result<BigUint, FieldError> {
    if p < &BigUint::from(2u8) {
        return Err(FieldError::InvalidModulus);
    }
    if xs.len() != ys.len() {
        return Err(FieldError::LengthMismatch);
    }

    let xs: Vec<BigUint> = xs.iter().map(|xi| reduce(xi, p)).collect();
    let mut seen = BTreeSet::new();
    for xi in &xs {
        if !seen.insert(xi) {
            return Err(FieldError::DuplicatePoint);
        }
    }

    let x = reduce(x, p);
    let mut sum = BigUint::zero();
    for (i, (xi, yi)) in xs.iter().zip(ys).enumerate() {
        let mut numerator = BigUint::one();
        let mut denominator = BigUint::one();
        for (j, xj) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = numerator * sub_mod(&x, xj, p) % p;
            denominator = denominator * sub_mod(xi, xj, p) % p;
        }
        let inverse = denominator.modinv(p).ok_or(FieldError::NonInvertible)?;
        sum = (sum + (yi % p) * numerator % p * inverse) % p;
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    fn ubig(v: u64) -> BigUint {
        BigUint::from(v)
    }

    // f(x) = 2 + 5x + 3x^2 (mod 11)
    const F_VALUES: [u64; 10] = [2, 10, 2, 0, 4, 3, 8, 8, 3, 4];

    #[test]
    fn test_eval_poly() {
        let p = ubig(11);
        let coeffs = vec![ubig(2), ubig(5), ubig(3)];
        assert_eq!(eval_poly(&coeffs, &big(0), &p), ubig(2));
        assert_eq!(eval_poly(&coeffs, &big(11), &p), ubig(2));
        assert_eq!(eval_poly(&coeffs, &big(1), &p), ubig(10));
        assert_eq!(eval_poly(&coeffs, &big(5), &p), ubig(3));
        assert_eq!(eval_poly(&coeffs, &big(-10), &p), ubig(10));
    }

    #[test]
    fn test_eval_poly_empty() {
        assert_eq!(eval_poly(&[], &big(7), &ubig(11)), BigUint::zero());
    }

    #[test]
    fn test_eval_poly_non_canonical_coeffs() {
        // 13 + 0x == 2 mod 11
        assert_eq!(eval_poly(&[ubig(13)], &big(4), &ubig(11)), ubig(2));
    }

    #[test]
    fn test_modinv() {
        let p = ubig(11);
        assert_eq!(ubig(1).modinv(&p), Some(ubig(1)));
        assert_eq!(ubig(2).modinv(&p), Some(ubig(6)));
        assert_eq!(ubig(3).modinv(&p), Some(ubig(4)));
        assert_eq!(ubig(4).modinv(&p), Some(ubig(3)));
        assert_eq!(ubig(6).modinv(&p), Some(ubig(2)));
    }

    #[test]
    fn test_lagrange_interpolation() {
        let p = ubig(11);
        for idx in [[1usize, 4, 6], [4, 5, 6], [7, 1, 2], [9, 8, 0]] {
            let xs: Vec<BigInt> = idx.iter().map(|&i| big(i as i64)).collect();
            let ys: Vec<BigUint> = idx.iter().map(|&i| ubig(F_VALUES[i])).collect();
            for (x, &y) in F_VALUES.iter().enumerate() {
                assert_eq!(interpolate(&big(x as i64), &xs, &ys, &p), Ok(ubig(y)));
            }
        }
    }

    #[test]
    fn test_interpolate_duplicate_points() {
        let p = ubig(11);
        let xs = vec![big(1), big(1), big(3)];
        let ys = vec![ubig(10), ubig(10), ubig(0)];
        assert_eq!(interpolate(&big(0), &xs, &ys, &p), Err(FieldError::DuplicatePoint));

        // Differing y-values, and x-coordinates equal only mod p.
        let xs = vec![big(2), big(13)];
        let ys = vec![ubig(1), ubig(5)];
        assert_eq!(interpolate(&big(0), &xs, &ys, &p), Err(FieldError::DuplicatePoint));
    }

    #[test]
    fn test_interpolate_composite_modulus() {
        // 3 - 1 = 2 shares a factor with 12.
        let xs = vec![big(1), big(3)];
        let ys = vec![ubig(1), ubig(2)];
        assert_eq!(interpolate(&big(0), &xs, &ys, &ubig(12)), Err(FieldError::NonInvertible));
    }

    #[test]
    fn test_interpolate_input_errors() {
        let xs = vec![big(1), big(2)];
        assert_eq!(
            interpolate(&big(0), &xs, &[ubig(1)], &ubig(11)),
            Err(FieldError::LengthMismatch)
        );
        assert_eq!(
            interpolate(&big(0), &xs, &[ubig(0), ubig(0)], &ubig(1)),
            Err(FieldError::InvalidModulus)
        );
    }

    #[test]
    fn test_interpolate_underdetermined() {
        // Two points of a quadratic yield the line through them, not f(0).
        let p = ubig(11);
        let xs = vec![big(1), big(2)];
        let ys = vec![ubig(F_VALUES[1]), ubig(F_VALUES[2])];
        let value = interpolate(&big(0), &xs, &ys, &p).unwrap();
        assert_ne!(value, ubig(F_VALUES[0]));
    }

    #[test]
    fn test_canonical_repr() {
        let p = ubig(11);
        assert!(canonical_repr(&big(0), &p));
        assert!(canonical_repr(&big(10), &p));
        assert!(!canonical_repr(&big(11), &p));
        assert!(!canonical_repr(&big(-1), &p));
    }

    #[test]
    fn test_reduce_negative() {
        assert_eq!(reduce(&big(-1), &ubig(11)), ubig(10));
        assert_eq!(reduce(&big(-22), &ubig(11)), ubig(0));
    }
}
