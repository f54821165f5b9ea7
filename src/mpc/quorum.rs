//! Pool generation.
//!
//! Each level draws `threshold - 1` random coefficients for a polynomial whose
//! constant term is the level's secret, evaluates it at the level's indices,
//! and either hands the resulting shares out or splits them again.
//!
//! # Validation
//! The whole specification tree and every capacity constraint are checked
//! before any randomness is consumed, so a failing call has no side effects on
//! a seeded source and never yields a partial pool.

use num_bigint::{BigInt, BigUint, RandBigInt};
use rand::seq::index;

use crate::core::field::eval_poly;
use crate::entropy::{EntropySource, COEFFICIENT_STREAM, INDEX_STREAM};
use crate::mpc::{share::Share, spec::PoolSpec, spec::ShareEntry, MpcError};

/// Generates the share tree for `secret` described by `spec`.
///
/// # Arguments
/// * `p` - The prime modulus.
/// * `secret` - The secret; its path prefixes every produced share.
/// * `spec` - The pool specification.
/// * `rand_indices` - If set, indices are sampled without replacement from
///   `1..=rand_indices` instead of being `1..=n`.
/// * `entropy` - Randomness source.
///
/// # Returns
/// * `Ok(Vec<Share>)` with the leaves in depth-first order.
/// * `Err(MpcError)` if the specification or parameters are invalid.
pub fn generate_pool<E: EntropySource + ?Sized>(
    p: &BigUint,
    secret: &Share,
    spec: &PoolSpec,
    rand_indices: Option<u64>,
    entropy: &mut E,
) -> Result<Vec<Share>, MpcError> {
    if p < &BigUint::from(2u8) {
        return Err(MpcError::InvalidModulus);
    }
    if secret.value() >= p {
        return Err(MpcError::NonCanonicalValue);
    }
    spec.validate()?;
    check_capacity(p, spec, rand_indices)?;

    log::debug!(
        "Generating pool at {:?}: threshold={}, direct={}, leaves={}, depth={}, source={}",
        secret.path(),
        spec.threshold(),
        spec.num_shares(),
        spec.total_shares(),
        spec.depth(),
        entropy.name()
    );

    let mut shares = Vec::with_capacity(spec.total_shares());
    split_level(p, secret, spec, rand_indices, entropy, &mut shares);
    Ok(shares)
}

/// Ensures every level has enough distinct non-zero indices available.
fn check_capacity(p: &BigUint, spec: &PoolSpec, rand_indices: Option<u64>) -> Result<(), MpcError> {
    let n = spec.num_shares();
    if &BigUint::from(n) >= p {
        return Err(MpcError::TooManyShares);
    }
    if let Some(range) = rand_indices {
        if &BigUint::from(range) >= p || usize::try_from(range).is_err() {
            return Err(MpcError::IndexRangeExceedsField);
        }
        if range < n as u64 {
            return Err(MpcError::IndexRangeTooSmall);
        }
    }
    for sub in spec.entries().iter().filter_map(ShareEntry::sub_spec) {
        check_capacity(p, sub, rand_indices)?;
    }
    Ok(())
}

/// Produces one level of the tree below `secret`, recursing into splits.
fn split_level<E: EntropySource + ?Sized>(
    p: &BigUint,
    secret: &Share,
    spec: &PoolSpec,
    rand_indices: Option<u64>,
    entropy: &mut E,
    out: &mut Vec<Share>,
) {
    let n = spec.num_shares();

    // f(x) = secret + a1*x + ... + a(k-1)*x^(k-1)
    let mut coeffs = Vec::with_capacity(spec.threshold());
    coeffs.push(secret.value().clone());
    let coeff_rng = entropy.stream(COEFFICIENT_STREAM);
    for _ in 1..spec.threshold() {
        coeffs.push(coeff_rng.gen_biguint_below(p));
    }

    let indices: Vec<u64> = match rand_indices {
        None => (1..=n as u64).collect(),
        Some(range) => {
            let index_rng = entropy.stream(INDEX_STREAM);
            // capacity checks guarantee range fits in usize and range >= n
            index::sample(index_rng, range as usize, n)
                .into_iter()
                .map(|i| i as u64 + 1)
                .collect()
        }
    };

    let mut children = indices
        .into_iter()
        .map(|x| secret.child(x, eval_poly(&coeffs, &BigInt::from(x), p)))
        .collect::<Vec<_>>()
        .into_iter();

    for entry in spec.entries() {
        match entry {
            ShareEntry::Leaf(count) => out.extend(children.by_ref().take(*count)),
            ShareEntry::Split(count, sub) => {
                for child in children.by_ref().take(*count).collect::<Vec<_>>() {
                    split_level(p, &child, sub, rand_indices, entropy, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::SeededStreams;
    use rand::rngs::mock::StepRng;
    use rand_core::RngCore;

    /// Mock entropy source for deterministic testing
    struct MockEntropy {
        rng: StepRng,
    }

    impl MockEntropy {
        fn new() -> Self {
            Self { rng: StepRng::new(0x10, 0x1234_5678_9abc) }
        }
    }

    impl EntropySource for MockEntropy {
        fn name(&self) -> &'static str {
            "Mock"
        }

        fn stream(&mut self, _index: usize) -> &mut dyn RngCore {
            &mut self.rng
        }
    }

    fn p(v: u64) -> BigUint {
        BigUint::from(v)
    }

    fn secret(v: u64) -> Share {
        Share::secret(BigUint::from(v))
    }

    #[test]
    fn test_generate_flat_basic() {
        let mut rng = MockEntropy::new();
        let shares = generate_pool(&p(257), &secret(42), &PoolSpec::flat(2, 3), None, &mut rng).expect("Split failed");

        assert_eq!(shares.len(), 3);
        for (i, share) in shares.iter().enumerate() {
            assert_eq!(share.path(), &[(i + 1) as u64]);
            assert!(share.value() < &p(257));
        }
    }

    #[test]
    fn test_threshold_one_copies_secret() {
        let mut rng = MockEntropy::new();
        let shares = generate_pool(&p(11), &secret(7), &PoolSpec::flat(1, 4), None, &mut rng).unwrap();
        assert!(shares.iter().all(|s| s.value() == &p(7)));
    }

    #[test]
    fn test_nested_layout() {
        let mut rng = MockEntropy::new();
        let spec = PoolSpec::nested(
            2,
            vec![
                ShareEntry::Leaf(1),
                ShareEntry::Split(2, PoolSpec::flat(2, 3)),
                ShareEntry::Leaf(1),
            ],
        );
        let shares = generate_pool(&p(101), &secret(5), &spec, None, &mut rng).unwrap();
        let paths: Vec<&[u64]> = shares.iter().map(|s| s.path()).collect();
        let expected: [&[u64]; 8] = [&[1], &[2, 1], &[2, 2], &[2, 3], &[3, 1], &[3, 2], &[3, 3], &[4]];
        assert_eq!(paths, expected);
        assert_eq!(shares.len(), spec.total_shares());
    }

    #[test]
    fn test_secret_path_prefixes_shares() {
        let mut rng = MockEntropy::new();
        let sub_secret = Share::new(p(3), vec![9, 2]).unwrap();
        let shares = generate_pool(&p(11), &sub_secret, &PoolSpec::flat(2, 2), None, &mut rng).unwrap();
        assert_eq!(shares[0].path(), &[9, 2, 1]);
        assert_eq!(shares[1].path(), &[9, 2, 2]);
    }

    #[test]
    fn test_random_indices() {
        let mut rng = SeededStreams::new(11);
        let shares = generate_pool(&p(251), &secret(1), &PoolSpec::flat(3, 6), Some(50), &mut rng).unwrap();
        let mut indices: Vec<u64> = shares.iter().filter_map(Share::index).collect();
        assert!(indices.iter().all(|&x| (1..=50).contains(&x)));
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 6);
    }

    #[test]
    fn test_invalid_params() {
        let mut rng = MockEntropy::new();

        // threshold 0
        assert_eq!(
            generate_pool(&p(11), &secret(0), &PoolSpec::flat(0, 1), None, &mut rng),
            Err(MpcError::InvalidThreshold)
        );
        // n < k
        assert_eq!(
            generate_pool(&p(11), &secret(0), &PoolSpec::flat(3, 2), None, &mut rng),
            Err(MpcError::UnrecoverableSpec)
        );
        // n == 0
        assert_eq!(
            generate_pool(&p(11), &secret(0), &PoolSpec::flat(1, 0), None, &mut rng),
            Err(MpcError::InvalidMultiplicity)
        );
        // p too small for number of shares
        assert_eq!(
            generate_pool(&p(3), &secret(0), &PoolSpec::flat(3, 5), None, &mut rng),
            Err(MpcError::TooManyShares)
        );
        assert_eq!(
            generate_pool(&p(5), &secret(0), &PoolSpec::flat(3, 5), None, &mut rng),
            Err(MpcError::TooManyShares)
        );
        // secret out of range
        assert_eq!(
            generate_pool(&p(11), &secret(11), &PoolSpec::flat(1, 1), None, &mut rng),
            Err(MpcError::NonCanonicalValue)
        );
        // random index range
        assert_eq!(
            generate_pool(&p(11), &secret(0), &PoolSpec::flat(2, 4), Some(3), &mut rng),
            Err(MpcError::IndexRangeTooSmall)
        );
        assert_eq!(
            generate_pool(&p(11), &secret(0), &PoolSpec::flat(2, 4), Some(11), &mut rng),
            Err(MpcError::IndexRangeExceedsField)
        );
    }

    #[test]
    fn test_nested_capacity_checked_before_randomness() {
        let spec = PoolSpec::nested(1, vec![ShareEntry::Leaf(2), ShareEntry::Split(1, PoolSpec::flat(2, 12))]);
        let mut rng = SeededStreams::new(5);
        assert_eq!(
            generate_pool(&p(11), &secret(3), &spec, None, &mut rng),
            Err(MpcError::TooManyShares)
        );
        assert!(rng.is_empty());
    }
}
