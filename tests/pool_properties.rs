//! Property tests for pool generation, extension and recovery.

use nested_shamir::{PoolSpec, Shamir, Share, ShareEntry};
use num_bigint::BigUint;
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const PRIMES: [u64; 4] = [11, 251, 65521, 2_147_483_647];

fn prime_and_secret() -> impl Strategy<Value = (u64, u64)> {
    prop::sample::select(PRIMES.to_vec()).prop_flat_map(|p| (Just(p), 0..p))
}

fn shuffled(mut shares: Vec<Share>, pick: u64) -> Vec<Share> {
    shares.shuffle(&mut ChaCha8Rng::seed_from_u64(pick));
    shares
}

proptest! {
    #[test]
    fn test_any_threshold_subset_recovers(
        (p, secret) in prime_and_secret(),
        k in 1usize..=5,
        extra in 0usize..=4,
        seed in any::<u64>(),
        pick in any::<u64>(),
    ) {
        let shamir = Shamir::new(BigUint::from(p)).unwrap();
        let secret = Share::secret(BigUint::from(secret));
        let shares = shamir
            .generate_pool(&secret, &PoolSpec::flat(k, k + extra), None, Some(seed))
            .unwrap();
        prop_assert_eq!(shares.len(), k + extra);

        let subset = shuffled(shares, pick);
        prop_assert_eq!(shamir.recover_secret(&subset[..k]).unwrap(), secret);
    }

    #[test]
    fn test_extended_share_joins_pool(
        (p, secret) in prime_and_secret(),
        k in 1usize..=4,
        extra in 0usize..=3,
        seed in any::<u64>(),
        pick in any::<u64>(),
    ) {
        let n = k + extra;
        let shamir = Shamir::new(BigUint::from(p)).unwrap();
        let secret = Share::secret(BigUint::from(secret));
        let mut shares = shamir
            .generate_pool(&secret, &PoolSpec::flat(k, n), None, Some(seed))
            .unwrap();

        let minted = shamir.extend_pool(n as u64 + 1, &shares[..k]).unwrap();
        prop_assert_eq!(minted.path(), &[n as u64 + 1][..]);
        shares.push(minted);

        let subset = shuffled(shares, pick);
        prop_assert_eq!(shamir.recover_secret(&subset[..k]).unwrap(), secret);
    }

    #[test]
    fn test_random_indices_recover(
        secret in 0u64..65521,
        k in 1usize..=4,
        extra in 0usize..=4,
        range in 10u64..1000,
        seed in any::<u64>(),
    ) {
        let shamir = Shamir::new(BigUint::from(65521u32)).unwrap();
        let secret = Share::secret(BigUint::from(secret));
        let shares = shamir
            .generate_pool(&secret, &PoolSpec::flat(k, k + extra), Some(range), Some(seed))
            .unwrap();
        prop_assert!(shares.iter().filter_map(Share::index).all(|x| (1..=range).contains(&x)));
        prop_assert_eq!(shamir.recover_secret(&shares[extra..]).unwrap(), secret);
    }

    #[test]
    fn test_nested_pool_recovers(
        secret in 0u64..65521,
        leaves in 1usize..=3,
        splits in 1usize..=2,
        inner_k in 1usize..=3,
        inner_extra in 0usize..=2,
        seed in any::<u64>(),
    ) {
        let shamir = Shamir::new(BigUint::from(65521u32)).unwrap();
        let secret = Share::secret(BigUint::from(secret));
        let inner = PoolSpec::flat(inner_k, inner_k + inner_extra);
        let spec = PoolSpec::nested(
            leaves + splits,
            vec![ShareEntry::Leaf(leaves), ShareEntry::Split(splits, inner)],
        );
        let shares = shamir.generate_pool(&secret, &spec, None, Some(seed)).unwrap();
        prop_assert_eq!(shares.len(), spec.total_shares());

        prop_assert_eq!(shamir.recover_secret(&shares).unwrap(), secret.clone());
        prop_assert_eq!(shamir.recover_secret_checked(&shares, &spec).unwrap(), secret.clone());

        // every leaf plus just enough shares of each split
        let per_split = inner_k + inner_extra;
        let mut minimal: Vec<Share> = shares[..leaves].to_vec();
        for s in 0..splits {
            let start = leaves + s * per_split;
            minimal.extend_from_slice(&shares[start..start + inner_k]);
        }
        prop_assert_eq!(shamir.recover_secret_checked(&minimal, &spec).unwrap(), secret);
    }
}

#[test]
fn test_two_level_pool() {
    // 3 direct shares at threshold 2; the third is split again 2-of-2
    let shamir = Shamir::new(nested_shamir::get_prime(64).unwrap()).unwrap();
    let secret = Share::secret(BigUint::from(0xC0FFEEu32));
    let spec = PoolSpec::nested(2, vec![ShareEntry::Leaf(2), ShareEntry::Split(1, PoolSpec::flat(2, 2))]);
    let shares = shamir.generate_pool(&secret, &spec, None, Some(2024)).unwrap();

    let paths: Vec<&[u64]> = shares.iter().map(Share::path).collect();
    let expected: [&[u64]; 4] = [&[1], &[2], &[3, 1], &[3, 2]];
    assert_eq!(paths, expected);

    // one direct share plus both sub-shares of the split share
    for direct in &shares[..2] {
        let subset = [direct.clone(), shares[2].clone(), shares[3].clone()];
        assert_eq!(shamir.recover_secret(&subset).unwrap(), secret);
        assert_eq!(shamir.recover_secret_checked(&subset, &spec).unwrap(), secret);
    }

    // a single sub-share cannot stand in for its parent
    let short = [shares[0].clone(), shares[2].clone()];
    assert_ne!(shamir.recover_secret(&short).unwrap(), secret);
    assert_eq!(
        shamir.recover_secret_checked(&short, &spec),
        Err(nested_shamir::MpcError::InsufficientShares)
    );

    // the rebuilt inner share is the one that was split
    let inner = shamir.recover_secret(&shares[2..]).unwrap();
    assert_eq!(inner.path(), &[3]);
    let root = shamir.recover_secret(&[shares[0].clone(), inner]).unwrap();
    assert_eq!(root, secret);
}
