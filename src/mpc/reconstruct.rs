//! Secret reconstruction from shares.
//!
//! Shares are folded bottom-up: every sibling group is interpolated at x=0 to
//! obtain its parent's value, which then joins the parent's own sibling group,
//! until the target level is reached.
//!
//! # Validation
//! - Paths outside the target level are rejected.
//! - Path elements congruent to 0 mod p are rejected.
//! - Two different values for the same path are rejected; exact duplicates are
//!   collapsed.
//! - A share supplied directly at some path supersedes its supplied
//!   descendants.
//! - The share count per level is only checked by `recover_secret_checked`.

use std::collections::{BTreeMap, BTreeSet};

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::core::field::interpolate;
use crate::mpc::{
    collection::{check_indices, common_prefix},
    share::Share,
    spec::PoolSpec,
    MpcError,
};

/// Sibling x-coordinates and values, keyed by index.
type Group = BTreeMap<u64, BigUint>;

/// Reconstructs the value at the shares' common prefix.
///
/// # Returns
/// * `Ok(Share)` - The root secret, or an inner node if the shares do not
///   reach back to the root.
/// * `Err(MpcError)` - If inputs are invalid (empty set, index collisions, etc.).
pub fn recover_secret(p: &BigUint, shares: &[Share]) -> Result<Share, MpcError> {
    let target = common_prefix(shares)?;
    log::debug!("Recovering value at {:?} from {} shares", target, shares.len());
    combine_to(p, shares, &target, None)
}

/// Reconstructs the value at the shares' common prefix, requiring each level
/// to carry at least the threshold `spec` declares for it.
///
/// `spec` describes the node at the common prefix; nested levels are located
/// assuming sequential indices.
pub fn recover_secret_checked(p: &BigUint, shares: &[Share], spec: &PoolSpec) -> Result<Share, MpcError> {
    spec.validate()?;
    let target = common_prefix(shares)?;
    log::debug!("Recovering value at {:?} from {} shares (checked)", target, shares.len());
    combine_to(p, shares, &target, Some(spec))
}

/// Combines `shares` into the single value at `target`.
///
/// Every share must lie at or below `target`.
pub(crate) fn combine_to(
    p: &BigUint,
    shares: &[Share],
    target: &[u64],
    spec: Option<&PoolSpec>,
) -> Result<Share, MpcError> {
    if p < &BigUint::from(2u8) {
        return Err(MpcError::InvalidModulus);
    }
    if shares.is_empty() {
        return Err(MpcError::EmptyShareSet);
    }
    check_indices(shares, p)?;
    if let Some(direct) = shares.iter().find(|s| s.path() == target) {
        return Ok(direct.clone());
    }
    if shares.iter().any(|s| !s.descends_from(target)) {
        return Err(MpcError::ForeignPath);
    }

    let supplied: BTreeSet<&[u64]> = shares.iter().map(Share::path).collect();
    let mut pool: BTreeMap<Vec<u64>, Group> = BTreeMap::new();

    for share in shares {
        let path = share.path();
        let covered = (target.len() + 1..path.len()).any(|i| supplied.contains(&path[..i]));
        if covered {
            continue;
        }
        for i in target.len()..path.len() {
            pool.entry(path[..i].to_vec()).or_default();
        }
        let (index, parent) = match path.split_last() {
            Some((index, parent)) => (*index, parent),
            None => return Err(MpcError::ForeignPath),
        };
        let group = pool.get_mut(parent).ok_or(MpcError::EmptyGroup)?;
        insert_point(group, index, share.value().clone())?;
    }

    // deepest levels first
    let mut prefixes: Vec<Vec<u64>> = pool.keys().cloned().collect();
    prefixes.sort_by(|a, b| b.len().cmp(&a.len()));

    for prefix in prefixes {
        let group = pool.remove(&prefix).unwrap_or_default();
        if group.is_empty() {
            return Err(MpcError::EmptyGroup);
        }
        if let Some(spec) = spec {
            let node = spec
                .node_at(&prefix[target.len()..])
                .ok_or(MpcError::UnmappedPath)?;
            if group.len() < node.threshold() {
                log::debug!(
                    "Level {:?} has {} of {} required shares",
                    prefix,
                    group.len(),
                    node.threshold()
                );
                return Err(MpcError::InsufficientShares);
            }
        }

        let value = interpolate_at_zero(p, &group)?;
        if prefix.as_slice() == target {
            return Ok(Share::from_parts(value, prefix));
        }

        let (index, parent) = match prefix.split_last() {
            Some((index, parent)) => (*index, parent),
            None => return Err(MpcError::EmptyGroup),
        };
        let parent_group = pool.get_mut(parent).ok_or(MpcError::EmptyGroup)?;
        insert_point(parent_group, index, value)?;
    }

    Err(MpcError::EmptyGroup)
}

/// Adds a sibling to a group, collapsing exact duplicates.
fn insert_point(group: &mut Group, index: u64, value: BigUint) -> Result<(), MpcError> {
    match group.get(&index) {
        Some(existing) if *existing != value => Err(MpcError::DuplicateIndex),
        Some(_) => Ok(()),
        None => {
            group.insert(index, value);
            Ok(())
        }
    }
}

fn interpolate_at_zero(p: &BigUint, group: &Group) -> Result<BigUint, MpcError> {
    let xs: Vec<BigInt> = group.keys().map(|&x| BigInt::from(x)).collect();
    let ys: Vec<BigUint> = group.values().cloned().collect();
    Ok(interpolate(&BigInt::zero(), &xs, &ys, p)?)
}
