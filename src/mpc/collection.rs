//! Utilities over collections of shares.

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::Zero;

use super::{share::Share, MpcError};

/// Whether `index` is congruent to 0 mod `p`, the secret's own x-coordinate.
pub(crate) fn is_reserved(index: u64, p: &BigUint) -> bool {
    (BigUint::from(index) % p).is_zero()
}

/// Rejects any share with a path element congruent to 0 mod `p`.
pub(crate) fn check_indices(shares: &[Share], p: &BigUint) -> Result<(), MpcError> {
    if shares.iter().flat_map(Share::path).any(|&n| is_reserved(n, p)) {
        return Err(MpcError::ReservedIndex);
    }
    Ok(())
}

/// Length of the longest common leading run of two paths.
fn common_prefix_len(a: &[u64], b: &[u64]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Returns the longest path shared by all `shares` as a leading subsequence.
///
/// # Returns
/// * `Ok(path)`, empty when two shares already differ in their first element.
/// * `Err(MpcError::EmptyShareSet)` for an empty collection.
pub fn common_prefix(shares: &[Share]) -> Result<Vec<u64>, MpcError> {
    let (first, rest) = shares.split_first().ok_or(MpcError::EmptyShareSet)?;
    let mut len = first.path().len();
    for share in rest {
        len = len.min(common_prefix_len(&first.path()[..len], share.path()));
    }
    Ok(first.path()[..len].to_vec())
}

/// Partitions shares by their parent path. Root secrets have no parent and are
/// left out.
pub fn group_by_parent(shares: &[Share]) -> BTreeMap<Vec<u64>, Vec<Share>> {
    let mut groups: BTreeMap<Vec<u64>, Vec<Share>> = BTreeMap::new();
    for share in shares {
        if let Some(parent) = share.parent_path() {
            groups.entry(parent.to_vec()).or_default().push(share.clone());
        }
    }
    groups
}

/// Partitions the shares lying strictly below `prefix` by the child of
/// `prefix` they descend from.
pub(crate) fn group_by_child(shares: &[Share], prefix: &[u64]) -> BTreeMap<u64, Vec<Share>> {
    let mut groups: BTreeMap<u64, Vec<Share>> = BTreeMap::new();
    for share in shares.iter().filter(|s| s.descends_from(prefix)) {
        let child = share.path()[prefix.len()];
        groups.entry(child).or_default().push(share.clone());
    }
    groups
}
