//! Pool extension.
//!
//! Mints a new share for an existing pool without regenerating it: the shares
//! below each existing child of the target's parent are folded into one peer
//! value, and the peers' polynomial is evaluated at the new index.
//!
//! At least as many peers as the level's threshold are needed for the new
//! share to lie on the original polynomial; this is not checked.

use num_bigint::{BigInt, BigUint};

use crate::core::field::interpolate;
use crate::mpc::{
    collection::{group_by_child, is_reserved},
    reconstruct::combine_to,
    share::Share,
    MpcError,
};

/// Where to mint the new share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendTarget {
    /// A new direct share of the root secret.
    Index(u64),
    /// A full path: parent path followed by the new index.
    Path(Vec<u64>),
}

impl From<u64> for ExtendTarget {
    fn from(index: u64) -> Self {
        ExtendTarget::Index(index)
    }
}

impl From<Vec<u64>> for ExtendTarget {
    fn from(path: Vec<u64>) -> Self {
        ExtendTarget::Path(path)
    }
}

impl From<&[u64]> for ExtendTarget {
    fn from(path: &[u64]) -> Self {
        ExtendTarget::Path(path.to_vec())
    }
}

impl ExtendTarget {
    /// Splits the target into parent path and new index.
    fn split(self) -> Result<(Vec<u64>, u64), MpcError> {
        match self {
            ExtendTarget::Index(index) => Ok((Vec::new(), index)),
            ExtendTarget::Path(mut path) => {
                let index = path.pop().ok_or(MpcError::EmptyPath)?;
                Ok((path, index))
            }
        }
    }
}

/// Extends the pool containing `shares` with the share at `target`.
///
/// # Arguments
/// * `p` - The prime modulus.
/// * `target` - Bare index (new sibling of the top-level shares) or full path.
/// * `shares` - Existing shares; only those below the target's parent are used.
///
/// # Returns
/// * `Ok(Share)` - The new share at `parent + (index,)`.
/// * `Err(MpcError::ReservedIndex)` - The index, a parent element, or an
///   element of a peer's path is 0 mod p.
/// * `Err(MpcError::NoPeers)` - No share lies below the target's parent.
pub fn extend_pool(p: &BigUint, target: ExtendTarget, shares: &[Share]) -> Result<Share, MpcError> {
    if p < &BigUint::from(2u8) {
        return Err(MpcError::InvalidModulus);
    }
    let (prefix, index) = target.split()?;

    if is_reserved(index, p) || prefix.iter().any(|&n| is_reserved(n, p)) {
        return Err(MpcError::ReservedIndex);
    }
    if shares.is_empty() {
        return Err(MpcError::EmptyShareSet);
    }

    let groups = group_by_child(shares, &prefix);
    if groups.is_empty() {
        return Err(MpcError::NoPeers);
    }
    log::debug!(
        "Extending level {:?} at index {} from {} peers",
        prefix,
        index,
        groups.len()
    );

    let mut xs = Vec::with_capacity(groups.len());
    let mut ys = Vec::with_capacity(groups.len());
    for (child, group) in groups {
        let mut head = prefix.clone();
        head.push(child);
        let peer = combine_to(p, &group, &head, None)?;
        xs.push(BigInt::from(child));
        ys.push(peer.value().clone());
    }

    let value = interpolate(&BigInt::from(index), &xs, &ys, p)?;
    let mut path = prefix;
    path.push(index);
    Ok(Share::from_parts(value, path))
}
