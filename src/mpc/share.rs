//! Share Definition.
//!
//! A share is a field element plus the path locating it in a share tree.
//! - `path` (identifier): empty for a root secret. Otherwise the last element is
//!   the share's x-coordinate at its level and the preceding elements are the
//!   path of its parent.
//! - `value`: the evaluation of the parent's polynomial at that x-coordinate.
//!
//! # Security
//! - `Debug` implementation redacts the actual value.

use core::fmt;

use num_bigint::BigUint;

use super::MpcError;

/// A secret, or a share of one, at some position of a share tree.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Share {
    /// Highly sensitive information.
    value: BigUint,

    /// Public information (where the share sits in the tree).
    path: Vec<u64>,
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("path", &self.path)
            .field("bits", &self.value.bits())
            .field("value", &"***SENSITIVE***")
            .finish()
    }
}

impl Share {
    /// Creates a new share with validation.
    ///
    /// # Arguments
    /// * `value` - The field element.
    /// * `path` - The tree path; every element must be non-zero.
    ///
    /// # Returns
    /// * `Ok(Share)` if valid.
    /// * `Err(MpcError::ReservedIndex)` if a path element is 0.
    pub fn new(value: BigUint, path: Vec<u64>) -> Result<Self, MpcError> {
        if path.iter().any(|&index| index == 0) {
            return Err(MpcError::ReservedIndex);
        }
        Ok(Self { value, path })
    }

    /// Creates a root secret (empty path).
    pub fn secret(value: BigUint) -> Self {
        Self {
            value,
            path: Vec::new(),
        }
    }

    /// Builds a share whose path is already known to be valid.
    pub(crate) fn from_parts(value: BigUint, path: Vec<u64>) -> Self {
        debug_assert!(path.iter().all(|&index| index != 0));
        Self { value, path }
    }

    /// Builds the child of this share at `index`.
    pub(crate) fn child(&self, index: u64, value: BigUint) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(index);
        Self::from_parts(value, path)
    }

    /// Returns the field element.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Returns the tree path.
    pub fn path(&self) -> &[u64] {
        &self.path
    }

    /// The x-coordinate at this share's level, `None` for a root secret.
    pub fn index(&self) -> Option<u64> {
        self.path.last().copied()
    }

    /// Path of the share this one was split from, `None` for a root secret.
    pub fn parent_path(&self) -> Option<&[u64]> {
        self.path.split_last().map(|(_, parent)| parent)
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether this share sits strictly below `prefix`.
    pub fn descends_from(&self, prefix: &[u64]) -> bool {
        self.path.len() > prefix.len() && self.path.starts_with(prefix)
    }
}
