//! Nested pool specifications.
//!
//! A `PoolSpec` describes one level of a share tree: the threshold needed to
//! rebuild the level's secret, and an ordered list of entries producing its
//! direct shares. An entry either hands its shares out as leaves, or splits
//! each of them again according to a sub-specification.
//!
//! Entries consume the level's x-coordinates in order, so with sequential
//! indices the share at index `i` belongs to the entry covering position `i`.

use super::MpcError;

/// One entry of a pool specification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShareEntry {
    /// `count` shares handed out as leaves.
    Leaf(usize),
    /// `count` shares, each split again according to the nested spec.
    Split(usize, PoolSpec),
}

impl ShareEntry {
    /// Number of direct shares this entry produces.
    pub fn count(&self) -> usize {
        match self {
            ShareEntry::Leaf(count) | ShareEntry::Split(count, _) => *count,
        }
    }

    pub fn sub_spec(&self) -> Option<&PoolSpec> {
        match self {
            ShareEntry::Leaf(_) => None,
            ShareEntry::Split(_, spec) => Some(spec),
        }
    }
}

/// Recursive description of how a secret is split.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSpec {
    threshold: usize,
    entries: Vec<ShareEntry>,
}

impl PoolSpec {
    /// A single level of `count` leaf shares.
    pub fn flat(threshold: usize, count: usize) -> Self {
        Self {
            threshold,
            entries: vec![ShareEntry::Leaf(count)],
        }
    }

    /// A level mixing leaf counts and nested sub-specifications.
    pub fn nested(threshold: usize, entries: Vec<ShareEntry>) -> Self {
        Self { threshold, entries }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn entries(&self) -> &[ShareEntry] {
        &self.entries
    }

    /// Number of direct shares produced at this level.
    pub fn num_shares(&self) -> usize {
        self.entries.iter().map(ShareEntry::count).sum()
    }

    /// Number of leaf shares handed out by the whole tree.
    pub fn total_shares(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                ShareEntry::Leaf(count) => *count,
                ShareEntry::Split(count, spec) => count * spec.total_shares(),
            })
            .sum()
    }

    /// Number of random coefficients drawn when generating the whole tree.
    pub fn num_coeffs(&self) -> usize {
        let nested: usize = self
            .entries
            .iter()
            .map(|entry| match entry {
                ShareEntry::Leaf(_) => 0,
                ShareEntry::Split(count, spec) => count * spec.num_coeffs(),
            })
            .sum();
        self.threshold.saturating_sub(1) + nested
    }

    /// Number of levels below the secret.
    pub fn depth(&self) -> usize {
        1 + self
            .entries
            .iter()
            .filter_map(ShareEntry::sub_spec)
            .map(PoolSpec::depth)
            .max()
            .unwrap_or(0)
    }

    /// Checks recursively that every level is well formed and that its secret
    /// can be rebuilt from its full set of direct shares.
    ///
    /// # Returns
    /// * `Err(MpcError::InvalidThreshold)` for a zero threshold.
    /// * `Err(MpcError::InvalidMultiplicity)` for an entry count of zero.
    /// * `Err(MpcError::UnrecoverableSpec)` if fewer direct shares than the
    ///   threshold are produced.
    pub fn validate(&self) -> Result<(), MpcError> {
        if self.threshold < 1 {
            return Err(MpcError::InvalidThreshold);
        }
        if self.entries.iter().any(|entry| entry.count() < 1) {
            return Err(MpcError::InvalidMultiplicity);
        }
        if self.num_shares() < self.threshold {
            return Err(MpcError::UnrecoverableSpec);
        }
        for spec in self.entries.iter().filter_map(ShareEntry::sub_spec) {
            spec.validate()?;
        }
        Ok(())
    }

    /// The specification governing the direct share at 1-based `position`, if
    /// that share is split further.
    pub fn child_spec(&self, position: u64) -> Option<&PoolSpec> {
        let mut end = 0u64;
        for entry in &self.entries {
            end += entry.count() as u64;
            if position >= 1 && position <= end {
                return entry.sub_spec();
            }
        }
        None
    }

    /// The specification of the node reached by following `relative_path`
    /// from this level, assuming sequential indices.
    pub fn node_at(&self, relative_path: &[u64]) -> Option<&PoolSpec> {
        relative_path
            .iter()
            .try_fold(self, |node, &position| node.child_spec(position))
    }
}
