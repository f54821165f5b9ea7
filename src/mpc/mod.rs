//! Secret Sharing.
//!
//! This module implements Shamir's Secret Sharing over a prime field, with
//! share trees: any share may itself be split again, so shares are addressed
//! by a path of indices.
//!
//! # Components
//! - `share`: Definition of a (possibly nested) share.
//! - `collection`: Common-prefix and grouping helpers over share sets.
//! - `spec`: Recursive pool specifications.
//! - `quorum`: Specification-driven pool generation.
//! - `reconstruct`: Level-by-level combination and secret recovery.
//! - `aggregate`: Minting new shares for an existing pool.
//!
//! # Errors
//! Every failure is reported synchronously as an `MpcError`; no partial pool
//! or share is ever returned.

pub mod aggregate;
pub mod collection;
pub mod quorum;
pub mod reconstruct;
pub mod share;
pub mod spec;

use core::fmt;

use num_bigint::BigUint;

use crate::core::FieldError;
use crate::entropy::{EntropyError, EntropySource, SeededStreams, SystemEntropy};

pub use aggregate::ExtendTarget;
pub use share::Share;
pub use spec::{PoolSpec, ShareEntry};

/// Errors for secret sharing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpcError {
    /// Threshold is zero.
    InvalidThreshold,
    /// A share multiplicity is zero.
    InvalidMultiplicity,
    /// A level produces fewer direct shares than its threshold.
    UnrecoverableSpec,
    /// A random index range smaller than the number of shares at a level.
    IndexRangeTooSmall,
    /// Modulus is smaller than 2.
    InvalidModulus,
    /// Index or path element congruent to 0 (reserved for the secret).
    ReservedIndex,
    /// Two shares of one sibling group share an index.
    DuplicateIndex,
    /// Not enough distinct non-zero field elements for the requested shares.
    TooManyShares,
    /// Random index range reaches past the field.
    IndexRangeExceedsField,
    /// A secret value outside `[0, p)`.
    NonCanonicalValue,
    /// Modular inverse missing (modulus not prime).
    NonInvertible,
    /// No prime tabulated for a bit-length.
    UnsupportedBitlength,
    /// No shares supplied.
    EmptyShareSet,
    /// Extension target path is empty.
    EmptyPath,
    /// No share found at the level being extended.
    NoPeers,
    /// An intermediate group had nothing to interpolate.
    EmptyGroup,
    /// A share does not lie below the level being combined.
    ForeignPath,
    /// Fewer shares than a level's threshold.
    InsufficientShares,
    /// A path the specification cannot address.
    UnmappedPath,
    /// Coordinate lists differ in length.
    LengthMismatch,
    /// Random number generator failure.
    RngFailure,
}

/// The three families of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid pool specification.
    Specification,
    /// Field or index violation.
    Domain,
    /// Structurally unusable input.
    MalformedInput,
}

impl MpcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MpcError::InvalidThreshold
            | MpcError::InvalidMultiplicity
            | MpcError::UnrecoverableSpec
            | MpcError::IndexRangeTooSmall => ErrorKind::Specification,
            MpcError::InvalidModulus
            | MpcError::ReservedIndex
            | MpcError::DuplicateIndex
            | MpcError::TooManyShares
            | MpcError::IndexRangeExceedsField
            | MpcError::NonCanonicalValue
            | MpcError::NonInvertible
            | MpcError::UnsupportedBitlength
            | MpcError::RngFailure => ErrorKind::Domain,
            MpcError::EmptyShareSet
            | MpcError::EmptyPath
            | MpcError::NoPeers
            | MpcError::EmptyGroup
            | MpcError::ForeignPath
            | MpcError::InsufficientShares
            | MpcError::UnmappedPath
            | MpcError::LengthMismatch => ErrorKind::MalformedInput,
        }
    }
}

impl fmt::Display for MpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpcError::InvalidThreshold => write!(f, "Threshold is nonpositive"),
            MpcError::InvalidMultiplicity => write!(f, "Nonpositive share multiplicity"),
            MpcError::UnrecoverableSpec => write!(f, "Secret not recoverable from specified shares"),
            MpcError::IndexRangeTooSmall => write!(f, "Random index range smaller than number of shares"),
            MpcError::InvalidModulus => write!(f, "Modulus must be at least 2"),
            MpcError::ReservedIndex => write!(f, "Index 0 is reserved for the secret"),
            MpcError::DuplicateIndex => write!(f, "Duplicate share index"),
            MpcError::TooManyShares => write!(f, "Number of shares too large for prime modulus"),
            MpcError::IndexRangeExceedsField => write!(f, "Random index range exceeds prime modulus"),
            MpcError::NonCanonicalValue => write!(f, "Value not in canonical range"),
            MpcError::NonInvertible => write!(f, "Modular inverse does not exist"),
            MpcError::UnsupportedBitlength => write!(f, "Unsupported bit-length"),
            MpcError::EmptyShareSet => write!(f, "Must specify at least one share"),
            MpcError::EmptyPath => write!(f, "Cannot extend pool with empty path"),
            MpcError::NoPeers => write!(f, "Specified prefix has no peers"),
            MpcError::EmptyGroup => write!(f, "Empty share group while combining"),
            MpcError::ForeignPath => write!(f, "Share does not belong to the combined level"),
            MpcError::InsufficientShares => write!(f, "Not enough shares to reach threshold"),
            MpcError::UnmappedPath => write!(f, "Share path not described by specification"),
            MpcError::LengthMismatch => write!(f, "Coordinate lists differ in length"),
            MpcError::RngFailure => write!(f, "Random number generator failure"),
        }
    }
}

impl std::error::Error for MpcError {}

impl From<FieldError> for MpcError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::DuplicatePoint => MpcError::DuplicateIndex,
            FieldError::NonInvertible => MpcError::NonInvertible,
            FieldError::LengthMismatch => MpcError::LengthMismatch,
            FieldError::InvalidModulus => MpcError::InvalidModulus,
            FieldError::UnsupportedBitlength => MpcError::UnsupportedBitlength,
        }
    }
}

impl From<EntropyError> for MpcError {
    fn from(_: EntropyError) -> Self {
        MpcError::RngFailure
    }
}

/// Trait for Secret Sharing Schemes.
///
/// Abstract interface to support future extensions (e.g., other fields or schemes).
pub trait SecretSharingScheme {
    type Share;
    type Spec;
    type Error;

    /// Splits a secret according to `spec`.
    fn split<R: EntropySource + ?Sized>(
        &self,
        secret: &Self::Share,
        spec: &Self::Spec,
        rng: &mut R,
    ) -> Result<Vec<Self::Share>, Self::Error>;

    /// Combines shares up to their common ancestor.
    fn reconstruct(&self, shares: &[Self::Share]) -> Result<Self::Share, Self::Error>;
}

/// Shamir's Secret Sharing over Z/pZ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shamir {
    modulus: BigUint,
}

impl Shamir {
    /// Creates an engine for the prime `modulus`. Primality is not checked.
    pub fn new(modulus: BigUint) -> Result<Self, MpcError> {
        if modulus < BigUint::from(2u8) {
            return Err(MpcError::InvalidModulus);
        }
        Ok(Self { modulus })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Generates a share tree for `secret`.
    ///
    /// # Arguments
    /// * `secret` - The value to split; its path prefixes every produced share.
    /// * `spec` - How to split, recursively.
    /// * `rand_indices` - Sample indices from `1..=rand_indices` instead of
    ///   using `1..=n`.
    /// * `seed` - Use deterministic streams. Testing only.
    pub fn generate_pool(
        &self,
        secret: &Share,
        spec: &PoolSpec,
        rand_indices: Option<u64>,
        seed: Option<u64>,
    ) -> Result<Vec<Share>, MpcError> {
        match seed {
            Some(seed) => self.generate_pool_with(secret, spec, rand_indices, &mut SeededStreams::new(seed)),
            None => self.generate_pool_with(secret, spec, rand_indices, &mut SystemEntropy::new()?),
        }
    }

    /// Generates a share tree drawing randomness from `entropy`.
    pub fn generate_pool_with<E: EntropySource + ?Sized>(
        &self,
        secret: &Share,
        spec: &PoolSpec,
        rand_indices: Option<u64>,
        entropy: &mut E,
    ) -> Result<Vec<Share>, MpcError> {
        quorum::generate_pool(&self.modulus, secret, spec, rand_indices, entropy)
    }

    /// Mints the share at `target` from existing shares of the pool.
    pub fn extend_pool(&self, target: impl Into<ExtendTarget>, shares: &[Share]) -> Result<Share, MpcError> {
        aggregate::extend_pool(&self.modulus, target.into(), shares)
    }

    /// Combines `shares` up to their common prefix.
    pub fn recover_secret(&self, shares: &[Share]) -> Result<Share, MpcError> {
        reconstruct::recover_secret(&self.modulus, shares)
    }

    /// Like `recover_secret`, but fails unless every level meets the threshold
    /// `spec` declares for it.
    pub fn recover_secret_checked(&self, shares: &[Share], spec: &PoolSpec) -> Result<Share, MpcError> {
        reconstruct::recover_secret_checked(&self.modulus, shares, spec)
    }
}

impl SecretSharingScheme for Shamir {
    type Share = Share;
    type Spec = PoolSpec;
    type Error = MpcError;

    fn split<R: EntropySource + ?Sized>(
        &self,
        secret: &Self::Share,
        spec: &Self::Spec,
        rng: &mut R,
    ) -> Result<Vec<Self::Share>, Self::Error> {
        self.generate_pool_with(secret, spec, None, rng)
    }

    fn reconstruct(&self, shares: &[Self::Share]) -> Result<Self::Share, Self::Error> {
        self.recover_secret(shares)
    }
}
