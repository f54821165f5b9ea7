//! Randomness sources for pool generation.
//!
//! Generation draws from numbered streams: stream 0 feeds polynomial
//! coefficients, stream 1 feeds index sampling. A source decides how streams
//! map onto generators.
//!
//! # Design
//! - **System**: every stream is the operating system CSPRNG.
//! - **Seeded**: each stream is its own ChaCha20 stream derived from a single
//!   seed, created on first use. Recursive generation can interleave draws from
//!   different streams without perturbing either sequence, so seeded pools are
//!   reproducible. Seeded sources are for diagnostics only.

pub mod seeded;
pub mod system;

pub use seeded::SeededStreams;
pub use system::SystemEntropy;

use core::fmt;
use rand_core::RngCore;

/// Stream used for polynomial coefficients.
pub const COEFFICIENT_STREAM: usize = 0;

/// Stream used for sampling random share indices.
pub const INDEX_STREAM: usize = 1;

/// Error types for entropy collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// The underlying generator could not produce bytes.
    CollectionFailed,
}

impl fmt::Display for EntropyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyError::CollectionFailed => write!(f, "Entropy collection failed"),
        }
    }
}

impl std::error::Error for EntropyError {}

/// A source of independent random streams.
pub trait EntropySource {
    /// Returns a unique identifier for the source.
    fn name(&self) -> &'static str;

    /// Returns the generator backing stream `index`.
    fn stream(&mut self, index: usize) -> &mut dyn RngCore;

    /// Whether draws are reproducible from a seed.
    fn is_deterministic(&self) -> bool {
        false
    }
}
