//! Nested Shamir secret sharing over a prime field.
//!
//! A secret is split into shares with a `k`-of-`n` threshold; any share may
//! itself be split again, forming a tree addressed by index paths. Pools can be
//! extended with new shares after the fact, and secrets are recovered by
//! folding shares bottom-up.

pub mod config;
pub mod core;
pub mod encoding;
pub mod entropy;
pub mod mpc;

pub use crate::config::ShamirConfig;
pub use crate::core::primes::{format_prime, get_prime, valid_bitlengths};
pub use crate::encoding::{AdapterRegistry, EncodingError, Separator, ShareCodec, ValueAdapter};
pub use crate::mpc::{ExtendTarget, MpcError, PoolSpec, Shamir, Share, ShareEntry};
