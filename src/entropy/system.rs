//! Operating system entropy.

use rand_core::{OsRng, RngCore};

use super::{EntropyError, EntropySource};

/// Source backed by the OS CSPRNG. Every stream index shares it.
#[derive(Debug, Clone, Copy)]
pub struct SystemEntropy {
    rng: OsRng,
}

impl SystemEntropy {
    /// Creates a new system source.
    ///
    /// # Returns
    /// * `Err(EntropyError::CollectionFailed)` if the OS generator is unavailable.
    pub fn new() -> Result<Self, EntropyError> {
        let mut probe = [0u8; 16];
        OsRng.try_fill_bytes(&mut probe).map_err(|err| {
            log::warn!("OS entropy source unavailable: {}", err);
            EntropyError::CollectionFailed
        })?;
        Ok(Self { rng: OsRng })
    }
}

impl EntropySource for SystemEntropy {
    fn name(&self) -> &'static str {
        "OsRng"
    }

    fn stream(&mut self, _index: usize) -> &mut dyn RngCore {
        &mut self.rng
    }
}
