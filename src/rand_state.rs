//! Seedable random state used for prime search and exponent sampling.

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};

/// Random state handed explicitly to key generation.
///
/// The same seed always yields the same keys, which is what tests and
/// reproducible key derivation rely on. Dropping the value tears the state
/// down; nothing is kept globally.
pub struct RandState {
    seed: u64,
    rng: ChaCha20Rng,
}

impl RandState {
    /// Initializes the state from a caller-supplied seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Seeds from the wall clock, in whole seconds since the Unix epoch.
    ///
    /// Two calls in the same second produce identical states.
    #[cfg(feature = "std")]
    pub fn from_time() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::new(seed)
    }

    /// Seeds from the operating system's entropy source.
    #[cfg(feature = "getrandom")]
    pub fn from_entropy() -> Self {
        let mut bytes = [0u8; 8];
        rand_core::OsRng.fill_bytes(&mut bytes);
        Self::new(u64::from_le_bytes(bytes))
    }

    /// The seed this state was initialized with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl core::fmt::Debug for RandState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RandState").finish_non_exhaustive()
    }
}

impl RngCore for RandState {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

impl CryptoRng for RandState {}
