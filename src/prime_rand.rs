//! Generation of random primes.

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::CryptoRngCore;
use tracing::{debug, trace};

use crate::errors::{Error, Result};
use crate::prime::is_probable_prime;

/// Smallest bit length holding a prime above the primality floor (13 = 0b1101).
pub const MIN_PRIME_BITS: usize = 4;

/// A generic trait for generating random primes.
///
/// *Warning*: This is highly dependent on the provided random number
/// generator to provide actually random primes.
///
/// # Example
/// ```
/// use textbook_rsa::{RandPrime, RandState};
///
/// let mut rng = RandState::new(2024);
/// let p = rng.gen_prime(128, 20).unwrap();
/// assert_eq!(p.bits(), 128);
/// ```
pub trait RandPrime {
    /// Generate a random probable prime with exactly `bits` bits.
    fn gen_prime(&mut self, bits: usize, iterations: usize) -> Result<BigUint> {
        self.gen_prime_capped(bits, iterations, None)
    }

    /// Like [`RandPrime::gen_prime`], giving up with
    /// [`Error::AttemptsExhausted`] after `max_attempts` rejected candidates.
    fn gen_prime_capped(
        &mut self,
        bits: usize,
        iterations: usize,
        max_attempts: Option<u64>,
    ) -> Result<BigUint>;
}

impl<R: CryptoRngCore + ?Sized> RandPrime for R {
    fn gen_prime_capped(
        &mut self,
        bits: usize,
        iterations: usize,
        max_attempts: Option<u64>,
    ) -> Result<BigUint> {
        if bits < MIN_PRIME_BITS {
            return Err(Error::PrimeTooSmall);
        }

        let top = BigUint::one() << (bits - 1);
        let mut attempts = 0u64;

        loop {
            if max_attempts.map_or(false, |max| attempts >= max) {
                debug!(bits, attempts, "prime search exhausted");
                return Err(Error::AttemptsExhausted);
            }
            attempts += 1;

            // uniform over [2^(bits-1), 2^bits)
            let candidate = self.gen_biguint(bits - 1) | &top;

            if is_probable_prime(self, &candidate, iterations) {
                debug!(bits, attempts, "found probable prime");
                return Ok(candidate);
            }

            if attempts % 1024 == 0 {
                trace!(bits, attempts, "still searching for a prime");
            }
        }
    }
}

/// Samples random `bits`-bit integers until one passes
/// [`is_probable_prime`] with `iterations` rounds.
pub fn generate_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
    iterations: usize,
) -> Result<BigUint> {
    rng.gen_prime(bits, iterations)
}
