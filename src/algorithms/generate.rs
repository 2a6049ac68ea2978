//! Generate prime components for an RSA key pair

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, ToPrimitive};
use rand_core::CryptoRngCore;
use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::{
    errors::{Error, Result},
    math::{gcd, mod_inverse},
    prime_rand::{RandPrime, MIN_PRIME_BITS},
};

/// Default modulus size in bits.
pub const DEFAULT_BITS: usize = 1024;

/// Default number of Miller-Rabin rounds per prime candidate.
pub const DEFAULT_ITERATIONS: usize = 50;

/// Smallest modulus the split rule can fill with two primes above the
/// primality floor.
pub const MIN_MODULUS_BITS: usize = 4 * MIN_PRIME_BITS;

/// Parameters for key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeygenOptions {
    /// Exact bit length of the modulus.
    pub bits: usize,
    /// Miller-Rabin rounds applied to each prime candidate.
    pub iterations: usize,
    /// Cap on candidates tried per search (each prime, the modulus split and
    /// the public exponent). `None` searches until success.
    pub max_attempts: Option<u64>,
}

impl KeygenOptions {
    /// Options for a modulus of `bits` bits with default rounds and no cap.
    pub fn new(bits: usize) -> Self {
        Self {
            bits,
            ..Self::default()
        }
    }

    /// Sets the number of Miller-Rabin rounds.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Bounds every search loop.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

impl Default for KeygenOptions {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            iterations: DEFAULT_ITERATIONS,
            max_attempts: None,
        }
    }
}

/// Output of [`make_public_key`]: the two primes, their product and the
/// public exponent.
///
/// The primes are zeroized on drop.
pub struct PublicComponents {
    /// First prime factor.
    pub p: BigUint,
    /// Second prime factor, distinct from `p`.
    pub q: BigUint,
    /// Modulus `p * q`.
    pub n: BigUint,
    /// Public exponent.
    pub e: BigUint,
}

impl Drop for PublicComponents {
    fn drop(&mut self) {
        self.p.zeroize();
        self.q.zeroize();
    }
}

fn exhausted(max_attempts: Option<u64>, attempts: u64) -> bool {
    max_attempts.map_or(false, |max| attempts >= max)
}

/// Returns `(p - 1)(q - 1)`.
pub(crate) fn totient(p: &BigUint, q: &BigUint) -> BigUint {
    (p - BigUint::one()) * (q - BigUint::one())
}

/// Picks two primes whose product has exactly `bits` bits, then a public
/// exponent coprime to the totient.
///
/// The bit length of `p` is drawn uniformly from `[bits/4, 3*bits/4]` and `q`
/// takes the rest. Split and primes are resampled until `p != q` and the
/// product is exactly `bits` long. The exponent is drawn from `bits`-bit
/// values until `1 < e < φ` and `gcd(e, φ) = 1`.
pub fn make_public_key<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
    iterations: usize,
    max_attempts: Option<u64>,
) -> Result<PublicComponents> {
    if bits < MIN_MODULUS_BITS {
        return Err(Error::ModulusTooSmall);
    }

    let low = bits / 4;
    let span = BigUint::from(3 * bits / 4 - low + 1);

    let mut attempts = 0u64;
    let (p, q, n) = loop {
        if exhausted(max_attempts, attempts) {
            return Err(Error::AttemptsExhausted);
        }
        attempts += 1;

        let pbits = low + rng.gen_biguint_below(&span).to_usize().unwrap_or_default();
        let qbits = bits - pbits;

        let p = rng.gen_prime_capped(pbits, iterations, max_attempts)?;
        let q = rng.gen_prime_capped(qbits, iterations, max_attempts)?;
        if p == q {
            trace!(pbits, "drew the same prime twice");
            continue;
        }

        let n = &p * &q;
        if n.bits() == bits {
            debug!(bits, pbits, qbits, attempts, "accepted modulus");
            break (p, q, n);
        }
        trace!(pbits, qbits, got = n.bits(), "modulus length off, resampling");
    };

    let mut phi = totient(&p, &q);
    let one = BigUint::one();

    let mut attempts = 0u64;
    let e = loop {
        if exhausted(max_attempts, attempts) {
            phi.zeroize();
            return Err(Error::AttemptsExhausted);
        }
        attempts += 1;

        let e = rng.gen_biguint(bits);
        if e > one && e < phi && gcd(&e, &phi) == one {
            debug!(bits = e.bits(), attempts, "accepted public exponent");
            break e;
        }
    };
    phi.zeroize();

    Ok(PublicComponents { p, q, n, e })
}

/// Computes the private exponent `d = e⁻¹ mod (p - 1)(q - 1)`.
pub fn make_private_key(e: &BigUint, p: &BigUint, q: &BigUint) -> Result<BigUint> {
    let mut phi = totient(p, q);
    let d = mod_inverse(e, &phi).ok_or(Error::NoInverse);
    phi.zeroize();
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime::is_probable_prime;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    #[test]
    fn test_impossible_keys() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);

        for i in 0..MIN_MODULUS_BITS {
            assert!(matches!(
                make_public_key(&mut rng, i, 5, None),
                Err(Error::ModulusTooSmall)
            ));
        }
    }

    #[test]
    fn test_smallest_key() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let c = make_public_key(&mut rng, MIN_MODULUS_BITS, 5, None).unwrap();
        assert_eq!(c.n.bits(), MIN_MODULUS_BITS);
    }

    #[test]
    fn test_private_exponent() {
        let p = BigUint::from(61u32);
        let q = BigUint::from(53u32);
        let d = make_private_key(&BigUint::from(17u32), &p, &q).unwrap();
        assert_eq!(d, BigUint::from(2753u32));
    }

    #[test]
    fn test_no_inverse() {
        let p = BigUint::from(61u32);
        let q = BigUint::from(53u32);
        // gcd(4, 3120) = 4
        assert!(matches!(
            make_private_key(&BigUint::from(4u32), &p, &q),
            Err(Error::NoInverse)
        ));
    }

    #[test]
    fn test_attempt_cap() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        assert!(matches!(
            make_public_key(&mut rng, 256, 5, Some(0)),
            Err(Error::AttemptsExhausted)
        ));
    }

    #[test]
    fn test_options() {
        let opts = KeygenOptions::new(512)
            .with_iterations(10)
            .with_max_attempts(100);
        assert_eq!(opts.bits, 512);
        assert_eq!(opts.iterations, 10);
        assert_eq!(opts.max_attempts, Some(100));

        let defaults = KeygenOptions::default();
        assert_eq!(defaults.bits, 1024);
        assert_eq!(defaults.iterations, 50);
        assert_eq!(defaults.max_attempts, None);
    }

    macro_rules! key_generation {
        ($name:ident, $size:expr) => {
            #[test]
            fn $name() {
                let mut rng = ChaCha8Rng::from_seed([42; 32]);
                for _ in 0..5 {
                    let c = make_public_key(&mut rng, $size, 5, None).unwrap();
                    assert_eq!(c.n.bits(), $size);
                    assert_ne!(c.p, c.q);
                    assert_eq!(&c.p * &c.q, c.n);
                    assert!(is_probable_prime(&mut rng, &c.p, 20));
                    assert!(is_probable_prime(&mut rng, &c.q, 20));

                    let phi = totient(&c.p, &c.q);
                    assert!(c.e > BigUint::one() && c.e < phi);
                    assert_eq!(gcd(&c.e, &phi), BigUint::one());

                    let d = make_private_key(&c.e, &c.p, &c.q).unwrap();
                    assert_eq!((&c.e * &d) % &phi, BigUint::one());
                }
            }
        };
    }

    key_generation!(key_generation_32, 32);
    key_generation!(key_generation_64, 64);
    key_generation!(key_generation_128, 128);
    key_generation!(key_generation_256, 256);
    key_generation!(key_generation_512, 512);
}
