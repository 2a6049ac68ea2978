//! Probabilistic primality testing.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use rand_core::CryptoRngCore;

use crate::math::pow_mod;

/// Everything at or below this value is reported as composite.
pub const PRIMALITY_FLOOR: u32 = 12;

/// Reports whether `candidate` passes `iterations` rounds of the
/// Miller-Rabin test with witnesses drawn uniformly from
/// `[2, candidate - 2]`.
///
/// Values at or below [`PRIMALITY_FLOOR`] are rejected outright, primes among
/// them included. For larger values a prime always passes, and a composite
/// passes with probability at most ¼ⁱᵗᵉʳᵃᵗⁱᵒⁿˢ.
///
/// This is not suitable for judging numbers that an adversary may have
/// crafted to fool the test.
pub fn is_probable_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    candidate: &BigUint,
    iterations: usize,
) -> bool {
    if candidate.to_u32().map_or(false, |v| v <= PRIMALITY_FLOOR) {
        return false;
    }

    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let nm1 = candidate - &one;

    // nm1 = 2^s * r with r odd
    let mut r = nm1.clone();
    let mut s = 0usize;
    while r.is_even() {
        r >>= 1;
        s += 1;
    }

    'next: for _ in 0..iterations {
        // upper bound is exclusive
        let a = rng.gen_biguint_range(&two, &nm1);

        let mut y = pow_mod(&a, &r, candidate);
        if y == one || y == nm1 {
            continue;
        }

        for _ in 1..s {
            y = pow_mod(&y, &two, candidate);
            if y == nm1 {
                continue 'next;
            }
            if y == one {
                return false;
            }
        }

        return false;
    }

    true
}
