//! Modular arithmetic on arbitrary-precision integers.

use num_bigint::Sign::Plus;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// The exponent is scanned least-significant bit first. A modulus of one
/// yields zero.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn pow_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "modulus must be non-zero");

    let mut out = BigUint::one() % modulus;
    let mut b = base % modulus;
    let mut e = exponent.clone();

    while !e.is_zero() {
        if e.is_odd() {
            out = (&out * &b) % modulus;
        }
        b = (&b * &b) % modulus;
        e >>= 1;
    }

    out
}

/// Greatest common divisor by the iterative Euclidean algorithm.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let r = &a % &b;
        a = core::mem::replace(&mut b, r);
    }

    a
}

/// Calculate the modular inverse of `a` modulo `n` with the extended
/// Euclidean algorithm.
///
/// Returns `None` when `gcd(a, n) != 1` or `n` is zero. Otherwise the result
/// lies in `[0, n)`.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    if n.is_zero() {
        return None;
    }

    let n_int = BigInt::from_biguint(Plus, n.clone());

    let mut r = n_int.clone();
    let mut r_next = BigInt::from_biguint(Plus, a.clone());
    let mut t = BigInt::zero();
    let mut t_next = BigInt::one();

    while !r_next.is_zero() {
        let q = r.div_floor(&r_next);

        let r_new = &r - &q * &r_next;
        r = core::mem::replace(&mut r_next, r_new);

        let t_new = &t - &q * &t_next;
        t = core::mem::replace(&mut t_next, t_new);
    }

    if r > BigInt::one() {
        return None;
    }

    if t.is_negative() {
        t += &n_int;
    }

    // n == 1: every value is congruent to zero
    (t % &n_int).to_biguint()
}
