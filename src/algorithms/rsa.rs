//! Generic RSA implementation

use num_bigint::BigUint;
use num_traits::Zero;
use subtle::ConstantTimeEq;

use crate::algorithms::pad::uint_to_be_pad;
use crate::errors::{Error, Result};
use crate::math::pow_mod;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Raw RSA encryption of m with the public key. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if key.n().is_zero() {
        return Err(Error::ModulusTooSmall);
    }
    if m >= key.n() {
        return Err(Error::MessageTooLong);
    }

    Ok(pow_mod(m, key.e(), key.n()))
}

/// ⚠️ Performs raw RSA decryption with no padding or error checking.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt<K: PrivateKeyParts>(key: &K, c: &BigUint) -> Result<BigUint> {
    if key.n().is_zero() || c >= key.n() {
        return Err(Error::Decryption);
    }

    Ok(pow_mod(c, key.d(), key.n()))
}

/// Signs an integer message: `message^d mod n`.
///
/// A message not smaller than `n` is reduced like any other base, so its
/// signature will not verify against the unreduced value. Fails only for a
/// zero modulus.
pub fn sign(message: &BigUint, d: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(Error::ModulusTooSmall);
    }

    Ok(pow_mod(message, d, n))
}

/// Accepts iff `signature^e mod n == message`.
///
/// A `false` result is an ordinary outcome; callers decide what to refuse.
pub fn verify(message: &BigUint, signature: &BigUint, e: &BigUint, n: &BigUint) -> bool {
    if n.is_zero() {
        return false;
    }

    let size = (n.bits() + 7) / 8;
    let recovered = pow_mod(signature, e, n);

    match (uint_to_be_pad(message, size), uint_to_be_pad(&recovered, size)) {
        (Ok(expected), Ok(actual)) => expected[..].ct_eq(&actual[..]).into(),
        _ => false,
    }
}
