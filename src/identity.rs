//! Base 62 conversion between identity strings and integers.
//!
//! Digits are `0-9` (values 0..10), `A-Z` (10..36) and `a-z` (36..62), so an
//! account name such as `alice` maps to a unique integer that can be signed.

use alloc::string::String;
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::errors::{Error, Result};

const RADIX: u32 = 62;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn digit_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some(u32::from(c - b'0')),
        b'A'..=b'Z' => Some(u32::from(c - b'A') + 10),
        b'a'..=b'z' => Some(u32::from(c - b'a') + 36),
        _ => None,
    }
}

/// Reads `identity` as a base 62 number.
pub fn to_uint(identity: &str) -> Result<BigUint> {
    if identity.is_empty() {
        return Err(Error::InvalidIdentity);
    }

    identity.bytes().try_fold(BigUint::zero(), |acc, c| {
        let digit = digit_value(c).ok_or(Error::InvalidIdentity)?;
        Ok(acc * RADIX + digit)
    })
}

/// Renders `value` in base 62, without leading zero digits.
pub fn from_uint(value: &BigUint) -> String {
    if value.is_zero() {
        return String::from("0");
    }

    let radix = BigUint::from(RADIX);
    let mut digits = Vec::new();
    let mut rest = value.clone();
    while !rest.is_zero() {
        let (q, r) = rest.div_rem(&radix);
        // r < 62
        digits.push(ALPHABET[r.to_usize().unwrap_or_default()]);
        rest = q;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}
