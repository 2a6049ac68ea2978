//! Sentinel framing of plaintext blocks and big-endian padding helpers.

use alloc::vec::Vec;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Leading byte of every plaintext block.
///
/// Being non-zero, it pins the big-endian width of the block integer, so
/// zero bytes at the start of a chunk survive the integer round-trip.
pub const SENTINEL: u8 = 0xff;

/// Returns a new vector of the given length, with 0s left padded.
#[inline]
fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::MessageTooLong);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// Converts input to the new vector of the given length, using BE and with 0s left padded.
#[inline]
pub(crate) fn uint_to_be_pad(input: &BigUint, padded_len: usize) -> Result<Vec<u8>> {
    left_pad(&input.to_bytes_be(), padded_len)
}

/// Checks that a block of `block_size` bytes carries at least one data byte.
#[inline]
pub(crate) fn check_block_size(block_size: usize) -> Result<()> {
    if block_size < 2 {
        return Err(Error::ModulusTooSmall);
    }
    Ok(())
}

/// Prefixes `chunk` with [`SENTINEL`] and reads the result as a big-endian
/// integer.
pub(crate) fn frame_block(chunk: &[u8], block_size: usize) -> Result<BigUint> {
    if chunk.len() + 1 > block_size {
        return Err(Error::MessageTooLong);
    }

    let mut em = Zeroizing::new(Vec::with_capacity(chunk.len() + 1));
    em.push(SENTINEL);
    em.extend_from_slice(chunk);

    Ok(BigUint::from_bytes_be(&em))
}

/// Inverse of [`frame_block`]: exports `m` and strips the sentinel.
///
/// Fails with [`Error::Decryption`] if the sentinel is missing or the block is
/// wider than `block_size`, which is what a wrong key or a corrupted
/// ciphertext produces.
pub(crate) fn unframe_block(m: &BigUint, block_size: usize) -> Result<Zeroizing<Vec<u8>>> {
    let mut em = Zeroizing::new(m.to_bytes_be());

    if em.first() != Some(&SENTINEL) || em.len() > block_size {
        return Err(Error::Decryption);
    }

    em.remove(0);
    Ok(em)
}
