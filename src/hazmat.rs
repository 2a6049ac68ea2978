//! ⚠️ Low-level "hazmat" RSA functions.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module holds the bare RSA permutation, `m^e mod n` and `c^d mod n`,
//! with none of the block framing [`encrypt_stream`](crate::encrypt_stream)
//! and [`decrypt_stream`](crate::decrypt_stream) apply. Both functions only
//! check that their input is smaller than the modulus.
//!
//! Textbook RSA without padding is malleable and deterministic. Use these
//! for experiments and for building the framed codecs, not for protecting
//! data.

pub use crate::algorithms::rsa::{rsa_decrypt, rsa_encrypt};
