#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Usage
//!
//! ## Key generation
//!
//! Every randomized operation takes its generator explicitly. [`RandState`]
//! is a seedable generator, so the same seed reproduces the same key.
//!
//! ```
//! use textbook_rsa::{generate_keypair, KeygenOptions, RandState};
//! use textbook_rsa::traits::{ModulusParts, PrivateKeyParts, PublicKeyParts};
//!
//! # fn main() -> Result<(), textbook_rsa::Error> {
//! let mut rng = RandState::new(42);
//! let options = KeygenOptions::new(256).with_iterations(10);
//! let pair = generate_keypair(&mut rng, &options)?;
//!
//! assert_eq!(pair.n().bits(), 256);
//! assert_eq!(pair.p() * pair.q(), *pair.n());
//! # let _ = (pair.e(), pair.d());
//! # Ok(())
//! # }
//! ```
//!
//! ## Signed public records
//!
//! A public record carries the key together with an identity signed by the
//! private exponent. The identity is read as a base 62 number, so it must
//! consist of ASCII letters and digits.
//!
//! ```
//! use textbook_rsa::{generate_keypair, KeygenOptions, PublicKeyRecord, RandState};
//!
//! # fn main() -> Result<(), textbook_rsa::Error> {
//! let mut rng = RandState::new(7);
//! let pair = generate_keypair(&mut rng, &KeygenOptions::new(256).with_iterations(10))?;
//!
//! let record = pair.public_record("alice")?;
//! let text = record.to_string();
//!
//! let parsed: PublicKeyRecord = text.parse()?;
//! assert!(parsed.verify_identity()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Stream encryption
//!
//! Plaintext is cut into blocks one byte narrower than the modulus allows,
//! each prefixed with the sentinel byte `0xff`, and written as one lowercase
//! hex line per block.
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! use textbook_rsa::{decrypt_stream, encrypt_stream, generate_keypair, KeygenOptions, RandState};
//!
//! # fn main() -> Result<(), textbook_rsa::Error> {
//! let mut rng = RandState::new(1);
//! let pair = generate_keypair(&mut rng, &KeygenOptions::new(256).with_iterations(10))?;
//!
//! let data = b"\x00\x00leading zeros survive";
//! let mut ciphertext = Vec::new();
//! encrypt_stream(&data[..], &mut ciphertext, pair.public_key())?;
//!
//! let mut plaintext = Vec::new();
//! decrypt_stream(&ciphertext[..], &mut plaintext, pair.private_key())?;
//! assert_eq!(&plaintext[..], &data[..]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Key files
//!
//! [`write_public_key`] and [`write_private_key`] emit the newline-delimited
//! hex records; [`load_public_key`] and [`load_private_key`] read them back
//! and reject anything malformed with [`Error::Parse`].
//!
//! ```text
//! <n in hex>
//! <e in hex>
//! <signature in hex>
//! <identity>
//! ```
//!
//! Logging goes through [`tracing`](https://docs.rs/tracing); no subscriber
//! is installed by this crate.


#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod errors;
pub mod identity;
pub mod traits;

mod encoding;
mod key;
mod math;
mod prime;
mod prime_rand;
mod rand_state;
#[cfg(feature = "std")]
mod stream;

pub use crate::{
    algorithms::generate::{
        make_private_key, make_public_key, KeygenOptions, PublicComponents, DEFAULT_BITS,
        DEFAULT_ITERATIONS, MIN_MODULUS_BITS,
    },
    algorithms::pad::SENTINEL,
    algorithms::rsa::{sign, verify},
    errors::{Error, Result},
    key::{generate_keypair, KeyPair, PublicKeyRecord, RsaPrivateKey, RsaPublicKey},
    math::{gcd, mod_inverse, pow_mod},
    prime::{is_probable_prime, PRIMALITY_FLOOR},
    prime_rand::{generate_prime, RandPrime, MIN_PRIME_BITS},
    rand_state::RandState,
};

#[cfg(feature = "std")]
pub use crate::{
    encoding::{load_private_key, load_public_key, write_private_key, write_public_key},
    stream::{decrypt_stream, encrypt_stream, StreamStats},
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
