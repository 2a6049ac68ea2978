//! RSA-related trait definitions.

pub(crate) mod keys;

pub use keys::{ModulusParts, PrivateKeyParts, PublicKeyParts};
