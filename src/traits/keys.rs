//! Traits related to the key components

use num_bigint::BigUint;

/// The modulus shared by both halves of a key.
pub trait ModulusParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the modulus size in bytes.
    fn size(&self) -> usize {
        (self.n().bits() + 7) / 8
    }

    /// Returns the number of bytes per encrypted block, sentinel included.
    ///
    /// Any big-endian value of this many bytes is strictly less than the
    /// modulus.
    fn block_size(&self) -> usize {
        self.n().bits().saturating_sub(1) / 8
    }
}

/// Components of an RSA public key.
pub trait PublicKeyParts: ModulusParts {
    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;
}

/// Components of an RSA private key.
pub trait PrivateKeyParts: ModulusParts {
    /// Returns the private exponent of the key.
    fn d(&self) -> &BigUint;
}
