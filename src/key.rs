use alloc::string::String;
use core::hash::{Hash, Hasher};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithms::generate::{make_private_key, make_public_key, KeygenOptions};
use crate::algorithms::rsa::{sign, verify};
use crate::errors::{Error, Result};
use crate::identity;
use crate::traits::{ModulusParts, PrivateKeyParts, PublicKeyParts};

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent
    e: BigUint,
}

/// Represents the private half of an RSA key as it is stored: the modulus
/// and the private exponent.
#[derive(Clone)]
pub struct RsaPrivateKey {
    /// Modulus
    n: BigUint,
    /// Private exponent
    d: BigUint,
}

/// A freshly generated key pair, including the prime factors.
///
/// All values are exposed for inspection (diagnostics print bit lengths and
/// values of `p`, `q`, `n`, `e` and `d`); secret parts are zeroized on drop.
#[derive(Clone)]
pub struct KeyPair {
    p: BigUint,
    q: BigUint,
    public: RsaPublicKey,
    private: RsaPrivateKey,
}

/// A public key as distributed: the key, an identity, and the identity
/// signed with the matching private exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyRecord {
    key: RsaPublicKey,
    signature: BigUint,
    identity: String,
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    pub fn new(n: BigUint, e: BigUint) -> Self {
        Self { n, e }
    }
}

impl ModulusParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPrivateKey {
    /// Constructs a private key from its stored components.
    pub fn new(n: BigUint, d: BigUint) -> Self {
        Self { n, d }
    }

    /// Signs `message` as `message^d mod n`.
    pub fn sign(&self, message: &BigUint) -> Result<BigUint> {
        sign(message, &self.d, &self.n)
    }
}

impl ModulusParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.n
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }
}

impl core::fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .finish_non_exhaustive()
    }
}

impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.n == other.n && self.d == other.d
    }
}

impl Eq for RsaPrivateKey {}

impl Hash for RsaPrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Domain separator for RSA private keys
        state.write(b"RsaPrivateKey");
        Hash::hash(&self.n, state);
    }
}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

impl KeyPair {
    /// Generates a key pair with the random source and options given.
    ///
    /// The modulus has exactly `options.bits` bits.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, options: &KeygenOptions) -> Result<Self> {
        let mut components =
            make_public_key(rng, options.bits, options.iterations, options.max_attempts)?;
        let d = make_private_key(&components.e, &components.p, &components.q)?;

        let n = core::mem::take(&mut components.n);
        let e = core::mem::take(&mut components.e);

        Ok(Self {
            p: core::mem::take(&mut components.p),
            q: core::mem::take(&mut components.q),
            public: RsaPublicKey::new(n.clone(), e),
            private: RsaPrivateKey::new(n, d),
        })
    }

    /// First prime factor.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Second prime factor.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Public half.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Private half.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// Signs `identity` and bundles it with the public key.
    ///
    /// `identity` must be a non-empty base 62 string whose value is smaller
    /// than the modulus.
    pub fn public_record(&self, identity: &str) -> Result<PublicKeyRecord> {
        let message = identity::to_uint(identity)?;
        if &message >= self.n() {
            return Err(Error::MessageTooLong);
        }
        let signature = self.private.sign(&message)?;
        Ok(PublicKeyRecord::new(
            self.public.clone(),
            signature,
            String::from(identity),
        ))
    }
}

/// Generates a key pair; shorthand for [`KeyPair::new`].
pub fn generate_keypair<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    options: &KeygenOptions,
) -> Result<KeyPair> {
    KeyPair::new(rng, options)
}

impl ModulusParts for KeyPair {
    fn n(&self) -> &BigUint {
        &self.public.n
    }
}

impl PublicKeyParts for KeyPair {
    fn e(&self) -> &BigUint {
        &self.public.e
    }
}

impl PrivateKeyParts for KeyPair {
    fn d(&self) -> &BigUint {
        &self.private.d
    }
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl Zeroize for KeyPair {
    fn zeroize(&mut self) {
        self.p.zeroize();
        self.q.zeroize();
        self.private.zeroize();
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for KeyPair {}

impl PublicKeyRecord {
    /// Bundles a public key with a signed identity.
    pub fn new(key: RsaPublicKey, signature: BigUint, identity: String) -> Self {
        Self {
            key,
            signature,
            identity,
        }
    }

    /// The public key.
    pub fn key(&self) -> &RsaPublicKey {
        &self.key
    }

    /// Signature over the identity.
    pub fn signature(&self) -> &BigUint {
        &self.signature
    }

    /// The identity string.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Checks that the signature matches the identity under this key.
    ///
    /// Errors only if the identity is not a base 62 string; a mismatch is
    /// `Ok(false)`.
    pub fn verify_identity(&self) -> Result<bool> {
        let message = identity::to_uint(&self.identity)?;
        Ok(verify(&message, &self.signature, &self.key.e, &self.key.n))
    }
}

impl ModulusParts for PublicKeyRecord {
    fn n(&self) -> &BigUint {
        &self.key.n
    }
}

impl PublicKeyParts for PublicKeyRecord {
    fn e(&self) -> &BigUint {
        &self.key.e
    }
}

impl From<PublicKeyRecord> for RsaPublicKey {
    fn from(record: PublicKeyRecord) -> Self {
        record.key
    }
}

impl From<&KeyPair> for RsaPublicKey {
    fn from(pair: &KeyPair) -> Self {
        pair.public.clone()
    }
}

impl From<&KeyPair> for RsaPrivateKey {
    fn from(pair: &KeyPair) -> Self {
        pair.private.clone()
    }
}
