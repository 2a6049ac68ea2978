//! Error types.

use alloc::string::String;

/// Alias for [`core::result::Result`] with the `textbook-rsa` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A key record or ciphertext line is malformed.
    Parse {
        /// What was wrong with the input.
        reason: String,
    },

    /// Identity string is empty or contains characters outside base 62.
    InvalidIdentity,

    /// The public exponent has no inverse modulo the totient.
    NoInverse,

    /// No prime above the primality floor exists at the requested bit length.
    PrimeTooSmall,

    /// Modulus is too small to generate or to carry a data byte per block.
    ModulusTooSmall,

    /// The configured attempt cap was reached while searching.
    AttemptsExhausted,

    /// Message is not smaller than the modulus.
    MessageTooLong,

    /// Decryption error.
    Decryption,

    /// Underlying reader or writer failed.
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            #[cfg(feature = "std")]
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Parse { reason } => write!(f, "parse error: {}", reason),
            Error::InvalidIdentity => write!(f, "identity is not a base 62 string"),
            Error::NoInverse => write!(f, "public exponent has no modular inverse"),
            Error::PrimeTooSmall => {
                write!(f, "no prime of the given length passes the primality test")
            }
            Error::ModulusTooSmall => write!(f, "modulus too small"),
            Error::AttemptsExhausted => {
                write!(f, "search gave up after the configured number of attempts")
            }
            Error::MessageTooLong => write!(f, "message too long"),
            Error::Decryption => write!(f, "decryption error"),
            #[cfg(feature = "std")]
            Error::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl Error {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Error::Parse {
            reason: reason.into(),
        }
    }
}
