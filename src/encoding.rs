//! Text records for keys.
//!
//! A public record is four newline-terminated lines: modulus, public
//! exponent and signature in lowercase hex, then the identity verbatim. A
//! private record is two lines: modulus and private exponent in lowercase
//! hex.

use alloc::string::String;
use core::fmt;
use core::str::{FromStr, Lines};
use num_bigint::BigUint;

use crate::errors::{Error, Result};
use crate::key::{PublicKeyRecord, RsaPrivateKey, RsaPublicKey};
use crate::traits::{ModulusParts, PrivateKeyParts, PublicKeyParts};

/// Parses one hex field, rejecting anything but ASCII hex digits.
pub(crate) fn parse_hex(field: &str, name: &str) -> Result<BigUint> {
    let field = field.trim();
    if field.is_empty() {
        return Err(Error::parse(format!("{} is empty", name)));
    }
    if !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::parse(format!("{} is not hexadecimal", name)));
    }

    BigUint::parse_bytes(field.as_bytes(), 16)
        .ok_or_else(|| Error::parse(format!("{} is not hexadecimal", name)))
}

fn next_field<'a>(lines: &mut Lines<'a>, name: &str) -> Result<&'a str> {
    lines
        .next()
        .ok_or_else(|| Error::parse(format!("missing {}", name)))
}

/// Only blank lines may follow the last field.
fn expect_end(lines: &mut Lines<'_>) -> Result<()> {
    if lines.any(|line| !line.trim().is_empty()) {
        return Err(Error::parse("unexpected data after the last field"));
    }
    Ok(())
}

impl fmt::Display for PublicKeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:x}", self.n())?;
        writeln!(f, "{:x}", self.e())?;
        writeln!(f, "{:x}", self.signature())?;
        writeln!(f, "{}", self.identity())
    }
}

impl FromStr for PublicKeyRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines();

        let n = parse_hex(next_field(&mut lines, "modulus")?, "modulus")?;
        let e = parse_hex(next_field(&mut lines, "public exponent")?, "public exponent")?;
        let signature = parse_hex(next_field(&mut lines, "signature")?, "signature")?;
        let identity = next_field(&mut lines, "identity")?;
        if identity.is_empty() {
            return Err(Error::parse("identity is empty"));
        }
        expect_end(&mut lines)?;

        Ok(PublicKeyRecord::new(
            RsaPublicKey::new(n, e),
            signature,
            String::from(identity),
        ))
    }
}

impl fmt::Display for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:x}", self.n())?;
        writeln!(f, "{:x}", self.d())
    }
}

impl FromStr for RsaPrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines();

        let n = parse_hex(next_field(&mut lines, "modulus")?, "modulus")?;
        let d = parse_hex(
            next_field(&mut lines, "private exponent")?,
            "private exponent",
        )?;
        expect_end(&mut lines)?;

        Ok(RsaPrivateKey::new(n, d))
    }
}

#[cfg(feature = "std")]
mod io {
    use super::*;
    use std::io::{Read, Write};

    fn read_record<R: Read>(mut reader: R) -> Result<String> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|err| {
            if err.kind() == std::io::ErrorKind::InvalidData {
                Error::parse("key record is not valid UTF-8")
            } else {
                Error::Io(err)
            }
        })?;
        Ok(text)
    }

    /// Writes the four-line public record.
    pub fn write_public_key<W: Write>(record: &PublicKeyRecord, mut writer: W) -> Result<()> {
        write!(writer, "{}", record)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the two-line private record.
    pub fn write_private_key<W: Write>(key: &RsaPrivateKey, mut writer: W) -> Result<()> {
        write!(writer, "{}", key)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a public record written by [`write_public_key`].
    pub fn load_public_key<R: Read>(reader: R) -> Result<PublicKeyRecord> {
        read_record(reader)?.parse()
    }

    /// Reads a private record written by [`write_private_key`].
    pub fn load_private_key<R: Read>(reader: R) -> Result<RsaPrivateKey> {
        read_record(reader)?.parse()
    }
}

#[cfg(feature = "std")]
pub use io::{load_private_key, load_public_key, write_private_key, write_public_key};
