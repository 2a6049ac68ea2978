//! Block-wise encryption of byte streams.
//!
//! Plaintext is cut into chunks of `k - 1` bytes, where `k` is the key's
//! [`block_size`](crate::traits::ModulusParts::block_size). Each chunk is
//! prefixed with [`SENTINEL`](crate::algorithms::pad::SENTINEL), read as a
//! big-endian integer, encrypted, and written as one lowercase hex line.
//! Decryption reverses this line by line.

use std::io::{BufRead, ErrorKind, Read, Write};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::algorithms::pad::{check_block_size, frame_block, unframe_block};
use crate::algorithms::rsa::{rsa_decrypt, rsa_encrypt};
use crate::encoding::parse_hex;
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Totals for one pass over a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Number of ciphertext blocks written or read.
    pub blocks: u64,
    /// Number of plaintext bytes read or written.
    pub bytes: u64,
}

/// Fills `buf` from `reader`, stopping early only at end of input.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// Encrypts everything readable from `input` under `key`, writing one hex
/// line per block to `output`.
///
/// Empty input produces empty output.
pub fn encrypt_stream<R, W, K>(mut input: R, mut output: W, key: &K) -> Result<StreamStats>
where
    R: Read,
    W: Write,
    K: PublicKeyParts,
{
    let block_size = key.block_size();
    check_block_size(block_size)?;

    let mut chunk = Zeroizing::new(vec![0u8; block_size - 1]);
    let mut stats = StreamStats::default();

    loop {
        let read = read_chunk(&mut input, &mut chunk)?;
        if read == 0 {
            break;
        }

        let m = Zeroizing::new(frame_block(&chunk[..read], block_size)?);
        let c = rsa_encrypt(key, &m)?;
        writeln!(output, "{:x}", c)?;

        stats.blocks += 1;
        stats.bytes += read as u64;
    }

    output.flush()?;
    debug!(blocks = stats.blocks, bytes = stats.bytes, "encrypted stream");
    Ok(stats)
}

/// Decrypts hex lines from `input` under `key`, writing the recovered bytes
/// to `output`.
///
/// Blank lines are skipped. A line that is not hex fails with
/// [`Error::Parse`](crate::Error::Parse); a block that is out of range or
/// does not decrypt to a sentinel-prefixed value fails with
/// [`Error::Decryption`](crate::Error::Decryption). Output already written
/// for earlier blocks is left in place.
pub fn decrypt_stream<R, W, K>(input: R, mut output: W, key: &K) -> Result<StreamStats>
where
    R: BufRead,
    W: Write,
    K: PrivateKeyParts,
{
    let block_size = key.block_size();
    check_block_size(block_size)?;

    let mut stats = StreamStats::default();

    for line in input.lines() {
        let line = line.map_err(|err| {
            if err.kind() == ErrorKind::InvalidData {
                Error::parse("ciphertext block is not valid UTF-8")
            } else {
                Error::Io(err)
            }
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let c = parse_hex(&line, "ciphertext block")?;
        let m = Zeroizing::new(rsa_decrypt(key, &c)?);
        let chunk = unframe_block(&m, block_size).map_err(|err| {
            warn!(block = stats.blocks, "block does not carry the sentinel");
            err
        })?;
        output.write_all(&chunk)?;

        stats.blocks += 1;
        stats.bytes += chunk.len() as u64;
    }

    output.flush()?;
    debug!(blocks = stats.blocks, bytes = stats.bytes, "decrypted stream");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::generate::KeygenOptions;
    use crate::key::{KeyPair, RsaPrivateKey, RsaPublicKey};
    use crate::traits::ModulusParts;
    use hex_literal::hex;
    use num_bigint::BigUint;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn key_pair(bits: usize) -> KeyPair {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        KeyPair::new(&mut rng, &KeygenOptions::new(bits).with_iterations(5)).unwrap()
    }

    fn roundtrip(pair: &KeyPair, plaintext: &[u8]) -> Vec<u8> {
        let mut ciphertext = Vec::new();
        let enc = encrypt_stream(plaintext, &mut ciphertext, pair.public_key()).unwrap();

        let mut recovered = Vec::new();
        let dec = decrypt_stream(&ciphertext[..], &mut recovered, pair.private_key()).unwrap();

        assert_eq!(enc, dec);
        assert_eq!(enc.bytes, plaintext.len() as u64);
        recovered
    }

    #[test]
    fn test_block_lengths() {
        let pair = key_pair(256);
        let k = pair.block_size();
        assert_eq!(k, 31);

        for len in [0, 1, k - 2, k - 1, k, 10 * k + 3] {
            let plaintext: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
            assert_eq!(roundtrip(&pair, &plaintext), plaintext, "length {}", len);
        }
    }

    #[test]
    fn test_block_count() {
        let pair = key_pair(256);
        let k = pair.block_size();

        let mut ciphertext = Vec::new();
        let stats = encrypt_stream(&vec![1u8; 10 * k + 3][..], &mut ciphertext, pair.public_key())
            .unwrap();

        // k - 1 data bytes per block
        let expected = ((10 * k + 3) + (k - 2)) / (k - 1);
        assert_eq!(stats.blocks, expected as u64);
        assert_eq!(
            ciphertext.iter().filter(|&&b| b == b'\n').count(),
            expected
        );
    }

    #[test]
    fn test_empty_input() {
        let pair = key_pair(128);
        let mut ciphertext = Vec::new();
        let stats = encrypt_stream(&b""[..], &mut ciphertext, pair.public_key()).unwrap();
        assert_eq!(stats, StreamStats::default());
        assert!(ciphertext.is_empty());
    }

    #[test]
    fn test_zero_prefixed_chunks() {
        let pair = key_pair(128);
        let k = pair.block_size();

        // every block starts with zero bytes
        let mut plaintext = Vec::new();
        for _ in 0..4 {
            plaintext.extend_from_slice(&[0u8; 3]);
            plaintext.extend((3..k - 1).map(|i| i as u8));
        }
        plaintext.extend_from_slice(&hex!("000000"));

        assert_eq!(roundtrip(&pair, &plaintext), plaintext);
        assert_eq!(roundtrip(&pair, &vec![0u8; 3 * k]), vec![0u8; 3 * k]);
    }

    #[test]
    fn test_ciphertext_format() {
        let pair = key_pair(128);
        let mut ciphertext = Vec::new();
        encrypt_stream(&b"some bytes to encrypt"[..], &mut ciphertext, pair.public_key()).unwrap();

        let text = String::from_utf8(ciphertext).unwrap();
        for line in text.lines() {
            assert!(line
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
            let c = BigUint::parse_bytes(line.as_bytes(), 16).unwrap();
            assert!(&c < pair.n());
        }
    }

    #[test]
    fn test_blank_lines_skipped() {
        let pair = key_pair(128);
        let mut ciphertext = Vec::new();
        encrypt_stream(&b"hello"[..], &mut ciphertext, pair.public_key()).unwrap();

        let mut padded = b"\n".to_vec();
        padded.extend_from_slice(&ciphertext);
        padded.extend_from_slice(b"\n\n");

        let mut recovered = Vec::new();
        decrypt_stream(&padded[..], &mut recovered, pair.private_key()).unwrap();
        assert_eq!(recovered, b"hello");
    }

    #[test]
    fn test_wrong_key_fails() {
        let pair = key_pair(128);
        let mut rng = ChaCha8Rng::from_seed([9; 32]);
        let other = KeyPair::new(&mut rng, &KeygenOptions::new(128).with_iterations(5)).unwrap();

        let mut ciphertext = Vec::new();
        encrypt_stream(&[0x41u8; 40][..], &mut ciphertext, pair.public_key()).unwrap();

        let mut recovered = Vec::new();
        let res = decrypt_stream(&ciphertext[..], &mut recovered, other.private_key());
        assert!(matches!(res, Err(Error::Decryption)));
    }

    #[test]
    fn test_garbage_line() {
        let pair = key_pair(128);
        let mut recovered = Vec::new();
        let res = decrypt_stream(&b"not hex\n"[..], &mut recovered, pair.private_key());
        assert!(matches!(res, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_non_utf8_line() {
        let pair = key_pair(128);
        let mut recovered = Vec::new();
        let res = decrypt_stream(&[0xca, 0xfe, b'\n'][..], &mut recovered, pair.private_key());
        assert!(matches!(res, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_block_out_of_range() {
        let pair = key_pair(128);
        let line = format!("{:x}\n", pair.n());
        let mut recovered = Vec::new();
        let res = decrypt_stream(line.as_bytes(), &mut recovered, pair.private_key());
        assert!(matches!(res, Err(Error::Decryption)));
    }

    #[test]
    fn test_modulus_too_small() {
        // 3233 has 12 bits: one byte per block leaves no room for data
        let public = RsaPublicKey::new(BigUint::from(3233u32), BigUint::from(17u32));
        let private = RsaPrivateKey::new(BigUint::from(3233u32), BigUint::from(2753u32));

        let mut out = Vec::new();
        assert!(matches!(
            encrypt_stream(&b"x"[..], &mut out, &public),
            Err(Error::ModulusTooSmall)
        ));
        assert!(matches!(
            decrypt_stream(&b""[..], &mut out, &private),
            Err(Error::ModulusTooSmall)
        ));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_io_error_propagates() {
        let pair = key_pair(128);
        let res = encrypt_stream(&b"hello"[..], FailingWriter, pair.public_key());
        assert!(matches!(res, Err(Error::Io(ref err)) if err.kind() == ErrorKind::BrokenPipe));
    }

    /// Hands out at most one byte per read call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_short_reads_fill_blocks() {
        let pair = key_pair(128);
        let plaintext = [0x5au8; 50];

        let mut a = Vec::new();
        let mut b = Vec::new();
        encrypt_stream(Trickle(&plaintext), &mut a, pair.public_key()).unwrap();
        encrypt_stream(&plaintext[..], &mut b, pair.public_key()).unwrap();
        assert_eq!(a, b);
    }
}
