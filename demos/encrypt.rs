//! Encrypts a file under a public key after checking its signed identity.

mod common;

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use textbook_rsa::traits::{ModulusParts, PublicKeyParts};
use textbook_rsa::{encrypt_stream, load_public_key};

/// Encrypts data with an RSA public key
#[derive(Parser, Debug)]
#[command(name = "encrypt")]
#[command(version)]
struct Args {
    /// Plaintext input (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Ciphertext output (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Public key file
    #[arg(short = 'n', long, default_value = "rsa.pub")]
    key: PathBuf,

    /// Print the key and stream totals
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    common::init_logging(args.verbose);

    let record = load_public_key(File::open(&args.key)?)?;
    if args.verbose {
        eprintln!("user = {}", record.identity());
        eprintln!("s ({} bits) = {}", record.signature().bits(), record.signature());
        eprintln!("n ({} bits) = {}", record.n().bits(), record.n());
        eprintln!("e ({} bits) = {}", record.e().bits(), record.e());
    }

    if !record.verify_identity()? {
        return Err(format!("signature for {:?} does not verify", record.identity()).into());
    }

    let input = common::input(args.input.as_ref())?;
    let output = common::output(args.output.as_ref())?;
    let stats = encrypt_stream(input, output, &record)?;

    if args.verbose {
        eprintln!("{} bytes in {} blocks", stats.bytes, stats.blocks);
    }

    Ok(())
}
