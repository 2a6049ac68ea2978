//! Decrypts a ciphertext stream with a private key.

mod common;

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use textbook_rsa::traits::{ModulusParts, PrivateKeyParts};
use textbook_rsa::{decrypt_stream, load_private_key};

/// Decrypts data with an RSA private key
#[derive(Parser, Debug)]
#[command(name = "decrypt")]
#[command(version)]
struct Args {
    /// Ciphertext input (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Plaintext output (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Private key file
    #[arg(short = 'n', long, default_value = "rsa.priv")]
    key: PathBuf,

    /// Print the key and stream totals
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    common::init_logging(args.verbose);

    let key = load_private_key(File::open(&args.key)?)?;
    if args.verbose {
        eprintln!("n ({} bits) = {}", key.n().bits(), key.n());
        eprintln!("d ({} bits) = {}", key.d().bits(), key.d());
    }

    let input = common::input(args.input.as_ref())?;
    let output = common::output(args.output.as_ref())?;
    let stats = decrypt_stream(input, output, &key)?;

    if args.verbose {
        eprintln!("{} bytes in {} blocks", stats.bytes, stats.blocks);
    }

    Ok(())
}
