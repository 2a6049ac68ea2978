//! Generates a key pair, signs the current user name and writes `rsa.pub`
//! and `rsa.priv`.

mod common;

use std::path::PathBuf;

use clap::Parser;
use textbook_rsa::traits::{ModulusParts, PrivateKeyParts, PublicKeyParts};
use textbook_rsa::{
    generate_keypair, write_private_key, write_public_key, KeygenOptions, RandState,
    DEFAULT_BITS, DEFAULT_ITERATIONS,
};

/// Generates an RSA public/private key pair
#[derive(Parser, Debug)]
#[command(name = "keygen")]
#[command(version)]
struct Args {
    /// Bit length of the modulus
    #[arg(short, long, default_value_t = DEFAULT_BITS)]
    bits: usize,

    /// Miller-Rabin rounds per prime candidate
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Public key file
    #[arg(short = 'n', long, default_value = "rsa.pub")]
    public: PathBuf,

    /// Private key file
    #[arg(short = 'd', long, default_value = "rsa.priv")]
    private: PathBuf,

    /// Random seed (default: seconds since the Unix epoch)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the generated values
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    common::init_logging(args.verbose);

    let mut rng = match args.seed {
        Some(seed) => RandState::new(seed),
        None => RandState::from_time(),
    };
    let options = KeygenOptions::new(args.bits).with_iterations(args.iterations);
    let pair = generate_keypair(&mut rng, &options)?;

    let user = std::env::var("USER").unwrap_or_else(|_| String::from("nobody"));
    let record = pair.public_record(&user)?;

    write_public_key(&record, common::create_private(&args.public)?)?;
    write_private_key(pair.private_key(), common::create_private(&args.private)?)?;

    if args.verbose {
        eprintln!("seed = {}", rng.seed());
        eprintln!("user = {}", record.identity());
        for (name, value) in [
            ("s", record.signature()),
            ("p", pair.p()),
            ("q", pair.q()),
            ("n", pair.n()),
            ("e", pair.e()),
            ("d", pair.d()),
        ] {
            eprintln!("{} ({} bits) = {}", name, value.bits(), value);
        }
    }

    Ok(())
}
