//! sloth-cli binary.
//!
//! # Usage
//!
//! ```bash
//! # Map a text seed to a compressed public key
//! sloth-cli --seed rainbow-sloth-test
//!
//! # Hex seed, uncompressed output, show which counter was accepted
//! sloth-cli --seed-hex 0000000000000000000000000000000000000000000000000000000000000000 \
//!     --format uncompressed --show-counter
//!
//! # Key store that only understands the compact representation
//! sloth-cli --seed rainbow-sloth-test --encoding compact
//! ```

use std::io::Write;

use clap::{ArgGroup, Parser};
use sloth_cli::{OutputFormat, SeedInput, render};
use sloth_rehash::{PointEncoding, RehashConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Deterministically map a seed to a P-256 public key
#[derive(Parser, Debug)]
#[command(name = "sloth-cli")]
#[command(about = "Deterministically map a seed to a P-256 public key")]
#[command(version)]
#[command(group(ArgGroup::new("seed_source").required(true).args(["seed", "seed_hex"])))]
struct Args {
    /// Seed as UTF-8 text
    #[arg(short, long)]
    seed: Option<String>,

    /// Seed as hex bytes
    #[arg(long)]
    seed_hex: Option<String>,

    /// Compressed point format understood by the key store (sec1, compact)
    #[arg(short, long, default_value = "sec1")]
    encoding: PointEncoding,

    /// Give up after this many attempts
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Output format for the key
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Compressed)]
    format: OutputFormat,

    /// Also print the accepted counter
    #[arg(long)]
    show_counter: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let seed = SeedInput::from_args(args.seed, args.seed_hex)?.into_bytes()?;
    let config = RehashConfig { encoding: args.encoding, max_attempts: args.max_attempts };

    let output = render(&seed, config, args.format, args.show_counter)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
        assert_eq!(Args::command().get_name(), "sloth-cli");
    }

    #[test]
    fn defaults_to_compressed_sec1() {
        let args = Args::try_parse_from(["sloth-cli", "--seed", "abc"]).unwrap();

        assert_eq!(args.format, OutputFormat::Compressed);
        assert_eq!(args.encoding, PointEncoding::Sec1Compressed);
        assert_eq!(args.max_attempts, None);
        assert!(!args.show_counter);
    }

    #[test]
    fn seed_sources_are_exclusive() {
        assert!(Args::try_parse_from(["sloth-cli"]).is_err());
        assert!(
            Args::try_parse_from(["sloth-cli", "--seed", "a", "--seed-hex", "61"]).is_err()
        );
    }
}
