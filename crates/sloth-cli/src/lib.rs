//! Command-line front end for `sloth-rehash`.
//!
//! Everything except argument parsing and subscriber setup lives here, so the
//! output format can be tested without spawning the binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use clap::ValueEnum;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use sloth_rehash::{P256Rehasher, RehashConfig, RehashError};
use thiserror::Error;

/// Errors from the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// The hex seed could not be decoded.
    #[error("invalid hex seed: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Neither or both seed sources were given.
    #[error("exactly one of --seed or --seed-hex is required")]
    MissingSeed,

    /// Rehashing failed.
    #[error(transparent)]
    Rehash(#[from] RehashError),
}

/// How to print the resulting key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// 33-byte SEC1 compressed point.
    #[default]
    Compressed,
    /// 65-byte X9.63 uncompressed point.
    Uncompressed,
}

/// Where the seed bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedInput {
    /// UTF-8 text, used verbatim.
    Text(String),
    /// Hex-encoded bytes.
    Hex(String),
}

impl SeedInput {
    /// Picks the seed source from the two optional arguments.
    pub fn from_args(text: Option<String>, hex: Option<String>) -> Result<Self, CliError> {
        match (text, hex) {
            (Some(text), None) => Ok(Self::Text(text)),
            (None, Some(hex)) => Ok(Self::Hex(hex)),
            _ => Err(CliError::MissingSeed),
        }
    }

    /// The seed bytes.
    pub fn into_bytes(self) -> Result<Vec<u8>, CliError> {
        match self {
            Self::Text(text) => Ok(text.into_bytes()),
            Self::Hex(hex) => {
                let hex = hex.trim();
                Ok(hex::decode(hex.strip_prefix("0x").unwrap_or(hex))?)
            },
        }
    }
}

/// Rehashes `seed` and renders the key, plus the counter when asked.
pub fn render(
    seed: &[u8],
    config: RehashConfig,
    format: OutputFormat,
    show_counter: bool,
) -> Result<String, CliError> {
    tracing::debug!(
        seed_len = seed.len(),
        encoding = %config.encoding,
        max_attempts = ?config.max_attempts,
        "rehashing seed"
    );

    let rehashed = P256Rehasher::p256(config).rehash(seed)?;
    let encoded = rehashed.key.to_encoded_point(format == OutputFormat::Compressed);
    let key = hex::encode(encoded.as_bytes());

    if show_counter { Ok(format!("{key}\ncounter={}", rehashed.counter)) } else { Ok(key) }
}
