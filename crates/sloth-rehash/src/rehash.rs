//! Rejection-sampling loop mapping a seed to a P-256 public key.
//!
//! # State Machine
//!
//! ```text
//!              rejected (counter + 1)
//!                  ┌──────┐
//!                  ▼      │
//! start ──► SEARCHING(counter) ──accepted──► FOUND(key)
//!                  │
//!                  └── ceiling reached ──► AttemptsExhausted
//! ```
//!
//! Each attempt derives fresh key material from `seed || be32(counter)`,
//! forces the leading byte into a compressed point tag, decodes, and imports.
//! A rejection at any stage moves to the next counter. Roughly half of all
//! attempts succeed, so the expected number of attempts is two.
//!
//! # Invariants
//!
//! - Determinism: the same seed and collaborators always produce the same key
//!   at the same counter
//! - Counter sequence: counters tried are exactly `0, 1, 2, ...` with no skips
//! - No wrap: the counter never wraps; exhausting `u32` is a fatal error
//! - Bounded memory: at most [`MAX_RECORDED_REJECTIONS`] rejections are kept,
//!   however many attempts the search takes

use p256::PublicKey;

use crate::{
    candidate::{build_candidate, derive},
    decode::{PointDecoder, PointEncoding},
    error::{KdfError, RehashError, RejectReason},
    import::{KeyImporter, P256Importer},
    kdf::{HkdfSha256, KeyDerivation},
};

/// Rejections kept in [`Rehashed::rejections`]. Later ones are only counted,
/// through [`Rehashed::counter`].
pub const MAX_RECORDED_REJECTIONS: usize = 256;

/// Rehash configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RehashConfig {
    /// Compressed format understood by the key store.
    pub encoding: PointEncoding,
    /// Stop after this many attempts. `None` is bounded only by the counter
    /// space.
    pub max_attempts: Option<u32>,
}

impl RehashConfig {
    /// Sets the point encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: PointEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the attempt ceiling.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Outcome of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<K> {
    /// The candidate decoded and imported.
    Found(K),
    /// The candidate was discarded.
    Rejected(RejectReason),
}

/// A rejected attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Counter of the rejected attempt.
    pub counter: u32,
    /// Why it was rejected.
    pub reason: RejectReason,
}

/// Result of a successful rehash.
#[derive(Debug, Clone)]
pub struct Rehashed<K> {
    /// The imported key.
    pub key: K,
    /// Counter of the accepted attempt.
    pub counter: u32,
    /// Rejected attempts in counter order, starting at counter 0 and capped
    /// at [`MAX_RECORDED_REJECTIONS`]. Every counter below `counter` was
    /// rejected.
    pub rejections: Vec<Rejection>,
}

impl<K> Rehashed<K> {
    /// Total attempts made, including the accepted one.
    pub fn attempts(&self) -> u64 {
        u64::from(self.counter) + 1
    }
}

/// Maps seeds to public keys using pluggable collaborators.
///
/// - `K`: key derivation ([`HkdfSha256`] in production)
/// - `D`: point decoding, selected by [`PointEncoding`]
/// - `I`: key import ([`P256Importer`] for in-memory keys)
#[derive(Debug)]
pub struct Rehasher<K, D, I> {
    kdf: K,
    decoder: D,
    importer: I,
    max_attempts: Option<u32>,
}

/// The default stack: HKDF-SHA256, a start-up selected decoder, and
/// [`p256::PublicKey`] import.
pub type P256Rehasher = Rehasher<HkdfSha256, Box<dyn PointDecoder + Send + Sync>, P256Importer>;

impl P256Rehasher {
    /// Builds the default stack from `config`.
    pub fn p256(config: RehashConfig) -> Self {
        Rehasher::new(HkdfSha256, config.encoding.decoder(), P256Importer)
            .with_max_attempts(config.max_attempts)
    }
}

impl<K, D, I> Rehasher<K, D, I>
where
    K: KeyDerivation,
    D: PointDecoder,
    I: KeyImporter,
{
    /// Creates a rehasher with no attempt ceiling.
    pub fn new(kdf: K, decoder: D, importer: I) -> Self {
        Self { kdf, decoder, importer, max_attempts: None }
    }

    /// Sets or clears the attempt ceiling.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// The key-derivation collaborator.
    pub fn kdf(&self) -> &K {
        &self.kdf
    }

    /// The decoding collaborator.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// The import collaborator.
    pub fn importer(&self) -> &I {
        &self.importer
    }

    /// Runs a single attempt at `counter`.
    ///
    /// Rejection is an ordinary outcome and comes back as
    /// [`Attempt::Rejected`]. Only a KDF failure is an error.
    pub fn attempt(&self, seed: &[u8], counter: u32) -> Result<Attempt<I::Key>, KdfError> {
        let candidate = build_candidate(derive(&self.kdf, seed, counter)?);

        let outcome =
            self.decoder.decode(&candidate).and_then(|point| self.importer.import(&point));

        Ok(match outcome {
            Ok(key) => Attempt::Found(key),
            Err(reason) => Attempt::Rejected(reason),
        })
    }

    /// Maps `seed` to a public key.
    ///
    /// Tries counters `0, 1, 2, ...` until an attempt is accepted. Fails only
    /// when the attempt ceiling is reached or the counter space runs out.
    pub fn rehash(&self, seed: &[u8]) -> Result<Rehashed<I::Key>, RehashError> {
        let mut counter: u32 = 0;
        let mut rejections = Vec::new();

        loop {
            if self.max_attempts.is_some_and(|max| counter >= max) {
                return Err(self.exhausted(u64::from(counter)));
            }

            match self.attempt(seed, counter)? {
                Attempt::Found(key) => {
                    tracing::debug!(counter, "accepted candidate");
                    return Ok(Rehashed { key, counter, rejections });
                },
                Attempt::Rejected(reason) => {
                    tracing::trace!(counter, %reason, "rejected candidate");
                    if rejections.len() < MAX_RECORDED_REJECTIONS {
                        rejections.push(Rejection { counter, reason });
                    }
                },
            }

            counter = match counter.checked_add(1) {
                Some(next) => next,
                None => return Err(self.exhausted(u64::from(u32::MAX) + 1)),
            };
        }
    }

    fn exhausted(&self, attempts: u64) -> RehashError {
        tracing::warn!(attempts, max_attempts = ?self.max_attempts, "no valid curve point found");
        RehashError::AttemptsExhausted { attempts }
    }
}

/// Maps `seed` to a P-256 public key with the default configuration.
///
/// Equivalent to `P256Rehasher::p256(RehashConfig::default())`.
pub fn rehash_to_p256(seed: &[u8]) -> Result<PublicKey, RehashError> {
    P256Rehasher::p256(RehashConfig::default()).rehash(seed).map(|rehashed| rehashed.key)
}
