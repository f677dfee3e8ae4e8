//! Error types for seed rehashing.
//!
//! Two families live here. [`RejectReason`] describes why a single candidate
//! was discarded; the retry loop consumes these and never returns them to the
//! caller. [`RehashError`] is the fatal family that ends a rehash call.

use thiserror::Error;

/// Errors from the key-derivation primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KdfError {
    /// Requested more output than the KDF can expand to.
    #[error("requested {requested} bytes of key material, at most {max} available")]
    OutputTooLong {
        /// Number of bytes requested.
        requested: usize,
        /// Ceiling for this KDF.
        max: usize,
    },
}

/// Why a candidate point was rejected.
///
/// Rejections are expected outcomes of rejection sampling: roughly half of all
/// candidates fail decoding. The retry loop records them and advances the
/// counter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The x-coordinate does not correspond to a point on P-256.
    ///
    /// Either the value is not below the field prime, or `x^3 - 3x + b` is
    /// not a quadratic residue.
    #[error("x-coordinate is not on the curve")]
    InvalidCurvePoint,

    /// The decoded point was refused by the key importer.
    #[error("key import failed: {reason}")]
    ImportFailure {
        /// Description from the importer.
        reason: String,
    },
}

/// Fatal errors from a rehash call.
///
/// Neither variant occurs with the default HKDF-SHA256 stack and no attempt
/// ceiling, short of the counter space being exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RehashError {
    /// The attempt ceiling was reached without an accepted candidate.
    ///
    /// Raised when the configured `max_attempts` is hit, or when the counter
    /// would have to wrap past `u32::MAX`.
    #[error("no valid curve point after {attempts} attempts")]
    AttemptsExhausted {
        /// Number of candidates tried.
        attempts: u64,
    },

    /// The key-derivation primitive failed.
    #[error("key derivation failed: {0}")]
    Kdf(#[from] KdfError),
}
