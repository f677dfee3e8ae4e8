//! Per-attempt derivation and candidate construction.
//!
//! ```text
//! seed || be32(counter)
//!        │
//!        ▼
//! HKDF-SHA256 (salt = "", info = "", L = 33) → DerivedMaterial
//!        │
//!        ▼
//! byte 0 := 0x02 | (byte 0 & 0x01)         → CandidateEncoding
//! ```
//!
//! The candidate is a syntactically valid SEC1 compressed point. Whether it
//! names an actual curve point is decided later by a
//! [`PointDecoder`](crate::decode::PointDecoder).

use crate::{error::KdfError, kdf::KeyDerivation};

/// Length of the per-attempt key material and of a compressed point.
pub const DERIVED_LEN: usize = 33;

/// Length of a P-256 field element encoding.
pub const COORDINATE_LEN: usize = 32;

/// Compressed point tag selecting the even y-coordinate.
pub const TAG_EVEN_Y: u8 = 0x02;

/// Compressed point tag selecting the odd y-coordinate.
pub const TAG_ODD_Y: u8 = 0x03;

const SALT: &[u8] = b"";
const INFO: &[u8] = b"";

/// Builds the KDF input for one attempt: `seed || be32(counter)`.
pub fn derivation_input(seed: &[u8], counter: u32) -> Vec<u8> {
    let mut input = Vec::with_capacity(seed.len() + 4);
    input.extend_from_slice(seed);
    input.extend_from_slice(&counter.to_be_bytes());
    input
}

/// Raw KDF output for a single attempt.
///
/// Consumed by [`build_candidate`]; never reused across attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedMaterial([u8; DERIVED_LEN]);

impl DerivedMaterial {
    /// Wraps raw bytes.
    pub fn from_bytes(bytes: [u8; DERIVED_LEN]) -> Self {
        Self(bytes)
    }

    /// The derived bytes.
    pub fn as_bytes(&self) -> &[u8; DERIVED_LEN] {
        &self.0
    }
}

/// Derives the key material for attempt `counter`.
///
/// Fails only if the KDF refuses a 33-byte output, which HKDF never does.
pub fn derive<K: KeyDerivation + ?Sized>(
    kdf: &K,
    seed: &[u8],
    counter: u32,
) -> Result<DerivedMaterial, KdfError> {
    let input = derivation_input(seed, counter);
    let mut okm = [0u8; DERIVED_LEN];
    kdf.derive_bytes(SALT, &input, INFO, &mut okm)?;
    Ok(DerivedMaterial(okm))
}

/// A compressed point encoding whose tag is always `0x02` or `0x03`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEncoding([u8; DERIVED_LEN]);

impl CandidateEncoding {
    /// The full 33-byte encoding.
    pub fn as_bytes(&self) -> &[u8; DERIVED_LEN] {
        &self.0
    }

    /// The tag byte, `0x02` or `0x03`.
    pub fn tag(&self) -> u8 {
        self.0[0]
    }

    /// Whether the tag selects the odd y-coordinate.
    pub fn odd_y(&self) -> bool {
        self.tag() == TAG_ODD_Y
    }

    /// The big-endian x-coordinate.
    pub fn x_coordinate(&self) -> &[u8] {
        &self.0[1..]
    }
}

/// Forces the leading byte of `derived` into a compressed point tag.
///
/// Only the low bit of the original leading byte survives; bytes 1..33 pass
/// through unchanged.
pub fn build_candidate(derived: DerivedMaterial) -> CandidateEncoding {
    let mut bytes = derived.0;
    bytes[0] = TAG_EVEN_Y | (bytes[0] & 0x01);
    CandidateEncoding(bytes)
}
