//! Deterministic seed to P-256 public key mapping.
//!
//! Maps an arbitrary byte string to a point on NIST P-256 that is usable as a
//! public key. The same seed yields the same key on every platform, with no
//! randomness involved.
//!
//! # Construction
//!
//! This is rejection sampling over HKDF output, not the IETF hash-to-curve
//! SSWU map. The byte layout is fixed and must not change, since keys derived
//! today have to be re-derivable later.
//!
//! ```text
//! counter = 0
//! loop:
//!     okm       = HKDF-SHA256(salt = "", ikm = seed || be32(counter), info = "", L = 33)
//!     okm[0]    = 0x02 | (okm[0] & 0x01)
//!     point     = decode_compressed(okm)   ── not on curve ──► counter += 1
//!     key       = import(point)            ── refused ───────► counter += 1
//!     return key
//! ```
//!
//! About half of all x-coordinates are on the curve, so two attempts are
//! expected.
//!
//! # Collaborators
//!
//! The loop depends on three narrow capabilities, each a trait:
//!
//! - [`KeyDerivation`]: HKDF in production ([`HkdfSha256`])
//! - [`PointDecoder`]: SEC1 or compact decoding, picked once via
//!   [`PointEncoding`]
//! - [`KeyImporter`]: turns the decoded point into a key handle
//!   ([`P256Importer`] for in-memory [`p256::PublicKey`])
//!
//! # Example
//!
//! ```
//! use sloth_rehash::{P256Rehasher, RehashConfig};
//!
//! let rehasher = P256Rehasher::p256(RehashConfig::default());
//! let first = rehasher.rehash(b"rainbow-sloth-test")?;
//! let second = rehasher.rehash(b"rainbow-sloth-test")?;
//!
//! assert_eq!(first.key, second.key);
//! assert_eq!(first.counter, second.counter);
//! # Ok::<(), sloth_rehash::RehashError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod candidate;
pub mod decode;
pub mod error;
pub mod import;
pub mod kdf;
pub mod rehash;

pub use candidate::{
    CandidateEncoding, DERIVED_LEN, DerivedMaterial, build_candidate, derivation_input, derive,
};
pub use decode::{
    CompactDecoder, ParseEncodingError, PointDecoder, PointEncoding, Sec1Decoder, X963_LEN,
    X963Point,
};
pub use error::{KdfError, RehashError, RejectReason};
pub use import::{KeyImporter, P256Importer};
pub use kdf::{HkdfSha256, KeyDerivation};
pub use rehash::{
    Attempt, MAX_RECORDED_REJECTIONS, P256Rehasher, RehashConfig, Rehashed, Rehasher, Rejection,
    rehash_to_p256,
};
