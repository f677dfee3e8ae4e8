//! Key-derivation primitive.
//!
//! The rehash loop only needs "expand these bytes into N pseudorandom bytes".
//! [`KeyDerivation`] captures that contract so callers can substitute an
//! instrumented implementation in tests; [`HkdfSha256`] is the production one.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::KdfError;

/// Largest output HKDF-SHA256 can expand to (255 blocks of 32 bytes).
pub const HKDF_SHA256_MAX_OUTPUT: usize = 255 * 32;

/// Extract-and-expand key derivation.
///
/// # Invariants
///
/// - Determinism: identical `(salt, ikm, info, okm.len())` always fill `okm`
///   with identical bytes
/// - Empty salt and empty info are valid inputs and are used as-is, never
///   replaced by a default value
pub trait KeyDerivation {
    /// Fills `okm` with key material derived from the inputs.
    fn derive_bytes(
        &self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        okm: &mut [u8],
    ) -> Result<(), KdfError>;
}

/// HKDF with SHA-256 (RFC 5869).
#[derive(Debug, Clone, Copy, Default)]
pub struct HkdfSha256;

impl KeyDerivation for HkdfSha256 {
    fn derive_bytes(
        &self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        okm: &mut [u8],
    ) -> Result<(), KdfError> {
        let requested = okm.len();
        let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
        hk.expand(info, okm)
            .map_err(|_| KdfError::OutputTooLong { requested, max: HKDF_SHA256_MAX_OUTPUT })
    }
}

impl<T: KeyDerivation + ?Sized> KeyDerivation for &T {
    fn derive_bytes(
        &self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        okm: &mut [u8],
    ) -> Result<(), KdfError> {
        (**self).derive_bytes(salt, ikm, info, okm)
    }
}
