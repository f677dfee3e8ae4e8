//! Public key import.
//!
//! The last step of each attempt hands the decoded point to whatever will
//! hold the key. A hardware key store may refuse a point for its own reasons,
//! so import can fail independently of decoding.

use p256::PublicKey;

use crate::{decode::X963Point, error::RejectReason};

/// Imports a decoded point as a usable public key.
pub trait KeyImporter {
    /// Key handle produced on success.
    type Key;

    /// Imports `point`, or explains why it was refused.
    fn import(&self, point: &X963Point) -> Result<Self::Key, RejectReason>;
}

impl<T: KeyImporter + ?Sized> KeyImporter for &T {
    type Key = T::Key;

    fn import(&self, point: &X963Point) -> Result<Self::Key, RejectReason> {
        (**self).import(point)
    }
}

/// Imports points as in-memory [`p256::PublicKey`] values.
///
/// Validates the SEC1 encoding and that the point is on the curve and not
/// the identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct P256Importer;

impl KeyImporter for P256Importer {
    type Key = PublicKey;

    fn import(&self, point: &X963Point) -> Result<PublicKey, RejectReason> {
        PublicKey::from_sec1_bytes(point.as_bytes())
            .map_err(|e| RejectReason::ImportFailure { reason: e.to_string() })
    }
}
