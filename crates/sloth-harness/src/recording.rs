//! KDF wrapper that records every input it is asked to expand.

use std::sync::{Mutex, PoisonError};

use sloth_rehash::{HkdfSha256, KdfError, KeyDerivation};

/// One recorded KDF call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KdfCall {
    /// Salt passed to the KDF.
    pub salt: Vec<u8>,
    /// Input keying material.
    pub ikm: Vec<u8>,
    /// Context string.
    pub info: Vec<u8>,
    /// Requested output length.
    pub output_len: usize,
}

impl KdfCall {
    /// Trailing big-endian counter of a rehash derivation input.
    ///
    /// Returns `None` if the input is shorter than four bytes.
    pub fn counter(&self) -> Option<u32> {
        let tail = self.ikm.len().checked_sub(4).map(|start| &self.ikm[start..])?;
        tail.try_into().ok().map(u32::from_be_bytes)
    }
}

/// Delegates to an inner KDF and records each call in order.
#[derive(Debug, Default)]
pub struct RecordingKdf<K = HkdfSha256> {
    inner: K,
    calls: Mutex<Vec<KdfCall>>,
}

impl<K: KeyDerivation> RecordingKdf<K> {
    /// Wraps `inner`.
    pub fn new(inner: K) -> Self {
        Self { inner, calls: Mutex::new(Vec::new()) }
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<KdfCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Counters of all calls so far, in call order.
    pub fn counters(&self) -> Vec<Option<u32>> {
        self.calls().iter().map(KdfCall::counter).collect()
    }

    /// Forgets recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl<K: KeyDerivation> KeyDerivation for RecordingKdf<K> {
    fn derive_bytes(
        &self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        okm: &mut [u8],
    ) -> Result<(), KdfError> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(KdfCall {
            salt: salt.to_vec(),
            ikm: ikm.to_vec(),
            info: info.to_vec(),
            output_len: okm.len(),
        });
        self.inner.derive_bytes(salt, ikm, info, okm)
    }
}
