//! Attempt-count statistics over seed corpora.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

/// Domain label for the statistics corpus.
const CORPUS_LABEL: &[u8] = b"sloth-stats";

/// The `index`th seed of the statistics corpus:
/// `SHA-256("sloth-stats" || be32(index))`.
pub fn corpus_seed(index: u32) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(CORPUS_LABEL);
    hasher.update(index.to_be_bytes());
    hasher.finalize().into()
}

/// The first `len` seeds of the statistics corpus.
pub fn corpus(len: u32) -> impl Iterator<Item = [u8; 32]> {
    (0..len).map(corpus_seed)
}

/// Distribution of accepted counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttemptStats {
    /// Number of rehash calls observed.
    pub samples: usize,
    /// Sum of accepted counters.
    pub counter_sum: u64,
    /// Largest accepted counter.
    pub max_counter: u32,
    /// Accepted counter to number of seeds.
    pub histogram: BTreeMap<u32, usize>,
}

impl AttemptStats {
    /// Records one accepted counter.
    pub fn record(&mut self, counter: u32) {
        self.samples += 1;
        self.counter_sum += u64::from(counter);
        self.max_counter = self.max_counter.max(counter);
        *self.histogram.entry(counter).or_default() += 1;
    }

    /// Mean accepted counter, or `None` with no samples.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_counter(&self) -> Option<f64> {
        (self.samples > 0).then(|| self.counter_sum as f64 / self.samples as f64)
    }

    /// Fraction of seeds accepted at counter 0.
    #[allow(clippy::cast_precision_loss)]
    pub fn first_try_rate(&self) -> Option<f64> {
        let first = self.histogram.get(&0).copied().unwrap_or(0);
        (self.samples > 0).then(|| first as f64 / self.samples as f64)
    }
}

impl FromIterator<u32> for AttemptStats {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        let mut stats = Self::default();
        for counter in iter {
            stats.record(counter);
        }
        stats
    }
}
