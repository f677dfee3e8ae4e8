//! Test harness for `sloth-rehash`.
//!
//! Instrumented and fault-injecting collaborators, plus the conformance
//! vectors and seed corpora the property suites run against.
//!
//! - [`RecordingKdf`]: records every derivation input, so counter sequences
//!   can be checked from the outside
//! - [`ChaoticImporter`]: refuses imports on a [`FaultPlan`], driving the
//!   `ImportFailure` retry path
//! - [`AttemptStats`]: distribution of accepted counters over a corpus
//! - [`VECTORS`]: cross-implementation conformance vectors

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chaotic;
pub mod conformance;
pub mod recording;
pub mod stats;

pub use chaotic::{ChaoticImporter, FaultPlan, INJECTED_FAULT};
pub use conformance::{ConformanceVector, VECTORS, VectorReport};
pub use recording::{KdfCall, RecordingKdf};
pub use stats::{AttemptStats, corpus, corpus_seed};
