//! Fault-injecting key importer.
//!
//! Hardware key stores can refuse a perfectly valid point. `ChaoticImporter`
//! reproduces that on demand so the `ImportFailure` retry path can be
//! exercised without a real key store.
//!
//! # Determinism
//!
//! Probabilistic faults draw from a ChaCha RNG seeded at construction, so a
//! failing run is reproduced by reusing its seed.

use std::sync::{Mutex, PoisonError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sloth_rehash::{KeyImporter, P256Importer, RejectReason, X963Point};

/// Reason attached to injected failures.
pub const INJECTED_FAULT: &str = "injected fault";

/// When to inject import failures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaultPlan {
    /// Never fail; pass everything through.
    None,
    /// Fail the first `n` imports, then pass through.
    FirstN(u32),
    /// Fail every import.
    Always,
    /// Fail each import independently with probability `rate`.
    Random {
        /// Failure probability, clamped to `[0, 1]`. NaN never fails.
        rate: f64,
        /// RNG seed.
        seed: u64,
    },
}

fn fault_probability(rate: f64) -> f64 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}

#[derive(Debug)]
struct ChaosState {
    calls: u32,
    injected: u32,
    rng: ChaCha8Rng,
}

/// Wraps an importer and refuses imports according to a [`FaultPlan`].
#[derive(Debug)]
pub struct ChaoticImporter<I = P256Importer> {
    inner: I,
    plan: FaultPlan,
    state: Mutex<ChaosState>,
}

impl<I: KeyImporter> ChaoticImporter<I> {
    /// Wraps `inner` with the given fault plan.
    pub fn new(inner: I, plan: FaultPlan) -> Self {
        let seed = match plan {
            FaultPlan::Random { seed, .. } => seed,
            _ => 0,
        };
        let state = ChaosState { calls: 0, injected: 0, rng: ChaCha8Rng::seed_from_u64(seed) };
        Self { inner, plan, state: Mutex::new(state) }
    }

    /// Number of import calls seen.
    pub fn calls(&self) -> u32 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).calls
    }

    /// Number of failures injected.
    pub fn injected(&self) -> u32 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).injected
    }
}

impl<I: KeyImporter> KeyImporter for ChaoticImporter<I> {
    type Key = I::Key;

    fn import(&self, point: &X963Point) -> Result<Self::Key, RejectReason> {
        let fail = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let index = state.calls;
            state.calls = state.calls.saturating_add(1);

            let fail = match self.plan {
                FaultPlan::None => false,
                FaultPlan::FirstN(n) => index < n,
                FaultPlan::Always => true,
                FaultPlan::Random { rate, .. } => state.rng.gen_bool(fault_probability(rate)),
            };
            if fail {
                state.injected = state.injected.saturating_add(1);
            }
            fail
        };

        if fail {
            return Err(RejectReason::ImportFailure { reason: INJECTED_FAULT.to_string() });
        }
        self.inner.import(point)
    }
}
