//! Simulated environment with a virtual clock and seeded randomness.
//!
//! `SimEnv` implements [`Environment`] entirely in memory: `now()` reads a
//! manually advanced clock, `sleep()` advances it instead of waiting, and
//! `random_bytes()` draws from a ChaCha stream seeded per test. A failing
//! run reproduces exactly from its seed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rollcall_core::{Environment, TickInstant};

/// A virtual instant measured as an offset from simulation start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimInstant(Duration);

impl SimInstant {
    /// The start of the simulation.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// An instant at the given offset from simulation start.
    #[must_use]
    pub fn at(offset: Duration) -> Self {
        Self(offset)
    }

    /// Offset from simulation start.
    #[must_use]
    pub fn offset(self) -> Duration {
        self.0
    }
}

impl TickInstant for SimInstant {
    fn advance(self, period: Duration) -> Self {
        Self(self.0.saturating_add(period))
    }

    fn saturating_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Deterministic environment for simulation tests.
///
/// Clones share the clock and the RNG, so a driver holding one clone and a
/// test holding another observe the same timeline. `sleep()` advances the
/// clock by the requested duration and resolves immediately, which lets
/// async drivers run to completion in microseconds of wall time.
#[derive(Clone)]
pub struct SimEnv {
    clock: Arc<Mutex<Duration>>,
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl SimEnv {
    /// Creates an environment whose RNG is seeded for reproducibility.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            clock: Arc::new(Mutex::new(Duration::ZERO)),
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    /// Advances the virtual clock.
    pub fn advance(&self, duration: Duration) {
        let mut clock = lock(&self.clock);
        *clock = clock.saturating_add(duration);
    }

    /// Virtual time elapsed since simulation start.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *lock(&self.clock)
    }
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Environment for SimEnv {
    type Instant = SimInstant;

    fn now(&self) -> Self::Instant {
        SimInstant::at(*lock(&self.clock))
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        self.advance(duration);
        std::future::ready(())
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        lock(&self.rng).fill_bytes(buffer);
    }
}

// Both fields are plain values, so a poisoned lock still holds usable state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
