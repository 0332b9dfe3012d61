//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples session logic from system resources
//! (time, randomness, async sleep). This enables:
//!
//! - Deterministic simulation: a virtual clock and seeded RNG allow perfect
//!   bug reproduction.
//!
//! - Production runtime: Tokio implementations use real system resources
//!   without any code changes to the session logic.
//!
//! # Invariants
//!
//! - Monotonicity: `env.now()` must never go backwards
//! - Determinism: given the same seed, `random_bytes()` produces the same
//!   sequence
//! - Isolation: implementations must not share global state

use std::time::Duration;

use crate::clock::TickInstant;

/// Abstract environment providing time, randomness, and async sleep.
///
/// Session logic only ever consumes instants produced by `now()`, so a
/// simulated environment makes every schedule fully deterministic.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// 1. Time monotonicity: `now()` never goes backwards
/// 2. Minimal panics: methods are infallible except in exceptional
///    circumstances (e.g., OS entropy exhaustion)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Instant type produced by this environment's clock.
    type Instant: TickInstant;

    /// Returns the current time.
    ///
    /// # Invariants
    ///
    /// - Monotonicity: this method MUST return values that never decrease
    ///   within a single execution context. Subsequent calls must return
    ///   times >= previous calls.
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// This is the ONLY async method in the trait, and it should only be
    /// used by driver code (not session logic).
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;

    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Determinism during simulations: given the same RNG seed, this
    ///   produces the same sequence of bytes
    /// - Production implementations use the OS entropy pool
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    ///
    /// This is a convenience method for common use cases like minting
    /// attendance-code suffixes.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[derive(Clone)]
    struct CountingEnv;

    impl Environment for CountingEnv {
        type Instant = Instant;

        fn now(&self) -> Self::Instant {
            Instant::now()
        }

        fn sleep(&self, _duration: Duration) -> impl std::future::Future<Output = ()> + Send {
            std::future::ready(())
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            for (i, byte) in buffer.iter_mut().enumerate() {
                *byte = i as u8;
            }
        }
    }

    #[test]
    fn random_u64_uses_random_bytes() {
        let env = CountingEnv;

        // Bytes 00 01 02 03 04 05 06 07 interpreted big-endian
        assert_eq!(env.random_u64(), 0x0001_0203_0405_0607);
    }
}
