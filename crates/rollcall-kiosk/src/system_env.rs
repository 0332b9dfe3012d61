//! Production environment backed by the system clock and OS entropy.

use std::time::Duration;

use rollcall_core::Environment;

/// Production environment backed by system time and the OS RNG.
///
/// This implementation:
/// - Uses `std::time::Instant::now()` for time
/// - Uses `tokio::time::sleep()` for async sleeping
/// - Uses `getrandom` for randomness
///
/// Attendance-code suffixes are minted from this randomness, so the OS
/// entropy source is the right tier.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).unwrap_or_else(|e| {
            // Entropy failure is survivable; codes minted from zeros are predictable
            tracing::error!("System RNG failed: {}", e);
            buffer.fill(0);
        });
    }
}
