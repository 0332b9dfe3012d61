//! Instant abstraction for rotation deadlines.
//!
//! The display state machine never reads a clock; it compares instants
//! handed to it by the caller. Abstracting the instant type lets the same
//! machine run on real time in production and on virtual time in tests,
//! where advancing the clock is a plain integer addition.

use std::time::Duration;

/// A point in time used for rotation deadlines.
///
/// Implemented for [`std::time::Instant`] in production; simulation
/// environments substitute virtual instants so schedules can be exercised
/// without wall-clock waits.
pub trait TickInstant: Copy + Ord + Send + Sync + std::fmt::Debug + 'static {
    /// This instant shifted forward by `period`, saturating on overflow.
    #[must_use]
    fn advance(self, period: Duration) -> Self;

    /// Elapsed time since `earlier`, zero if `earlier` is not earlier.
    #[must_use]
    fn saturating_since(self, earlier: Self) -> Duration;
}

impl TickInstant for std::time::Instant {
    fn advance(self, period: Duration) -> Self {
        self.checked_add(period).unwrap_or(self)
    }

    fn saturating_since(self, earlier: Self) -> Duration {
        self.saturating_duration_since(earlier)
    }
}
