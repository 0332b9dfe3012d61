//! Fuzz target for the [`RotatingDisplay`] state machine
//!
//! Prevent schedule corruption via invalid event sequences
//!
//! # Strategy
//!
//! - Event sequences: Arbitrary interleavings of refresh, tick, restart,
//!   and stop with arbitrary clock advances
//! - Time probing: Ticks before, at, and far beyond the armed deadline
//! - Config probing: Empty tokens, zero sizes, zero periods through start
//!   and restart
//!
//! # Invariants
//!
//! - An accepted tick advances the epoch by exactly 1; a nonzero epoch
//!   never decreases except through restart
//! - A tick before the armed deadline is a no-op
//! - `stop` is terminal: no action is ever produced afterwards
//! - A failed `restart` leaves the session untouched
//! - NEVER panic on any event sequence

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rollcall_core::{DisplayConfig, RotatingDisplay, TickInstant};

/// Represents time as whole seconds since epoch 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FuzzInstant(u64);

impl TickInstant for FuzzInstant {
    fn advance(self, period: Duration) -> Self {
        Self(self.0.saturating_add(period.as_secs()))
    }

    fn saturating_since(self, earlier: Self) -> Duration {
        Duration::from_secs(self.0.saturating_sub(earlier.0))
    }
}

#[derive(Debug, Clone, Arbitrary)]
enum DisplayEvent {
    Refresh { advance_secs: u8 },
    Tick { advance_secs: u8 },
    Restart { token_len: u8, size: u32, period_secs: u8 },
    Stop,
}

/// Fuzz input: initial configuration plus an event sequence.
#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    /// Length of the initial token (zero exercises the validation path).
    token_len: u8,
    /// Initial artifact size.
    size: u32,
    /// Initial rotation period in seconds.
    period_secs: u8,
    /// Event sequence to process.
    events: Vec<DisplayEvent>,
}

fn token_of_len(len: u8) -> String {
    "T".repeat(usize::from(len % 32))
}

fn config_from(token_len: u8, size: u32, period_secs: u8) -> DisplayConfig {
    DisplayConfig {
        token: token_of_len(token_len),
        size,
        rotation_period: (period_secs > 0).then(|| Duration::from_secs(u64::from(period_secs))),
    }
}

fuzz_target!(|input: FuzzInput| {
    let config = config_from(input.token_len, input.size, input.period_secs);
    let config_valid = !config.token.is_empty() && config.size > 0;

    let mut display = match RotatingDisplay::<FuzzInstant>::start(config) {
        Ok(display) => {
            assert!(config_valid, "start accepted an invalid configuration");
            display
        },
        Err(_) => {
            assert!(!config_valid, "start rejected a valid configuration");
            return;
        },
    };

    let mut now = FuzzInstant(0);

    for event in input.events {
        let epoch_before = display.epoch();
        let stopped_before = display.is_stopped();
        let deadline_before = display.next_rotation();

        match event {
            DisplayEvent::Refresh { advance_secs } => {
                now = now.advance(Duration::from_secs(u64::from(advance_secs)));
                let actions = display.refresh(now);

                if stopped_before {
                    assert!(actions.is_empty(), "stopped session produced actions on refresh");
                }
                assert_eq!(display.epoch(), epoch_before, "refresh advanced the epoch");
            },

            DisplayEvent::Tick { advance_secs } => {
                now = now.advance(Duration::from_secs(u64::from(advance_secs)));
                let actions = display.tick(now);

                if stopped_before {
                    assert!(actions.is_empty(), "stopped session produced actions on tick");
                }

                // A deadline is armed only while live and ready, and is
                // cleared by stop, so reaching it is the whole acceptance
                // condition
                match deadline_before {
                    Some(deadline) if now >= deadline => {
                        assert_eq!(
                            display.epoch(),
                            epoch_before + 1,
                            "accepted tick must advance the epoch by exactly 1"
                        );
                        assert_eq!(actions.len(), 1, "accepted tick must present exactly once");
                    },
                    _ => {
                        assert_eq!(display.epoch(), epoch_before, "rejected tick moved the epoch");
                        assert!(actions.is_empty(), "rejected tick produced actions");
                    },
                }
            },

            DisplayEvent::Restart { token_len, size, period_secs } => {
                let config = config_from(token_len, size, period_secs);
                let restart_valid = !config.token.is_empty() && config.size > 0;

                match display.restart(config) {
                    Ok(()) => {
                        assert!(restart_valid, "restart accepted an invalid configuration");
                        assert_eq!(display.epoch(), 0, "restart must reset the epoch");
                        assert!(
                            display.next_rotation().is_none(),
                            "restart must cancel the old schedule"
                        );
                        assert!(!display.is_stopped(), "restart must produce a live session");
                    },
                    Err(_) => {
                        assert!(!restart_valid, "restart rejected a valid configuration");
                        assert_eq!(display.epoch(), epoch_before, "failed restart moved the epoch");
                        assert_eq!(display.is_stopped(), stopped_before);
                        assert_eq!(display.next_rotation(), deadline_before);
                    },
                }
            },

            DisplayEvent::Stop => {
                display.stop();

                assert!(display.is_stopped());
                assert!(display.next_rotation().is_none(), "stop left a deadline armed");
                assert_eq!(display.epoch(), epoch_before, "stop moved the epoch");
            },
        }
    }

    // Terminality probe: once stopped, nothing ever comes out again
    display.stop();
    let far_future = now.advance(Duration::from_secs(1_000_000));
    assert!(display.tick(far_future).is_empty());
    assert!(display.refresh(far_future).is_empty());
    assert!(display.next_rotation().is_none());
});
