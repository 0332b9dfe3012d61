//! Rotation lifecycle properties under virtual time.
//!
//! These tests drive the display state machine the way a production driver
//! does: advance the virtual clock to the armed deadline, deliver a tick,
//! collect the presented artifacts. The simulated environment makes every
//! schedule exact, so the assertions are on precise epochs and instants
//! rather than tolerances.

use std::time::Duration;

use proptest::prelude::*;
use rollcall_core::{
    DisplayAction, DisplayConfig, DisplayState, Environment, RotatingDisplay, TickInstant,
};
use rollcall_harness::{SimEnv, SimInstant};
use rollcall_session::PERIOD_PRESETS;

fn display_config(token: &str, period_secs: Option<u64>) -> DisplayConfig {
    DisplayConfig {
        rotation_period: period_secs.map(Duration::from_secs),
        ..DisplayConfig::new(token)
    }
}

fn presented_epochs(actions: &[DisplayAction]) -> Vec<u64> {
    actions.iter().map(|DisplayAction::Present { epoch, .. }| *epoch).collect()
}

/// Drive a fresh session for `periods` full rotations and return every
/// presented reference in order.
fn run_session(token: &str, period_secs: u64, periods: u64) -> Vec<String> {
    let env = SimEnv::with_seed(0);
    let config = display_config(token, Some(period_secs));
    let mut display = RotatingDisplay::<SimInstant>::start(config).expect("valid configuration");

    let mut references: Vec<String> = Vec::new();
    let mut collect = |actions: Vec<DisplayAction>| {
        references
            .extend(actions.into_iter().map(|DisplayAction::Present { reference, .. }| reference));
    };

    collect(display.refresh(env.now()));
    for _ in 0..periods {
        let deadline = display.next_rotation().expect("rotation stays armed");
        env.advance(deadline.saturating_since(env.now()));
        collect(display.tick(env.now()));
    }

    references
}

#[test]
fn static_mode_presents_exactly_one_epoch() {
    // Both spellings of static mode: no period, and an explicit zero
    for period in [None, Some(0)] {
        let env = SimEnv::with_seed(0);
        let mut display = RotatingDisplay::<SimInstant>::start(display_config("ABC123", period))
            .expect("valid configuration");

        let first = display.refresh(env.now());
        assert_eq!(presented_epochs(&first), vec![0]);
        assert_eq!(display.next_rotation(), None, "static mode must not arm a deadline");

        for _ in 0..10 {
            env.advance(Duration::from_secs(3600));
            assert!(display.tick(env.now()).is_empty());
            assert_eq!(display.next_rotation(), None);
        }
        assert_eq!(display.epoch(), 0);
        assert_eq!(display.payload(), "ABC123|0");
    }
}

#[test]
fn restart_resets_the_epoch_and_cancels_the_schedule() {
    let env = SimEnv::with_seed(0);
    let mut display = RotatingDisplay::<SimInstant>::start(display_config("OLD", Some(10)))
        .expect("valid configuration");
    display.refresh(env.now());
    for _ in 0..5 {
        let deadline = display.next_rotation().expect("rotation stays armed");
        env.advance(deadline.saturating_since(env.now()));
        display.tick(env.now());
    }
    assert_eq!(display.epoch(), 5);
    let stale_deadline = display.next_rotation().expect("rotation stays armed");

    display.restart(display_config("NEW", Some(10))).expect("valid configuration");

    assert_eq!(display.epoch(), 0);
    assert_eq!(display.state(), DisplayState::Loading);
    assert_eq!(display.next_rotation(), None);

    // Re-arm after the stale deadline has passed; the old schedule must not
    // tick the new session
    env.advance(Duration::from_secs(12));
    display.refresh(env.now());
    assert!(display.tick(stale_deadline).is_empty());
    assert_eq!(display.epoch(), 0);
    assert_eq!(display.payload(), "NEW|0");
}

#[test]
fn ten_second_session_lifecycle() {
    let env = SimEnv::with_seed(0);
    let config = DisplayConfig {
        token: "ABC123".to_string(),
        size: 200,
        rotation_period: Some(Duration::from_secs(10)),
    };
    let mut display = RotatingDisplay::<SimInstant>::start(config).expect("valid configuration");

    // Immediately ready at epoch 0
    let actions = display.refresh(env.now());
    assert_eq!(display.state(), DisplayState::Ready);
    assert_eq!(display.payload(), "ABC123|0");
    let DisplayAction::Present { reference, .. } = &actions[0];
    assert!(reference.contains("ABC123%7C0"));

    // After ten seconds the display value has advanced once
    env.advance(Duration::from_secs(10));
    display.tick(env.now());
    assert_eq!(display.payload(), "ABC123|1");

    // Stopped at t=15s; frozen through t=115s
    env.advance(Duration::from_secs(5));
    display.stop();
    let frozen = display.view();

    while env.elapsed() < Duration::from_secs(115) {
        env.advance(Duration::from_secs(10));
        assert!(display.tick(env.now()).is_empty());
        assert!(display.refresh(env.now()).is_empty());
    }
    assert_eq!(display.view(), frozen);
    assert_eq!(display.epoch(), 1);
}

proptest! {
    /// Determinism: the same token observed over the same schedule yields
    /// byte-identical artifact references.
    #[test]
    fn prop_artifact_sequences_are_deterministic(
        token in "[A-Za-z0-9-]{1,12}",
        periods in 1u64..12
    ) {
        prop_assert_eq!(run_session(&token, 10, periods), run_session(&token, 10, periods));
    }

    /// Monotonic epoch: k full periods yield epochs 0, 1, ..., k with no
    /// repeats or gaps, on any preset period.
    #[test]
    fn prop_full_periods_yield_consecutive_epochs(
        choice in 0usize..PERIOD_PRESETS.len(),
        k in 1u64..15
    ) {
        let period = PERIOD_PRESETS[choice];
        let env = SimEnv::with_seed(0);
        let config = display_config("ABC123", Some(period));
        let mut display =
            RotatingDisplay::<SimInstant>::start(config).expect("valid configuration");

        let mut epochs = presented_epochs(&display.refresh(env.now()));
        for _ in 0..k {
            let deadline = display.next_rotation().expect("rotation stays armed");
            env.advance(deadline.saturating_since(env.now()));
            epochs.extend(presented_epochs(&display.tick(env.now())));
        }

        let expected: Vec<u64> = (0..=k).collect();
        prop_assert_eq!(epochs, expected);
        prop_assert_eq!(env.elapsed(), Duration::from_secs(period * k));
    }

    /// Idempotent stop: stopping twice equals stopping once, and no tick or
    /// refresh is accepted afterwards no matter how much time passes.
    #[test]
    fn prop_stop_is_idempotent_and_terminal(
        ticks_before in 0u64..5,
        elapsed_after in 0u64..100_000
    ) {
        let env = SimEnv::with_seed(0);
        let mut display =
            RotatingDisplay::<SimInstant>::start(display_config("ABC123", Some(10)))
                .expect("valid configuration");
        display.refresh(env.now());
        for _ in 0..ticks_before {
            let deadline = display.next_rotation().expect("rotation stays armed");
            env.advance(deadline.saturating_since(env.now()));
            display.tick(env.now());
        }

        display.stop();
        let frozen = display.view();
        display.stop();
        prop_assert_eq!(display.view(), frozen.clone());

        env.advance(Duration::from_secs(elapsed_after));
        prop_assert!(display.tick(env.now()).is_empty());
        prop_assert!(display.refresh(env.now()).is_empty());
        prop_assert_eq!(display.epoch(), ticks_before);
        prop_assert_eq!(display.view(), frozen);
        prop_assert_eq!(display.next_rotation(), None);
    }
}
