//! Model-based property tests for the rotation display.
//!
//! These tests generate random operation sequences and verify that the real
//! state machine behaves identically to the arithmetic reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!     ModelDisplay    RealDisplay     Compare
//!     (arithmetic)    (SimEnv clock)  observable state
//! ```

use std::time::Duration;

use proptest::prelude::*;
use rollcall_core::{DisplayConfig, DisplayState, Environment, RotatingDisplay};
use rollcall_harness::{
    ModelDisplay, ObservableState, Operation, SimEnv, SimInstant, restart_period_secs,
    restart_token,
};

/// Real system wrapper that mirrors the model's interface.
struct RealDisplay {
    env: SimEnv,
    display: RotatingDisplay<SimInstant>,
}

impl RealDisplay {
    fn new(token: &str, period_secs: Option<u64>) -> Self {
        let env = SimEnv::with_seed(0);
        let display = RotatingDisplay::start(display_config(token, period_secs))
            .expect("generated configurations are valid");

        Self { env, display }
    }

    fn apply(&mut self, op: &Operation) {
        match op {
            Operation::Refresh => {
                self.display.refresh(self.env.now());
            },
            Operation::AdvanceTime { secs } => {
                self.env.advance(Duration::from_secs(u64::from(*secs)));
            },
            Operation::Tick => {
                self.display.tick(self.env.now());
            },
            Operation::Restart { token_seed, period_choice } => {
                let token = restart_token(*token_seed);
                let config = display_config(&token, restart_period_secs(*period_choice));
                self.display.restart(config).expect("generated configurations are valid");
            },
            Operation::Stop => self.display.stop(),
        }
    }

    fn observable(&self) -> ObservableState {
        ObservableState {
            ready: self.display.state() == DisplayState::Ready,
            epoch: self.display.epoch(),
            payload: self.display.payload(),
            next_rotation_secs: self.display.next_rotation().map(|at| at.offset().as_secs()),
            stopped: self.display.is_stopped(),
        }
    }
}

fn display_config(token: &str, period_secs: Option<u64>) -> DisplayConfig {
    DisplayConfig {
        rotation_period: period_secs.map(Duration::from_secs),
        ..DisplayConfig::new(token)
    }
}

/// Strategy for generating operations, weighted towards clock movement and
/// ticks so rotation schedules actually fire.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => Just(Operation::Refresh),
        5 => (0u16..400).prop_map(|secs| Operation::AdvanceTime { secs }),
        5 => Just(Operation::Tick),
        1 => (any::<u8>(), any::<u8>()).prop_map(|(token_seed, period_choice)| {
            Operation::Restart { token_seed, period_choice }
        }),
        1 => Just(Operation::Stop),
    ]
}

proptest! {
    /// The real machine and the arithmetic model agree on observable state
    /// after every operation of any generated sequence.
    #[test]
    fn prop_real_display_matches_model(
        token in "[A-Z0-9]{4,8}",
        period_choice in any::<u8>(),
        ops in prop::collection::vec(operation_strategy(), 0..60)
    ) {
        let period_secs = restart_period_secs(period_choice);
        let mut model = ModelDisplay::new(token.as_str(), period_secs);
        let mut real = RealDisplay::new(&token, period_secs);

        for (i, op) in ops.iter().enumerate() {
            model.apply(op);
            real.apply(op);

            prop_assert_eq!(
                real.observable(),
                model.observable(),
                "Divergence at operation {}: {:?}",
                i, op
            );
        }
    }

    /// Epochs never decrease except through an explicit restart.
    #[test]
    fn prop_epoch_is_monotonic_between_restarts(
        ops in prop::collection::vec(operation_strategy(), 0..60)
    ) {
        let mut real = RealDisplay::new("ABC123", Some(10));
        let mut last_epoch = 0;

        for op in &ops {
            let restarted = matches!(op, Operation::Restart { .. });
            real.apply(op);

            let epoch = real.observable().epoch;
            if restarted {
                prop_assert_eq!(epoch, 0, "restart must reset the epoch");
            } else {
                prop_assert!(
                    epoch >= last_epoch,
                    "epoch went backwards: {} -> {} on {:?}",
                    last_epoch, epoch, op
                );
            }
            last_epoch = epoch;
        }
    }

    /// After a stop, no operation short of a restart changes observable
    /// state.
    #[test]
    fn prop_stop_freezes_observable_state(
        ops in prop::collection::vec(operation_strategy(), 0..40)
    ) {
        let mut real = RealDisplay::new("ABC123", Some(10));
        real.apply(&Operation::Refresh);
        real.apply(&Operation::Stop);
        let frozen = real.observable();

        for op in &ops {
            if matches!(op, Operation::Restart { .. }) {
                break;
            }
            real.apply(op);

            prop_assert_eq!(
                real.observable(),
                frozen.clone(),
                "stopped session changed state on {:?}",
                op
            );
        }
    }
}

#[cfg(test)]
mod smoke_tests {
    use super::*;

    /// Basic agreement across one full rotation.
    #[test]
    fn model_and_real_agree_on_one_rotation() {
        let mut model = ModelDisplay::new("ABC123", Some(10));
        let mut real = RealDisplay::new("ABC123", Some(10));

        let script = [
            Operation::Refresh,
            Operation::AdvanceTime { secs: 10 },
            Operation::Tick,
            Operation::AdvanceTime { secs: 3 },
            Operation::Tick,
            Operation::Stop,
        ];

        for op in &script {
            model.apply(op);
            real.apply(op);
            assert_eq!(real.observable(), model.observable(), "diverged applying {op:?}");
        }

        assert_eq!(model.observable().epoch, 1);
        assert!(model.observable().stopped);
    }

    /// A restart after stop revives both sides identically.
    #[test]
    fn model_and_real_agree_on_restart_after_stop() {
        let mut model = ModelDisplay::new("ABC123", Some(10));
        let mut real = RealDisplay::new("ABC123", Some(10));

        let script = [
            Operation::Refresh,
            Operation::Stop,
            Operation::Restart { token_seed: 7, period_choice: 0 },
            Operation::Refresh,
            Operation::AdvanceTime { secs: 10 },
            Operation::Tick,
        ];

        for op in &script {
            model.apply(op);
            real.apply(op);
            assert_eq!(real.observable(), model.observable(), "diverged applying {op:?}");
        }

        let state = model.observable();
        assert_eq!(state.payload, "TOK7|1");
        assert!(!state.stopped);
    }
}
