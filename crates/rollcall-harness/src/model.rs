//! Reference model for model-based testing of the rotation display.
//!
//! `ModelDisplay` reimplements the session lifecycle as whole-second
//! arithmetic, simple enough to be obviously correct. Tests apply the same
//! [`Operation`] sequence to the model and to the real state machine and
//! compare [`ObservableState`] after every step.

use arbitrary::Arbitrary;
use rollcall_session::PERIOD_PRESETS;

/// One step a display session can take.
///
/// Variants carry small integer parameters so random exploration stays
/// dense; [`restart_token`] and [`restart_period_secs`] expand them into
/// real configurations.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Present the current artifact, arming rotation on first call.
    Refresh,

    /// Advance the virtual clock.
    AdvanceTime {
        /// Seconds to advance.
        secs: u16,
    },

    /// Deliver a rotation tick at the current time.
    Tick,

    /// Replace the session with a fresh configuration.
    Restart {
        /// Seed expanded into the replacement token.
        token_seed: u8,
        /// Selector expanded into the replacement rotation period.
        period_choice: u8,
    },

    /// End the session.
    Stop,
}

/// The token a restart seed expands to.
#[must_use]
pub fn restart_token(seed: u8) -> String {
    format!("TOK{seed}")
}

/// The rotation period in seconds a restart selector expands to.
///
/// Cycles through the console presets plus both static spellings: no
/// period at all, and an explicit zero.
#[must_use]
pub fn restart_period_secs(choice: u8) -> Option<u64> {
    match choice % 6 {
        selected @ 0..=3 => Some(PERIOD_PRESETS[usize::from(selected)]),
        4 => None,
        _ => Some(0),
    }
}

/// State that can be read from both the model and the real display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Whether the first artifact has been presented.
    pub ready: bool,
    /// Rotation epoch counter.
    pub epoch: u64,
    /// Display value for the current epoch.
    pub payload: String,
    /// Armed rotation deadline, in seconds since simulation start.
    pub next_rotation_secs: Option<u64>,
    /// Whether the session has ended.
    pub stopped: bool,
}

/// Arithmetic model of one display session.
///
/// The model owns its own clock in whole seconds. `AdvanceTime` moves the
/// clock; `Tick` advances the epoch only when the armed deadline has been
/// reached, then re-arms from the old deadline so late ticks catch up one
/// epoch at a time.
#[derive(Debug, Clone)]
pub struct ModelDisplay {
    token: String,
    period_secs: Option<u64>,
    now_secs: u64,
    ready: bool,
    epoch: u64,
    deadline_secs: Option<u64>,
    stopped: bool,
}

impl ModelDisplay {
    /// Starts a model session. A zero period normalizes to static mode.
    #[must_use]
    pub fn new(token: impl Into<String>, period_secs: Option<u64>) -> Self {
        Self {
            token: token.into(),
            period_secs: period_secs.filter(|secs| *secs > 0),
            now_secs: 0,
            ready: false,
            epoch: 0,
            deadline_secs: None,
            stopped: false,
        }
    }

    /// Applies one operation.
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::Refresh => self.refresh(),
            Operation::AdvanceTime { secs } => self.now_secs += u64::from(*secs),
            Operation::Tick => self.tick(),
            Operation::Restart { token_seed, period_choice } => {
                self.restart(restart_token(*token_seed), restart_period_secs(*period_choice));
            },
            Operation::Stop => self.stop(),
        }
    }

    /// Virtual time the model has accumulated, in seconds.
    #[must_use]
    pub fn now_secs(&self) -> u64 {
        self.now_secs
    }

    /// Snapshot for comparison against the real display.
    #[must_use]
    pub fn observable(&self) -> ObservableState {
        ObservableState {
            ready: self.ready,
            epoch: self.epoch,
            payload: format!("{}|{}", self.token, self.epoch),
            next_rotation_secs: self.deadline_secs,
            stopped: self.stopped,
        }
    }

    fn refresh(&mut self) {
        if self.stopped || self.ready {
            return;
        }

        self.ready = true;
        self.deadline_secs = self.period_secs.map(|period| self.now_secs + period);
    }

    fn tick(&mut self) {
        if self.stopped || !self.ready {
            return;
        }
        let (Some(deadline), Some(period)) = (self.deadline_secs, self.period_secs) else {
            return;
        };
        if self.now_secs < deadline {
            return;
        }

        self.epoch += 1;
        self.deadline_secs = Some(deadline + period);
    }

    fn restart(&mut self, token: String, period_secs: Option<u64>) {
        let now_secs = self.now_secs;
        *self = Self::new(token, period_secs);
        self.now_secs = now_secs;
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.deadline_secs = None;
    }
}
