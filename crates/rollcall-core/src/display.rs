//! Rotating token display state machine.
//!
//! A display session turns an opaque attendance token and an optional
//! rotation period into a sequence of display values and artifact
//! references over time. The machine is pure: it never reads a clock or
//! arms a timer itself. Callers pass the current instant into `refresh`
//! and `tick`, sleep until the deadline reported by `next_rotation`, and
//! execute the returned actions.

use std::time::Duration;

use crate::{chart::ChartRequest, clock::TickInstant, error::DisplayError, payload};

/// Default artifact dimension in pixels.
pub const DEFAULT_SIZE: u32 = 200;

/// Configuration for one display session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Opaque attendance token embedded in every display value.
    pub token: String,

    /// Artifact dimension in pixels (width and height).
    pub size: u32,

    /// Interval between epoch advances. `None` or zero means static mode:
    /// the display value never advances after its first computation.
    pub rotation_period: Option<Duration>,
}

impl DisplayConfig {
    /// Create a configuration with the default size and no rotation.
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), size: DEFAULT_SIZE, rotation_period: None }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), DisplayError> {
        if self.token.is_empty() {
            return Err(DisplayError::EmptyToken);
        }
        if self.size == 0 {
            return Err(DisplayError::ZeroSize);
        }
        Ok(())
    }

    /// The rotation period normalized so zero means static mode.
    fn effective_period(&self) -> Option<Duration> {
        self.rotation_period.filter(|period| !period.is_zero())
    }
}

/// Display session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Artifact reference not yet computed.
    Loading,

    /// Artifact reference available; rotation active or static.
    Ready,
}

/// Actions produced by the display state machine.
///
/// Pure state machine output - the caller performs the actual rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayAction {
    /// Present this artifact to the viewer.
    Present {
        /// Epoch the artifact was computed from.
        epoch: u64,

        /// Chart-service URL encoding the display value for that epoch.
        reference: String,
    },
}

/// Consumer-facing read model of a display session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayView {
    /// Current session state.
    pub state: DisplayState,

    /// Artifact reference for the current epoch; `None` while loading.
    pub artifact: Option<String>,

    /// Artifact dimension in pixels.
    pub size: u32,
}

/// Rotating token display.
///
/// # Lifecycle
///
/// [`start`](Self::start) validates the configuration and enters `Loading`
/// at epoch 0. The first [`refresh`](Self::refresh) computes the epoch-0
/// artifact, enters `Ready`, and arms the rotation deadline. Each accepted
/// [`tick`](Self::tick) advances the epoch by exactly 1 and re-arms the
/// deadline. [`stop`](Self::stop) releases the deadline and freezes the
/// session; [`restart`](Self::restart) replaces the configuration and
/// resets the epoch to 0.
///
/// # Type Parameters
///
/// - `I`: instant type for rotation deadlines (real or simulated time)
#[derive(Debug, Clone)]
pub struct RotatingDisplay<I> {
    /// Validated session configuration.
    config: DisplayConfig,

    /// Current state.
    state: DisplayState,

    /// Epoch counter; strictly increases by 1 per accepted tick.
    epoch: u64,

    /// Artifact reference for the current epoch; `None` while loading.
    artifact: Option<String>,

    /// Deadline for the next epoch advance.
    ///
    /// Armed only while `Ready` with a rotation period; `None` in static
    /// mode and after `stop`.
    next_rotation: Option<I>,

    /// Set once `stop` is called; suppresses all further transitions.
    stopped: bool,
}

impl<I: TickInstant> RotatingDisplay<I> {
    /// Start a display session.
    ///
    /// The session begins in [`DisplayState::Loading`] at epoch 0; call
    /// [`refresh`](Self::refresh) to compute the first artifact.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError`] when the token is empty or the size is
    /// zero. The error is surfaced synchronously; a malformed
    /// configuration never reaches `Ready`.
    pub fn start(config: DisplayConfig) -> Result<Self, DisplayError> {
        config.validate()?;

        tracing::debug!("Display session started for token {}", config.token);

        Ok(Self {
            config,
            state: DisplayState::Loading,
            epoch: 0,
            artifact: None,
            next_rotation: None,
            stopped: false,
        })
    }

    /// Restart with a new configuration.
    ///
    /// Equivalent to discarding the session and starting a new one in
    /// place: the epoch returns to 0, the state returns to `Loading`, and
    /// any armed deadline is cancelled. A deadline armed under the old
    /// configuration never produces a tick again.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError`] for a malformed configuration; the current
    /// session is left untouched in that case.
    pub fn restart(&mut self, config: DisplayConfig) -> Result<(), DisplayError> {
        *self = Self::start(config)?;
        Ok(())
    }

    /// Compute and present the current epoch's artifact.
    ///
    /// From `Loading` this is the `Loading -> Ready` transition: the
    /// artifact is computed for the current epoch and, when a rotation
    /// period is configured, the next rotation deadline is armed at
    /// `now + period`. From `Ready` the current artifact is recomputed and
    /// re-emitted (byte-identical, by determinism) without advancing the
    /// epoch or touching the armed deadline. After `stop`: no effect.
    pub fn refresh(&mut self, now: I) -> Vec<DisplayAction> {
        if self.stopped {
            return Vec::new();
        }

        if self.state == DisplayState::Loading {
            if let Some(period) = self.config.effective_period() {
                self.next_rotation = Some(now.advance(period));
            }
            self.state = DisplayState::Ready;
            tracing::debug!("Display ready at epoch {}", self.epoch);
        }

        vec![self.present()]
    }

    /// Advance the rotation if the armed deadline has been reached.
    ///
    /// One accepted tick advances the epoch by exactly 1 and re-arms the
    /// deadline one period after the previous deadline, so a late driver
    /// catches up one epoch per tick without coalescing and the cadence
    /// does not drift. Early ticks, static mode, `Loading`, and stopped
    /// sessions are no-ops.
    pub fn tick(&mut self, now: I) -> Vec<DisplayAction> {
        if self.stopped || self.state != DisplayState::Ready {
            return Vec::new();
        }

        let Some(deadline) = self.next_rotation else {
            return Vec::new();
        };
        if now < deadline {
            return Vec::new();
        }

        // A deadline is only ever armed alongside a rotation period
        let Some(period) = self.config.effective_period() else {
            return Vec::new();
        };

        self.epoch += 1;
        self.next_rotation = Some(deadline.advance(period));
        tracing::trace!("Rotated to epoch {}", self.epoch);

        vec![self.present()]
    }

    /// Stop the session and release the armed deadline.
    ///
    /// Idempotent: a second `stop` has no effect and raises no error.
    /// After `stop` the read model is frozen: the last artifact stays
    /// visible and no further state change occurs.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }

        self.stopped = true;
        self.next_rotation = None;
        tracing::debug!("Display session stopped at epoch {}", self.epoch);
    }

    /// Recompute the artifact for the current epoch and emit it.
    ///
    /// The reference is always derived from the epoch value at the moment
    /// of computation; a completed tick never leaves a stale reference.
    fn present(&mut self) -> DisplayAction {
        let reference = ChartRequest { size: self.config.size, payload: self.payload() }.url();
        self.artifact = Some(reference.clone());

        DisplayAction::Present { epoch: self.epoch, reference }
    }

    /// Current session state.
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Current epoch counter.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Display value for the current epoch.
    pub fn payload(&self) -> String {
        payload::render(&self.config.token, self.epoch)
    }

    /// Session token.
    pub fn token(&self) -> &str {
        &self.config.token
    }

    /// Armed rotation deadline, if any.
    ///
    /// Drivers sleep until this instant and then deliver `tick`.
    pub fn next_rotation(&self) -> Option<I> {
        self.next_rotation
    }

    /// True once `stop` has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Consumer-facing read model.
    pub fn view(&self) -> DisplayView {
        DisplayView {
            state: self.state,
            artifact: self.artifact.clone(),
            size: self.config.size,
        }
    }
}
