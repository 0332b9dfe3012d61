//! Teacher-side display console.
//!
//! `Presenter` owns at most one rotating display session plus the generator
//! settings. Discrete events (code submission, setting changes, timer
//! ticks) come in; `Present` and `Notify` actions come out for the driver
//! to execute. Rejected codes and session teardown surface as
//! notifications, the way the console shows toasts.

use std::time::Duration;

use rollcall_core::{
    DEFAULT_SIZE, DisplayAction, DisplayConfig, DisplayView, RotatingDisplay, TickInstant,
};

use crate::error::SessionError;
use crate::notify::Notification;
use crate::roster::{Lecture, Roster};

/// Rotation periods the console offers, in seconds.
pub const PERIOD_PRESETS: [u64; 4] = [10, 30, 60, 300];

/// Default rotation period in seconds.
pub const DEFAULT_PERIOD_SECS: u64 = 30;

/// Shortest attendance code the console accepts.
const MIN_CODE_LEN: usize = 6;

/// Generator settings for display sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSettings {
    /// Rotation period in seconds; ignored while auto-refresh is off.
    pub period_secs: u64,

    /// Whether the display value rotates at all.
    pub auto_refresh: bool,

    /// Artifact dimension in pixels.
    pub size: u32,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self { period_secs: DEFAULT_PERIOD_SECS, auto_refresh: true, size: DEFAULT_SIZE }
    }
}

impl RefreshSettings {
    /// Display configuration for a session under these settings.
    fn display_config(&self, token: &str) -> DisplayConfig {
        DisplayConfig {
            size: self.size,
            rotation_period: self.auto_refresh.then(|| Duration::from_secs(self.period_secs)),
            ..DisplayConfig::new(token)
        }
    }
}

/// Events the console processes.
#[derive(Debug, Clone)]
pub enum PresenterEvent<I> {
    /// An attendance code was submitted for validation.
    SubmitCode {
        /// The submitted code, as typed.
        code: String,

        /// Current instant, used to arm the rotation schedule.
        now: I,
    },

    /// Select a new rotation period.
    SetRotationPeriod {
        /// Period in seconds; zero disables rotation.
        secs: u64,

        /// Current instant.
        now: I,
    },

    /// Turn automatic rotation on or off.
    SetAutoRefresh {
        /// New auto-refresh state.
        enabled: bool,

        /// Current instant.
        now: I,
    },

    /// Select a new artifact size.
    SetDisplaySize {
        /// Dimension in pixels.
        size: u32,

        /// Current instant.
        now: I,
    },

    /// A rotation deadline may have been reached.
    Tick {
        /// Current instant.
        now: I,
    },

    /// End the attendance session.
    EndSession,
}

/// Actions the console asks its driver to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterAction {
    /// Render this artifact to the viewer.
    Present {
        /// Epoch the artifact was computed from.
        epoch: u64,

        /// Chart-service URL for the artifact.
        reference: String,
    },

    /// Surface a notification to the operator.
    Notify(Notification),
}

impl From<DisplayAction> for PresenterAction {
    fn from(action: DisplayAction) -> Self {
        match action {
            DisplayAction::Present { epoch, reference } => Self::Present { epoch, reference },
        }
    }
}

/// Teacher console: validates attendance codes and owns one display session.
///
/// # Type Parameters
///
/// - `I`: instant type for rotation deadlines (real or simulated time)
#[derive(Debug, Clone)]
pub struct Presenter<I> {
    /// Lectures the console knows about.
    roster: Roster,

    /// Current generator settings.
    settings: RefreshSettings,

    /// Active display session, if a code has been validated.
    display: Option<RotatingDisplay<I>>,

    /// The validated attendance code backing the active session.
    code: Option<String>,

    /// Roster lecture the active code belongs to, when one matched.
    lecture_id: Option<String>,
}

impl<I: TickInstant> Presenter<I> {
    /// Create a console over a roster, with default settings.
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            settings: RefreshSettings::default(),
            display: None,
            code: None,
            lecture_id: None,
        }
    }

    /// Process one event.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when a setting change produces a
    /// configuration the display rejects; the active session is left
    /// untouched in that case.
    pub fn handle(
        &mut self,
        event: PresenterEvent<I>,
    ) -> Result<Vec<PresenterAction>, SessionError> {
        match event {
            PresenterEvent::SubmitCode { code, now } => self.submit_code(&code, now),
            PresenterEvent::SetRotationPeriod { secs, now } => {
                let settings = RefreshSettings { period_secs: secs, ..self.settings };
                self.apply_settings(settings, now)
            },
            PresenterEvent::SetAutoRefresh { enabled, now } => {
                let settings = RefreshSettings { auto_refresh: enabled, ..self.settings };
                self.apply_settings(settings, now)
            },
            PresenterEvent::SetDisplaySize { size, now } => {
                let settings = RefreshSettings { size, ..self.settings };
                self.apply_settings(settings, now)
            },
            PresenterEvent::Tick { now } => Ok(self.forward_tick(now)),
            PresenterEvent::EndSession => Ok(self.end_session()),
        }
    }

    /// Validate a submitted code and start (or replace) the display session.
    fn submit_code(&mut self, code: &str, now: I) -> Result<Vec<PresenterAction>, SessionError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(Vec::new());
        }

        if code.chars().count() < MIN_CODE_LEN {
            tracing::debug!("Rejected attendance code: {}", code);
            return Ok(vec![PresenterAction::Notify(Notification::destructive(
                "Invalid Code",
                "The provided teacher code is invalid.",
            ))]);
        }

        let config = self.settings.display_config(code);
        let display = match self.display.as_mut() {
            Some(display) => {
                display.restart(config)?;
                display
            },
            None => self.display.insert(RotatingDisplay::start(config)?),
        };

        self.code = Some(code.to_string());
        self.lecture_id = self.roster.lecture_for_code(code).map(|lecture| lecture.id.clone());
        tracing::debug!("Attendance code validated: {}", code);

        let mut actions = vec![PresenterAction::Notify(Notification::info(
            "Code Validated",
            "QR code is now being generated for attendance.",
        ))];
        actions.extend(display.refresh(now).into_iter().map(PresenterAction::from));

        Ok(actions)
    }

    /// Commit new settings, restarting the active session under them.
    ///
    /// The epoch resets to 0 and the old schedule is cancelled, exactly as
    /// if the code had been re-submitted. Settings are committed only when
    /// the resulting configuration validates.
    fn apply_settings(
        &mut self,
        settings: RefreshSettings,
        now: I,
    ) -> Result<Vec<PresenterAction>, SessionError> {
        if let (Some(code), Some(display)) = (self.code.as_deref(), self.display.as_mut()) {
            display.restart(settings.display_config(code))?;
            self.settings = settings;
            return Ok(display.refresh(now).into_iter().map(PresenterAction::from).collect());
        }

        self.settings = settings;
        Ok(Vec::new())
    }

    /// Forward a tick to the active display session.
    fn forward_tick(&mut self, now: I) -> Vec<PresenterAction> {
        match self.display.as_mut() {
            Some(display) => display.tick(now).into_iter().map(PresenterAction::from).collect(),
            None => Vec::new(),
        }
    }

    /// Stop and discard the active session.
    ///
    /// Without an active session this is a silent no-op, so teardown is
    /// idempotent.
    fn end_session(&mut self) -> Vec<PresenterAction> {
        let Some(mut display) = self.display.take() else {
            return Vec::new();
        };

        display.stop();
        self.code = None;
        self.lecture_id = None;
        tracing::debug!("Attendance session ended");

        vec![PresenterAction::Notify(Notification::info(
            "Session Ended",
            "The attendance session has been ended.",
        ))]
    }

    /// Read model of the active display session.
    pub fn display_view(&self) -> Option<DisplayView> {
        self.display.as_ref().map(RotatingDisplay::view)
    }

    /// The armed rotation deadline, if any.
    ///
    /// Drivers sleep until this instant and then deliver
    /// [`PresenterEvent::Tick`].
    pub fn next_rotation(&self) -> Option<I> {
        self.display.as_ref().and_then(RotatingDisplay::next_rotation)
    }

    /// The validated code backing the active session.
    pub fn active_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The roster lecture the active code belongs to, when one matched.
    pub fn lecture(&self) -> Option<&Lecture> {
        self.lecture_id.as_deref().and_then(|id| self.roster.get(id))
    }

    /// True while a display session is active.
    pub fn has_active_session(&self) -> bool {
        self.display.is_some()
    }

    /// Current generator settings.
    pub fn settings(&self) -> &RefreshSettings {
        &self.settings
    }

    /// The roster this console serves.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}
