//! Kiosk driver loop.
//!
//! Wires a `Presenter` to real resources: submits the configured code,
//! sleeps until each armed rotation deadline, feeds ticks, and executes
//! the resulting actions as structured log lines.

use rollcall_core::{Environment, TickInstant};
use rollcall_session::{
    Notification, Presenter, PresenterAction, PresenterEvent, Roster, Severity, sample_roster,
};

use crate::error::KioskError;

/// Kiosk runtime configuration.
#[derive(Debug, Clone)]
pub struct KioskConfig {
    /// Attendance code to display
    pub code: String,
    /// Artifact size in pixels
    pub size: u32,
    /// Rotation period in seconds; zero disables rotation
    pub period_secs: u64,
    /// Stop after this many rotations; `None` runs until interrupted
    pub rotations: Option<u64>,
    /// Roster JSON file; the sample roster is used when absent
    pub roster_path: Option<String>,
}

/// Run the kiosk until the rotation limit is reached.
///
/// Builds a `Presenter` over the configured roster, submits the code, then
/// sleeps until each armed deadline and feeds ticks. The session is ended
/// on the way out, so no rotation schedule outlives the run. In static
/// mode the initial presentation is the whole run; without a rotation
/// limit a rotating run continues until the caller drops it.
///
/// # Errors
///
/// Returns [`KioskError`] when the roster cannot be loaded, the code is
/// rejected by the console, or the display refuses the configuration.
pub async fn run<E: Environment>(env: &E, config: KioskConfig) -> Result<(), KioskError> {
    let KioskConfig { code, size, period_secs, rotations: rotation_limit, roster_path } = config;

    let roster = load_roster(roster_path.as_deref())?;
    let mut console = Presenter::<E::Instant>::new(roster);

    let now = env.now();
    console.handle(PresenterEvent::SetRotationPeriod { secs: period_secs, now })?;
    console.handle(PresenterEvent::SetDisplaySize { size, now })?;

    let actions = console.handle(PresenterEvent::SubmitCode { code: code.clone(), now })?;
    execute(&actions);

    if !console.has_active_session() {
        return Err(KioskError::Rejected(code));
    }

    let mut rotations = 0_u64;
    while let Some(deadline) = console.next_rotation() {
        if rotation_limit.is_some_and(|limit| rotations >= limit) {
            break;
        }

        env.sleep(deadline.saturating_since(env.now())).await;

        let actions = console.handle(PresenterEvent::Tick { now: env.now() })?;
        rotations += execute(&actions);
    }

    let actions = console.handle(PresenterEvent::EndSession)?;
    execute(&actions);

    Ok(())
}

/// Execute actions as log output, returning how many artifacts were
/// presented.
fn execute(actions: &[PresenterAction]) -> u64 {
    let mut presented = 0;

    for action in actions {
        match action {
            PresenterAction::Present { epoch, reference } => {
                tracing::info!("Epoch {}: {}", epoch, reference);
                presented += 1;
            },
            PresenterAction::Notify(notification) => notify(notification),
        }
    }

    presented
}

/// Log a notification at a severity-appropriate level.
fn notify(notification: &Notification) {
    match notification.severity {
        Severity::Info => tracing::info!("{}: {}", notification.title, notification.body),
        Severity::Destructive => tracing::warn!("{}: {}", notification.title, notification.body),
    }
}

/// Load a roster from a JSON file, or fall back to the sample roster.
fn load_roster(path: Option<&str>) -> Result<Roster, KioskError> {
    let Some(path) = path else {
        return Ok(sample_roster());
    };

    let text = std::fs::read_to_string(path)
        .map_err(|e| KioskError::Config(format!("failed to read roster {path}: {e}")))?;
    let roster: Roster = serde_json::from_str(&text)
        .map_err(|e| KioskError::Config(format!("invalid roster {path}: {e}")))?;

    tracing::info!("Loaded {} lectures from {}", roster.lectures().len(), path);
    Ok(roster)
}
