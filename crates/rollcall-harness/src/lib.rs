//! Deterministic test harness for the attendance display.
//!
//! Two pieces:
//!
//! - [`sim`]: a simulated [`Environment`](rollcall_core::Environment) with
//!   a virtual clock and seeded RNG, so whole sessions run without
//!   wall-clock waits and replay exactly from a seed.
//!
//! - [`model`]: a whole-second reference model of the rotation lifecycle
//!   for model-based testing against the real state machine.
//!
//! The integration suites under `tests/` drive the display, the session
//! consoles, and the kiosk driver through these pieces.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod sim;

pub use model::{ModelDisplay, ObservableState, Operation, restart_period_secs, restart_token};
pub use sim::{SimEnv, SimInstant};
