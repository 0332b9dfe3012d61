//! Rollcall core: the rotating token display and its environment.
//!
//! Pure state machines with no I/O:
//!
//! ```text
//! rollcall-core
//!   ├─ RotatingDisplay    (token + period -> display values over time)
//!   ├─ payload            (display value codec: "token|epoch")
//!   ├─ ChartRequest       (artifact reference construction)
//!   ├─ TickInstant        (instant abstraction for deadlines)
//!   └─ Environment        (time/randomness capability trait)
//! ```
//!
//! Drivers own all timers and I/O: they sleep until the armed rotation
//! deadline, deliver `tick` with the current instant, and execute the
//! returned actions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chart;
pub mod clock;
pub mod display;
pub mod env;
mod error;
pub mod payload;

pub use chart::{CHART_ENDPOINT, ChartRequest};
pub use clock::TickInstant;
pub use display::{
    DEFAULT_SIZE, DisplayAction, DisplayConfig, DisplayState, DisplayView, RotatingDisplay,
};
pub use env::Environment;
pub use error::DisplayError;
pub use payload::{PayloadError, SEPARATOR, ScannedPayload};
