//! Rollcall kiosk: production driver for the rotating display.
//!
//! This crate wires the pure session machines to real resources:
//!
//! ```text
//! rollcall-kiosk
//!   ├─ SystemEnv   (tokio sleep + OS entropy)
//!   ├─ KioskConfig (code, size, period, rotation limit, roster file)
//!   └─ run         (submit the code, sleep to each deadline, feed ticks,
//!                   execute actions as log lines)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod error;
mod system_env;

pub use driver::{KioskConfig, run};
pub use error::KioskError;
pub use system_env::SystemEnv;
