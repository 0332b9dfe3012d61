//! Kiosk error types.

use std::fmt;

use rollcall_session::SessionError;

/// Errors that can occur in the kiosk.
#[derive(Debug)]
pub enum KioskError {
    /// Configuration error
    Config(String),

    /// The attendance code was rejected by the console
    Rejected(String),

    /// Session machine error
    Session(SessionError),
}

impl fmt::Display for KioskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Rejected(code) => write!(f, "attendance code rejected: {}", code),
            Self::Session(err) => write!(f, "session error: {}", err),
        }
    }
}

impl std::error::Error for KioskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionError> for KioskError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}
