//! Core error types.

use thiserror::Error;

/// Errors from display session configuration.
///
/// Computing display values and artifact references is infallible pure
/// string construction; the only failure mode is rejecting a malformed
/// configuration before a session can enter `Ready`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// The session token is empty.
    #[error("token must not be empty")]
    EmptyToken,

    /// The artifact size is zero.
    #[error("size must be positive")]
    ZeroSize,
}
