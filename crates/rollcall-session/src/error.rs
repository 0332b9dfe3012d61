//! Session error types.

use rollcall_core::DisplayError;
use thiserror::Error;

/// Errors from session operations.
///
/// These cover structural misuse only: acting while signed out or
/// targeting a lecture that does not exist. Product-level rejections the
/// user sees (invalid code, failed login, failed scan) are emitted as
/// [`Notification`](crate::Notification) actions instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation requires a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    /// No lecture with this ID exists in the roster.
    #[error("unknown lecture: {lecture_id}")]
    UnknownLecture {
        /// The lecture ID that was not found.
        lecture_id: String,
    },

    /// The lecture is not currently accepting attendance.
    #[error("attendance closed for lecture {lecture_id}")]
    AttendanceClosed {
        /// The lecture that is not active.
        lecture_id: String,
    },

    /// Display configuration was rejected.
    #[error(transparent)]
    Display(#[from] DisplayError),
}
