//! Rollcall session state machines.
//!
//! Action-based workflows built on the rotating display core:
//!
//! ```text
//! rollcall-session
//!   ├─ Presenter     (console: validate a code, own one display session)
//!   ├─ Dashboard     (teacher: schedule lectures, mint attendance codes)
//!   ├─ CheckIn       (student: login, submit scanned payloads)
//!   └─ Roster        (lectures, profiles, sample fixtures)
//! ```
//!
//! Every machine follows the same shape: `handle(event)` mutates state and
//! returns actions for the caller to execute. Notifications are product
//! behavior and travel as actions; [`SessionError`] is reserved for
//! structural misuse no UI flow could express.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checkin;
mod dashboard;
mod error;
mod notify;
mod presenter;
pub mod roster;

pub use checkin::{CheckIn, CheckInAction, CheckInEvent};
pub use dashboard::{Dashboard, DashboardAction, DashboardEvent, LectureForm};
pub use error::SessionError;
pub use notify::{Notification, Severity};
pub use presenter::{
    DEFAULT_PERIOD_SECS, PERIOD_PRESETS, Presenter, PresenterAction, PresenterEvent,
    RefreshSettings,
};
pub use roster::{
    CODE_SUFFIX_LEN, Lecture, LectureStatus, Roster, StudentProfile, TeacherProfile, mint_code,
    sample_roster, sample_student, sample_teacher,
};
