//! Teacher dashboard.
//!
//! Login, lecture scheduling, attendance toggling, and attendance-code
//! minting. Minting is the bridge to the display console: `MintCode`
//! stores a fresh code on the lecture and emits `OpenPresenter`, which a
//! driver answers by submitting that code to a [`Presenter`].
//!
//! [`Presenter`]: crate::Presenter

use rollcall_core::Environment;

use crate::error::SessionError;
use crate::notify::Notification;
use crate::roster::{Lecture, LectureStatus, Roster, TeacherProfile, mint_code};

/// Lecture scheduling form.
///
/// Start and end times are pre-filled; the remaining fields start empty
/// and gate submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureForm {
    /// Lecture title.
    pub title: String,

    /// Course the lecture belongs to.
    pub subject: String,

    /// Calendar date, as displayed.
    pub date: String,

    /// Start time.
    pub start_time: String,

    /// End time.
    pub end_time: String,
}

impl Default for LectureForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            subject: String::new(),
            date: String::new(),
            start_time: "09:00".to_string(),
            end_time: "10:30".to_string(),
        }
    }
}

impl LectureForm {
    /// True when every field is filled in.
    fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.subject.is_empty()
            && !self.date.is_empty()
            && !self.start_time.is_empty()
            && !self.end_time.is_empty()
    }
}

/// Events the dashboard processes.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// Teacher sign-in attempt.
    Login {
        /// Teacher identifier, as typed.
        teacher_id: String,

        /// Password, as typed.
        password: String,
    },

    /// Schedule a new lecture from the form.
    ScheduleLecture {
        /// The filled-in form.
        form: LectureForm,
    },

    /// Open or close attendance collection for a lecture.
    ToggleAttendance {
        /// Target lecture.
        lecture_id: String,
    },

    /// Mint a fresh attendance code and hand off to the display console.
    MintCode {
        /// Target lecture.
        lecture_id: String,
    },
}

/// Actions the dashboard asks its driver to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    /// Surface a notification to the teacher.
    Notify(Notification),

    /// Navigate to the display console with a freshly minted code.
    OpenPresenter {
        /// The minted attendance code.
        code: String,
    },
}

/// Teacher dashboard state machine.
///
/// # Type Parameters
///
/// - `E`: environment providing the randomness codes are minted from
#[derive(Debug, Clone)]
pub struct Dashboard<E> {
    env: E,

    /// Lectures the teacher manages.
    roster: Roster,

    /// The signed-in teacher's profile.
    teacher: TeacherProfile,

    /// Set by a successful login.
    authenticated: bool,
}

impl<E: Environment> Dashboard<E> {
    /// Create a dashboard for a teacher over a roster.
    pub fn new(env: E, roster: Roster, teacher: TeacherProfile) -> Self {
        Self { env, roster, teacher, authenticated: false }
    }

    /// Process one event.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for structural misuse: scheduling or
    /// minting while signed out, or targeting a missing or inactive
    /// lecture.
    pub fn handle(&mut self, event: DashboardEvent) -> Result<Vec<DashboardAction>, SessionError> {
        match event {
            DashboardEvent::Login { teacher_id, password } => {
                Ok(self.login(&teacher_id, &password))
            },
            DashboardEvent::ScheduleLecture { form } => self.schedule_lecture(form),
            DashboardEvent::ToggleAttendance { lecture_id } => self.toggle_attendance(&lecture_id),
            DashboardEvent::MintCode { lecture_id } => self.mint_and_open(&lecture_id),
        }
    }

    /// Sign the teacher in when both credentials are non-empty.
    fn login(&mut self, teacher_id: &str, password: &str) -> Vec<DashboardAction> {
        if teacher_id.is_empty() || password.is_empty() {
            return vec![DashboardAction::Notify(Notification::destructive(
                "Login Failed",
                "Please enter valid credentials",
            ))];
        }

        self.authenticated = true;
        tracing::debug!("Teacher {} signed in", teacher_id);

        vec![DashboardAction::Notify(Notification::info(
            "Login Successful",
            format!("Welcome, {}", self.teacher.name),
        ))]
    }

    /// Append a new `Upcoming` lecture from a complete form.
    fn schedule_lecture(&mut self, form: LectureForm) -> Result<Vec<DashboardAction>, SessionError> {
        if !self.authenticated {
            return Err(SessionError::NotAuthenticated);
        }

        if !form.is_complete() {
            return Ok(vec![DashboardAction::Notify(Notification::destructive(
                "Error",
                "Please fill in all required fields",
            ))]);
        }

        let id = self.roster.next_id();
        let body = format!("{} has been scheduled for {}", form.title, form.date);
        tracing::debug!("Scheduled lecture {}: {}", id, form.title);

        self.roster.push(Lecture {
            id,
            title: form.title,
            subject: form.subject,
            teacher: self.teacher.name.clone(),
            date: form.date,
            start_time: form.start_time,
            end_time: form.end_time,
            status: LectureStatus::Upcoming,
            attendance_code: None,
        });

        Ok(vec![DashboardAction::Notify(Notification::info("Lecture Scheduled", body))])
    }

    /// Flip attendance collection for an active lecture.
    ///
    /// Opening mints a fresh code; closing clears the stored one.
    fn toggle_attendance(&mut self, lecture_id: &str) -> Result<Vec<DashboardAction>, SessionError> {
        if !self.authenticated {
            return Err(SessionError::NotAuthenticated);
        }

        let lecture = self.active_lecture(lecture_id)?;
        let code = match lecture.attendance_code {
            Some(_) => None,
            None => Some(mint_code(&self.env, lecture_id)),
        };

        self.roster.set_code(lecture_id, code);
        tracing::debug!("Toggled attendance for lecture {}", lecture_id);

        Ok(vec![DashboardAction::Notify(Notification::info(
            "Attendance Status Updated",
            format!("Attendance for lecture {lecture_id} has been toggled."),
        ))])
    }

    /// Mint a fresh code for an active lecture and open the console.
    fn mint_and_open(&mut self, lecture_id: &str) -> Result<Vec<DashboardAction>, SessionError> {
        if !self.authenticated {
            return Err(SessionError::NotAuthenticated);
        }

        self.active_lecture(lecture_id)?;
        let code = mint_code(&self.env, lecture_id);
        self.roster.set_code(lecture_id, Some(code.clone()));
        tracing::debug!("Minted code {} for lecture {}", code, lecture_id);

        Ok(vec![DashboardAction::OpenPresenter { code }])
    }

    /// Look up a lecture that must exist and be active.
    fn active_lecture(&self, lecture_id: &str) -> Result<&Lecture, SessionError> {
        let lecture = self
            .roster
            .get(lecture_id)
            .ok_or_else(|| SessionError::UnknownLecture { lecture_id: lecture_id.to_string() })?;

        if lecture.status != LectureStatus::Active {
            return Err(SessionError::AttendanceClosed { lecture_id: lecture_id.to_string() });
        }

        Ok(lecture)
    }

    /// True once the teacher has signed in.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The lectures the dashboard manages.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The signed-in teacher's profile.
    pub fn teacher(&self) -> &TeacherProfile {
        &self.teacher
    }
}
