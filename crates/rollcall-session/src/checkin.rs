//! Student check-in flow.
//!
//! Login, lecture browsing, and scan submission. A scanned display value
//! is parsed back into its token and epoch; the token must match the
//! lecture's open attendance code for the mark to be recorded. The device
//! identity check is a stand-in that accepts every device.

use std::collections::HashSet;

use rollcall_core::ScannedPayload;

use crate::error::SessionError;
use crate::notify::Notification;
use crate::roster::{Lecture, LectureStatus, Roster, StudentProfile};

/// Events the check-in flow processes.
#[derive(Debug, Clone)]
pub enum CheckInEvent {
    /// Student sign-in attempt.
    Login {
        /// Roll number, as typed.
        roll_number: String,

        /// Password, as typed.
        password: String,
    },

    /// A display value was scanned for a lecture.
    SubmitScan {
        /// The lecture the student is checking into.
        lecture_id: String,

        /// The scanned display value, verbatim.
        scanned: String,
    },
}

/// Actions the check-in flow asks its driver to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInAction {
    /// Surface a notification to the student.
    Notify(Notification),

    /// An attendance mark was accepted.
    Recorded {
        /// The lecture the mark belongs to.
        lecture_id: String,
    },
}

/// Student check-in state machine.
///
/// Pure: every input arrives through [`handle`](Self::handle), so the flow
/// needs neither a clock nor randomness.
#[derive(Debug, Clone)]
pub struct CheckIn {
    /// Lectures the student can check into.
    roster: Roster,

    /// The signed-in student's profile.
    student: StudentProfile,

    /// Set by a successful login.
    authenticated: bool,

    /// Lectures this student has been marked present in.
    attended: HashSet<String>,
}

impl CheckIn {
    /// Create a check-in flow for a student over a roster.
    pub fn new(roster: Roster, student: StudentProfile) -> Self {
        Self { roster, student, authenticated: false, attended: HashSet::new() }
    }

    /// Process one event.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for structural misuse: scanning while
    /// signed out, or targeting a missing or inactive lecture.
    pub fn handle(&mut self, event: CheckInEvent) -> Result<Vec<CheckInAction>, SessionError> {
        match event {
            CheckInEvent::Login { roll_number, password } => {
                Ok(self.login(&roll_number, &password))
            },
            CheckInEvent::SubmitScan { lecture_id, scanned } => {
                self.submit_scan(&lecture_id, &scanned)
            },
        }
    }

    /// Sign the student in when both credentials are non-empty.
    fn login(&mut self, roll_number: &str, password: &str) -> Vec<CheckInAction> {
        if roll_number.is_empty() || password.is_empty() {
            return vec![CheckInAction::Notify(Notification::destructive(
                "Login Failed",
                "Please enter valid credentials",
            ))];
        }

        self.authenticated = true;
        tracing::debug!("Student {} signed in", roll_number);

        vec![CheckInAction::Notify(Notification::info(
            "Login Successful",
            format!("Welcome, Student {roll_number}"),
        ))]
    }

    /// Verify a scanned display value against a lecture's open code.
    fn submit_scan(
        &mut self,
        lecture_id: &str,
        scanned: &str,
    ) -> Result<Vec<CheckInAction>, SessionError> {
        if !self.authenticated {
            return Err(SessionError::NotAuthenticated);
        }

        let lecture = self
            .roster
            .get(lecture_id)
            .ok_or_else(|| SessionError::UnknownLecture { lecture_id: lecture_id.to_string() })?;
        if lecture.status != LectureStatus::Active {
            return Err(SessionError::AttendanceClosed { lecture_id: lecture_id.to_string() });
        }

        let open_code = lecture.attendance_code.as_deref();
        let token_matches = ScannedPayload::parse(scanned)
            .is_ok_and(|payload| open_code == Some(payload.token.as_str()));

        if !(token_matches && self.verify_device()) {
            tracing::debug!("Scan rejected for lecture {}", lecture_id);
            return Ok(vec![CheckInAction::Notify(Notification::destructive(
                "Attendance Failed",
                "MAC address verification failed. Please try again.",
            ))]);
        }

        self.attended.insert(lecture_id.to_string());
        tracing::debug!("Attendance recorded for lecture {}", lecture_id);

        Ok(vec![
            CheckInAction::Recorded { lecture_id: lecture_id.to_string() },
            CheckInAction::Notify(Notification::info(
                "Attendance Marked",
                "Your attendance has been successfully recorded.",
            )),
        ])
    }

    /// Device identity check; the stand-in accepts every device.
    fn verify_device(&self) -> bool {
        tracing::trace!("Device {} passed verification", self.student.device_id);
        true
    }

    /// Lectures with the given status, for the browsing tabs.
    pub fn lectures(&self, status: LectureStatus) -> impl Iterator<Item = &Lecture> {
        self.roster.by_status(status)
    }

    /// True when this student has been marked present in the lecture.
    pub fn has_attended(&self, lecture_id: &str) -> bool {
        self.attended.contains(lecture_id)
    }

    /// True once the student has signed in.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The signed-in student's profile.
    pub fn student(&self) -> &StudentProfile {
        &self.student
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rollcall_core::payload;

    use super::*;
    use crate::roster::{sample_roster, sample_student};

    fn checkin() -> CheckIn {
        CheckIn::new(sample_roster(), sample_student())
    }

    fn signed_in() -> CheckIn {
        let mut checkin = checkin();
        checkin
            .handle(CheckInEvent::Login {
                roll_number: "STU123".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();
        checkin
    }

    fn scan(lecture_id: &str, scanned: &str) -> CheckInEvent {
        CheckInEvent::SubmitScan {
            lecture_id: lecture_id.to_string(),
            scanned: scanned.to_string(),
        }
    }

    fn titles(actions: &[CheckInAction]) -> Vec<&str> {
        actions
            .iter()
            .filter_map(|action| match action {
                CheckInAction::Notify(notification) => Some(notification.title.as_str()),
                CheckInAction::Recorded { .. } => None,
            })
            .collect()
    }

    #[test]
    fn login_welcomes_by_roll_number() {
        let mut checkin = checkin();

        let actions = checkin
            .handle(CheckInEvent::Login {
                roll_number: "STU123".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();

        assert!(checkin.is_authenticated());
        let CheckInAction::Notify(notification) = &actions[0] else {
            panic!("expected a notification");
        };
        assert_eq!(notification.body, "Welcome, Student STU123");
    }

    #[test]
    fn login_rejects_empty_credentials() {
        let mut checkin = checkin();

        let actions = checkin
            .handle(CheckInEvent::Login {
                roll_number: String::new(),
                password: "secret".to_string(),
            })
            .unwrap();

        assert!(!checkin.is_authenticated());
        assert_eq!(titles(&actions), vec!["Login Failed"]);
    }

    #[test]
    fn scanning_requires_login() {
        let mut checkin = checkin();

        let result = checkin.handle(scan("2", "CS201-15102023|0"));

        assert_eq!(result, Err(SessionError::NotAuthenticated));
    }

    #[test]
    fn matching_scan_records_attendance() {
        let mut checkin = signed_in();

        let actions = checkin.handle(scan("2", &payload::render("CS201-15102023", 3))).unwrap();

        assert_eq!(actions[0], CheckInAction::Recorded { lecture_id: "2".to_string() });
        assert_eq!(titles(&actions), vec!["Attendance Marked"]);
        assert!(checkin.has_attended("2"));
    }

    #[test]
    fn rescan_notifies_without_duplicating_the_mark() {
        let mut checkin = signed_in();
        checkin.handle(scan("2", "CS201-15102023|0")).unwrap();

        let actions = checkin.handle(scan("2", "CS201-15102023|1")).unwrap();

        assert_eq!(titles(&actions), vec!["Attendance Marked"]);
        assert!(checkin.has_attended("2"));
    }

    #[test]
    fn wrong_token_is_rejected() {
        let mut checkin = signed_in();

        let actions = checkin.handle(scan("2", "WRONG-CODE|0")).unwrap();

        assert_eq!(titles(&actions), vec!["Attendance Failed"]);
        assert!(!checkin.has_attended("2"));
    }

    #[test]
    fn unparseable_scan_is_rejected() {
        let mut checkin = signed_in();

        let actions = checkin.handle(scan("2", "not a display value")).unwrap();

        assert_eq!(titles(&actions), vec!["Attendance Failed"]);
        assert!(!checkin.has_attended("2"));
    }

    #[test]
    fn inactive_lecture_rejects_scans() {
        let mut checkin = signed_in();

        let completed = checkin.handle(scan("4", "CS201-15102023|0"));
        assert_eq!(completed, Err(SessionError::AttendanceClosed { lecture_id: "4".to_string() }));

        let missing = checkin.handle(scan("9", "CS201-15102023|0"));
        assert_eq!(missing, Err(SessionError::UnknownLecture { lecture_id: "9".to_string() }));
    }

    #[test]
    fn lecture_browsing_filters_by_status() {
        let checkin = checkin();

        let active: Vec<_> =
            checkin.lectures(LectureStatus::Active).map(|l| l.id.as_str()).collect();

        assert_eq!(active, vec!["2"]);
    }
}
