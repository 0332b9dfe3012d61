//! Lecture roster and people.
//!
//! The in-memory data the session machines operate on: lectures with their
//! status and attendance codes, the known teacher and student profiles, and
//! the attendance-code format. Sample fixtures provide the data the demo
//! runs on; drivers may equally load a roster from JSON.

use rollcall_core::Environment;
use serde::{Deserialize, Serialize};

/// Alphabet for attendance-code suffixes.
const CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix in a minted attendance code.
pub const CODE_SUFFIX_LEN: usize = 8;

/// Lecture lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LectureStatus {
    /// Scheduled but not yet running.
    Upcoming,

    /// Currently running; attendance can be collected.
    Active,

    /// Finished.
    Completed,
}

/// One lecture in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    /// Roster-unique identifier.
    pub id: String,

    /// Lecture title.
    pub title: String,

    /// Course the lecture belongs to.
    pub subject: String,

    /// Name of the teacher holding the lecture.
    pub teacher: String,

    /// Calendar date, as displayed.
    pub date: String,

    /// Displayed start time.
    pub start_time: String,

    /// Displayed end time.
    pub end_time: String,

    /// Lifecycle status.
    pub status: LectureStatus,

    /// Attendance code, present while attendance is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_code: Option<String>,
}

/// Teacher profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherProfile {
    /// Display name.
    pub name: String,

    /// Staff identifier.
    pub id: String,

    /// Department.
    pub department: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,
}

/// Student profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Display name.
    pub name: String,

    /// Roll number used to sign in.
    pub roll_number: String,

    /// Enrolled course.
    pub course: String,

    /// Current semester.
    pub semester: String,

    /// Department.
    pub department: String,

    /// Device identifier recorded at registration.
    pub device_id: String,
}

/// Lecture roster.
///
/// Owned by one session machine; in-memory only, no persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    lectures: Vec<Lecture>,
}

impl Roster {
    /// Create a roster from a list of lectures.
    pub fn new(lectures: Vec<Lecture>) -> Self {
        Self { lectures }
    }

    /// All lectures in roster order.
    pub fn lectures(&self) -> &[Lecture] {
        &self.lectures
    }

    /// Lectures with the given status, in roster order.
    pub fn by_status(&self, status: LectureStatus) -> impl Iterator<Item = &Lecture> {
        self.lectures.iter().filter(move |lecture| lecture.status == status)
    }

    /// Look up a lecture by ID.
    pub fn get(&self, lecture_id: &str) -> Option<&Lecture> {
        self.lectures.iter().find(|lecture| lecture.id == lecture_id)
    }

    /// The lecture an attendance code belongs to.
    ///
    /// Matches a stored attendance code exactly, falling back to the
    /// `{id}-` prefix that minted codes carry.
    pub fn lecture_for_code(&self, code: &str) -> Option<&Lecture> {
        self.lectures
            .iter()
            .find(|lecture| lecture.attendance_code.as_deref() == Some(code))
            .or_else(|| {
                self.lectures.iter().find(|lecture| {
                    code.strip_prefix(lecture.id.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
                })
            })
    }

    /// Next sequential numeric ID, skipping non-numeric IDs.
    pub fn next_id(&self) -> String {
        let max = self
            .lectures
            .iter()
            .filter_map(|lecture| lecture.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        (max + 1).to_string()
    }

    /// Add a lecture to the roster.
    pub fn push(&mut self, lecture: Lecture) {
        self.lectures.push(lecture);
    }

    /// Replace a lecture's attendance code.
    ///
    /// Returns false when no lecture with this ID exists.
    pub fn set_code(&mut self, lecture_id: &str, code: Option<String>) -> bool {
        match self.lectures.iter_mut().find(|lecture| lecture.id == lecture_id) {
            Some(lecture) => {
                lecture.attendance_code = code;
                true
            },
            None => false,
        }
    }
}

/// Mint an attendance code for a lecture: `{id}-` plus a random base-36
/// suffix.
pub fn mint_code<E: Environment>(env: &E, lecture_id: &str) -> String {
    let mut bytes = [0u8; CODE_SUFFIX_LEN];
    env.random_bytes(&mut bytes);

    let suffix: String = bytes
        .iter()
        .map(|byte| char::from(CODE_ALPHABET[usize::from(*byte) % CODE_ALPHABET.len()]))
        .collect();

    format!("{lecture_id}-{suffix}")
}

/// The sample roster the demo ships: four lectures, one active with an
/// open attendance code.
pub fn sample_roster() -> Roster {
    Roster::new(vec![
        Lecture {
            id: "1".to_string(),
            title: "Introduction to Programming".to_string(),
            subject: "Computer Science 101".to_string(),
            teacher: "Dr. Emily Johnson".to_string(),
            date: "2023-10-15".to_string(),
            start_time: "09:00 AM".to_string(),
            end_time: "10:30 AM".to_string(),
            status: LectureStatus::Upcoming,
            attendance_code: None,
        },
        Lecture {
            id: "2".to_string(),
            title: "Data Structures".to_string(),
            subject: "Computer Science 201".to_string(),
            teacher: "Dr. Emily Johnson".to_string(),
            date: "2023-10-15".to_string(),
            start_time: "11:00 AM".to_string(),
            end_time: "12:30 PM".to_string(),
            status: LectureStatus::Active,
            attendance_code: Some("CS201-15102023".to_string()),
        },
        Lecture {
            id: "3".to_string(),
            title: "Web Development".to_string(),
            subject: "Computer Science 301".to_string(),
            teacher: "Dr. Emily Johnson".to_string(),
            date: "2023-10-16".to_string(),
            start_time: "02:00 PM".to_string(),
            end_time: "03:30 PM".to_string(),
            status: LectureStatus::Upcoming,
            attendance_code: None,
        },
        Lecture {
            id: "4".to_string(),
            title: "Database Management".to_string(),
            subject: "Computer Science 401".to_string(),
            teacher: "Dr. Emily Johnson".to_string(),
            date: "2023-10-14".to_string(),
            start_time: "09:00 AM".to_string(),
            end_time: "10:30 AM".to_string(),
            status: LectureStatus::Completed,
            attendance_code: None,
        },
    ])
}

/// The known teacher profile.
pub fn sample_teacher() -> TeacherProfile {
    TeacherProfile {
        name: "Dr. Emily Johnson".to_string(),
        id: "TCH456".to_string(),
        department: "Computer Science".to_string(),
        email: "emily.johnson@example.edu".to_string(),
        phone: "+1 234 567 890".to_string(),
    }
}

/// The known student profile.
pub fn sample_student() -> StudentProfile {
    StudentProfile {
        name: "John Doe".to_string(),
        roll_number: "STU123".to_string(),
        course: "Computer Science".to_string(),
        semester: "4th".to_string(),
        department: "Engineering".to_string(),
        device_id: "00:1A:2B:3C:4D:5E".to_string(),
    }
}
