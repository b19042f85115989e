//! Student residents and their profile fields.

use chrono::NaiveDate;

use super::validation::{FieldError, email, phone, required_text};
use super::{HostelId, RoomId, StudentId};

/// Raw student profile fields as submitted by a hostel admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub enrolled_on: NaiveDate,
}

/// Validated student profile fields.
///
/// The email doubles as the login identity of the student's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub enrolled_on: NaiveDate,
}

impl StudentDraft {
    /// Validate the draft.
    pub fn validate(self) -> Result<StudentDetails, FieldError> {
        Ok(StudentDetails {
            full_name: required_text("fullName", &self.full_name, 120)?,
            email: email("email", &self.email)?,
            phone: phone("phone", &self.phone)?,
            guardian_name: required_text("guardianName", &self.guardian_name, 120)?,
            guardian_phone: phone("guardianPhone", &self.guardian_phone)?,
            enrolled_on: self.enrolled_on,
        })
    }
}

/// A resident of a hostel, optionally assigned to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub hostel_id: HostelId,
    pub room_id: Option<RoomId>,
    pub details: StudentDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> StudentDraft {
        StudentDraft {
            full_name: "Ada Lovelace".into(),
            email: " Ada@Example.com".into(),
            phone: "+44 20 7946 0001".into(),
            guardian_name: "Anne Byron".into(),
            guardian_phone: "+44 20 7946 0002".into(),
            enrolled_on: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        }
    }

    #[rstest]
    fn validate_lowercases_email(draft: StudentDraft) {
        let details = draft.validate().expect("valid draft");
        assert_eq!(details.email, "ada@example.com");
    }

    #[rstest]
    fn validate_reports_guardian_phone(draft: StudentDraft) {
        let err = StudentDraft {
            guardian_phone: "n/a".into(),
            ..draft
        }
        .validate()
        .expect_err("bad phone");
        assert_eq!(err.field(), "guardianPhone");
    }
}
