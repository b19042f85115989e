//! Hostel aggregate: the tenant boundary every other record hangs off.

use chrono::{DateTime, NaiveDate, Utc};

use super::HostelId;
use super::validation::{FieldError, email, in_range, phone, required_text};

/// Upper bound for the per-hostel room and student limits.
pub const MAX_HOSTEL_LIMIT: u32 = 10_000;

/// Raw hostel fields as submitted by a super-admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostelDraft {
    pub name: String,
    pub hostel_number: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub room_limit: u32,
    pub student_limit: u32,
    pub expires_on: Option<NaiveDate>,
}

/// Validated, editable hostel fields.
///
/// ## Invariants
/// - `hostel_number` is upper case ASCII letters, digits and `-`.
/// - `contact_email` is lower case.
/// - both limits fall within `1..=MAX_HOSTEL_LIMIT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostelDetails {
    pub name: String,
    pub hostel_number: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub room_limit: u32,
    pub student_limit: u32,
}

impl HostelDraft {
    /// Validate the draft, returning the details and the requested expiry.
    pub fn validate(self) -> Result<(HostelDetails, Option<NaiveDate>), FieldError> {
        let details = HostelDetails {
            name: required_text("name", &self.name, 120)?,
            hostel_number: hostel_number(&self.hostel_number)?,
            address: required_text("address", &self.address, 255)?,
            contact_email: email("contactEmail", &self.contact_email)?,
            contact_phone: phone("contactPhone", &self.contact_phone)?,
            room_limit: in_range("roomLimit", self.room_limit, 1, MAX_HOSTEL_LIMIT)?,
            student_limit: in_range("studentLimit", self.student_limit, 1, MAX_HOSTEL_LIMIT)?,
        };
        Ok((details, self.expires_on))
    }
}

/// Normalise a hostel number: the tenant code typed at login.
///
/// # Examples
/// ```
/// use hostel_backend::domain::hostel_number;
///
/// assert_eq!(hostel_number(" hb-042 ").unwrap(), "HB-042");
/// assert!(hostel_number("hb 042").is_err());
/// ```
pub fn hostel_number(raw: &str) -> Result<String, FieldError> {
    let value = required_text("hostelNumber", raw, 20)?.to_ascii_uppercase();
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(FieldError::new(
            "hostelNumber",
            "invalid_format",
            "hostelNumber may only contain letters, digits and dashes",
        ));
    }
    Ok(value)
}

/// A managed property containing rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hostel {
    pub id: HostelId,
    pub details: HostelDetails,
    /// Last day on which the hostel's subscription is valid.
    pub expires_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Hostel {
    /// A hostel stays valid through its expiry day.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, Utc};
    /// use hostel_backend::domain::{Hostel, HostelDetails, HostelId};
    ///
    /// let expires_on = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
    /// let hostel = Hostel {
    ///     id: HostelId::random(),
    ///     details: HostelDetails {
    ///         name: "Harbour House".into(),
    ///         hostel_number: "HH-1".into(),
    ///         address: "1 Quay Road".into(),
    ///         contact_email: "desk@harbour.example".into(),
    ///         contact_phone: "+44 1632 960000".into(),
    ///         room_limit: 40,
    ///         student_limit: 120,
    ///     },
    ///     expires_on,
    ///     created_at: Utc::now(),
    /// };
    /// assert!(!hostel.is_expired(expires_on));
    /// assert!(hostel.is_expired(expires_on.succ_opt().unwrap()));
    /// ```
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_on < today
    }
}
