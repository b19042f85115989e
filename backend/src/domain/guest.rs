//! Temporary guests occupying a bed for a bounded stay.

use chrono::NaiveDate;

use super::validation::{FieldError, phone, required_text};
use super::{GuestId, HostelId, RoomId};

/// Raw guest fields as submitted by a hostel admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestDraft {
    pub room_id: RoomId,
    pub full_name: String,
    pub phone: String,
    pub purpose: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Validated guest fields.
///
/// ## Invariants
/// - `check_out >= check_in`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestDetails {
    pub room_id: RoomId,
    pub full_name: String,
    pub phone: String,
    pub purpose: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl GuestDraft {
    /// Validate the draft.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use hostel_backend::domain::{GuestDraft, RoomId};
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2026, 5, d).unwrap();
    /// let draft = GuestDraft {
    ///     room_id: RoomId::random(),
    ///     full_name: "Visiting Parent".into(),
    ///     phone: "+1 555 010 0000".into(),
    ///     purpose: "Family visit".into(),
    ///     check_in: day(10),
    ///     check_out: day(9),
    /// };
    /// assert_eq!(draft.validate().unwrap_err().field(), "checkOut");
    /// ```
    pub fn validate(self) -> Result<GuestDetails, FieldError> {
        if self.check_out < self.check_in {
            return Err(FieldError::new(
                "checkOut",
                "before_check_in",
                "checkOut must not precede checkIn",
            ));
        }
        Ok(GuestDetails {
            room_id: self.room_id,
            full_name: required_text("fullName", &self.full_name, 120)?,
            phone: phone("phone", &self.phone)?,
            purpose: required_text("purpose", &self.purpose, 255)?,
            check_in: self.check_in,
            check_out: self.check_out,
        })
    }
}

/// A short-stay occupant of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryGuest {
    pub id: GuestId,
    pub hostel_id: HostelId,
    pub details: GuestDetails,
}
