//! Hostel administrator profiles.

use super::validation::{FieldError, email, phone, required_text};
use super::{AdminId, HostelId};

/// Raw admin profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Validated admin profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl AdminDraft {
    /// Validate the draft.
    pub fn validate(self) -> Result<AdminDetails, FieldError> {
        Ok(AdminDetails {
            full_name: required_text("fullName", &self.full_name, 120)?,
            email: email("email", &self.email)?,
            phone: phone("phone", &self.phone)?,
        })
    }
}

/// Staff member managing a single hostel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: AdminId,
    pub hostel_id: HostelId,
    pub details: AdminDetails,
}
