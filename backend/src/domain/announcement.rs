//! Hostel notice board announcements.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{FieldError, required_text};
use super::{AnnouncementId, HostelId};

/// Who an announcement is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Everyone,
    Students,
    Staff,
}

impl Audience {
    /// Stable storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Everyone => "everyone",
            Self::Students => "students",
            Self::Staff => "staff",
        }
    }

    /// Whether students see announcements with this audience.
    #[must_use]
    pub const fn reaches_students(self) -> bool {
        matches!(self, Self::Everyone | Self::Students)
    }
}

impl FromStr for Audience {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "everyone" => Ok(Self::Everyone),
            "students" => Ok(Self::Students),
            "staff" => Ok(Self::Staff),
            _ => Err(FieldError::new(
                "audience",
                "invalid_choice",
                "audience must be one of everyone, students, staff",
            )),
        }
    }
}

/// Raw announcement fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementDraft {
    pub title: String,
    pub body: String,
    pub audience: String,
}

/// Validated announcement fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementDetails {
    pub title: String,
    pub body: String,
    pub audience: Audience,
}

impl AnnouncementDraft {
    /// Validate the draft.
    pub fn validate(self) -> Result<AnnouncementDetails, FieldError> {
        Ok(AnnouncementDetails {
            title: required_text("title", &self.title, 160)?,
            body: required_text("body", &self.body, 5_000)?,
            audience: self.audience.parse()?,
        })
    }
}

/// Published announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub hostel_id: HostelId,
    pub details: AnnouncementDetails,
    pub created_at: DateTime<Utc>,
}
