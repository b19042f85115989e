//! Platform-wide settings managed by super-admins.

use super::validation::{FieldError, email, in_range, required_text};

/// Longest validity a new hostel can be granted by default.
pub const MAX_VALIDITY_DAYS: u32 = 3_650;

/// Global configuration of the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSettings {
    pub platform_name: String,
    pub support_email: String,
    /// Days added to today when a hostel is created without an expiry.
    pub default_validity_days: u32,
    pub maintenance_mode: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            platform_name: "Hostel Manager".to_owned(),
            support_email: "support@hostel.local".to_owned(),
            default_validity_days: 365,
            maintenance_mode: false,
        }
    }
}

/// Raw settings as submitted by a super-admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSettingsDraft {
    pub platform_name: String,
    pub support_email: String,
    pub default_validity_days: u32,
    pub maintenance_mode: bool,
}

impl SystemSettingsDraft {
    /// Validate the draft.
    pub fn validate(self) -> Result<SystemSettings, FieldError> {
        Ok(SystemSettings {
            platform_name: required_text("platformName", &self.platform_name, 120)?,
            support_email: email("supportEmail", &self.support_email)?,
            default_validity_days: in_range(
                "defaultValidityDays",
                self.default_validity_days,
                1,
                MAX_VALIDITY_DAYS,
            )?,
            maintenance_mode: self.maintenance_mode,
        })
    }
}
