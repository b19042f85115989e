//! Account roles and the route areas each role may reach.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role claimed by an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator managing every hostel.
    SuperAdmin,
    /// Staff member managing one hostel.
    Admin,
    /// Resident of one hostel.
    Student,
}

/// Error raised when parsing an unknown role string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl Role {
    /// Every role, in privilege order.
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::Student];

    /// Stable string form used in storage and session cookies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Student => "student",
        }
    }

    /// Root of the dashboard area reserved for this role.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::Role;
    ///
    /// assert_eq!(Role::SuperAdmin.dashboard_path(), "/superadmin");
    /// ```
    #[must_use]
    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::SuperAdmin => "/superadmin",
            Self::Admin => "/admin",
            Self::Student => "/student",
        }
    }

    /// Whether the role is confined to a single hostel.
    #[must_use]
    pub const fn is_hostel_scoped(self) -> bool {
        matches!(self, Self::Admin | Self::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}
