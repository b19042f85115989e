//! Authentication primitives: login credentials, accounts and principals.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::validation::FieldError;
use super::{AccountId, AdminId, Error, HostelId, Role, StudentId};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;
/// bcrypt ignores input past 72 bytes, so longer passwords are refused.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// An admin or student login omitted the hostel number.
    MissingHostelNumber,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::MissingHostelNumber => {
                write!(f, "hostel number is required for admin and student logins")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the authentication service.
///
/// ## Invariants
/// - `email` is trimmed, lower case and non-empty.
/// - `password` is non-empty but keeps caller-provided whitespace.
/// - `hostel_number` is present, trimmed and upper case exactly when the
///   role is hostel scoped.
///
/// # Examples
/// ```
/// use hostel_backend::domain::{LoginCredentials, Role};
///
/// let creds =
///     LoginCredentials::try_from_parts(" Warden@Example.com ", "pw", Role::Admin, Some("hb-1"))
///         .unwrap();
/// assert_eq!(creds.email(), "warden@example.com");
/// assert_eq!(creds.hostel_number(), Some("HB-1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
    role: Role,
    hostel_number: Option<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw request inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        role: Role,
        hostel_number: Option<&str>,
    ) -> Result<Self, LoginValidationError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        let hostel_number = if role.is_hostel_scoped() {
            let number = hostel_number
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or(LoginValidationError::MissingHostelNumber)?;
            Some(number.to_ascii_uppercase())
        } else {
            None
        };

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
            role,
            hostel_number,
        })
    }

    /// Normalised email used for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Role the caller claims.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Tenant code, present for hostel-scoped roles.
    pub fn hostel_number(&self) -> Option<&str> {
        self.hostel_number.as_deref()
    }
}

/// Stored login identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub hostel_id: Option<HostelId>,
    /// Admin or student profile this account authenticates.
    pub profile_id: Option<Uuid>,
}

impl Account {
    /// Principal stored in the session once this account has logged in.
    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal {
            account_id: self.id,
            role: self.role,
            hostel_id: self.hostel_id,
            profile_id: self.profile_id,
        }
    }
}

/// Authenticated caller, as persisted in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub account_id: AccountId,
    pub role: Role,
    pub hostel_id: Option<HostelId>,
    pub profile_id: Option<Uuid>,
}

impl Principal {
    /// Hostel the caller is confined to.
    ///
    /// Hostel-scoped handlers call this before touching any record; a
    /// principal without a hostel cannot reach hostel data at all.
    pub fn hostel(&self) -> Result<HostelId, Error> {
        self.hostel_id
            .ok_or_else(|| Error::forbidden("this action requires a hostel account"))
    }

    /// Student profile of the caller.
    pub fn student(&self) -> Result<StudentId, Error> {
        match (self.role, self.profile_id) {
            (Role::Student, Some(id)) => Ok(StudentId::from_uuid(id)),
            _ => Err(Error::forbidden("this action requires a student account")),
        }
    }

    /// Succeeds only for platform operators.
    pub fn super_admin(&self) -> Result<(), Error> {
        if self.role == Role::SuperAdmin {
            Ok(())
        } else {
            Err(Error::forbidden("this action requires a super-admin account"))
        }
    }

    /// Admin profile of the caller.
    pub fn admin(&self) -> Result<AdminId, Error> {
        match (self.role, self.profile_id) {
            (Role::Admin, Some(id)) => Ok(AdminId::from_uuid(id)),
            _ => Err(Error::forbidden("this action requires an admin account")),
        }
    }
}

/// A password that satisfies the length policy.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Check the password policy for the given wire field.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::NewPassword;
    ///
    /// assert!(NewPassword::new("password", "short").is_err());
    /// assert!(NewPassword::new("password", "long enough").is_ok());
    /// ```
    pub fn new(field: &'static str, raw: &str) -> Result<Self, FieldError> {
        if raw.chars().count() < MIN_PASSWORD_CHARS {
            return Err(FieldError::new(
                field,
                "too_short",
                format!("{field} must be at least {MIN_PASSWORD_CHARS} characters"),
            ));
        }
        if raw.len() > MAX_PASSWORD_BYTES {
            return Err(FieldError::new(
                field,
                "too_long",
                format!("{field} must be at most {MAX_PASSWORD_BYTES} bytes"),
            ));
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plain-text password, for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(<redacted>)")
    }
}

/// Request to replace the caller's password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: Zeroizing<String>,
    new: NewPassword,
}

impl PasswordChange {
    /// Validate the new password; the current one is checked by the service.
    pub fn try_new(current: &str, new: &str) -> Result<Self, FieldError> {
        if current.is_empty() {
            return Err(FieldError::new(
                "currentPassword",
                "required",
                "currentPassword must not be empty",
            ));
        }
        Ok(Self {
            current: Zeroizing::new(current.to_owned()),
            new: NewPassword::new("newPassword", new)?,
        })
    }

    /// Password the caller claims to have now.
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// Replacement password.
    pub fn new_password(&self) -> &NewPassword {
        &self.new
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", Role::SuperAdmin, None, LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", Role::SuperAdmin, None, LoginValidationError::EmptyEmail)]
    #[case("a@b.c", "", Role::SuperAdmin, None, LoginValidationError::EmptyPassword)]
    #[case("a@b.c", "pw", Role::Admin, None, LoginValidationError::MissingHostelNumber)]
    #[case("a@b.c", "pw", Role::Student, Some("  "), LoginValidationError::MissingHostelNumber)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] role: Role,
        #[case] hostel_number: Option<&str>,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password, role, hostel_number)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn super_admin_ignores_hostel_number() {
        let creds =
            LoginCredentials::try_from_parts("Root@Example.com", " pw ", Role::SuperAdmin, Some("HB-1"))
                .expect("valid inputs");
        assert_eq!(creds.email(), "root@example.com");
        assert_eq!(creds.password(), " pw ");
        assert_eq!(creds.hostel_number(), None);
    }

    #[rstest]
    fn principal_scopes_follow_role() {
        let profile = Uuid::new_v4();
        let principal = Principal {
            account_id: AccountId::random(),
            role: Role::Student,
            hostel_id: Some(HostelId::random()),
            profile_id: Some(profile),
        };
        assert_eq!(principal.student().expect("student").as_uuid(), &profile);
        assert!(principal.admin().is_err());
        assert!(principal.hostel().is_ok());
        assert!(principal.super_admin().is_err());
    }

    #[rstest]
    #[case(Role::SuperAdmin, true)]
    #[case(Role::Admin, false)]
    #[case(Role::Student, false)]
    fn only_super_admins_pass_the_platform_check(#[case] role: Role, #[case] allowed: bool) {
        let principal = Principal {
            account_id: AccountId::random(),
            role,
            hostel_id: role.is_hostel_scoped().then(HostelId::random),
            profile_id: None,
        };
        assert_eq!(principal.super_admin().is_ok(), allowed);
    }

    #[rstest]
    fn principal_round_trips_through_json() {
        let principal = Principal {
            account_id: AccountId::random(),
            role: Role::SuperAdmin,
            hostel_id: None,
            profile_id: None,
        };
        let json = serde_json::to_string(&principal).expect("serialise");
        let back: Principal = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, principal);
    }

    #[rstest]
    #[case("", "long enough", "currentPassword")]
    #[case("old", "short", "newPassword")]
    fn password_change_rejects(#[case] current: &str, #[case] new: &str, #[case] field: &str) {
        let err = PasswordChange::try_new(current, new).expect_err("invalid change");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn new_password_rejects_past_bcrypt_limit() {
        let err = NewPassword::new("password", &"x".repeat(73)).expect_err("too long");
        assert_eq!(err.code(), "too_long");
    }
}
