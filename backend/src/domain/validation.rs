//! Field-level validation shared by the entity constructors.
//!
//! Every failure names the offending field (in its camelCase wire form) and a
//! machine-readable code so inbound adapters can render precise form errors.

use serde_json::json;

use super::Error;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    field: &'static str,
    code: &'static str,
    message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// Wire name of the rejected field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Machine-readable rejection code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Error::invalid_request(value.message.clone())
            .with_details(json!({ "field": value.field, "code": value.code }))
    }
}

/// Trim `raw` and require between 1 and `max_chars` characters.
pub fn required_text(field: &'static str, raw: &str, max_chars: usize) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, "required", format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(FieldError::new(
            field,
            "too_long",
            format!("{field} must be at most {max_chars} characters"),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Like [`required_text`] but blank input becomes `None`.
pub fn optional_text(
    field: &'static str,
    raw: Option<&str>,
    max_chars: usize,
) -> Result<Option<String>, FieldError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => required_text(field, value, max_chars).map(Some),
    }
}

/// Normalise an email address to lower case and check its basic shape.
///
/// # Examples
/// ```
/// use hostel_backend::domain::validation::email;
///
/// assert_eq!(email("email", " Warden@Example.COM ").unwrap(), "warden@example.com");
/// assert!(email("email", "no-at-sign").is_err());
/// ```
pub fn email(field: &'static str, raw: &str) -> Result<String, FieldError> {
    let value = required_text(field, raw, 254)?.to_lowercase();
    let invalid = || FieldError::new(field, "invalid_email", format!("{field} must be a valid email address"));
    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(invalid());
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(value)
}

/// Check a phone number made of digits with optional `+`, spaces, dashes
/// and parentheses.
pub fn phone(field: &'static str, raw: &str) -> Result<String, FieldError> {
    let value = required_text(field, raw, 20)?;
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !allowed || digits < 7 {
        return Err(FieldError::new(
            field,
            "invalid_phone",
            format!("{field} must be a valid phone number"),
        ));
    }
    Ok(value)
}

/// Require `value` to fall within `min..=max`.
pub fn in_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<T, FieldError>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(FieldError::new(
            field,
            "out_of_range",
            format!("{field} must be between {min} and {max}"),
        ));
    }
    Ok(value)
}
