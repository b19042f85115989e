//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or verification could not run.
        Hash => "password hashing failed: {message}",
    }
}

impl From<PasswordHashError> for Error {
    fn from(error: PasswordHashError) -> Self {
        Error::internal(error.to_string())
    }
}

/// Port for hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password.
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a plain-text password against a stored hash.
    ///
    /// A malformed stored hash verifies as `false` rather than erroring.
    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, PasswordHashError>;
}
