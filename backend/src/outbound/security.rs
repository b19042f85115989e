//! bcrypt-backed [`PasswordHasher`] adapter.
//!
//! bcrypt is CPU bound, so hashing and verification run on the blocking
//! thread pool. Plain-text copies handed to those threads are zeroised on drop.

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Lowest cost accepted by the bcrypt crate.
pub const MIN_COST: u32 = 4;

/// Password hasher using bcrypt with a configurable cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Build a hasher; costs below [`MIN_COST`] are raised to it.
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.max(MIN_COST),
        }
    }

    /// Configured bcrypt cost.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(|err| PasswordHashError::hash(format!("hashing task failed: {err}")))?
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let stored = password_hash.to_owned();
        let outcome =
            tokio::task::spawn_blocking(move || bcrypt::verify(password.as_str(), &stored))
                .await
                .map_err(|err| PasswordHashError::hash(format!("verify task failed: {err}")))?;
        match outcome {
            Ok(matches) => Ok(matches),
            Err(error) => {
                warn!(%error, "stored password hash could not be verified");
                Ok(false)
            }
        }
    }
}
