//! Port for the platform-wide settings row.

use async_trait::async_trait;

use crate::domain::SystemSettings;

use super::RepositoryError;

/// Port for system settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SystemSettingsRepository: Send + Sync {
    /// Stored settings, or `None` before the first save.
    async fn load(&self) -> Result<Option<SystemSettings>, RepositoryError>;

    /// Persist the settings, replacing any previous value.
    async fn save(&self, settings: &SystemSettings) -> Result<(), RepositoryError>;
}
