//! PostgreSQL-backed `SystemSettingsRepository` adapter.
//!
//! Settings live in a single row keyed by [`SETTINGS_ROW_ID`]; saving upserts
//! that row.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::SystemSettings;
use crate::domain::ports::{RepositoryError, SystemSettingsRepository};
use crate::query_optional;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{SETTINGS_ROW_ID, SystemSettingsRow};
use super::pool::DbPool;
use super::schema::system_settings;

/// Diesel-backed implementation of the system settings port.
#[derive(Clone)]
pub struct DieselSystemSettingsRepository {
    pool: DbPool,
}

impl DieselSystemSettingsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SystemSettingsRepository for DieselSystemSettingsRepository {
    async fn load(&self) -> Result<Option<SystemSettings>, RepositoryError> {
        query_optional!(
            self,
            system_settings::table,
            system_settings::id.eq(SETTINGS_ROW_ID),
            SystemSettingsRow
        )
    }

    async fn save(&self, settings: &SystemSettings) -> Result<(), RepositoryError> {
        let row = SystemSettingsRow::from_domain(settings)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(system_settings::table)
            .values(&row)
            .on_conflict(system_settings::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
