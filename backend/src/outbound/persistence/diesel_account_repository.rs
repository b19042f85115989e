//! PostgreSQL-backed admin and account adapters.
//!
//! Accounts point at their admin or student profile through `profile_id`,
//! which is not a foreign key, so deleting a profile removes its account in
//! the same transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{AccountRepository, AdminRepository, RepositoryError};
use crate::domain::{Account, AccountId, Admin, AdminId, HostelId};
use crate::query_optional;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{AccountRow, AdminRow, NewAccountRow};
use super::pool::DbPool;
use super::schema::{accounts, admins};

/// Diesel-backed implementation of the admin and account ports.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for DieselAccountRepository {
    async fn insert_with_account(
        &self,
        admin: &Admin,
        account: &Account,
    ) -> Result<(), RepositoryError> {
        let admin_row = AdminRow::from(admin);
        let account_row = NewAccountRow::from(account);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(admins::table)
                    .values(&admin_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(accounts::table)
                    .values(&account_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_for_hostel(&self, hostel_id: HostelId) -> Result<Vec<Admin>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AdminRow> = admins::table
            .filter(admins::hostel_id.eq(hostel_id.as_uuid()))
            .select(AdminRow::as_select())
            .order_by((admins::full_name, admins::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Admin::from).collect())
    }

    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AdminRow> = admins::table
            .find(id.as_uuid())
            .select(AdminRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Admin::from))
    }

    async fn delete(&self, id: AdminId) -> Result<bool, RepositoryError> {
        let admin_id = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(accounts::table.filter(accounts::profile_id.eq(admin_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(admins::table.find(admin_id))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(%admin_id, deleted, "admin delete applied");
        Ok(deleted > 0)
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), RepositoryError> {
        let row = NewAccountRow::from(account);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        query_optional!(
            self,
            accounts::table,
            accounts::email.eq(email.to_owned()),
            AccountRow
        )
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        query_optional!(
            self,
            accounts::table,
            accounts::id.eq(*id.as_uuid()),
            AccountRow
        )
    }

    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(accounts::table.find(id.as_uuid()))
            .set(accounts::password_hash.eq(password_hash))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }
}
