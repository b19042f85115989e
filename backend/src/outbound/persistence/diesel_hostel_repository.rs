//! PostgreSQL-backed `HostelRepository` adapter.
//!
//! A new hostel, its first admin and that admin's account are written in one
//! transaction. Deleting a hostel relies on `ON DELETE CASCADE` to remove
//! every row scoped to it.

use async_trait::async_trait;
use diesel::PgTextExpressionMethods;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::PageRequest;
use tracing::debug;

use crate::domain::ports::{HostelRepository, RepositoryError};
use crate::domain::{Account, Admin, Hostel, HostelId, SearchTerm};
use crate::{delete_where, query_optional};

use super::diesel_helpers::{
    convert_rows, count_to_u64, ensure_updated, map_diesel_error, map_pool_error, page_bounds,
};
use super::models::{AdminRow, HostelRow, HostelUpdate, NewAccountRow, NewHostelRow};
use super::pool::DbPool;
use super::schema::{accounts, admins, hostels};

/// Diesel-backed implementation of the hostel repository port.
#[derive(Clone)]
pub struct DieselHostelRepository {
    pool: DbPool,
}

impl DieselHostelRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Hostels whose name or number contains the search term.
fn filtered(search: &SearchTerm) -> hostels::BoxedQuery<'static, Pg> {
    let query = hostels::table.into_boxed();
    match search.like_pattern() {
        Some(pattern) => query.filter(
            hostels::name
                .ilike(pattern.clone())
                .or(hostels::hostel_number.ilike(pattern)),
        ),
        None => query,
    }
}

#[async_trait]
impl HostelRepository for DieselHostelRepository {
    async fn insert_with_admin(
        &self,
        hostel: &Hostel,
        admin: &Admin,
        account: &Account,
    ) -> Result<(), RepositoryError> {
        let hostel_row = NewHostelRow::from_domain(hostel)?;
        let admin_row = AdminRow::from(admin);
        let account_row = NewAccountRow::from(account);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(hostels::table)
                    .values(&hostel_row)
                    .execute(conn)
                    .await?;
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
        .map_err(map_diesel_error)?;

        debug!(hostel_id = %hostel.id, "hostel created with admin");
        Ok(())
    }

    async fn update(&self, hostel: &Hostel) -> Result<(), RepositoryError> {
        let changes = HostelUpdate::from_domain(hostel)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(hostels::table.find(hostel.id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        ensure_updated(updated, "hostel")
    }

    async fn find_by_id(&self, id: HostelId) -> Result<Option<Hostel>, RepositoryError> {
        query_optional!(self, hostels::table, hostels::id.eq(*id.as_uuid()), HostelRow)
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Hostel>, RepositoryError> {
        query_optional!(
            self,
            hostels::table,
            hostels::hostel_number.eq(number.to_owned()),
            HostelRow
        )
    }

    async fn list_page(
        &self,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<(Vec<Hostel>, u64), RepositoryError> {
        let (offset, limit) = page_bounds(page);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(search)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<HostelRow> = filtered(search)
            .select(HostelRow::as_select())
            .order_by((hostels::name, hostels::id))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok((convert_rows(rows)?, count_to_u64(total)))
    }

    async fn list_all(&self) -> Result<Vec<Hostel>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<HostelRow> = hostels::table
            .select(HostelRow::as_select())
            .order_by((hostels::name, hostels::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn delete(&self, id: HostelId) -> Result<bool, RepositoryError> {
        delete_where!(self, hostels::table, hostels::id.eq(*id.as_uuid()))
    }
}
