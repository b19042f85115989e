//! PostgreSQL-backed student and guest adapters.

use async_trait::async_trait;
use diesel::PgTextExpressionMethods;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::PageRequest;
use tracing::debug;

use crate::delete_where;
use crate::domain::ports::{GuestRepository, RepositoryError, StudentRepository};
use crate::domain::{
    Account, GuestId, HostelId, RoomId, SearchTerm, Student, StudentId, TemporaryGuest,
};

use super::diesel_helpers::{
    count_to_u64, ensure_updated, map_diesel_error, map_pool_error, page_bounds,
};
use super::models::{GuestRow, GuestWrite, NewAccountRow, StudentRow, StudentWrite};
use super::pool::DbPool;
use super::schema::{accounts, guests, students};

/// Diesel-backed implementation of the student and guest ports.
#[derive(Clone)]
pub struct DieselResidentRepository {
    pool: DbPool,
}

impl DieselResidentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn filtered_students(
    hostel_id: HostelId,
    search: &SearchTerm,
) -> students::BoxedQuery<'static, Pg> {
    let query = students::table
        .filter(students::hostel_id.eq(*hostel_id.as_uuid()))
        .into_boxed();
    match search.like_pattern() {
        Some(pattern) => query.filter(
            students::full_name
                .ilike(pattern.clone())
                .or(students::email.ilike(pattern)),
        ),
        None => query,
    }
}

#[async_trait]
impl StudentRepository for DieselResidentRepository {
    async fn insert_with_account(
        &self,
        student: &Student,
        account: &Account,
    ) -> Result<(), RepositoryError> {
        let write = StudentWrite::from(student);
        let account_row = NewAccountRow::from(account);
        let student_id = *student.id.as_uuid();
        let hostel_id = *student.hostel_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(students::table)
                    .values((
                        students::id.eq(student_id),
                        students::hostel_id.eq(hostel_id),
                        &write,
                    ))
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

    async fn update(&self, student: &Student) -> Result<(), RepositoryError> {
        let write = StudentWrite::from(student);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            students::table
                .filter(students::id.eq(student.id.as_uuid()))
                .filter(students::hostel_id.eq(student.hostel_id.as_uuid())),
        )
        .set(&write)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        ensure_updated(updated, "student")
    }

    async fn find(
        &self,
        hostel_id: HostelId,
        id: StudentId,
    ) -> Result<Option<Student>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StudentRow> = students::table
            .filter(students::id.eq(id.as_uuid()))
            .filter(students::hostel_id.eq(hostel_id.as_uuid()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Student::from))
    }

    async fn count(&self, hostel_id: HostelId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = students::table
            .filter(students::hostel_id.eq(hostel_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count_to_u64(total))
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = students::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count_to_u64(total))
    }

    async fn list_page(
        &self,
        hostel_id: HostelId,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<(Vec<Student>, u64), RepositoryError> {
        let (offset, limit) = page_bounds(page);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered_students(hostel_id, search)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<StudentRow> = filtered_students(hostel_id, search)
            .select(StudentRow::as_select())
            .order_by((students::full_name, students::id))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok((
            rows.into_iter().map(Student::from).collect(),
            count_to_u64(total),
        ))
    }

    async fn list_in_room(
        &self,
        hostel_id: HostelId,
        room_id: RoomId,
    ) -> Result<Vec<Student>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .filter(students::hostel_id.eq(hostel_id.as_uuid()))
            .filter(students::room_id.eq(room_id.as_uuid()))
            .select(StudentRow::as_select())
            .order_by((students::full_name, students::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn delete(&self, hostel_id: HostelId, id: StudentId) -> Result<bool, RepositoryError> {
        let student_id = *id.as_uuid();
        let hostel_id = *hostel_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let deleted = diesel::delete(
                        students::table
                            .filter(students::id.eq(student_id))
                            .filter(students::hostel_id.eq(hostel_id)),
                    )
                    .execute(conn)
                    .await?;
                    if deleted > 0 {
                        diesel::delete(
                            accounts::table.filter(accounts::profile_id.eq(student_id)),
                        )
                        .execute(conn)
                        .await?;
                    }
                    Ok(deleted)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(%student_id, deleted, "student delete applied");
        Ok(deleted > 0)
    }
}

#[async_trait]
impl GuestRepository for DieselResidentRepository {
    async fn insert(&self, guest: &TemporaryGuest) -> Result<(), RepositoryError> {
        let write = GuestWrite::from(&guest.details);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(guests::table)
            .values((
                guests::id.eq(*guest.id.as_uuid()),
                guests::hostel_id.eq(*guest.hostel_id.as_uuid()),
                &write,
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, guest: &TemporaryGuest) -> Result<(), RepositoryError> {
        let write = GuestWrite::from(&guest.details);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            guests::table
                .filter(guests::id.eq(guest.id.as_uuid()))
                .filter(guests::hostel_id.eq(guest.hostel_id.as_uuid())),
        )
        .set(&write)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        ensure_updated(updated, "guest")
    }

    async fn find(
        &self,
        hostel_id: HostelId,
        id: GuestId,
    ) -> Result<Option<TemporaryGuest>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GuestRow> = guests::table
            .filter(guests::id.eq(id.as_uuid()))
            .filter(guests::hostel_id.eq(hostel_id.as_uuid()))
            .select(GuestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(TemporaryGuest::from))
    }

    async fn count(&self, hostel_id: HostelId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = guests::table
            .filter(guests::hostel_id.eq(hostel_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count_to_u64(total))
    }

    async fn list_page(
        &self,
        hostel_id: HostelId,
        page: &PageRequest,
    ) -> Result<(Vec<TemporaryGuest>, u64), RepositoryError> {
        let (offset, limit) = page_bounds(page);
        let total = GuestRepository::count(self, hostel_id).await?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GuestRow> = guests::table
            .filter(guests::hostel_id.eq(hostel_id.as_uuid()))
            .select(GuestRow::as_select())
            .order_by((guests::check_in.desc(), guests::id))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok((rows.into_iter().map(TemporaryGuest::from).collect(), total))
    }

    async fn delete(&self, hostel_id: HostelId, id: GuestId) -> Result<bool, RepositoryError> {
        delete_where!(
            self,
            guests::table,
            guests::id
                .eq(*id.as_uuid())
                .and(guests::hostel_id.eq(*hostel_id.as_uuid()))
        )
    }
}
