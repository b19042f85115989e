//! PostgreSQL-backed `RoomRepository` adapter.
//!
//! Room numbers compare case-insensitively through `lower(room_number)`,
//! which is also the expression behind the per-hostel unique index.

use async_trait::async_trait;
use diesel::PgTextExpressionMethods;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, RoomRepository};
use crate::domain::{HostelId, OccupantKind, OccupantRecord, Room, RoomId, SearchTerm};
use crate::{delete_where, query_optional, query_vec};

use super::diesel_helpers::{
    convert_rows, count_to_u64, ensure_updated, lower, map_diesel_error, map_pool_error,
    page_bounds,
};
use super::models::{RoomRow, RoomWrite};
use super::pool::DbPool;
use super::schema::{guests, rooms, students};

/// Diesel-backed implementation of the room repository port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn filtered(hostel_id: HostelId, search: &SearchTerm) -> rooms::BoxedQuery<'static, Pg> {
    let query = rooms::table
        .filter(rooms::hostel_id.eq(*hostel_id.as_uuid()))
        .into_boxed();
    match search.like_pattern() {
        Some(pattern) => query.filter(rooms::room_number.ilike(pattern)),
        None => query,
    }
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn insert(&self, room: &Room) -> Result<(), RepositoryError> {
        let write = RoomWrite::from(room);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(rooms::table)
            .values((
                rooms::id.eq(*room.id.as_uuid()),
                rooms::hostel_id.eq(*room.hostel_id.as_uuid()),
                &write,
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, room: &Room) -> Result<(), RepositoryError> {
        let write = RoomWrite::from(room);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            rooms::table
                .filter(rooms::id.eq(room.id.as_uuid()))
                .filter(rooms::hostel_id.eq(room.hostel_id.as_uuid())),
        )
        .set(&write)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        ensure_updated(updated, "room")
    }

    async fn delete(&self, hostel_id: HostelId, id: RoomId) -> Result<bool, RepositoryError> {
        delete_where!(
            self,
            rooms::table,
            rooms::id
                .eq(*id.as_uuid())
                .and(rooms::hostel_id.eq(*hostel_id.as_uuid()))
        )
    }

    async fn find(&self, hostel_id: HostelId, id: RoomId) -> Result<Option<Room>, RepositoryError> {
        query_optional!(
            self,
            rooms::table,
            rooms::id
                .eq(*id.as_uuid())
                .and(rooms::hostel_id.eq(*hostel_id.as_uuid())),
            RoomRow
        )
    }

    async fn find_by_number(
        &self,
        hostel_id: HostelId,
        number: &str,
    ) -> Result<Option<Room>, RepositoryError> {
        query_optional!(
            self,
            rooms::table,
            rooms::hostel_id
                .eq(*hostel_id.as_uuid())
                .and(lower(rooms::room_number).eq(number.trim().to_lowercase())),
            RoomRow
        )
    }

    async fn count(&self, hostel_id: HostelId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = rooms::table
            .filter(rooms::hostel_id.eq(hostel_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count_to_u64(total))
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = rooms::table
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
    ) -> Result<(Vec<Room>, u64), RepositoryError> {
        let (offset, limit) = page_bounds(page);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(hostel_id, search)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<RoomRow> = filtered(hostel_id, search)
            .select(RoomRow::as_select())
            .order_by((lower(rooms::room_number), rooms::id))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok((convert_rows(rows)?, count_to_u64(total)))
    }

    async fn list_all(&self, hostel_id: HostelId) -> Result<Vec<Room>, RepositoryError> {
        query_vec!(
            self,
            rooms::table,
            rooms::hostel_id.eq(*hostel_id.as_uuid()),
            (lower(rooms::room_number), rooms::id),
            RoomRow
        )
    }

    async fn occupants(
        &self,
        hostel_id: HostelId,
        room_ids: &[RoomId],
    ) -> Result<Vec<OccupantRecord>, RepositoryError> {
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = room_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let student_rows: Vec<(Option<Uuid>, String)> = students::table
            .filter(students::hostel_id.eq(hostel_id.as_uuid()))
            .filter(students::room_id.eq_any(&ids))
            .select((students::room_id, students::full_name))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let guest_rows: Vec<(Uuid, String)> = guests::table
            .filter(guests::hostel_id.eq(hostel_id.as_uuid()))
            .filter(guests::room_id.eq_any(&ids))
            .select((guests::room_id, guests::full_name))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let students = student_rows
            .into_iter()
            .filter_map(|(room_id, name)| {
                room_id.map(|room_id| OccupantRecord {
                    room_id: room_id.into(),
                    name,
                    kind: OccupantKind::Student,
                })
            });
        let guests = guest_rows.into_iter().map(|(room_id, name)| OccupantRecord {
            room_id: room_id.into(),
            name,
            kind: OccupantKind::Guest,
        });
        Ok(students.chain(guests).collect())
    }
}
