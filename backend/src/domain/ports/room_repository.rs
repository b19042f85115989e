//! Port for rooms and the occupant lookups behind room occupancy.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{HostelId, OccupantRecord, Room, RoomId, SearchTerm};

use super::RepositoryError;

/// Port for room persistence.
///
/// Every lookup is scoped by hostel: a room of another hostel is reported as
/// missing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a room. A duplicate number in the hostel yields a conflict.
    async fn insert(&self, room: &Room) -> Result<(), RepositoryError>;

    /// Replace the editable fields of a room.
    async fn update(&self, room: &Room) -> Result<(), RepositoryError>;

    /// Delete a room. Returns whether it existed.
    async fn delete(&self, hostel_id: HostelId, id: RoomId) -> Result<bool, RepositoryError>;

    /// Fetch a room of the hostel.
    async fn find(&self, hostel_id: HostelId, id: RoomId) -> Result<Option<Room>, RepositoryError>;

    /// Fetch a room by number, compared case-insensitively.
    async fn find_by_number(
        &self,
        hostel_id: HostelId,
        number: &str,
    ) -> Result<Option<Room>, RepositoryError>;

    /// Number of rooms in the hostel.
    async fn count(&self, hostel_id: HostelId) -> Result<u64, RepositoryError>;

    /// Number of rooms across every hostel.
    async fn count_all(&self) -> Result<u64, RepositoryError>;

    /// One page of rooms ordered by number then id, filtered on number,
    /// together with the filtered total.
    async fn list_page(
        &self,
        hostel_id: HostelId,
        search: &SearchTerm,
        page: &PageRequest,
    ) -> Result<(Vec<Room>, u64), RepositoryError>;

    /// Every room of the hostel ordered by number then id.
    async fn list_all(&self, hostel_id: HostelId) -> Result<Vec<Room>, RepositoryError>;

    /// Students and guests assigned to any of `room_ids`.
    async fn occupants(
        &self,
        hostel_id: HostelId,
        room_ids: &[RoomId],
    ) -> Result<Vec<OccupantRecord>, RepositoryError>;
}
