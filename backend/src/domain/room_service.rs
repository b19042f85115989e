//! Room management and the paginated occupancy listing for hostel admins.

use std::sync::Arc;

use pagination::Page;
use tracing::info;

use crate::domain::ports::{HostelRepository, RoomRepository};
use crate::domain::{
    Error, Hostel, HostelId, OccupancySummary, Room, RoomDraft, RoomId, RoomListQuery,
    RoomOccupancy, annotate_rooms,
};

/// Room use-cases, always scoped to the caller's hostel.
#[derive(Clone)]
pub struct RoomService {
    rooms: Arc<dyn RoomRepository>,
    hostels: Arc<dyn HostelRepository>,
}

/// Load the hostel a scoped action runs in.
pub(crate) async fn load_hostel(
    hostels: &dyn HostelRepository,
    hostel_id: HostelId,
) -> Result<Hostel, Error> {
    hostels
        .find_by_id(hostel_id)
        .await?
        .ok_or_else(|| Error::not_found(format!("hostel {hostel_id} not found")))
}

/// Load a room of the hostel and annotate it with its occupants.
pub(crate) async fn load_room_occupancy(
    rooms: &dyn RoomRepository,
    hostel_id: HostelId,
    room_id: RoomId,
) -> Result<RoomOccupancy, Error> {
    let room = rooms
        .find(hostel_id, room_id)
        .await?
        .ok_or_else(|| Error::not_found(format!("room {room_id} not found")))?;
    let records = rooms.occupants(hostel_id, &[room.id]).await?;
    annotate_rooms(vec![room], records)
        .pop()
        .ok_or_else(|| Error::internal("annotating a single room yielded nothing"))
}

impl RoomService {
    /// Create the service.
    pub fn new(rooms: Arc<dyn RoomRepository>, hostels: Arc<dyn HostelRepository>) -> Self {
        Self { rooms, hostels }
    }

    /// One page of rooms with derived status and merged occupants.
    ///
    /// A page past the end yields no items but keeps the totals.
    pub async fn list_rooms(
        &self,
        hostel_id: HostelId,
        query: &RoomListQuery,
    ) -> Result<Page<RoomOccupancy>, Error> {
        let (rooms, total) = self
            .rooms
            .list_page(hostel_id, &query.search, &query.page)
            .await?;
        let ids: Vec<RoomId> = rooms.iter().map(|room| room.id).collect();
        let records = if ids.is_empty() {
            Vec::new()
        } else {
            self.rooms.occupants(hostel_id, &ids).await?
        };
        Ok(Page::new(annotate_rooms(rooms, records), &query.page, total))
    }

    /// A single room with status and occupants.
    pub async fn get_room(&self, hostel_id: HostelId, id: RoomId) -> Result<RoomOccupancy, Error> {
        load_room_occupancy(self.rooms.as_ref(), hostel_id, id).await
    }

    async fn ensure_number_free(
        &self,
        hostel_id: HostelId,
        number: &str,
        editing: Option<RoomId>,
    ) -> Result<(), Error> {
        let holder = self.rooms.find_by_number(hostel_id, number).await?;
        if holder.is_some_and(|room| Some(room.id) != editing) {
            return Err(Error::conflict(format!(
                "room number {number} already exists in this hostel"
            )));
        }
        Ok(())
    }

    /// Add a room, respecting the hostel's room limit and number uniqueness.
    pub async fn create_room(&self, hostel_id: HostelId, draft: RoomDraft) -> Result<Room, Error> {
        let details = draft.validate()?;
        let hostel = load_hostel(self.hostels.as_ref(), hostel_id).await?;
        let existing = self.rooms.count(hostel_id).await?;
        if existing >= u64::from(hostel.details.room_limit) {
            return Err(Error::conflict(format!(
                "room limit of {} reached for this hostel",
                hostel.details.room_limit
            )));
        }
        self.ensure_number_free(hostel_id, &details.room_number, None)
            .await?;

        let room = Room {
            id: RoomId::random(),
            hostel_id,
            details,
        };
        self.rooms.insert(&room).await?;
        info!(%hostel_id, room_id = %room.id, "room created");
        Ok(room)
    }

    /// Edit a room. The number stays unique and capacity may not drop below
    /// the current occupant count.
    pub async fn update_room(
        &self,
        hostel_id: HostelId,
        id: RoomId,
        draft: RoomDraft,
    ) -> Result<Room, Error> {
        let current = load_room_occupancy(self.rooms.as_ref(), hostel_id, id).await?;
        let details = draft.validate()?;
        self.ensure_number_free(hostel_id, &details.room_number, Some(id))
            .await?;
        let occupants = current.occupants.len();
        if occupants > details.capacity.get() as usize {
            return Err(Error::conflict(format!(
                "capacity {} is below the {occupants} current occupants",
                details.capacity
            )));
        }

        let room = Room {
            details,
            ..current.room
        };
        self.rooms.update(&room).await?;
        Ok(room)
    }

    /// Delete an empty room.
    pub async fn delete_room(&self, hostel_id: HostelId, id: RoomId) -> Result<(), Error> {
        let current = load_room_occupancy(self.rooms.as_ref(), hostel_id, id).await?;
        if !current.occupants.is_empty() {
            return Err(Error::conflict(format!(
                "room {} still has {} occupants",
                current.room.details.room_number,
                current.occupants.len()
            )));
        }
        if !self.rooms.delete(hostel_id, id).await? {
            return Err(Error::not_found(format!("room {id} not found")));
        }
        info!(%hostel_id, room_id = %id, "room deleted");
        Ok(())
    }

    /// Status counts and bed totals across every room of the hostel.
    pub async fn occupancy_summary(&self, hostel_id: HostelId) -> Result<OccupancySummary, Error> {
        let rooms = self.rooms.list_all(hostel_id).await?;
        let ids: Vec<RoomId> = rooms.iter().map(|room| room.id).collect();
        let records = self.rooms.occupants(hostel_id, &ids).await?;
        Ok(OccupancySummary::from_rooms(&annotate_rooms(rooms, records)))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockHostelRepository, MockRoomRepository, RepositoryError};
    use crate::domain::test_support::{hostel, seed_hostel};
    use crate::domain::{ErrorCode, OccupantKind, OccupantRecord, RoomStatus, SearchTerm};
    use crate::outbound::memory::InMemoryStore;
    use pagination::PageRequest;
    use rstest::{fixture, rstest};

    fn draft(number: &str, capacity: &str) -> RoomDraft {
        RoomDraft {
            room_number: number.into(),
            capacity: capacity.into(),
            floor: 1,
            room_type: "double".into(),
            price: 40_000,
        }
    }

    struct Harness {
        store: Arc<InMemoryStore>,
        service: RoomService,
        hostel: Hostel,
    }

    #[fixture]
    async fn harness() -> Harness {
        let store = Arc::new(InMemoryStore::default());
        let hostel = hostel("HH-1", 3);
        seed_hostel(&store, &hostel).await;
        let service = RoomService::new(store.clone(), store.clone());
        Harness {
            store,
            service,
            hostel,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_enforces_number_uniqueness_per_hostel(#[future] harness: Harness) {
        let harness = harness.await;
        harness
            .service
            .create_room(harness.hostel.id, draft("A-101", "2"))
            .await
            .expect("first room");
        let err = harness
            .service
            .create_room(harness.hostel.id, draft("a-101", "3"))
            .await
            .expect_err("duplicate number");
        assert_eq!(err.code(), ErrorCode::Conflict);

        let other = hostel("HH-2", 3);
        seed_hostel(&harness.store, &other).await;
        harness
            .service
            .create_room(other.id, draft("A-101", "2"))
            .await
            .expect("same number in another hostel");
    }

    #[rstest]
    #[tokio::test]
    async fn create_enforces_room_limit(#[future] harness: Harness) {
        let harness = harness.await;
        for number in ["A1", "A2", "A3"] {
            harness
                .service
                .create_room(harness.hostel.id, draft(number, "1"))
                .await
                .expect("within limit");
        }
        let err = harness
            .service
            .create_room(harness.hostel.id, draft("A4", "1"))
            .await
            .expect_err("limit reached");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn edit_rejects_duplicate_numbers_but_allows_keeping_own(#[future] harness: Harness) {
        let harness = harness.await;
        let a = harness
            .service
            .create_room(harness.hostel.id, draft("A1", "2"))
            .await
            .expect("room a");
        harness
            .service
            .create_room(harness.hostel.id, draft("B1", "2"))
            .await
            .expect("room b");

        let err = harness
            .service
            .update_room(harness.hostel.id, a.id, draft("B1", "2"))
            .await
            .expect_err("duplicate on edit");
        assert_eq!(err.code(), ErrorCode::Conflict);

        let kept = harness
            .service
            .update_room(harness.hostel.id, a.id, draft("A1", "4"))
            .await
            .expect("own number is fine");
        assert_eq!(kept.details.capacity.get(), 4);
    }

    #[rstest]
    #[tokio::test]
    async fn listing_paginates_and_searches(#[future] harness: Harness) {
        let harness = harness.await;
        for number in ["C1", "A1", "B1"] {
            harness
                .service
                .create_room(harness.hostel.id, draft(number, "2"))
                .await
                .expect("room");
        }

        let first = harness
            .service
            .list_rooms(
                harness.hostel.id,
                &RoomListQuery {
                    search: SearchTerm::default(),
                    page: PageRequest::new(1, 2).expect("page"),
                },
            )
            .await
            .expect("first page");
        let numbers: Vec<_> = first
            .items
            .iter()
            .map(|r| r.room.details.room_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["A1", "B1"]);
        assert_eq!(first.total_items, 3);
        assert_eq!(first.total_pages, 2);
        assert!(first.items.iter().all(|r| r.status == RoomStatus::Available));

        let beyond = harness
            .service
            .list_rooms(
                harness.hostel.id,
                &RoomListQuery {
                    search: SearchTerm::default(),
                    page: PageRequest::new(5, 2).expect("page"),
                },
            )
            .await
            .expect("past the end");
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_items, 3);

        let searched = harness
            .service
            .list_rooms(
                harness.hostel.id,
                &RoomListQuery {
                    search: SearchTerm::new(Some("b")),
                    page: PageRequest::default(),
                },
            )
            .await
            .expect("search");
        assert_eq!(searched.total_items, 1);
        assert_eq!(searched.items[0].room.details.room_number, "B1");
    }

    #[rstest]
    #[tokio::test]
    async fn rooms_of_other_hostels_are_not_found(#[future] harness: Harness) {
        let harness = harness.await;
        let room = harness
            .service
            .create_room(harness.hostel.id, draft("A1", "2"))
            .await
            .expect("room");
        let err = harness
            .service
            .get_room(HostelId::random(), room.id)
            .await
            .expect_err("foreign hostel");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn capacity_and_delete_respect_occupants() {
        let hostel = hostel("HH-1", 5);
        let room = Room {
            id: RoomId::random(),
            hostel_id: hostel.id,
            details: draft("A1", "3").validate().expect("details"),
        };
        let occupied_room = room.clone();
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_find()
            .returning(move |_, _| Ok(Some(occupied_room.clone())));
        rooms.expect_occupants().returning(move |_, ids| {
            Ok(["Ada", "Grace"]
                .into_iter()
                .map(|name| OccupantRecord {
                    room_id: ids[0],
                    name: name.into(),
                    kind: OccupantKind::Student,
                })
                .collect())
        });
        rooms.expect_find_by_number().returning(|_, _| Ok(None));
        rooms.expect_update().never();
        rooms.expect_delete().never();
        let service = RoomService::new(Arc::new(rooms), Arc::new(MockHostelRepository::new()));

        let shrink = service
            .update_room(hostel.id, room.id, draft("A1", "1"))
            .await
            .expect_err("below occupants");
        assert_eq!(shrink.code(), ErrorCode::Conflict);

        let delete = service
            .delete_room(hostel.id, room.id)
            .await
            .expect_err("occupied room");
        assert_eq!(delete.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn query_failures_are_internal_errors() {
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_list_page()
            .returning(|_, _, _| Err(RepositoryError::query("relation does not exist")));
        let service = RoomService::new(Arc::new(rooms), Arc::new(MockHostelRepository::new()));
        let err = service
            .list_rooms(HostelId::random(), &RoomListQuery::default())
            .await
            .expect_err("query failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
