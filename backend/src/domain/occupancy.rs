//! Room occupancy: status derivation and the paginated room listing.
//!
//! Status is never stored. It is derived on every read from the students and
//! temporary guests assigned to a room:
//!
//! | occupants            | status               |
//! |----------------------|----------------------|
//! | `0`                  | `available`          |
//! | `1..capacity`        | `partially_occupied` |
//! | `>= capacity`        | `occupied`           |

use std::collections::HashMap;

use pagination::PageRequest;
use serde::{Deserialize, Serialize};

use super::{Room, RoomCapacity, RoomId, SearchTerm};

/// Derived occupancy state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    PartiallyOccupied,
    Occupied,
}

impl RoomStatus {
    /// Derive the status from an occupant count.
    ///
    /// # Examples
    /// ```
    /// use hostel_backend::domain::{RoomCapacity, RoomStatus};
    ///
    /// let capacity = RoomCapacity::new(2).unwrap();
    /// assert_eq!(RoomStatus::derive(0, capacity), RoomStatus::Available);
    /// assert_eq!(RoomStatus::derive(1, capacity), RoomStatus::PartiallyOccupied);
    /// assert_eq!(RoomStatus::derive(2, capacity), RoomStatus::Occupied);
    /// ```
    #[must_use]
    pub fn derive(occupants: usize, capacity: RoomCapacity) -> Self {
        let capacity = usize::try_from(capacity.get()).unwrap_or(usize::MAX);
        if occupants >= capacity {
            Self::Occupied
        } else if occupants > 0 {
            Self::PartiallyOccupied
        } else {
            Self::Available
        }
    }

    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::PartiallyOccupied => "partially_occupied",
            Self::Occupied => "occupied",
        }
    }
}

/// Which record kind an occupant comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupantKind {
    Student,
    Guest,
}

/// Occupant as shown against a room: a `{name, type}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OccupantKind,
}

/// Occupant row as loaded by repositories, still keyed by room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupantRecord {
    pub room_id: RoomId,
    pub name: String,
    pub kind: OccupantKind,
}

/// A room annotated with its derived status and merged occupant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOccupancy {
    pub room: Room,
    pub status: RoomStatus,
    pub occupants: Vec<Occupant>,
}

impl RoomOccupancy {
    /// Beds still free in the room.
    #[must_use]
    pub fn free_beds(&self) -> usize {
        usize::try_from(self.room.details.capacity.get())
            .unwrap_or(usize::MAX)
            .saturating_sub(self.occupants.len())
    }
}

/// Attach occupants to rooms and derive each room's status.
///
/// Room order is preserved. Occupant records for rooms not in `rooms` are
/// ignored. Within a room, students precede guests and each group is sorted
/// by name.
#[must_use]
pub fn annotate_rooms(rooms: Vec<Room>, records: Vec<OccupantRecord>) -> Vec<RoomOccupancy> {
    let mut by_room: HashMap<RoomId, Vec<Occupant>> = HashMap::new();
    for record in records {
        by_room.entry(record.room_id).or_default().push(Occupant {
            name: record.name,
            kind: record.kind,
        });
    }

    rooms
        .into_iter()
        .map(|room| {
            let mut occupants = by_room.remove(&room.id).unwrap_or_default();
            occupants.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
            let status = RoomStatus::derive(occupants.len(), room.details.capacity);
            RoomOccupancy {
                room,
                status,
                occupants,
            }
        })
        .collect()
}

/// Input of the room occupancy query for one hostel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomListQuery {
    pub search: SearchTerm,
    pub page: PageRequest,
}

/// Aggregate counts across every room of a hostel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySummary {
    pub available: u64,
    pub partially_occupied: u64,
    pub occupied: u64,
    pub occupied_beds: u64,
    pub total_beds: u64,
}

impl OccupancySummary {
    /// Fold annotated rooms into status counts and bed totals.
    #[must_use]
    pub fn from_rooms(rooms: &[RoomOccupancy]) -> Self {
        rooms.iter().fold(Self::default(), |mut acc, room| {
            match room.status {
                RoomStatus::Available => acc.available += 1,
                RoomStatus::PartiallyOccupied => acc.partially_occupied += 1,
                RoomStatus::Occupied => acc.occupied += 1,
            }
            acc.occupied_beds += room.occupants.len() as u64;
            acc.total_beds += u64::from(room.room.details.capacity.get());
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HostelId, RoomDetails, RoomType};
    use rstest::rstest;

    fn room(number: &str, capacity: u32) -> Room {
        Room {
            id: RoomId::random(),
            hostel_id: HostelId::random(),
            details: RoomDetails {
                room_number: number.into(),
                capacity: RoomCapacity::new(capacity).expect("valid capacity"),
                floor: 1,
                room_type: RoomType::Double,
                price: 0,
            },
        }
    }

    fn record(room: &Room, name: &str, kind: OccupantKind) -> OccupantRecord {
        OccupantRecord {
            room_id: room.id,
            name: name.into(),
            kind,
        }
    }

    #[rstest]
    #[case(1, 0, RoomStatus::Available)]
    #[case(1, 1, RoomStatus::Occupied)]
    #[case(3, 1, RoomStatus::PartiallyOccupied)]
    #[case(3, 2, RoomStatus::PartiallyOccupied)]
    #[case(3, 3, RoomStatus::Occupied)]
    #[case(3, 5, RoomStatus::Occupied)]
    fn status_is_occupied_iff_occupants_reach_capacity(
        #[case] capacity: u32,
        #[case] occupants: usize,
        #[case] expected: RoomStatus,
    ) {
        let capacity = RoomCapacity::new(capacity).expect("valid capacity");
        let status = RoomStatus::derive(occupants, capacity);
        assert_eq!(status, expected);
        assert_eq!(
            status == RoomStatus::Occupied,
            occupants >= usize::try_from(capacity.get()).expect("fits usize")
        );
    }

    #[rstest]
    fn annotate_merges_students_and_guests() {
        let a = room("A1", 3);
        let b = room("B1", 2);
        let records = vec![
            record(&a, "Zoe Guest", OccupantKind::Guest),
            record(&a, "Mia Student", OccupantKind::Student),
            record(&a, "Ada Student", OccupantKind::Student),
            record(&b, "Ola Guest", OccupantKind::Guest),
        ];

        let annotated = annotate_rooms(vec![a.clone(), b.clone()], records);

        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].room.id, a.id);
        assert_eq!(annotated[0].status, RoomStatus::Occupied);
        let names: Vec<_> = annotated[0]
            .occupants
            .iter()
            .map(|o| (o.name.as_str(), o.kind))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Ada Student", OccupantKind::Student),
                ("Mia Student", OccupantKind::Student),
                ("Zoe Guest", OccupantKind::Guest),
            ]
        );
        assert_eq!(annotated[1].status, RoomStatus::PartiallyOccupied);
        assert_eq!(annotated[1].free_beds(), 1);
    }

    #[rstest]
    fn annotate_ignores_foreign_records_and_keeps_empty_rooms_available() {
        let a = room("A1", 2);
        let stranger = room("Z9", 2);
        let annotated = annotate_rooms(
            vec![a],
            vec![record(&stranger, "Elsewhere", OccupantKind::Student)],
        );
        assert_eq!(annotated[0].status, RoomStatus::Available);
        assert!(annotated[0].occupants.is_empty());
    }

    #[rstest]
    fn occupant_serialises_as_name_type_pair() {
        let occupant = Occupant {
            name: "Ada".into(),
            kind: OccupantKind::Guest,
        };
        let json = serde_json::to_value(&occupant).expect("serialise occupant");
        assert_eq!(json, serde_json::json!({ "name": "Ada", "type": "guest" }));
    }

    #[rstest]
    fn summary_counts_statuses_and_beds() {
        let a = room("A1", 2);
        let b = room("B1", 1);
        let c = room("C1", 4);
        let annotated = annotate_rooms(
            vec![a.clone(), b.clone(), c],
            vec![
                record(&a, "One", OccupantKind::Student),
                record(&b, "Two", OccupantKind::Guest),
            ],
        );
        let summary = OccupancySummary::from_rooms(&annotated);
        assert_eq!(summary.available, 1);
        assert_eq!(summary.partially_occupied, 1);
        assert_eq!(summary.occupied, 1);
        assert_eq!(summary.occupied_beds, 2);
        assert_eq!(summary.total_beds, 7);
    }
}
