//! Response bodies shared across the role areas.
//!
//! Domain entities never derive `Serialize` for the wire; these views fix the
//! camelCase JSON shape and carry the OpenAPI schema.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Announcement, Hostel, MealPlan, Occupant, OccupantKind, RoomOccupancy, RoomStatus, Student,
};

/// Uniform body of successful mutations.
///
/// # Examples
/// ```
/// use hostel_backend::inbound::http::dto::ActionOutcome;
/// use uuid::Uuid;
///
/// let outcome = ActionOutcome::created(Uuid::nil(), "room created");
/// let json = serde_json::to_value(&outcome).unwrap();
/// assert_eq!(json["success"], true);
/// assert_eq!(json["id"], Uuid::nil().to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "room updated")]
    pub message: String,
    /// Identifier of the created record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl ActionOutcome {
    /// Successful action without a new record.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: None,
        }
    }

    /// Successful creation of the record `id`.
    pub fn created(id: impl Into<Uuid>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: Some(id.into()),
        }
    }
}

/// Declare a concrete page envelope for `$item`, convertible from
/// `pagination::Page<T>` whenever `$item: From<T>`.
macro_rules! page_dto {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub items: Vec<$item>,
            #[schema(example = 1)]
            pub page: u32,
            #[schema(example = 10)]
            pub page_size: u32,
            pub total_items: u64,
            pub total_pages: u64,
        }

        impl<T> From<pagination::Page<T>> for $name
        where
            $item: From<T>,
        {
            fn from(page: pagination::Page<T>) -> Self {
                Self {
                    items: page.items.into_iter().map(<$item>::from).collect(),
                    page: page.page,
                    page_size: page.page_size,
                    total_items: page.total_items,
                    total_pages: page.total_pages,
                }
            }
        }
    };
}
pub(crate) use page_dto;

/// Hostel as shown to super-admins and its own staff.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelDto {
    pub id: Uuid,
    #[schema(example = "Harbour House")]
    pub name: String,
    #[schema(example = "HB-001")]
    pub hostel_number: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub room_limit: u32,
    pub student_limit: u32,
    /// Last day the subscription is valid.
    pub expires_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Hostel> for HostelDto {
    fn from(hostel: Hostel) -> Self {
        let details = hostel.details;
        Self {
            id: hostel.id.into(),
            name: details.name,
            hostel_number: details.hostel_number,
            address: details.address,
            contact_email: details.contact_email,
            contact_phone: details.contact_phone,
            room_limit: details.room_limit,
            student_limit: details.student_limit,
            expires_on: hostel.expires_on,
            created_at: hostel.created_at,
        }
    }
}

/// `{name, type}` pair listed against a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OccupantDto {
    #[schema(example = "Ada Obi")]
    pub name: String,
    /// `student` or `guest`.
    #[serde(rename = "type")]
    #[schema(example = "student")]
    pub kind: String,
}

impl From<Occupant> for OccupantDto {
    fn from(occupant: Occupant) -> Self {
        let kind = match occupant.kind {
            OccupantKind::Student => "student",
            OccupantKind::Guest => "guest",
        };
        Self {
            name: occupant.name,
            kind: kind.to_owned(),
        }
    }
}

/// Room with derived status and occupants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: Uuid,
    #[schema(example = "A-101")]
    pub room_number: String,
    #[schema(example = 2)]
    pub capacity: u32,
    pub floor: i32,
    #[schema(example = "double")]
    pub room_type: String,
    /// Monthly price in minor currency units.
    pub price: i64,
    #[schema(value_type = crate::inbound::http::schemas::RoomStatusSchema)]
    pub status: RoomStatus,
    pub occupants: Vec<OccupantDto>,
    pub free_beds: u64,
}

impl From<RoomOccupancy> for RoomDto {
    fn from(value: RoomOccupancy) -> Self {
        let free_beds = value.free_beds() as u64;
        let RoomOccupancy {
            room,
            status,
            occupants,
        } = value;
        Self {
            id: room.id.into(),
            room_number: room.details.room_number,
            capacity: room.details.capacity.get(),
            floor: room.details.floor,
            room_type: room.details.room_type.as_str().to_owned(),
            price: room.details.price,
            status,
            occupants: occupants.into_iter().map(OccupantDto::from).collect(),
            free_beds,
        }
    }
}

page_dto!(
    /// One page of the room occupancy listing.
    RoomPage,
    RoomDto
);

/// Student record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: Uuid,
    pub room_id: Option<Uuid>,
    #[schema(example = "Ada Obi")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub enrolled_on: NaiveDate,
}

impl From<Student> for StudentDto {
    fn from(student: Student) -> Self {
        let details = student.details;
        Self {
            id: student.id.into(),
            room_id: student.room_id.map(Uuid::from),
            full_name: details.full_name,
            email: details.email,
            phone: details.phone,
            guardian_name: details.guardian_name,
            guardian_phone: details.guardian_phone,
            enrolled_on: details.enrolled_on,
        }
    }
}

/// Published announcement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDto {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    /// `everyone`, `students` or `staff`.
    pub audience: String,
    pub created_at: DateTime<Utc>,
}

impl From<Announcement> for AnnouncementDto {
    fn from(announcement: Announcement) -> Self {
        Self {
            id: announcement.id.into(),
            title: announcement.details.title,
            body: announcement.details.body,
            audience: announcement.details.audience.as_str().to_owned(),
            created_at: announcement.created_at,
        }
    }
}

/// Menu for one weekday.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanDto {
    #[schema(example = "monday")]
    pub weekday: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl From<MealPlan> for MealPlanDto {
    fn from(plan: MealPlan) -> Self {
        Self {
            weekday: plan.weekday.as_str().to_owned(),
            breakfast: plan.breakfast,
            lunch: plan.lunch,
            dinner: plan.dinner,
        }
    }
}
