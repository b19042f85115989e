//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed hostel entities used by the API and
//! persistence layers. Entities are built from `*Draft` inputs through
//! `validate`, which returns a [`FieldError`] naming the rejected field.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Hostel, Room, Student, TemporaryGuest, Admin: tenant aggregates.
//! - RoomOccupancy, RoomStatus: derived room occupancy.
//! - Principal, Role: the authenticated caller.
//! - `*Service`: use-cases invoked by inbound adapters.

pub mod admin;
pub mod announcement;
pub mod auth;
pub mod error;
pub mod finance;
pub mod guest;
pub mod hostel;
pub mod ids;
pub mod inventory;
pub mod meal_plan;
pub mod occupancy;
pub mod ports;
pub mod role;
pub mod room;
pub mod search;
pub mod student;
pub mod system;
pub mod trace_id;
pub mod validation;

mod auth_service;
mod platform_service;
mod portal_service;
mod records_service;
mod resident_service;
mod room_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::admin::{Admin, AdminDetails, AdminDraft};
pub use self::announcement::{Announcement, AnnouncementDetails, AnnouncementDraft, Audience};
pub use self::auth::{
    Account, LoginCredentials, LoginValidationError, NewPassword, PasswordChange, Principal,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::finance::{FinanceDetails, FinanceDraft, FinanceKind, FinanceRecord, FinanceSummary};
pub use self::guest::{GuestDetails, GuestDraft, TemporaryGuest};
pub use self::hostel::{Hostel, HostelDetails, HostelDraft, hostel_number};
pub use self::ids::{
    AccountId, AdminId, AnnouncementId, FinanceRecordId, GuestId, HostelId, InvalidId,
    InventoryItemId, RoomId, StudentId,
};
pub use self::inventory::{InventoryDetails, InventoryDraft, InventoryItem, ItemCondition};
pub use self::meal_plan::{MealPlan, MealPlanDraft, Weekday};
pub use self::occupancy::{
    Occupant, OccupantKind, OccupantRecord, OccupancySummary, RoomListQuery, RoomOccupancy,
    RoomStatus, annotate_rooms,
};
pub use self::platform_service::{
    HostelListing, NewHostel, PlatformOverview, PlatformRepositories, PlatformService,
};
pub use self::portal_service::{
    HostelDashboard, PortalRepositories, PortalService, StudentProfile,
};
pub use self::records_service::{RecordsRepositories, RecordsService};
pub use self::resident_service::{NewStudent, ResidentRepositories, ResidentService};
pub use self::role::{Role, UnknownRole};
pub use self::room::{Room, RoomCapacity, RoomDetails, RoomDraft, RoomType};
pub use self::room_service::RoomService;
pub use self::search::SearchTerm;
pub use self::student::{Student, StudentDetails, StudentDraft};
pub use self::system::{SystemSettings, SystemSettingsDraft};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::FieldError;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use hostel_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
