//! Admin handlers for students and temporary guests.
//!
//! Both kinds of resident take beds, so creation and room moves are checked
//! against the room's free capacity before anything is written.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ApiResult;
use super::dto::{ActionOutcome, StudentDto, page_dto};
use super::schemas::ErrorSchema;
use super::state::HttpState;
use super::validation::{FieldName, ListParams, PageParams, parse_id};
use crate::domain::{
    GuestDraft, GuestId, NewStudent, Principal, RoomId, StudentDraft, StudentId, TemporaryGuest,
};

page_dto!(
    /// One page of students ordered by name.
    StudentPage,
    StudentDto
);

/// Profile fields of a student.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[schema(example = "Ada Obi")]
    pub full_name: String,
    #[schema(example = "ada@students.example")]
    pub email: String,
    #[schema(example = "+44 20 7946 0000")]
    pub phone: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub enrolled_on: NaiveDate,
}

impl From<StudentRequest> for StudentDraft {
    fn from(value: StudentRequest) -> Self {
        Self {
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            guardian_name: value.guardian_name,
            guardian_phone: value.guardian_phone,
            enrolled_on: value.enrolled_on,
        }
    }
}

/// Body of `POST /admin/students`: the profile, the initial password and an
/// optional bed.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[serde(flatten)]
    pub profile: StudentRequest,
    /// Initial login password, at least 8 characters.
    pub password: String,
    #[serde(default)]
    pub room_id: Option<String>,
}

impl TryFrom<CreateStudentRequest> for NewStudent {
    type Error = crate::domain::Error;

    fn try_from(value: CreateStudentRequest) -> Result<Self, Self::Error> {
        let room_id = value
            .room_id
            .as_deref()
            .map(|raw| parse_id::<RoomId>(raw, FieldName::new("roomId")))
            .transpose()?;
        Ok(Self {
            details: value.profile.into(),
            password: value.password,
            room_id,
        })
    }
}

/// Body of `PUT /admin/students/{id}/room`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomAssignment {
    pub room_id: String,
}

/// Body of `POST /admin/guests` and `PUT /admin/guests/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestRequest {
    pub room_id: String,
    #[schema(example = "Visiting Parent")]
    pub full_name: String,
    pub phone: String,
    #[schema(example = "Family visit")]
    pub purpose: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl TryFrom<GuestRequest> for GuestDraft {
    type Error = crate::domain::Error;

    fn try_from(value: GuestRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            room_id: parse_id(&value.room_id, FieldName::new("roomId"))?,
            full_name: value.full_name,
            phone: value.phone,
            purpose: value.purpose,
            check_in: value.check_in,
            check_out: value.check_out,
        })
    }
}

/// Temporary guest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestDto {
    pub id: Uuid,
    pub room_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub purpose: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl From<TemporaryGuest> for GuestDto {
    fn from(guest: TemporaryGuest) -> Self {
        let details = guest.details;
        Self {
            id: guest.id.into(),
            room_id: details.room_id.into(),
            full_name: details.full_name,
            phone: details.phone,
            purpose: details.purpose,
            check_in: details.check_in,
            check_out: details.check_out,
        }
    }
}

page_dto!(
    /// One page of guests, latest check-in first.
    GuestPage,
    GuestDto
);

fn student_id(raw: &str) -> ApiResult<StudentId> {
    parse_id(raw, FieldName::new("id"))
}

fn guest_id(raw: &str) -> ApiResult<GuestId> {
    parse_id(raw, FieldName::new("id"))
}

#[utoipa::path(
    get,
    path = "/admin/students",
    params(ListParams),
    responses(
        (status = 200, description = "Students ordered by name", body = StudentPage),
        (status = 400, description = "Invalid paging", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<StudentPage>> {
    let page = state
        .residents
        .list_students(principal.hostel()?, &params.search_term(), &params.page_request()?)
        .await?;
    Ok(web::Json(page.into()))
}

/// Enrol a student and create their login account.
#[utoipa::path(
    post,
    path = "/admin/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student enrolled", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email in use, student limit reached or room full", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let input = NewStudent::try_from(payload.into_inner())?;
    let student = state
        .residents
        .create_student(principal.hostel()?, input)
        .await?;
    Ok(HttpResponse::Created().json(ActionOutcome::created(student.id, "student enrolled")))
}

#[utoipa::path(
    get,
    path = "/admin/students/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student", body = StudentDto),
        (status = 404, description = "Unknown student", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentDto>> {
    let student = state
        .residents
        .get_student(principal.hostel()?, student_id(&path)?)
        .await?;
    Ok(web::Json(student.into()))
}

/// Replace a student's profile. The email cannot change.
#[utoipa::path(
    put,
    path = "/admin/students/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown student", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
    payload: web::Json<StudentRequest>,
) -> ApiResult<web::Json<ActionOutcome>> {
    state
        .residents
        .update_student(
            principal.hostel()?,
            student_id(&path)?,
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(ActionOutcome::ok("student updated")))
}

#[utoipa::path(
    delete,
    path = "/admin/students/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student and account removed", body = ActionOutcome),
        (status = 404, description = "Unknown student", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    state
        .residents
        .delete_student(principal.hostel()?, student_id(&path)?)
        .await?;
    Ok(web::Json(ActionOutcome::ok("student deleted")))
}

/// Move a student into a room with a free bed.
#[utoipa::path(
    put,
    path = "/admin/students/{id}/room",
    params(("id" = Uuid, Path, description = "Student id")),
    request_body = RoomAssignment,
    responses(
        (status = 200, description = "Room assigned", body = ActionOutcome),
        (status = 404, description = "Unknown student or room", body = ErrorSchema),
        (status = 409, description = "Room is full", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "assignRoom"
)]
#[put("/students/{id}/room")]
pub async fn assign_room(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
    payload: web::Json<RoomAssignment>,
) -> ApiResult<web::Json<ActionOutcome>> {
    let room: RoomId = parse_id(&payload.room_id, FieldName::new("roomId"))?;
    state
        .residents
        .assign_room(principal.hostel()?, student_id(&path)?, room)
        .await?;
    Ok(web::Json(ActionOutcome::ok("room assigned")))
}

#[utoipa::path(
    delete,
    path = "/admin/students/{id}/room",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Room vacated", body = ActionOutcome),
        (status = 404, description = "Unknown student", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "vacateRoom"
)]
#[delete("/students/{id}/room")]
pub async fn vacate_room(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    state
        .residents
        .vacate_room(principal.hostel()?, student_id(&path)?)
        .await?;
    Ok(web::Json(ActionOutcome::ok("room vacated")))
}

#[utoipa::path(
    get,
    path = "/admin/guests",
    params(PageParams),
    responses(
        (status = 200, description = "Guests, latest check-in first", body = GuestPage),
        (status = 400, description = "Invalid paging", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "listGuests"
)]
#[get("/guests")]
pub async fn list_guests(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<GuestPage>> {
    let page = state
        .residents
        .list_guests(principal.hostel()?, &params.page_request()?)
        .await?;
    Ok(web::Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/admin/guests",
    request_body = GuestRequest,
    responses(
        (status = 201, description = "Guest registered", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown room", body = ErrorSchema),
        (status = 409, description = "Room is full", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "createGuest"
)]
#[post("/guests")]
pub async fn create_guest(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    payload: web::Json<GuestRequest>,
) -> ApiResult<HttpResponse> {
    let draft = GuestDraft::try_from(payload.into_inner())?;
    let guest = state
        .residents
        .create_guest(principal.hostel()?, draft)
        .await?;
    Ok(HttpResponse::Created().json(ActionOutcome::created(guest.id, "guest registered")))
}

#[utoipa::path(
    put,
    path = "/admin/guests/{id}",
    params(("id" = Uuid, Path, description = "Guest id")),
    request_body = GuestRequest,
    responses(
        (status = 200, description = "Guest updated", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown guest or room", body = ErrorSchema),
        (status = 409, description = "Target room is full", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "updateGuest"
)]
#[put("/guests/{id}")]
pub async fn update_guest(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
    payload: web::Json<GuestRequest>,
) -> ApiResult<web::Json<ActionOutcome>> {
    let id = guest_id(&path)?;
    let draft = GuestDraft::try_from(payload.into_inner())?;
    state
        .residents
        .update_guest(principal.hostel()?, id, draft)
        .await?;
    Ok(web::Json(ActionOutcome::ok("guest updated")))
}

#[utoipa::path(
    delete,
    path = "/admin/guests/{id}",
    params(("id" = Uuid, Path, description = "Guest id")),
    responses(
        (status = 200, description = "Guest removed", body = ActionOutcome),
        (status = 404, description = "Unknown guest", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "deleteGuest"
)]
#[delete("/guests/{id}")]
pub async fn delete_guest(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    state
        .residents
        .delete_guest(principal.hostel()?, guest_id(&path)?)
        .await?;
    Ok(web::Json(ActionOutcome::ok("guest removed")))
}
