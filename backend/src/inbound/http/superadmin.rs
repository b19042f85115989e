//! Super-admin area: hostels, their admins and platform settings.
//!
//! ```text
//! GET  /superadmin
//! GET  /superadmin/hostels?page=1&pageSize=10&search=harbour
//! POST /superadmin/hostels {"hostel":{...},"admin":{...,"password":"..."}}
//! POST /superadmin/hostels/{id}/renew {"expiresOn":"2027-03-01"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ApiResult;
use super::dto::{ActionOutcome, HostelDto, page_dto};
use super::schemas::ErrorSchema;
use super::state::HttpState;
use super::validation::{FieldName, ListParams, parse_id};
use crate::domain::{
    Admin, AdminDraft, AdminId, HostelDraft, HostelId, HostelListing, NewHostel,
    PlatformOverview, Principal, SystemSettings, SystemSettingsDraft,
};

/// Editable hostel fields.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelRequest {
    #[schema(example = "Harbour House")]
    pub name: String,
    #[schema(example = "HB-001")]
    pub hostel_number: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
    #[schema(example = 40)]
    pub room_limit: u32,
    #[schema(example = 120)]
    pub student_limit: u32,
    /// Defaults to today plus the configured validity on creation.
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

impl From<HostelRequest> for HostelDraft {
    fn from(value: HostelRequest) -> Self {
        Self {
            name: value.name,
            hostel_number: value.hostel_number,
            address: value.address,
            contact_email: value.contact_email,
            contact_phone: value.contact_phone,
            room_limit: value.room_limit,
            student_limit: value.student_limit,
            expires_on: value.expires_on,
        }
    }
}

/// Admin profile plus initial password.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminRequest {
    #[schema(example = "Wendy Warden")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// At least 8 characters.
    pub password: String,
}

impl AdminRequest {
    fn into_parts(self) -> (AdminDraft, String) {
        let draft = AdminDraft {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
        };
        (draft, self.password)
    }
}

/// Body of `POST /superadmin/hostels`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHostelRequest {
    pub hostel: HostelRequest,
    /// First admin of the new hostel.
    pub admin: AdminRequest,
}

/// Body of `POST /superadmin/hostels/{id}/renew`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenewRequest {
    #[schema(example = "2027-03-01")]
    pub expires_on: NaiveDate,
}

/// Hostel row of the super-admin listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostelListingDto {
    #[serde(flatten)]
    pub hostel: HostelDto,
    /// The expiry date has passed.
    pub is_expired: bool,
}

impl From<HostelListing> for HostelListingDto {
    fn from(value: HostelListing) -> Self {
        Self {
            hostel: value.hostel.into(),
            is_expired: value.is_expired,
        }
    }
}

page_dto!(
    /// One page of hostels.
    HostelPage,
    HostelListingDto
);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl From<Admin> for AdminDto {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id.into(),
            hostel_id: admin.hostel_id.into(),
            full_name: admin.details.full_name,
            email: admin.details.email,
            phone: admin.details.phone,
        }
    }
}

/// Platform settings, read and written whole.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    #[schema(example = "Hostel Manager")]
    pub platform_name: String,
    pub support_email: String,
    /// Validity of a new hostel without an explicit expiry.
    #[schema(example = 365)]
    pub default_validity_days: u32,
    pub maintenance_mode: bool,
}

impl From<SystemSettings> for SettingsDto {
    fn from(value: SystemSettings) -> Self {
        Self {
            platform_name: value.platform_name,
            support_email: value.support_email,
            default_validity_days: value.default_validity_days,
            maintenance_mode: value.maintenance_mode,
        }
    }
}

impl From<SettingsDto> for SystemSettingsDraft {
    fn from(value: SettingsDto) -> Self {
        Self {
            platform_name: value.platform_name,
            support_email: value.support_email,
            default_validity_days: value.default_validity_days,
            maintenance_mode: value.maintenance_mode,
        }
    }
}

/// Platform-wide counters.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    pub hostels: u64,
    pub expired_hostels: u64,
    pub students: u64,
    pub rooms: u64,
}

impl From<PlatformOverview> for OverviewDto {
    fn from(value: PlatformOverview) -> Self {
        Self {
            hostels: value.hostels,
            expired_hostels: value.expired_hostels,
            students: value.students,
            rooms: value.rooms,
        }
    }
}

fn hostel_id(raw: &str) -> ApiResult<HostelId> {
    parse_id(raw, FieldName::new("id"))
}

#[utoipa::path(
    get,
    path = "/superadmin",
    responses(
        (status = 200, description = "Platform overview", body = OverviewDto),
        (status = 302, description = "Not a super-admin session")
    ),
    tags = ["superadmin"],
    operation_id = "platformOverview"
)]
#[get("")]
pub async fn overview(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<OverviewDto>> {
    principal.super_admin()?;
    Ok(web::Json(state.platform.overview().await?.into()))
}

#[utoipa::path(
    get,
    path = "/superadmin/hostels",
    params(ListParams),
    responses(
        (status = 200, description = "Hostels ordered by name", body = HostelPage),
        (status = 400, description = "Invalid paging", body = ErrorSchema),
        (status = 302, description = "Not a super-admin session")
    ),
    tags = ["superadmin"],
    operation_id = "listHostels"
)]
#[get("/hostels")]
pub async fn list_hostels(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<HostelPage>> {
    principal.super_admin()?;
    let page = params.page_request()?;
    let listing = state
        .platform
        .list_hostels(&params.search_term(), &page)
        .await?;
    Ok(web::Json(listing.into()))
}

/// Create a hostel together with its first admin.
#[utoipa::path(
    post,
    path = "/superadmin/hostels",
    request_body = CreateHostelRequest,
    responses(
        (status = 201, description = "Hostel created", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Hostel number or admin email in use", body = ErrorSchema)
    ),
    tags = ["superadmin"],
    operation_id = "createHostel"
)]
#[post("/hostels")]
pub async fn create_hostel(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    payload: web::Json<CreateHostelRequest>,
) -> ApiResult<HttpResponse> {
    principal.super_admin()?;
    let CreateHostelRequest { hostel, admin } = payload.into_inner();
    let (admin, admin_password) = admin.into_parts();
    let (hostel, _) = state
        .platform
        .create_hostel(NewHostel {
            hostel: hostel.into(),
            admin,
            admin_password,
        })
        .await?;
    Ok(HttpResponse::Created().json(ActionOutcome::created(hostel.id, "hostel created")))
}

#[utoipa::path(
    get,
    path = "/superadmin/hostels/{id}",
    params(("id" = Uuid, Path, description = "Hostel id")),
    responses(
        (status = 200, description = "Hostel", body = HostelDto),
        (status = 404, description = "Unknown hostel", body = ErrorSchema)
    ),
    tags = ["superadmin"],
    operation_id = "getHostel"
)]
#[get("/hostels/{id}")]
pub async fn get_hostel(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<HostelDto>> {
    principal.super_admin()?;
    let id = hostel_id(&path)?;
    Ok(web::Json(state.platform.get_hostel(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/superadmin/hostels/{id}",
    params(("id" = Uuid, Path, description = "Hostel id")),
    request_body = HostelRequest,
    responses(
        (status = 200, description = "Hostel updated", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown hostel", body = ErrorSchema),
        (status = 409, description = "Hostel number in use", body = ErrorSchema)
    ),
    tags = ["superadmin"],
    operation_id = "updateHostel"
)]
#[put("/hostels/{id}")]
pub async fn update_hostel(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
    payload: web::Json<HostelRequest>,
) -> ApiResult<web::Json<ActionOutcome>> {
    principal.super_admin()?;
    let id = hostel_id(&path)?;
    state
        .platform
        .update_hostel(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(ActionOutcome::ok("hostel updated")))
}

/// Delete a hostel and every record scoped to it.
#[utoipa::path(
    delete,
    path = "/superadmin/hostels/{id}",
    params(("id" = Uuid, Path, description = "Hostel id")),
    responses(
        (status = 200, description = "Hostel deleted", body = ActionOutcome),
        (status = 404, description = "Unknown hostel", body = ErrorSchema)
    ),
    tags = ["superadmin"],
    operation_id = "deleteHostel"
)]
#[delete("/hostels/{id}")]
pub async fn delete_hostel(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    principal.super_admin()?;
    state.platform.delete_hostel(hostel_id(&path)?).await?;
    Ok(web::Json(ActionOutcome::ok("hostel deleted")))
}

#[utoipa::path(
    post,
    path = "/superadmin/hostels/{id}/renew",
    params(("id" = Uuid, Path, description = "Hostel id")),
    request_body = RenewRequest,
    responses(
        (status = 200, description = "Subscription renewed", body = ActionOutcome),
        (status = 400, description = "Expiry in the past", body = ErrorSchema),
        (status = 404, description = "Unknown hostel", body = ErrorSchema)
    ),
    tags = ["superadmin"],
    operation_id = "renewHostel"
)]
#[post("/hostels/{id}/renew")]
pub async fn renew_hostel(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
    payload: web::Json<RenewRequest>,
) -> ApiResult<web::Json<ActionOutcome>> {
    principal.super_admin()?;
    let id = hostel_id(&path)?;
    state
        .platform
        .renew_hostel(id, payload.expires_on)
        .await?;
    Ok(web::Json(ActionOutcome::ok("hostel renewed")))
}

#[utoipa::path(
    get,
    path = "/superadmin/hostels/{id}/admins",
    params(("id" = Uuid, Path, description = "Hostel id")),
    responses(
        (status = 200, description = "Admins of the hostel", body = [AdminDto]),
        (status = 404, description = "Unknown hostel", body = ErrorSchema)
    ),
    tags = ["superadmin"],
    operation_id = "listAdmins"
)]
#[get("/hostels/{id}/admins")]
pub async fn list_admins(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<AdminDto>>> {
    principal.super_admin()?;
    let admins = state.platform.list_admins(hostel_id(&path)?).await?;
    Ok(web::Json(admins.into_iter().map(AdminDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/superadmin/hostels/{id}/admins",
    params(("id" = Uuid, Path, description = "Hostel id")),
    request_body = AdminRequest,
    responses(
        (status = 201, description = "Admin added", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown hostel", body = ErrorSchema),
        (status = 409, description = "Email in use", body = ErrorSchema)
    ),
    tags = ["superadmin"],
    operation_id = "addAdmin"
)]
#[post("/hostels/{id}/admins")]
pub async fn add_admin(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
    payload: web::Json<AdminRequest>,
) -> ApiResult<HttpResponse> {
    principal.super_admin()?;
    let id = hostel_id(&path)?;
    let (draft, password) = payload.into_inner().into_parts();
    let admin = state.platform.add_admin(id, draft, &password).await?;
    Ok(HttpResponse::Created().json(ActionOutcome::created(admin.id, "admin added")))
}

/// Remove an admin and its login account.
#[utoipa::path(
    delete,
    path = "/superadmin/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin removed", body = ActionOutcome),
        (status = 404, description = "Unknown admin", body = ErrorSchema)
    ),
    tags = ["superadmin"],
    operation_id = "removeAdmin"
)]
#[delete("/admins/{id}")]
pub async fn remove_admin(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    principal.super_admin()?;
    let id: AdminId = parse_id(&path, FieldName::new("id"))?;
    state.platform.remove_admin(id).await?;
    Ok(web::Json(ActionOutcome::ok("admin removed")))
}

#[utoipa::path(
    get,
    path = "/superadmin/settings",
    responses((status = 200, description = "Platform settings", body = SettingsDto)),
    tags = ["superadmin"],
    operation_id = "getSettings"
)]
#[get("/settings")]
pub async fn get_settings(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<SettingsDto>> {
    principal.super_admin()?;
    Ok(web::Json(state.platform.settings().await?.into()))
}

#[utoipa::path(
    put,
    path = "/superadmin/settings",
    request_body = SettingsDto,
    responses(
        (status = 200, description = "Settings saved", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["superadmin"],
    operation_id = "updateSettings"
)]
#[put("/settings")]
pub async fn update_settings(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    payload: web::Json<SettingsDto>,
) -> ApiResult<web::Json<ActionOutcome>> {
    principal.super_admin()?;
    state
        .platform
        .update_settings(payload.into_inner().into())
        .await?;
    Ok(web::Json(ActionOutcome::ok("settings saved")))
}
