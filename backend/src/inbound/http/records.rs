//! Hostel-scoped records kept by admins: inventory, the weekly menu,
//! announcements and the finance ledger.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::ApiResult;
use super::dto::{ActionOutcome, AnnouncementDto, MealPlanDto};
use super::schemas::ErrorSchema;
use super::state::HttpState;
use super::validation::{FieldName, parse_id};
use crate::domain::{
    AnnouncementDraft, AnnouncementId, FinanceDraft, FinanceKind, FinanceRecord,
    FinanceRecordId, FinanceSummary, InventoryDraft, InventoryItem, InventoryItemId,
    MealPlanDraft, Principal, Weekday,
};

/// Body of `POST /admin/inventory` and `PUT /admin/inventory/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRequest {
    #[schema(example = "Bunk bed")]
    pub name: String,
    #[schema(example = "Furniture")]
    pub category: String,
    #[schema(example = 12)]
    pub quantity: i64,
    /// `good`, `needs_repair` or `damaged`.
    #[serde(default = "default_condition")]
    pub condition: String,
}

fn default_condition() -> String {
    "good".to_owned()
}

impl From<InventoryRequest> for InventoryDraft {
    fn from(value: InventoryRequest) -> Self {
        Self {
            name: value.name,
            category: value.category,
            quantity: value.quantity,
            condition: value.condition,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDto {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    #[schema(example = "good")]
    pub condition: String,
}

impl From<InventoryItem> for InventoryItemDto {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id.into(),
            name: item.details.name,
            category: item.details.category,
            quantity: item.details.quantity,
            condition: item.details.condition.as_str().to_owned(),
        }
    }
}

/// Body of `PUT /admin/meal-plans/{weekday}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MealPlanRequest {
    #[schema(example = "Porridge")]
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl From<MealPlanRequest> for MealPlanDraft {
    fn from(value: MealPlanRequest) -> Self {
        Self {
            breakfast: value.breakfast,
            lunch: value.lunch,
            dinner: value.dinner,
        }
    }
}

/// Body of `POST /admin/announcements`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AnnouncementRequest {
    #[schema(example = "Water outage")]
    pub title: String,
    pub body: String,
    /// `everyone` (default), `students` or `staff`.
    #[serde(default = "default_audience")]
    pub audience: String,
}

fn default_audience() -> String {
    "everyone".to_owned()
}

impl From<AnnouncementRequest> for AnnouncementDraft {
    fn from(value: AnnouncementRequest) -> Self {
        Self {
            title: value.title,
            body: value.body,
            audience: value.audience,
        }
    }
}

/// Body of `POST /admin/finance`. Amounts are positive minor units.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRequest {
    /// `income` or `expense`.
    #[schema(example = "income")]
    pub kind: String,
    #[schema(example = "rent")]
    pub category: String,
    #[schema(example = 40000)]
    pub amount: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub recorded_on: NaiveDate,
}

impl From<FinanceRequest> for FinanceDraft {
    fn from(value: FinanceRequest) -> Self {
        Self {
            kind: value.kind,
            category: value.category,
            amount: value.amount,
            description: value.description,
            recorded_on: value.recorded_on,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecordDto {
    pub id: Uuid,
    pub kind: String,
    pub category: String,
    pub amount: i64,
    pub description: Option<String>,
    pub recorded_on: NaiveDate,
}

impl From<FinanceRecord> for FinanceRecordDto {
    fn from(record: FinanceRecord) -> Self {
        let details = record.details;
        Self {
            id: record.id.into(),
            kind: details.kind.as_str().to_owned(),
            category: details.category,
            amount: details.amount,
            description: details.description,
            recorded_on: details.recorded_on,
        }
    }
}

/// Ledger totals in minor units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummaryDto {
    pub income: i64,
    pub expense: i64,
    /// Income minus expense.
    pub balance: i64,
}

impl From<FinanceSummary> for FinanceSummaryDto {
    fn from(summary: FinanceSummary) -> Self {
        Self {
            income: summary.income,
            expense: summary.expense,
            balance: summary.balance,
        }
    }
}

/// `?kind` filter of the ledger listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FinanceQuery {
    /// `income` or `expense`; omit for both.
    pub kind: Option<String>,
}

impl FinanceQuery {
    fn kind(&self) -> ApiResult<Option<FinanceKind>> {
        Ok(self
            .kind
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(str::parse::<FinanceKind>)
            .transpose()?)
    }
}

fn item_id(raw: &str) -> ApiResult<InventoryItemId> {
    parse_id(raw, FieldName::new("id"))
}

// Inventory

#[utoipa::path(
    get,
    path = "/admin/inventory",
    responses((status = 200, description = "Inventory items", body = [InventoryItemDto])),
    tags = ["inventory"],
    operation_id = "listInventory"
)]
#[get("/inventory")]
pub async fn list_inventory(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<Vec<InventoryItemDto>>> {
    let items = state.records.list_inventory(principal.hostel()?).await?;
    Ok(web::Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/admin/inventory",
    request_body = InventoryRequest,
    responses(
        (status = 201, description = "Item added", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["inventory"],
    operation_id = "createInventoryItem"
)]
#[post("/inventory")]
pub async fn create_inventory(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    payload: web::Json<InventoryRequest>,
) -> ApiResult<HttpResponse> {
    let item = state
        .records
        .create_inventory(principal.hostel()?, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ActionOutcome::created(item.id, "item added")))
}

#[utoipa::path(
    put,
    path = "/admin/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory item id")),
    request_body = InventoryRequest,
    responses(
        (status = 200, description = "Item updated", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown item", body = ErrorSchema)
    ),
    tags = ["inventory"],
    operation_id = "updateInventoryItem"
)]
#[put("/inventory/{id}")]
pub async fn update_inventory(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
    payload: web::Json<InventoryRequest>,
) -> ApiResult<web::Json<ActionOutcome>> {
    state
        .records
        .update_inventory(
            principal.hostel()?,
            item_id(&path)?,
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(ActionOutcome::ok("item updated")))
}

#[utoipa::path(
    delete,
    path = "/admin/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory item id")),
    responses(
        (status = 200, description = "Item removed", body = ActionOutcome),
        (status = 404, description = "Unknown item", body = ErrorSchema)
    ),
    tags = ["inventory"],
    operation_id = "deleteInventoryItem"
)]
#[delete("/inventory/{id}")]
pub async fn delete_inventory(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    state
        .records
        .delete_inventory(principal.hostel()?, item_id(&path)?)
        .await?;
    Ok(web::Json(ActionOutcome::ok("item removed")))
}

// Meal plans

#[utoipa::path(
    get,
    path = "/admin/meal-plans",
    responses((status = 200, description = "Plans, Monday first", body = [MealPlanDto])),
    tags = ["meal-plans"],
    operation_id = "listMealPlans"
)]
#[get("/meal-plans")]
pub async fn list_meal_plans(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<Vec<MealPlanDto>>> {
    let plans = state.records.meal_plans(principal.hostel()?).await?;
    Ok(web::Json(plans.into_iter().map(Into::into).collect()))
}

/// Set the meals for one weekday, replacing any existing plan.
#[utoipa::path(
    put,
    path = "/admin/meal-plans/{weekday}",
    params(("weekday" = String, Path, description = "`monday` to `sunday`")),
    request_body = MealPlanRequest,
    responses(
        (status = 200, description = "Plan saved", body = MealPlanDto),
        (status = 400, description = "Unknown weekday or empty meal", body = ErrorSchema)
    ),
    tags = ["meal-plans"],
    operation_id = "upsertMealPlan"
)]
#[put("/meal-plans/{weekday}")]
pub async fn upsert_meal_plan(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
    payload: web::Json<MealPlanRequest>,
) -> ApiResult<web::Json<MealPlanDto>> {
    let weekday: Weekday = path.parse()?;
    let plan = state
        .records
        .upsert_meal_plan(principal.hostel()?, weekday, payload.into_inner().into())
        .await?;
    Ok(web::Json(plan.into()))
}

#[utoipa::path(
    delete,
    path = "/admin/meal-plans/{weekday}",
    params(("weekday" = String, Path, description = "`monday` to `sunday`")),
    responses(
        (status = 200, description = "Plan cleared", body = ActionOutcome),
        (status = 400, description = "Unknown weekday", body = ErrorSchema),
        (status = 404, description = "No plan for that day", body = ErrorSchema)
    ),
    tags = ["meal-plans"],
    operation_id = "deleteMealPlan"
)]
#[delete("/meal-plans/{weekday}")]
pub async fn delete_meal_plan(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    let weekday: Weekday = path.parse()?;
    state
        .records
        .delete_meal_plan(principal.hostel()?, weekday)
        .await?;
    Ok(web::Json(ActionOutcome::ok("meal plan cleared")))
}

// Announcements

#[utoipa::path(
    get,
    path = "/admin/announcements",
    responses((status = 200, description = "Announcements, newest first", body = [AnnouncementDto])),
    tags = ["announcements"],
    operation_id = "listAnnouncements"
)]
#[get("/announcements")]
pub async fn list_announcements(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<Vec<AnnouncementDto>>> {
    let announcements = state.records.announcements(principal.hostel()?).await?;
    Ok(web::Json(announcements.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/admin/announcements",
    request_body = AnnouncementRequest,
    responses(
        (status = 201, description = "Announcement published", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["announcements"],
    operation_id = "createAnnouncement"
)]
#[post("/announcements")]
pub async fn create_announcement(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    payload: web::Json<AnnouncementRequest>,
) -> ApiResult<HttpResponse> {
    let announcement = state
        .records
        .create_announcement(principal.hostel()?, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created()
        .json(ActionOutcome::created(announcement.id, "announcement published")))
}

#[utoipa::path(
    delete,
    path = "/admin/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Announcement withdrawn", body = ActionOutcome),
        (status = 404, description = "Unknown announcement", body = ErrorSchema)
    ),
    tags = ["announcements"],
    operation_id = "deleteAnnouncement"
)]
#[delete("/announcements/{id}")]
pub async fn delete_announcement(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    let id: AnnouncementId = parse_id(&path, FieldName::new("id"))?;
    state
        .records
        .delete_announcement(principal.hostel()?, id)
        .await?;
    Ok(web::Json(ActionOutcome::ok("announcement withdrawn")))
}

// Finance

#[utoipa::path(
    get,
    path = "/admin/finance",
    params(FinanceQuery),
    responses(
        (status = 200, description = "Ledger entries, newest first", body = [FinanceRecordDto]),
        (status = 400, description = "Unknown kind", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "listFinanceRecords"
)]
#[get("/finance")]
pub async fn list_finance(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    query: web::Query<FinanceQuery>,
) -> ApiResult<web::Json<Vec<FinanceRecordDto>>> {
    let records = state
        .records
        .finance_records(principal.hostel()?, query.kind()?)
        .await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/admin/finance",
    request_body = FinanceRequest,
    responses(
        (status = 201, description = "Entry recorded", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "createFinanceRecord"
)]
#[post("/finance")]
pub async fn create_finance(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    payload: web::Json<FinanceRequest>,
) -> ApiResult<HttpResponse> {
    let record = state
        .records
        .create_finance_record(principal.hostel()?, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ActionOutcome::created(record.id, "entry recorded")))
}

/// Income, expense and balance over the whole ledger.
#[utoipa::path(
    get,
    path = "/admin/finance/summary",
    responses((status = 200, description = "Ledger totals", body = FinanceSummaryDto)),
    tags = ["finance"],
    operation_id = "financeSummary"
)]
#[get("/finance/summary")]
pub async fn finance_summary(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<FinanceSummaryDto>> {
    let summary = state.records.finance_summary(principal.hostel()?).await?;
    Ok(web::Json(summary.into()))
}

#[utoipa::path(
    delete,
    path = "/admin/finance/{id}",
    params(("id" = Uuid, Path, description = "Ledger entry id")),
    responses(
        (status = 200, description = "Entry removed", body = ActionOutcome),
        (status = 404, description = "Unknown entry", body = ErrorSchema)
    ),
    tags = ["finance"],
    operation_id = "deleteFinanceRecord"
)]
#[delete("/finance/{id}")]
pub async fn delete_finance(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    let id: FinanceRecordId = parse_id(&path, FieldName::new("id"))?;
    state
        .records
        .delete_finance_record(principal.hostel()?, id)
        .await?;
    Ok(web::Json(ActionOutcome::ok("entry removed")))
}
