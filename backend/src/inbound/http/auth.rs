//! Login, logout, session introspection and password changes.
//!
//! ```text
//! POST /login {"email":"warden@hb-1.example","password":"...","role":"admin","hostelNumber":"HB-1"}
//! POST /logout
//! GET  /session
//! POST /{area}/account/password {"currentPassword":"...","newPassword":"..."}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ApiResult;
use super::dto::ActionOutcome;
use super::schemas::ErrorSchema;
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{
    Error, LoginCredentials, LoginValidationError, PasswordChange, Principal, Role,
};

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "warden@hb-1.example")]
    pub email: String,
    pub password: String,
    /// `super_admin`, `admin` or `student`.
    #[schema(example = "admin")]
    pub role: String,
    /// Required for admins and students.
    #[serde(default)]
    #[schema(example = "HB-1")]
    pub hostel_number: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let role: Role = value.role.parse().map_err(|err| {
            Error::invalid_request(format!("{err}"))
                .with_details(json!({ "field": "role", "code": "unknown_role" }))
        })?;
        Self::try_from_parts(
            &value.email,
            &value.password,
            role,
            value.hostel_number.as_deref(),
        )
        .map_err(map_login_validation_error)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyEmail => ("email", "empty_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
        LoginValidationError::MissingHostelNumber => ("hostelNumber", "required"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Body returned by a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = crate::inbound::http::schemas::RoleSchema)]
    pub role: Role,
    /// Dashboard root the client should navigate to.
    #[schema(example = "/admin")]
    pub redirect_to: String,
}

/// Caller identity as stored in the session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub account_id: Uuid,
    #[schema(value_type = crate::inbound::http::schemas::RoleSchema)]
    pub role: Role,
    pub hostel_id: Option<Uuid>,
    pub profile_id: Option<Uuid>,
}

impl From<Principal> for SessionDto {
    fn from(principal: Principal) -> Self {
        Self {
            account_id: principal.account_id.into(),
            role: principal.role,
            hostel_id: principal.hostel_id.map(Uuid::from),
            profile_id: principal.profile_id,
        }
    }
}

/// Body of `POST /{area}/account/password`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    /// At least 8 characters.
    pub new_password: String,
}

/// Authenticate and store the principal in the session cookie.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 403, description = "Hostel subscription expired", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let principal = state.login.authenticate(&credentials).await?;
    session.persist_principal(&principal)?;
    info!(account_id = %principal.account_id, role = %principal.role, "login succeeded");
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "logged in".to_owned(),
        role: principal.role,
        redirect_to: principal.role.dashboard_path().to_owned(),
    }))
}

/// Clear the session cookie.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 200, description = "Logged out", body = ActionOutcome)),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().json(ActionOutcome::ok("logged out"))
}

/// Return the current principal.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current session", body = SessionDto),
        (status = 401, description = "Not logged in", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<SessionDto>> {
    Ok(web::Json(session.require_principal()?.into()))
}

/// Change the caller's password. Mounted under each role area.
#[utoipa::path(
    post,
    path = "/{area}/account/password",
    params(("area" = String, Path, description = "`superadmin`, `admin` or `student`")),
    request_body = PasswordChangeRequest,
    responses(
        (status = 200, description = "Password changed", body = ActionOutcome),
        (status = 302, description = "Not logged in as this area's role"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "changePassword"
)]
pub async fn change_password(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    payload: web::Json<PasswordChangeRequest>,
) -> ApiResult<web::Json<ActionOutcome>> {
    let PasswordChangeRequest {
        current_password,
        new_password,
    } = payload.into_inner();
    let change = PasswordChange::try_new(&current_password, &new_password)?;
    state.login.change_password(&principal, &change).await?;
    Ok(web::Json(ActionOutcome::ok("password changed")))
}
