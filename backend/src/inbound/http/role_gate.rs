//! Role-based gate for the dashboard areas.
//!
//! Each of the `/superadmin`, `/admin` and `/student` scopes wraps its own
//! [`RoleGate`], so the check runs after routing on the decoded path and no
//! spelling of a URL reaches a handler without passing it. Anonymous callers
//! are sent to `/login`; callers of another role are sent to their own
//! dashboard root. Admitted requests carry the [`Principal`] in their
//! extensions, so handlers read it with `web::ReqData<Principal>`.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use super::session::request_principal;
use crate::domain::{Principal, Role};

/// Where anonymous callers are sent.
pub const LOGIN_PATH: &str = "/login";

/// What the gate decided for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Role matches; the principal is forwarded to the handler.
    Admit(Principal),
    /// Redirect to the given location.
    Redirect(&'static str),
}

/// Decide how to treat a caller of an area reserved for `required`.
///
/// # Examples
/// ```
/// use hostel_backend::domain::Role;
/// use hostel_backend::inbound::http::role_gate::{GateDecision, decide};
///
/// assert_eq!(decide(Role::Admin, None), GateDecision::Redirect("/login"));
/// ```
#[must_use]
pub fn decide(required: Role, principal: Option<Principal>) -> GateDecision {
    match principal {
        None => GateDecision::Redirect(LOGIN_PATH),
        Some(principal) if principal.role == required => GateDecision::Admit(principal),
        Some(principal) => GateDecision::Redirect(principal.role.dashboard_path()),
    }
}

/// Middleware enforcing [`decide`] for every route of the scope it wraps.
#[derive(Clone, Copy, Debug)]
pub struct RoleGate {
    required: Role,
}

impl RoleGate {
    /// Gate admitting only sessions of `role`.
    #[must_use]
    pub const fn require(role: Role) -> Self {
        Self { required: role }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGateMiddleware {
            service,
            required: self.required,
        }))
    }
}

/// Service produced by [`RoleGate`].
pub struct RoleGateMiddleware<S> {
    service: S,
    required: Role,
}

impl<S, B> Service<ServiceRequest> for RoleGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = request_principal(&req);

        match decide(self.required, principal) {
            GateDecision::Admit(principal) => {
                req.extensions_mut().insert(principal);
            }
            GateDecision::Redirect(location) => {
                match principal {
                    Some(principal) => warn!(
                        path = req.path(),
                        required = %self.required,
                        role = %principal.role,
                        "role mismatch; redirecting to own dashboard"
                    ),
                    None => debug!(path = req.path(), "anonymous request; redirecting to login"),
                }
                let response = HttpResponse::Found()
                    .insert_header((header::LOCATION, location))
                    .finish()
                    .map_into_right_body();
                return Box::pin(ready(Ok(req.into_response(response))));
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::{AccountId, HostelId};
    use crate::inbound::http::session::PRINCIPAL_KEY;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn principal(role: Role) -> Principal {
        Principal {
            account_id: AccountId::random(),
            role,
            hostel_id: role.is_hostel_scoped().then(HostelId::random),
            profile_id: None,
        }
    }

    #[rstest]
    #[case(Role::Admin, None, GateDecision::Redirect("/login"))]
    #[case(Role::Student, Some(Role::Admin), GateDecision::Redirect("/admin"))]
    #[case(Role::Admin, Some(Role::Student), GateDecision::Redirect("/student"))]
    #[case(Role::SuperAdmin, Some(Role::Student), GateDecision::Redirect("/student"))]
    #[case(Role::Admin, Some(Role::SuperAdmin), GateDecision::Redirect("/superadmin"))]
    fn decisions(
        #[case] required: Role,
        #[case] role: Option<Role>,
        #[case] expected: GateDecision,
    ) {
        assert_eq!(decide(required, role.map(principal)), expected);
    }

    #[rstest]
    fn matching_role_is_admitted() {
        let caller = principal(Role::Admin);
        assert_eq!(decide(Role::Admin, Some(caller)), GateDecision::Admit(caller));
    }

    struct GatedResponse {
        status: StatusCode,
        location: Option<String>,
        body: web::Bytes,
    }

    async fn echo_role(principal: web::ReqData<Principal>) -> HttpResponse {
        HttpResponse::Ok().body(principal.role.as_str())
    }

    async fn gated_request(
        stored: Option<serde_json::Value>,
        mut req: actix_test::TestRequest,
    ) -> GatedResponse {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/seed",
                    web::post().to(|session: Session, body: web::Json<serde_json::Value>| async move {
                        session
                            .insert(PRINCIPAL_KEY, body.into_inner())
                            .expect("seed session");
                        HttpResponse::Ok()
                    }),
                )
                .service(
                    web::scope("/superadmin")
                        .wrap(RoleGate::require(Role::SuperAdmin))
                        .route("/hostels", web::get().to(echo_role))
                        .route("/settings", web::put().to(echo_role)),
                )
                .service(
                    web::scope("/admin")
                        .wrap(RoleGate::require(Role::Admin))
                        .route("/rooms", web::get().to(echo_role)),
                )
                .service(
                    web::scope("/student")
                        .wrap(RoleGate::require(Role::Student))
                        .route("", web::get().to(echo_role)),
                ),
        )
        .await;

        if let Some(stored) = stored {
            let seeded = actix_test::call_service(
                &app,
                actix_test::TestRequest::post().uri("/seed").set_json(stored).to_request(),
            )
            .await;
            req = req.cookie(session_cookie(&seeded));
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let location = res
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().expect("ascii location").to_owned());
        let body = actix_test::read_body(res).await;
        GatedResponse {
            status,
            location,
            body,
        }
    }

    async fn get(stored: Option<serde_json::Value>, path: &str) -> GatedResponse {
        gated_request(stored, actix_test::TestRequest::get().uri(path)).await
    }

    #[actix_web::test]
    async fn anonymous_callers_go_to_login() {
        let res = get(None, "/admin/rooms").await;
        assert_eq!(res.status, StatusCode::FOUND);
        assert_eq!(res.location.as_deref(), Some("/login"));
    }

    #[actix_web::test]
    async fn students_are_sent_to_their_dashboard() {
        let student = serde_json::to_value(principal(Role::Student)).expect("serialise");
        let res = get(Some(student), "/admin/rooms").await;
        assert_eq!(res.status, StatusCode::FOUND);
        assert_eq!(res.location.as_deref(), Some("/student"));
    }

    #[actix_web::test]
    async fn tampered_sessions_count_as_anonymous() {
        let res = get(Some(json!({ "role": "root" })), "/admin/rooms").await;
        assert_eq!(res.location.as_deref(), Some("/login"));
    }

    #[actix_web::test]
    async fn admins_reach_admin_handlers_with_principal() {
        let admin = serde_json::to_value(principal(Role::Admin)).expect("serialise");
        let res = get(Some(admin), "/admin/rooms").await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, "admin");
    }

    #[rstest]
    #[case("/%73uperadmin/hostels")]
    #[case("/superadmin/%68ostels")]
    #[case("/%61dmin/rooms")]
    #[case("/%61%64%6D%69%6E/rooms")]
    #[case("/%73tudent")]
    #[actix_web::test]
    async fn percent_encoded_areas_are_still_gated(#[case] path: &str) {
        let res = get(None, path).await;
        assert_eq!(res.status, StatusCode::FOUND);
        assert_eq!(res.location.as_deref(), Some("/login"));
    }

    #[actix_web::test]
    async fn encoded_superadmin_writes_are_refused_to_admins() {
        let admin = serde_json::to_value(principal(Role::Admin)).expect("serialise");
        let res = gated_request(
            Some(admin),
            actix_test::TestRequest::put()
                .uri("/%73uperadmin/settings")
                .set_json(json!({})),
        )
        .await;
        assert_eq!(res.status, StatusCode::FOUND);
        assert_eq!(res.location.as_deref(), Some("/admin"));
    }

    #[actix_web::test]
    async fn encoded_paths_still_admit_the_matching_role() {
        let root = serde_json::to_value(principal(Role::SuperAdmin)).expect("serialise");
        let res = get(Some(root), "/%73uperadmin/hostels").await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, "super_admin");
    }

    #[rstest]
    #[case("/Admin/rooms")]
    #[case("/SUPERADMIN/hostels")]
    #[case("/Student")]
    #[actix_web::test]
    async fn mixed_case_areas_do_not_route(#[case] path: &str) {
        let res = get(None, path).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert!(res.body.is_empty());
    }
}
