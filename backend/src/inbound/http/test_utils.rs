//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use super::error::{json_config, query_config};
use super::state::{HttpState, HttpStatePorts};
use crate::domain::test_support::{MutableClock, PlainHasher, date, hostel, seed_hostel};
use crate::domain::{Admin, Hostel};
use crate::outbound::memory::InMemoryStore;

/// Super-admin seeded by [`TestBackend::with_super_admin`].
pub const ROOT_EMAIL: &str = "root@hostel.local";
pub const ROOT_PASSWORD: &str = "root-password";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("response sets the session cookie")
}

/// In-memory backend wired the way the server wires it, on a pinned day.
pub struct TestBackend {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<MutableClock>,
    pub ports: HttpStatePorts,
}

impl TestBackend {
    /// Empty store whose clock reads midday on `day` (`YYYY-MM-DD`).
    pub fn on(day: &str) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let clock = Arc::new(MutableClock::on(date(day)));
        let ports = HttpStatePorts::shared(store.clone(), Arc::new(PlainHasher), clock.clone());
        Self {
            store,
            clock,
            ports,
        }
    }

    /// Seed the bootstrap super-admin account.
    pub async fn with_super_admin(self) -> Self {
        self.ports
            .auth_service()
            .ensure_super_admin(ROOT_EMAIL, ROOT_PASSWORD)
            .await
            .expect("seed super-admin");
        self
    }

    /// Seed a hostel valid until 2030 and its first admin (password `pw`).
    pub async fn hostel(&self, number: &str, room_limit: u32) -> (Hostel, Admin) {
        let hostel = hostel(number, room_limit);
        let admin = seed_hostel(&self.store, &hostel).await;
        (hostel, admin)
    }

    pub fn state(&self) -> web::Data<HttpState> {
        web::Data::new(HttpState::from(self.ports.clone()))
    }
}

/// Application with every role area, the role gate and test sessions.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(test_session_middleware())
        .configure(super::configure)
}

/// Log in with `body` and return the session cookie, asserting success.
pub async fn login<S, B>(app: &S, body: Value) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(&body)
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    session_cookie(&res)
}

/// Send `req` with `cookie` and decode the JSON body (`Null` when empty).
pub async fn send<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    req: actix_test::TestRequest,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, req.cookie(cookie.clone()).to_request()).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

/// Login body for the seeded admin of hostel `number`.
pub fn admin_login(number: &str) -> Value {
    serde_json::json!({
        "email": format!("warden@{}.example", number.to_lowercase()),
        "password": "pw",
        "role": "admin",
        "hostelNumber": number,
    })
}

/// Login body for the seeded super-admin.
pub fn root_login() -> Value {
    serde_json::json!({
        "email": ROOT_EMAIL,
        "password": ROOT_PASSWORD,
        "role": "super_admin",
    })
}
