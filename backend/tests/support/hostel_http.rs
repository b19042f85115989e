//! In-process HTTP world shared by the hostel behaviour suites.
//!
//! Steps are synchronous, so the world owns an Actix system runner and
//! rebuilds the application for every request. The session key lives in the
//! world, which keeps cookies from earlier steps valid.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{Method, StatusCode, header};
use actix_web::rt::SystemRunner;
use actix_web::{App, test as actix_test, web};
use hostel_backend::Trace;
use hostel_backend::inbound::http::configure;
use hostel_backend::inbound::http::error::{json_config, query_config};
use hostel_backend::inbound::http::state::{HttpState, HttpStatePorts};
use hostel_backend::outbound::memory::InMemoryStore;
use hostel_backend::outbound::security::{BcryptPasswordHasher, MIN_COST};
use mockable::DefaultClock;
use serde_json::{Value, json};

pub(crate) const ROOT_EMAIL: &str = "root@hostel.local";
pub(crate) const ROOT_PASSWORD: &str = "root-password";

/// Status, redirect target and decoded body of the last response.
#[derive(Debug, Clone)]
pub(crate) struct Captured {
    pub(crate) status: StatusCode,
    pub(crate) location: Option<String>,
    pub(crate) body: Value,
}

impl Captured {
    pub(crate) fn error_code(&self) -> Option<&str> {
        self.body.get("code").and_then(Value::as_str)
    }
}

pub(crate) struct HostelWorld {
    runner: SystemRunner,
    ports: HttpStatePorts,
    key: Key,
    cookies: RefCell<HashMap<String, Cookie<'static>>>,
    ids: RefCell<HashMap<String, String>>,
    last: RefCell<Option<Captured>>,
}

impl HostelWorld {
    pub(crate) fn new() -> Self {
        let ports = HttpStatePorts::shared(
            Arc::new(InMemoryStore::default()),
            Arc::new(BcryptPasswordHasher::new(MIN_COST)),
            Arc::new(DefaultClock),
        );
        Self {
            runner: actix_web::rt::System::new(),
            ports,
            key: Key::generate(),
            cookies: RefCell::new(HashMap::new()),
            ids: RefCell::new(HashMap::new()),
            last: RefCell::new(None),
        }
    }

    /// Seed the bootstrap super-admin.
    pub(crate) fn seed_super_admin(&self) {
        let auth = self.ports.auth_service();
        let created = self
            .runner
            .block_on(async move { auth.ensure_super_admin(ROOT_EMAIL, ROOT_PASSWORD).await })
            .expect("seed super-admin");
        assert!(created, "super-admin seeded twice");
    }

    /// Send a request, optionally as the logged-in user `actor`.
    ///
    /// A session cookie in the response replaces the actor's stored cookie,
    /// so logging out is observed by later steps.
    pub(crate) fn request(
        &self,
        actor: Option<&str>,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Captured {
        let cookie = actor.map(|name| {
            self.cookies
                .borrow()
                .get(name)
                .cloned()
                .unwrap_or_else(|| panic!("{name} has not logged in"))
        });
        let (captured, set_cookie) = self.dispatch(cookie, method, path, body);
        if let (Some(name), Some(cookie)) = (actor, set_cookie) {
            self.cookies.borrow_mut().insert(name.to_owned(), cookie);
        }
        *self.last.borrow_mut() = Some(captured.clone());
        captured
    }

    /// Log in with `body` and remember the session cookie as `name`.
    pub(crate) fn login_as(&self, name: &str, body: Value) -> Captured {
        let (captured, cookie) = self.dispatch(None, Method::POST, "/login", Some(body));
        if captured.status.is_success() {
            let cookie = cookie.expect("login sets the session cookie");
            self.cookies.borrow_mut().insert(name.to_owned(), cookie);
        }
        *self.last.borrow_mut() = Some(captured.clone());
        captured
    }

    fn dispatch(
        &self,
        cookie: Option<Cookie<'static>>,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (Captured, Option<Cookie<'static>>) {
        let state = web::Data::new(HttpState::from(self.ports.clone()));
        let key = self.key.clone();
        let path = path.to_owned();

        self.runner.block_on(async move {
            let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
                .cookie_name("session".to_owned())
                .cookie_secure(false)
                .build();
            let app = actix_test::init_service(
                App::new()
                    .app_data(state)
                    .app_data(json_config())
                    .app_data(query_config())
                    .wrap(session)
                    .wrap(Trace)
                    .configure(configure),
            )
            .await;

            let mut req = actix_test::TestRequest::default().method(method).uri(&path);
            if let Some(cookie) = cookie {
                req = req.cookie(cookie);
            }
            if let Some(body) = body {
                req = req.set_json(body);
            }
            let res = actix_test::call_service(&app, req.to_request()).await;
            let status = res.status();
            let location = res
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let set_cookie = res
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .map(Cookie::into_owned);
            let bytes = actix_test::read_body(res).await;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("json body")
            };
            (
                Captured {
                    status,
                    location,
                    body,
                },
                set_cookie,
            )
        })
    }

    pub(crate) fn login_root(&self) {
        let res = self.login_as(
            "root",
            json!({ "email": ROOT_EMAIL, "password": ROOT_PASSWORD, "role": "super_admin" }),
        );
        assert!(res.status.is_success(), "root login failed: {}", res.status);
    }

    /// Create hostel `number` through the super-admin API and log its admin
    /// in as `admin`.
    pub(crate) fn open_hostel(&self, number: &str, room_limit: u32) {
        let email = warden_email(number);
        let res = self.request(
            Some("root"),
            Method::POST,
            "/superadmin/hostels",
            Some(json!({
                "hostel": {
                    "name": format!("Hostel {number}"),
                    "hostelNumber": number,
                    "address": "1 Quay Street",
                    "contactEmail": "desk@harbour.example",
                    "contactPhone": "+44 20 7946 0000",
                    "roomLimit": room_limit,
                    "studentLimit": 50,
                    "expiresOn": "2099-12-31"
                },
                "admin": {
                    "fullName": "Warden",
                    "email": email,
                    "phone": "+44 20 7946 0002",
                    "password": "warden-pass"
                }
            })),
        );
        assert_eq!(res.status, StatusCode::CREATED, "hostel creation: {:?}", res.body);
        self.remember(number, &res.body["id"]);

        let res = self.login_as(
            "admin",
            json!({
                "email": warden_email(number),
                "password": "warden-pass",
                "role": "admin",
                "hostelNumber": number
            }),
        );
        assert!(res.status.is_success(), "admin login failed: {:?}", res.body);
    }

    /// Record the id found in `value` under `label`.
    pub(crate) fn remember(&self, label: &str, value: &Value) {
        let id = value.as_str().expect("id string").to_owned();
        self.ids.borrow_mut().insert(label.to_owned(), id);
    }

    pub(crate) fn id_of(&self, label: &str) -> String {
        self.ids
            .borrow()
            .get(label)
            .cloned()
            .unwrap_or_else(|| panic!("no id recorded for {label}"))
    }

    pub(crate) fn last(&self) -> Captured {
        self.last.borrow().clone().expect("a request was sent")
    }
}

fn warden_email(number: &str) -> String {
    format!("warden@{}.example", number.to_lowercase())
}

/// Enrolment body for a student, optionally placed in `room_id`.
pub(crate) fn student_body(name: &str, room_id: Option<&str>) -> Value {
    json!({
        "fullName": name,
        "email": format!("{}@students.example", name.to_lowercase()),
        "phone": "+44 20 7946 0100",
        "guardianName": "Guardian",
        "guardianPhone": "+44 20 7946 0101",
        "enrolledOn": "2026-02-01",
        "password": "student-pass",
        "roomId": room_id
    })
}
