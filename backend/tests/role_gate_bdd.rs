//! Behaviour tests for the role gate in front of the dashboard areas.

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
#[path = "support/hostel_http.rs"]
mod hostel_http;

use actix_web::http::Method;
use hostel_http::{HostelWorld, student_body};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;

#[fixture]
fn world() -> HostelWorld {
    HostelWorld::new()
}

#[given("the platform has a super admin")]
fn the_platform_has_a_super_admin(world: &HostelWorld) {
    world.seed_super_admin();
    world.login_root();
}

#[given("hostel {number} is open with its admin signed in")]
fn hostel_is_open(world: &HostelWorld, number: String) {
    world.open_hostel(&number, 10);
}

#[given("student {name} is enrolled and signed in")]
fn student_is_enrolled(world: &HostelWorld, name: String) {
    let res = world.request(
        Some("admin"),
        Method::POST,
        "/admin/students",
        Some(student_body(&name, None)),
    );
    assert_eq!(res.status.as_u16(), 201, "enrolment: {:?}", res.body);
    let res = world.login_as(
        "student",
        json!({
            "email": format!("{}@students.example", name.to_lowercase()),
            "password": "student-pass",
            "role": "student",
            "hostelNumber": "HB-1"
        }),
    );
    assert!(res.status.is_success(), "student login: {:?}", res.body);
}

#[when("an anonymous visitor requests {path}")]
fn an_anonymous_visitor_requests(world: &HostelWorld, path: String) {
    world.request(None, Method::GET, &path, None);
}

#[when("an anonymous visitor puts to {path}")]
fn an_anonymous_visitor_puts_to(world: &HostelWorld, path: String) {
    world.request(None, Method::PUT, &path, Some(json!({ "maintenanceMode": true })));
}

#[when("the admin requests {path}")]
fn the_admin_requests(world: &HostelWorld, path: String) {
    world.request(Some("admin"), Method::GET, &path, None);
}

#[when("the student requests {path}")]
fn the_student_requests(world: &HostelWorld, path: String) {
    world.request(Some("student"), Method::GET, &path, None);
}

#[when("the admin signs out")]
fn the_admin_signs_out(world: &HostelWorld) {
    let res = world.request(Some("admin"), Method::POST, "/logout", None);
    assert!(res.status.is_success());
}

#[when("the admin tries to sign in as a student")]
fn the_admin_tries_to_sign_in_as_a_student(world: &HostelWorld) {
    world.login_as(
        "imposter",
        json!({
            "email": "warden@hb-1.example",
            "password": "warden-pass",
            "role": "student",
            "hostelNumber": "HB-1"
        }),
    );
}

#[then("the response redirects to {location}")]
fn the_response_redirects_to(world: &HostelWorld, location: String) {
    let last = world.last();
    assert_eq!(last.status.as_u16(), 302);
    assert_eq!(last.location.as_deref(), Some(location.as_str()));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &HostelWorld, status: u16) {
    let last = world.last();
    assert_eq!(last.status.as_u16(), status, "body: {:?}", last.body);
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &HostelWorld, code: String) {
    assert_eq!(world.last().error_code(), Some(code.as_str()));
}

#[scenario(path = "tests/features/role_gate.feature")]
fn role_gate_scenarios(world: HostelWorld) {
    drop(world);
}
