//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every annotated handler of the role areas plus the
//! health probes. Domain enums are documented through the wrappers in
//! [`crate::inbound::http::schemas`], so the domain layer stays free of
//! utoipa derives.
//!
//! Swagger UI serves the document in debug builds, and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, RoleSchema, RoomStatusSchema};
use crate::inbound::http::{
    auth, dto, health, portal, records, residents, rooms, superadmin,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Hostel management API",
        description = "Role-gated administration of hostels, rooms, residents and records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        auth::login,
        auth::logout,
        auth::current_session,
        auth::change_password,
        health::ready,
        health::live,
        superadmin::overview,
        superadmin::list_hostels,
        superadmin::create_hostel,
        superadmin::get_hostel,
        superadmin::update_hostel,
        superadmin::delete_hostel,
        superadmin::renew_hostel,
        superadmin::list_admins,
        superadmin::add_admin,
        superadmin::remove_admin,
        superadmin::get_settings,
        superadmin::update_settings,
        portal::admin_dashboard,
        portal::admin_hostel,
        rooms::list_rooms,
        rooms::create_room,
        rooms::get_room,
        rooms::update_room,
        rooms::delete_room,
        residents::list_students,
        residents::create_student,
        residents::get_student,
        residents::update_student,
        residents::delete_student,
        residents::assign_room,
        residents::vacate_room,
        residents::list_guests,
        residents::create_guest,
        residents::update_guest,
        residents::delete_guest,
        records::list_inventory,
        records::create_inventory,
        records::update_inventory,
        records::delete_inventory,
        records::list_meal_plans,
        records::upsert_meal_plan,
        records::delete_meal_plan,
        records::list_announcements,
        records::create_announcement,
        records::delete_announcement,
        records::list_finance,
        records::create_finance,
        records::finance_summary,
        records::delete_finance,
        portal::student_profile,
        portal::student_announcements,
        portal::student_meal_plans,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RoleSchema,
        RoomStatusSchema,
        dto::ActionOutcome,
        dto::RoomDto,
        dto::RoomPage,
        residents::StudentPage,
        residents::GuestPage,
        superadmin::HostelPage,
    )),
    tags(
        (name = "auth", description = "Login, logout and password changes"),
        (name = "health", description = "Liveness and readiness probes"),
        (name = "superadmin", description = "Hostels, their admins and platform settings"),
        (name = "dashboard", description = "Admin overview of one hostel"),
        (name = "rooms", description = "Rooms and derived occupancy"),
        (name = "students", description = "Enrolled residents"),
        (name = "guests", description = "Short-stay residents"),
        (name = "inventory", description = "Hostel inventory"),
        (name = "meal-plans", description = "Weekly menu"),
        (name = "announcements", description = "Notices to residents and staff"),
        (name = "finance", description = "Income and expense ledger"),
        (name = "student", description = "Student portal")
    )
)]
pub struct ApiDoc;
