//! HTTP inbound adapter exposing the REST endpoints of each role area.
//!
//! `/login`, `/logout` and `/session` are public. The `/superadmin`, `/admin`
//! and `/student` scopes each wrap a [`RoleGate`] for their role, which hands
//! the authenticated [`crate::domain::Principal`] to handlers.

use actix_web::web;

use crate::domain::Role;
use self::role_gate::RoleGate;

pub mod auth;
pub mod dto;
pub mod error;
pub mod health;
pub mod portal;
pub mod records;
pub mod residents;
pub mod role_gate;
pub mod rooms;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod superadmin;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register the session endpoints and the three role areas.
///
/// Health probes are not included; the server mounts them with their own
/// state.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(auth::current_session)
        .service(
            web::scope("/superadmin")
                .wrap(RoleGate::require(Role::SuperAdmin))
                .route("/account/password", web::post().to(auth::change_password))
                .service(superadmin::overview)
                .service(superadmin::list_hostels)
                .service(superadmin::create_hostel)
                .service(superadmin::get_hostel)
                .service(superadmin::update_hostel)
                .service(superadmin::delete_hostel)
                .service(superadmin::renew_hostel)
                .service(superadmin::list_admins)
                .service(superadmin::add_admin)
                .service(superadmin::remove_admin)
                .service(superadmin::get_settings)
                .service(superadmin::update_settings),
        )
        .service(
            web::scope("/admin")
                .wrap(RoleGate::require(Role::Admin))
                .route("/account/password", web::post().to(auth::change_password))
                .service(portal::admin_dashboard)
                .service(portal::admin_hostel)
                .service(rooms::list_rooms)
                .service(rooms::create_room)
                .service(rooms::get_room)
                .service(rooms::update_room)
                .service(rooms::delete_room)
                .service(residents::list_students)
                .service(residents::create_student)
                .service(residents::get_student)
                .service(residents::update_student)
                .service(residents::delete_student)
                .service(residents::assign_room)
                .service(residents::vacate_room)
                .service(residents::list_guests)
                .service(residents::create_guest)
                .service(residents::update_guest)
                .service(residents::delete_guest)
                .service(records::list_inventory)
                .service(records::create_inventory)
                .service(records::update_inventory)
                .service(records::delete_inventory)
                .service(records::list_meal_plans)
                .service(records::upsert_meal_plan)
                .service(records::delete_meal_plan)
                .service(records::list_announcements)
                .service(records::create_announcement)
                .service(records::delete_announcement)
                .service(records::finance_summary)
                .service(records::list_finance)
                .service(records::create_finance)
                .service(records::delete_finance),
        )
        .service(
            web::scope("/student")
                .wrap(RoleGate::require(Role::Student))
                .route("/account/password", web::post().to(auth::change_password))
                .service(portal::student_profile)
                .service(portal::student_announcements)
                .service(portal::student_meal_plans),
        );
}
