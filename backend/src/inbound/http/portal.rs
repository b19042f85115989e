//! Read-only views: the admin dashboard and the student portal.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::dto::{AnnouncementDto, HostelDto, MealPlanDto, RoomDto, StudentDto};
use super::schemas::ErrorSchema;
use super::state::HttpState;
use crate::domain::{HostelDashboard, OccupancySummary, Principal, StudentProfile};

/// Room counts per status and bed totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyDto {
    pub available: u64,
    pub partially_occupied: u64,
    pub occupied: u64,
    pub occupied_beds: u64,
    pub total_beds: u64,
}

impl From<OccupancySummary> for OccupancyDto {
    fn from(value: OccupancySummary) -> Self {
        Self {
            available: value.available,
            partially_occupied: value.partially_occupied,
            occupied: value.occupied,
            occupied_beds: value.occupied_beds,
            total_beds: value.total_beds,
        }
    }
}

/// Body of `GET /admin`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub hostel: HostelDto,
    pub occupancy: OccupancyDto,
    pub rooms: u64,
    pub students: u64,
    pub guests: u64,
}

impl From<HostelDashboard> for DashboardDto {
    fn from(value: HostelDashboard) -> Self {
        Self {
            hostel: value.hostel.into(),
            occupancy: value.occupancy.into(),
            rooms: value.rooms,
            students: value.students,
            guests: value.guests,
        }
    }
}

/// Body of `GET /student`: the caller's record, hostel and room with
/// roommates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileDto {
    pub student: StudentDto,
    pub hostel: HostelDto,
    pub room: Option<RoomDto>,
}

impl From<StudentProfile> for StudentProfileDto {
    fn from(value: StudentProfile) -> Self {
        Self {
            student: value.student.into(),
            hostel: value.hostel.into(),
            room: value.room.map(RoomDto::from),
        }
    }
}

#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Hostel dashboard", body = DashboardDto),
        (status = 302, description = "Not an admin session")
    ),
    tags = ["dashboard"],
    operation_id = "adminDashboard"
)]
#[get("")]
pub async fn admin_dashboard(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<DashboardDto>> {
    let dashboard = state.portal.hostel_dashboard(principal.hostel()?).await?;
    Ok(web::Json(dashboard.into()))
}

/// The admin's own hostel.
#[utoipa::path(
    get,
    path = "/admin/hostel",
    responses(
        (status = 200, description = "Hostel", body = HostelDto),
        (status = 404, description = "Hostel deleted", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "adminHostel"
)]
#[get("/hostel")]
pub async fn admin_hostel(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<HostelDto>> {
    let hostel = state.portal.hostel(principal.hostel()?).await?;
    Ok(web::Json(hostel.into()))
}

#[utoipa::path(
    get,
    path = "/student",
    responses(
        (status = 200, description = "Profile with room and roommates", body = StudentProfileDto),
        (status = 404, description = "Profile removed", body = ErrorSchema)
    ),
    tags = ["student"],
    operation_id = "studentProfile"
)]
#[get("")]
pub async fn student_profile(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<StudentProfileDto>> {
    let profile = state.portal.student_profile(&principal).await?;
    Ok(web::Json(profile.into()))
}

/// Announcements addressed to everyone or to students.
#[utoipa::path(
    get,
    path = "/student/announcements",
    responses((status = 200, description = "Newest first", body = [AnnouncementDto])),
    tags = ["student"],
    operation_id = "studentAnnouncements"
)]
#[get("/announcements")]
pub async fn student_announcements(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<Vec<AnnouncementDto>>> {
    let announcements = state.portal.student_announcements(&principal).await?;
    Ok(web::Json(announcements.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/student/meal-plans",
    responses((status = 200, description = "The week, Monday first", body = [MealPlanDto])),
    tags = ["student"],
    operation_id = "studentMealPlans"
)]
#[get("/meal-plans")]
pub async fn student_meal_plans(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
) -> ApiResult<web::Json<Vec<MealPlanDto>>> {
    let plans = state.portal.student_meal_plans(&principal).await?;
    Ok(web::Json(plans.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{TestBackend, admin_login, login, send, test_app};

    fn enrol(name: &str, email: &str, room: &Value) -> Value {
        json!({
            "fullName": name,
            "email": email,
            "phone": "+44 20 7946 0000",
            "guardianName": "Guardian",
            "guardianPhone": "+44 20 7946 0001",
            "enrolledOn": "2026-02-01",
            "password": "initial-pass",
            "roomId": room["id"]
        })
    }

    #[actix_web::test]
    async fn dashboard_counts_rooms_and_beds() {
        let backend = TestBackend::on("2026-03-01");
        backend.hostel("HB-1", 10).await;
        let app = actix_test::init_service(test_app(backend.state())).await;
        let admin = login(&app, admin_login("HB-1")).await;
        let add_room = |number: &str, capacity: u32| {
            actix_test::TestRequest::post().uri("/admin/rooms").set_json(json!({
                "roomNumber": number,
                "capacity": capacity,
                "roomType": "dormitory"
            }))
        };
        let (_, single) = send(&app, &admin, add_room("S-1", 1)).await;
        send(&app, &admin, add_room("D-1", 4)).await;
        send(
            &app,
            &admin,
            actix_test::TestRequest::post()
                .uri("/admin/students")
                .set_json(enrol("Ada Obi", "ada@students.example", &single)),
        )
        .await;

        let (status, dashboard) = send(&app, &admin, actix_test::TestRequest::get().uri("/admin")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dashboard["hostel"]["hostelNumber"], "HB-1");
        assert_eq!(dashboard["rooms"], 2);
        assert_eq!(dashboard["students"], 1);
        assert_eq!(dashboard["guests"], 0);
        assert_eq!(
            dashboard["occupancy"],
            json!({
                "available": 1,
                "partiallyOccupied": 0,
                "occupied": 1,
                "occupiedBeds": 1,
                "totalBeds": 5
            })
        );

        let (_, hostel) = send(&app, &admin, actix_test::TestRequest::get().uri("/admin/hostel")).await;
        assert_eq!(hostel["contactEmail"], "desk@harbour.example");
    }

    #[actix_web::test]
    async fn students_see_their_room_and_student_announcements() {
        let backend = TestBackend::on("2026-03-01");
        backend.hostel("HB-1", 10).await;
        let app = actix_test::init_service(test_app(backend.state())).await;
        let admin = login(&app, admin_login("HB-1")).await;
        let (_, room) = send(
            &app,
            &admin,
            actix_test::TestRequest::post().uri("/admin/rooms").set_json(json!({
                "roomNumber": "A-101",
                "capacity": 3,
                "roomType": "dormitory"
            })),
        )
        .await;
        for (name, email) in [("Ada Obi", "ada@students.example"), ("Ben Ade", "ben@students.example")] {
            send(
                &app,
                &admin,
                actix_test::TestRequest::post()
                    .uri("/admin/students")
                    .set_json(enrol(name, email, &room)),
            )
            .await;
        }
        for (title, audience) in [("Fire drill", "everyone"), ("Staff rota", "staff"), ("Exams", "students")] {
            send(
                &app,
                &admin,
                actix_test::TestRequest::post().uri("/admin/announcements").set_json(json!({
                    "title": title,
                    "body": "Details at the desk",
                    "audience": audience
                })),
            )
            .await;
        }
        send(
            &app,
            &admin,
            actix_test::TestRequest::put()
                .uri("/admin/meal-plans/monday")
                .set_json(json!({ "breakfast": "Porridge", "lunch": "Rice", "dinner": "Stew" })),
        )
        .await;

        let student = login(
            &app,
            json!({
                "email": "ada@students.example",
                "password": "initial-pass",
                "role": "student",
                "hostelNumber": "HB-1"
            }),
        )
        .await;

        let (status, profile) = send(&app, &student, actix_test::TestRequest::get().uri("/student")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["student"]["fullName"], "Ada Obi");
        assert_eq!(profile["room"]["roomNumber"], "A-101");
        assert_eq!(profile["room"]["status"], "partially_occupied");
        assert_eq!(profile["room"]["occupants"].as_array().map(Vec::len), Some(2));

        let (_, announcements) = send(
            &app,
            &student,
            actix_test::TestRequest::get().uri("/student/announcements"),
        )
        .await;
        let titles: Vec<&str> = announcements
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|a| a["title"].as_str())
            .collect();
        assert_eq!(titles.len(), 2);
        assert!(!titles.contains(&"Staff rota"));

        let (_, plans) =
            send(&app, &student, actix_test::TestRequest::get().uri("/student/meal-plans")).await;
        assert_eq!(plans[0]["weekday"], "monday");

        let (status, _) = send(&app, &student, actix_test::TestRequest::get().uri("/admin")).await;
        assert_eq!(status, StatusCode::FOUND);
    }
}
