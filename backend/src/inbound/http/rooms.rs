//! Admin room management and the occupancy listing.
//!
//! ```text
//! GET  /admin/rooms?page=1&pageSize=10&search=a-1
//! POST /admin/rooms {"roomNumber":"A-101","capacity":2,"floor":1,"roomType":"double","price":40000}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::dto::{ActionOutcome, RoomDto, RoomPage};
use super::schemas::ErrorSchema;
use super::state::HttpState;
use super::validation::{FieldName, ListParams, parse_id};
use crate::domain::{Principal, RoomDraft, RoomId, RoomListQuery};

/// Capacity as submitted: forms send text, API clients send numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CapacityInput {
    Number(u32),
    Text(String),
}

impl From<CapacityInput> for String {
    fn from(value: CapacityInput) -> Self {
        match value {
            CapacityInput::Number(n) => n.to_string(),
            CapacityInput::Text(text) => text,
        }
    }
}

/// Body of `POST /admin/rooms` and `PUT /admin/rooms/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    #[schema(example = "A-101")]
    pub room_number: String,
    /// Beds in the room, 1 to 64.
    #[schema(example = 2)]
    pub capacity: CapacityInput,
    #[serde(default)]
    pub floor: i32,
    /// `single`, `double`, `dormitory` or `suite`.
    #[schema(example = "double")]
    pub room_type: String,
    /// Monthly price in minor currency units.
    #[serde(default)]
    #[schema(example = 40000)]
    pub price: i64,
}

impl From<RoomRequest> for RoomDraft {
    fn from(value: RoomRequest) -> Self {
        Self {
            room_number: value.room_number,
            capacity: value.capacity.into(),
            floor: value.floor,
            room_type: value.room_type,
            price: value.price,
        }
    }
}

fn room_id(raw: &str) -> ApiResult<RoomId> {
    parse_id(raw, FieldName::new("id"))
}

/// List rooms with derived status and their current occupants.
#[utoipa::path(
    get,
    path = "/admin/rooms",
    params(ListParams),
    responses(
        (status = 200, description = "Rooms ordered by number", body = RoomPage),
        (status = 400, description = "Invalid paging", body = ErrorSchema),
        (status = 302, description = "Not an admin session")
    ),
    tags = ["rooms"],
    operation_id = "listRooms"
)]
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<RoomPage>> {
    let query = RoomListQuery {
        search: params.search_term(),
        page: params.page_request()?,
    };
    let page = state.rooms.list_rooms(principal.hostel()?, &query).await?;
    Ok(web::Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/admin/rooms",
    request_body = RoomRequest,
    responses(
        (status = 201, description = "Room created", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Duplicate number or room limit reached", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "createRoom"
)]
#[post("/rooms")]
pub async fn create_room(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    payload: web::Json<RoomRequest>,
) -> ApiResult<HttpResponse> {
    let room = state
        .rooms
        .create_room(principal.hostel()?, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ActionOutcome::created(room.id, "room created")))
}

#[utoipa::path(
    get,
    path = "/admin/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room with occupants", body = RoomDto),
        (status = 404, description = "Unknown room", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "getRoom"
)]
#[get("/rooms/{id}")]
pub async fn get_room(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RoomDto>> {
    let room = state
        .rooms
        .get_room(principal.hostel()?, room_id(&path)?)
        .await?;
    Ok(web::Json(room.into()))
}

#[utoipa::path(
    put,
    path = "/admin/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room updated", body = ActionOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown room", body = ErrorSchema),
        (status = 409, description = "Duplicate number or capacity below occupancy", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "updateRoom"
)]
#[put("/rooms/{id}")]
pub async fn update_room(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
    payload: web::Json<RoomRequest>,
) -> ApiResult<web::Json<ActionOutcome>> {
    state
        .rooms
        .update_room(
            principal.hostel()?,
            room_id(&path)?,
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(ActionOutcome::ok("room updated")))
}

#[utoipa::path(
    delete,
    path = "/admin/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room deleted", body = ActionOutcome),
        (status = 404, description = "Unknown room", body = ErrorSchema),
        (status = 409, description = "Room still occupied", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "deleteRoom"
)]
#[delete("/rooms/{id}")]
pub async fn delete_room(
    state: web::Data<HttpState>,
    principal: web::ReqData<Principal>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActionOutcome>> {
    state
        .rooms
        .delete_room(principal.hostel()?, room_id(&path)?)
        .await?;
    Ok(web::Json(ActionOutcome::ok("room deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{TestBackend, admin_login, login, send, test_app};

    fn room(number: &str, capacity: Value) -> Value {
        json!({
            "roomNumber": number,
            "capacity": capacity,
            "floor": 1,
            "roomType": "double",
            "price": 40000
        })
    }

    #[rstest]
    #[case(json!(2))]
    #[case(json!("2"))]
    #[case(json!(" 2 "))]
    fn capacity_accepts_numbers_and_text(#[case] raw: Value) {
        let input: CapacityInput = serde_json::from_value(raw).expect("capacity");
        let draft = RoomDraft::from(RoomRequest {
            room_number: "A-1".into(),
            capacity: input,
            floor: 0,
            room_type: "single".into(),
            price: 0,
        });
        assert_eq!(draft.capacity.trim(), "2");
    }

    #[actix_web::test]
    async fn new_rooms_start_available() {
        let backend = TestBackend::on("2026-03-01");
        backend.hostel("HB-1", 10).await;
        let app = actix_test::init_service(test_app(backend.state())).await;
        let admin = login(&app, admin_login("HB-1")).await;

        let (status, created) = send(
            &app,
            &admin,
            actix_test::TestRequest::post().uri("/admin/rooms").set_json(room("A-101", json!("3"))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, page) =
            send(&app, &admin, actix_test::TestRequest::get().uri("/admin/rooms")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalItems"], 1);
        let first = &page["items"][0];
        assert_eq!(first["id"], created["id"]);
        assert_eq!(first["status"], "available");
        assert_eq!(first["capacity"], 3);
        assert_eq!(first["freeBeds"], 3);
        assert_eq!(first["occupants"], json!([]));
    }

    #[rstest]
    #[case(json!("two"), "capacity")]
    #[case(json!(0), "capacity")]
    #[case(json!(65), "capacity")]
    #[actix_web::test]
    async fn invalid_capacity_is_rejected(#[case] capacity: Value, #[case] field: &str) {
        let backend = TestBackend::on("2026-03-01");
        backend.hostel("HB-1", 10).await;
        let app = actix_test::init_service(test_app(backend.state())).await;
        let admin = login(&app, admin_login("HB-1")).await;
        let (status, body) = send(
            &app,
            &admin,
            actix_test::TestRequest::post().uri("/admin/rooms").set_json(room("A-101", capacity)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn room_numbers_are_unique_ignoring_case() {
        let backend = TestBackend::on("2026-03-01");
        backend.hostel("HB-1", 10).await;
        let app = actix_test::init_service(test_app(backend.state())).await;
        let admin = login(&app, admin_login("HB-1")).await;
        let post = |number: &str| {
            actix_test::TestRequest::post().uri("/admin/rooms").set_json(room(number, json!(2)))
        };
        let (status, _) = send(&app, &admin, post("A-101")).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = send(&app, &admin, post("a-101")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");
    }

    #[actix_web::test]
    async fn room_limit_is_enforced() {
        let backend = TestBackend::on("2026-03-01");
        backend.hostel("HB-1", 1).await;
        let app = actix_test::init_service(test_app(backend.state())).await;
        let admin = login(&app, admin_login("HB-1")).await;
        let post = |number: &str| {
            actix_test::TestRequest::post().uri("/admin/rooms").set_json(room(number, json!(2)))
        };
        send(&app, &admin, post("A-101")).await;
        let (status, _) = send(&app, &admin, post("A-102")).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn rooms_of_other_hostels_are_invisible() {
        let backend = TestBackend::on("2026-03-01");
        backend.hostel("HB-1", 10).await;
        backend.hostel("QY-2", 10).await;
        let app = actix_test::init_service(test_app(backend.state())).await;
        let owner = login(&app, admin_login("HB-1")).await;
        let other = login(&app, admin_login("QY-2")).await;

        let (_, created) = send(
            &app,
            &owner,
            actix_test::TestRequest::post().uri("/admin/rooms").set_json(room("A-101", json!(2))),
        )
        .await;
        let uri = format!("/admin/rooms/{}", created["id"].as_str().expect("id"));

        let (status, _) = send(&app, &other, actix_test::TestRequest::get().uri(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, &other, actix_test::TestRequest::delete().uri(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, page) = send(&app, &other, actix_test::TestRequest::get().uri("/admin/rooms")).await;
        assert_eq!(page["totalItems"], 0);
    }

    #[actix_web::test]
    async fn update_and_delete_an_empty_room() {
        let backend = TestBackend::on("2026-03-01");
        backend.hostel("HB-1", 10).await;
        let app = actix_test::init_service(test_app(backend.state())).await;
        let admin = login(&app, admin_login("HB-1")).await;
        let (_, created) = send(
            &app,
            &admin,
            actix_test::TestRequest::post().uri("/admin/rooms").set_json(room("A-101", json!(2))),
        )
        .await;
        let uri = format!("/admin/rooms/{}", created["id"].as_str().expect("id"));

        let (status, _) = send(
            &app,
            &admin,
            actix_test::TestRequest::put().uri(&uri).set_json(room("B-201", json!(4))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (_, fetched) = send(&app, &admin, actix_test::TestRequest::get().uri(&uri)).await;
        assert_eq!(fetched["roomNumber"], "B-201");
        assert_eq!(fetched["capacity"], 4);

        let (status, _) = send(&app, &admin, actix_test::TestRequest::delete().uri(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, &admin, actix_test::TestRequest::get().uri(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case("/admin/rooms?page=0")]
    #[case("/admin/rooms?pageSize=0")]
    #[case("/admin/rooms?page=abc")]
    #[actix_web::test]
    async fn bad_paging_is_an_invalid_request(#[case] uri: &str) {
        let backend = TestBackend::on("2026-03-01");
        backend.hostel("HB-1", 10).await;
        let app = actix_test::init_service(test_app(backend.state())).await;
        let admin = login(&app, admin_login("HB-1")).await;
        let (status, body) = send(&app, &admin, actix_test::TestRequest::get().uri(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }
}
