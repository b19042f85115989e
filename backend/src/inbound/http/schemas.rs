//! OpenAPI schemas for domain types that stay free of `utoipa`.
//!
//! Each wrapper mirrors the wire form of its domain type and registers under
//! the domain type's name via `#[schema(as = ...)]`.

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Failed action outcome returned with every non-2xx JSON response.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "only read by utoipa schema generation")]
pub struct ErrorSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    #[schema(example = "room number already exists")]
    message: String,
    /// Request correlation id, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "roomNumber", "code": "duplicate"}`.
    details: Option<serde_json::Value>,
}

/// Derived occupancy state of a room.
#[derive(ToSchema)]
#[schema(as = crate::domain::RoomStatus)]
pub enum RoomStatusSchema {
    #[schema(rename = "available")]
    Available,
    #[schema(rename = "partially_occupied")]
    PartiallyOccupied,
    #[schema(rename = "occupied")]
    Occupied,
}

/// Account role.
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    #[schema(rename = "super_admin")]
    SuperAdmin,
    #[schema(rename = "admin")]
    Admin,
    #[schema(rename = "student")]
    Student,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises")
    }

    #[rstest]
    fn error_codes_cover_every_domain_code() {
        let json = schema_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    fn error_schema_uses_wire_names() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let json = schema_json::<ErrorSchema>();
        assert!(json.contains("traceId"));
        assert!(json.contains("success"));
    }

    #[rstest]
    fn room_status_lists_derived_states() {
        let json = schema_json::<RoomStatusSchema>();
        assert!(json.contains("partially_occupied"));
    }
}
