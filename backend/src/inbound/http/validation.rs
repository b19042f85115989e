//! Request parsing helpers shared by the HTTP handlers.

use pagination::{PageRequest, PageRequestError};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::domain::{Error, SearchTerm};

/// Wire name of a request field, used in error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let FieldName(field) = field;
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

/// Parse a path or body identifier into its typed form.
pub(crate) fn parse_id<T: From<Uuid>>(raw: &str, field: FieldName) -> Result<T, Error> {
    Uuid::parse_str(raw.trim())
        .map(T::from)
        .map_err(|_| invalid_uuid_error(field, raw))
}

/// `?page&pageSize&search` query of the paginated listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Items per page; defaults to 10, capped at 100.
    pub page_size: Option<u32>,
    /// Case-insensitive substring filter.
    pub search: Option<String>,
}

impl ListParams {
    pub(crate) fn page_request(&self) -> Result<PageRequest, Error> {
        PageRequest::from_params(self.page, self.page_size).map_err(page_error)
    }

    pub(crate) fn search_term(&self) -> SearchTerm {
        SearchTerm::new(self.search.as_deref())
    }
}

/// `?page&pageSize` query of listings without search.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageParams {
    pub(crate) fn page_request(&self) -> Result<PageRequest, Error> {
        PageRequest::from_params(self.page, self.page_size).map_err(page_error)
    }
}

fn page_error(error: PageRequestError) -> Error {
    let field = match error {
        PageRequestError::ZeroPage => "page",
        PageRequestError::ZeroPageSize => "pageSize",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "out_of_range",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, RoomId};
    use rstest::rstest;

    #[rstest]
    fn parses_typed_ids() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id: RoomId = parse_id(raw, FieldName::new("id")).expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn rejects_malformed_ids_with_details() {
        let err = parse_id::<RoomId>("room-1", FieldName::new("roomId")).expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "roomId");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    #[case(Some(0), None, "page")]
    #[case(None, Some(0), "pageSize")]
    fn rejects_zero_paging(
        #[case] page: Option<u32>,
        #[case] page_size: Option<u32>,
        #[case] field: &str,
    ) {
        let params = ListParams {
            page,
            page_size,
            search: None,
        };
        let err = params.page_request().expect_err("zero is rejected");
        assert_eq!(err.details().expect("details")["field"], field);
    }

    #[rstest]
    fn defaults_to_first_page() {
        let request = ListParams::default().page_request().expect("defaults");
        assert_eq!(request, PageRequest::first());
    }
}
