//! Shared helpers and macros for Diesel repository implementations.
//!
//! - Error mapping from pool and Diesel errors to [`RepositoryError`]
//! - Conversions between page coordinates or counts and SQL integers
//! - Declarative macros for the common "load rows and convert" shape

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pagination::PageRequest;
use tracing::{debug, warn};

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

diesel::define_sql_function! {
    /// SQL `lower(text)`, used for case-insensitive room numbers.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Map pool errors to repository connection errors.
pub fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message }
        | PoolError::Build { message }
        | PoolError::Migration { message } => RepositoryError::connection(message),
    }
}

/// Conflict message for a violated unique constraint.
fn unique_violation_message(constraint_name: Option<&str>) -> &'static str {
    match constraint_name {
        Some("hostels_hostel_number_key") => "hostel number already in use",
        Some("accounts_email_key") => "email already in use",
        Some("rooms_hostel_number_key") => "room number already exists",
        other => {
            warn!(constraint_name = ?other, "unrecognised unique constraint violation");
            "record already exists"
        }
    }
}

/// Map Diesel errors to repository errors.
///
/// Unique violations become conflicts so services can surface them as 409s.
pub fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                RepositoryError::conflict(unique_violation_message(info.constraint_name()))
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                RepositoryError::query("referenced record does not exist")
            }
            DatabaseErrorKind::ClosedConnection => {
                RepositoryError::connection("database connection error")
            }
            _ => RepositoryError::query("database error"),
        },
        _ => RepositoryError::query("database error"),
    }
}

/// SQL `OFFSET` and `LIMIT` for a page request.
pub fn page_bounds(page: &PageRequest) -> (i64, i64) {
    (
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
        i64::try_from(page.limit()).unwrap_or(i64::MAX),
    )
}

/// `COUNT(*)` results are never negative.
pub fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

/// Treat an `UPDATE` that touched no rows as a missing record.
pub fn ensure_updated(updated: usize, entity: &str) -> Result<(), RepositoryError> {
    if updated == 0 {
        return Err(RepositoryError::query(format!(
            "{entity} not found for update"
        )));
    }
    Ok(())
}

/// Convert every row, stopping at the first malformed one.
pub fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, RepositoryError>
where
    T: TryFrom<R, Error = RepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Load at most one row and convert it to a domain value.
///
/// The domain type must implement `TryFrom<$row_type, Error = RepositoryError>`.
#[macro_export]
macro_rules! query_optional {
    (
        $self:ident,
        $table:expr,
        $filter:expr,
        $row_type:ty
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::{map_diesel_error, map_pool_error};

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(TryInto::try_into).transpose()
    }};
}

/// Load every matching row in order and convert them to domain values.
#[macro_export]
macro_rules! query_vec {
    (
        $self:ident,
        $table:expr,
        $filter:expr,
        $order_by:expr,
        $row_type:ty
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::{
            convert_rows, map_diesel_error, map_pool_error,
        };

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .order_by($order_by)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows)
    }};
}

/// Delete matching rows and report whether any existed.
#[macro_export]
macro_rules! delete_where {
    ($self:ident, $table:expr, $filter:expr) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::{map_diesel_error, map_pool_error};

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete($table.filter($filter))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("hostels_hostel_number_key"), "hostel number already in use")]
    #[case(Some("accounts_email_key"), "email already in use")]
    #[case(Some("rooms_hostel_number_key"), "room number already exists")]
    #[case(None, "record already exists")]
    fn unique_constraints_have_readable_messages(
        #[case] constraint: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(unique_violation_message(constraint), expected);
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, RepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound),
            RepositoryError::query("record not found")
        );
    }

    #[rstest]
    fn zero_row_updates_are_missing_records() {
        assert_eq!(
            ensure_updated(0, "room"),
            Err(RepositoryError::query("room not found for update"))
        );
        assert_eq!(ensure_updated(1, "room"), Ok(()));
    }

    #[rstest]
    fn page_bounds_follow_the_request() {
        let page = PageRequest::new(3, 25).expect("page");
        assert_eq!(page_bounds(&page), (50, 25));
    }
}
