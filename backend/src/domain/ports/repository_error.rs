//! Error shared by the hostel repository ports.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection => "repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query => "repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict => "{message}",
    }
}

impl From<RepositoryError> for Error {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Connection { message } => {
                Error::service_unavailable(format!("repository unavailable: {message}"))
            }
            RepositoryError::Query { message } => {
                Error::internal(format!("repository error: {message}"))
            }
            RepositoryError::Conflict { message } => Error::conflict(message),
        }
    }
}
