//! Row-store errors.

use pulse_shared::AppError;
use thiserror::Error;

/// Errors raised while loading department rows.
///
/// Cloneable so a single failed load can be handed to every caller waiting
/// on the same cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataStoreError {
    /// Department slug or table name not recognised.
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// Backend could not be reached or refused the request.
    #[error("Row store unavailable for {table}: {message}")]
    Unavailable {
        /// Table being read.
        table: String,
        /// Transport or status detail.
        message: String,
    },

    /// Backend answered with rows that do not parse.
    #[error("Malformed rows in {table}: {message}")]
    Decode {
        /// Table being read.
        table: String,
        /// Parser detail.
        message: String,
    },
}

impl From<DataStoreError> for AppError {
    fn from(err: DataStoreError) -> Self {
        match err {
            DataStoreError::UnknownDepartment(_) => Self::NotFound(err.to_string()),
            DataStoreError::Unavailable { .. } | DataStoreError::Decode { .. } => {
                Self::ExternalService(err.to_string())
            }
        }
    }
}
