//! Packages service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackagesServiceError {
    #[error("package already exists")]
    AlreadyExists,

    #[error("package not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

/// Rejections raised before anything touches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingRequired(&'static str),

    #[error("status must not be empty")]
    EmptyStatus,

    #[error("{0} is out of range")]
    OutOfRange(&'static str),
}

impl From<Error> for PackagesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(
            matches!(
                PackagesServiceError::from(Error::RowNotFound),
                PackagesServiceError::NotFound
            ),
            "missing rows are reported as not found"
        );
    }

    #[test]
    fn pool_errors_stay_storage_errors() {
        assert!(
            matches!(
                PackagesServiceError::from(Error::PoolTimedOut),
                PackagesServiceError::Sql(_)
            ),
            "non-database errors are storage errors"
        );
    }

    #[test]
    fn validation_errors_name_the_missing_field() {
        let error = PackagesServiceError::from(ValidationError::MissingRequired("origin"));

        assert_eq!(error.to_string(), "missing required field: origin");
    }
}
