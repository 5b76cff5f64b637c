//! Package Errors

use parceltrack_app::domain::packages::{PackagesServiceError, ValidationError};
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: PackagesServiceError) -> StatusError {
    match error {
        PackagesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Tracking ID already in use, please retry")
        }
        PackagesServiceError::NotFound => StatusError::not_found().brief("Package not found"),
        PackagesServiceError::Validation(ValidationError::MissingRequired(_)) => {
            StatusError::bad_request()
                .brief("Receiver name, receiver email, origin, and destination are required")
        }
        PackagesServiceError::Validation(ValidationError::EmptyStatus) => {
            StatusError::bad_request().brief("Status is required")
        }
        PackagesServiceError::Validation(invalid @ ValidationError::OutOfRange(_)) => {
            StatusError::bad_request().brief(invalid.to_string())
        }
        PackagesServiceError::MissingRequiredData | PackagesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid package payload")
        }
        PackagesServiceError::Sql(source) => {
            error!("package storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
