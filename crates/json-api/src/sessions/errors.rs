//! Session Errors

use parceltrack_app::auth::AuthServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or access key")
        }
        AuthServiceError::Unauthorized => {
            StatusError::unauthorized().brief("Invalid or expired session")
        }
        AuthServiceError::AlreadyExists => StatusError::conflict().brief("Admin already exists"),
        AuthServiceError::Sql(source) => {
            error!("admin session storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
    }
}
