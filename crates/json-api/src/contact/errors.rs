//! Contact Errors

use parceltrack_app::domain::contact::ContactServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: ContactServiceError) -> StatusError {
    match error {
        ContactServiceError::MissingRequired(_) | ContactServiceError::InvalidData => {
            StatusError::bad_request().brief("Name, email, and message are required")
        }
        ContactServiceError::Sql(source) => {
            error!("contact message storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
