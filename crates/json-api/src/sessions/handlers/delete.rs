//! Sign Out Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{extensions::*, sessions::errors::into_status_error, state::State};

/// Sign Out Handler
///
/// Revokes the session used to make this request.
#[endpoint(
    tags("sessions"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.admin_session_or_401()?;

    let revoked = state
        .app
        .auth
        .sign_out(session.uuid)
        .await
        .map_err(into_status_error)?;

    if !revoked {
        info!(session = %session.uuid, "session already revoked");
    }

    Ok(StatusCode::NO_CONTENT)
}
