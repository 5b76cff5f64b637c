//! Delete Package Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, packages::errors::into_status_error, state::State};

/// Package Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PackageDeletedResponse {
    pub success: bool,
    pub message: String,
}

/// Delete Package Handler
///
/// Removes a package and its timeline. Unknown tracking IDs are not an error.
#[endpoint(
    tags("packages"),
    summary = "Delete Package",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Package deleted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    tracking_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PackageDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_session_or_401()?;

    // Malformed IDs name no stored package, so there is nothing to delete.
    if let Ok(tracking_id) = tracking_id.into_tracking_id() {
        state
            .app
            .packages
            .delete_package(tracking_id)
            .await
            .map_err(into_status_error)?;
    }

    Ok(Json(PackageDeletedResponse {
        success: true,
        message: "Package deleted successfully".to_string(),
    }))
}
