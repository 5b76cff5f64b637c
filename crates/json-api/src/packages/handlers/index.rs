//! Package Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    packages::{errors::into_status_error, models::PackageResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PackagesResponse {
    /// All packages, newest first
    pub packages: Vec<PackageResponse>,
}

/// Package Index Handler
///
/// Returns every package, newest first.
#[endpoint(
    tags("packages"),
    summary = "List Packages",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PackagesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_session_or_401()?;

    let packages = state
        .app
        .packages
        .list_packages()
        .await
        .map_err(into_status_error)?;

    Ok(Json(PackagesResponse {
        packages: packages.into_iter().map(Into::into).collect(),
    }))
}
