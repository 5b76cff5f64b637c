//! Package Stats Handler

use std::sync::Arc;

use parceltrack_app::domain::packages::status::StatusSummary;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, packages::errors::into_status_error, state::State};

/// Package counts per status stage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageStatsResponse {
    pub total: u64,
    pub pending: u64,
    pub in_transit: u64,
    pub delivered: u64,
    pub exception: u64,

    /// Packages whose status label matches no known stage
    pub unrecognized: u64,
}

impl From<StatusSummary> for PackageStatsResponse {
    fn from(summary: StatusSummary) -> Self {
        PackageStatsResponse {
            total: summary.total,
            pending: summary.pending,
            in_transit: summary.in_transit,
            delivered: summary.delivered,
            exception: summary.exception,
            unrecognized: summary.unrecognized,
        }
    }
}

/// Package Stats Handler
#[endpoint(
    tags("packages"),
    summary = "Package Stats",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PackageStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_session_or_401()?;

    let summary = state
        .app
        .packages
        .package_stats()
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use parceltrack_app::domain::packages::MockPackagesService;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::test_helpers::packages_service;

    use super::*;

    #[tokio::test]
    async fn test_stats_are_camel_cased() -> TestResult {
        let mut packages = MockPackagesService::new();

        packages.expect_package_stats().once().return_once(|| {
            Ok(StatusSummary {
                total: 5,
                pending: 1,
                in_transit: 2,
                delivered: 1,
                exception: 1,
                unrecognized: 0,
            })
        });

        let mut res = TestClient::get("http://example.com/api/packages/stats")
            .send(&packages_service(
                packages,
                Router::with_path("api/packages/stats").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Value = res.take_json().await?;

        assert_eq!(body.get("total"), Some(&json!(5)));
        assert_eq!(body.get("inTransit"), Some(&json!(2)));
        assert_eq!(body.get("in_transit"), None);
        assert_eq!(body.get("unrecognized"), Some(&json!(0)));

        Ok(())
    }
}
