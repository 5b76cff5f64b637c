//! Update Package Location Handler

use std::sync::Arc;

use parceltrack_app::domain::packages::{data::StatusUpdate, transitions};
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*, notifications::EmailStatusResponse, observability::record_dispatch,
    packages::errors::into_status_error, state::State,
};

/// Update Location Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateLocationRequest {
    /// New status label, e.g. `"In Transit"`
    #[serde(default)]
    pub status: String,

    pub location: Option<String>,

    pub description: Option<String>,
}

impl From<UpdateLocationRequest> for StatusUpdate {
    fn from(request: UpdateLocationRequest) -> Self {
        StatusUpdate {
            status: request.status,
            location: request.location,
            description: request.description,
        }
    }
}

/// Location Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LocationUpdatedResponse {
    pub success: bool,

    pub message: String,

    /// Stored, lower-cased status
    pub status: String,

    /// Which notification set was sent: `first_processing` or `routine_update`
    pub notification: String,

    pub email_status: EmailStatusResponse,
}

/// Update Package Location Handler
///
/// Appends a timeline event, moves the package to the new status, and emails
/// the parties the transition calls for.
#[endpoint(
    tags("packages"),
    summary = "Update Package Location",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Location updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Status is required"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "Package not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    tracking_id: PathParam<String>,
    json: JsonBody<UpdateLocationRequest>,
    depot: &mut Depot,
) -> Result<Json<LocationUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_session_or_401()?;

    let update = StatusUpdate::from(json.into_inner());

    transitions::canonicalise(&update.status)
        .map_err(|invalid| into_status_error(invalid.into()))?;

    let outcome = state
        .app
        .packages
        .update_status(tracking_id.into_tracking_id()?, update)
        .await
        .map_err(into_status_error)?;

    record_dispatch(&outcome.notifications);

    Ok(Json(LocationUpdatedResponse {
        success: true,
        message: "Package location updated successfully".to_string(),
        status: outcome.transition.canonical_status,
        notification: outcome.transition.class.as_str().to_string(),
        email_status: EmailStatusResponse::from_report(
            &outcome.notifications,
            "Status update notifications sent successfully",
        ),
    }))
}

#[cfg(test)]
mod tests {
    use parceltrack_app::{
        domain::packages::{
            MockPackagesService, PackagesServiceError, TrackingId, TrackingIdError,
            data::StatusUpdateOutcome,
            transitions::{NotificationClass, Transition},
        },
        notifications::DispatchReport,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        notifications::tests::failed_report,
        test_helpers::{TEST_TRACKING_ID, make_event, make_package, packages_service},
    };

    use super::*;

    fn make_service(packages: MockPackagesService) -> Service {
        packages_service(
            packages,
            Router::with_path("api/packages/{tracking_id}/location").put(handler),
        )
    }

    fn outcome(
        status: &str,
        class: NotificationClass,
        notifications: DispatchReport,
    ) -> Result<StatusUpdateOutcome, TrackingIdError> {
        let mut package = make_package(TEST_TRACKING_ID.parse()?);
        package.status = status.to_lowercase();
        let event = make_event(&package, 2, status, "Lagos Hub");

        Ok(StatusUpdateOutcome {
            package,
            event,
            transition: Transition {
                canonical_status: status.to_lowercase(),
                first_processing: class == NotificationClass::FirstProcessing,
                class,
            },
            notifications,
        })
    }

    #[tokio::test]
    async fn test_first_processing_update() -> TestResult {
        let expected: TrackingId = TEST_TRACKING_ID.parse()?;
        let outcome = outcome(
            "Processing",
            NotificationClass::FirstProcessing,
            DispatchReport::default(),
        )?;

        let mut packages = MockPackagesService::new();

        packages
            .expect_update_status()
            .once()
            .withf(move |tracking_id, update| {
                *tracking_id == expected
                    && *update
                        == StatusUpdate {
                            status: "Processing".to_string(),
                            location: Some("Lagos Hub".to_string()),
                            description: None,
                        }
            })
            .return_once(move |_, _| Ok(outcome));

        let mut res = TestClient::put("http://example.com/api/packages/ESP-0123456789/location")
            .json(&json!({ "status": "Processing", "location": "Lagos Hub" }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: LocationUpdatedResponse = res.take_json().await?;

        assert!(body.success, "update must report success");
        assert_eq!(body.message, "Package location updated successfully");
        assert_eq!(body.status, "processing");
        assert_eq!(body.notification, "first_processing");
        assert_eq!(
            body.email_status.message.as_deref(),
            Some("Status update notifications sent successfully")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_email_failure_is_soft() -> TestResult {
        let outcome = outcome(
            "In Transit",
            NotificationClass::RoutineUpdate,
            failed_report("rate limited"),
        )?;

        let mut packages = MockPackagesService::new();

        packages
            .expect_update_status()
            .once()
            .return_once(move |_, _| Ok(outcome));

        let mut res = TestClient::put("http://example.com/api/packages/ESP-0123456789/location")
            .json(&json!({ "status": "In Transit" }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: LocationUpdatedResponse = res.take_json().await?;

        assert_eq!(body.notification, "routine_update");
        assert!(!body.email_status.success, "failure must be reported");
        assert_eq!(body.email_status.error.as_deref(), Some("rate limited"));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_status_returns_400() -> TestResult {
        let mut packages = MockPackagesService::new();

        packages.expect_update_status().never();

        let res = TestClient::put("http://example.com/api/packages/ESP-0123456789/location")
            .json(&json!({ "status": "  " }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_status_is_checked_before_tracking_id() -> TestResult {
        let mut packages = MockPackagesService::new();

        packages.expect_update_status().never();

        let res = TestClient::put("http://example.com/api/packages/not-a-package/location")
            .json(&json!({ "status": "" }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_status_field_returns_400() -> TestResult {
        let mut packages = MockPackagesService::new();

        packages.expect_update_status().never();

        let res = TestClient::put("http://example.com/api/packages/ESP-0123456789/location")
            .json(&json!({ "location": "Lagos Hub" }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_package_returns_404() -> TestResult {
        let mut packages = MockPackagesService::new();

        packages
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(PackagesServiceError::NotFound));

        let res = TestClient::put("http://example.com/api/packages/ESP-0000000000/location")
            .json(&json!({ "status": "Delivered" }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_tracking_id_returns_404() -> TestResult {
        let mut packages = MockPackagesService::new();

        packages.expect_update_status().never();

        let res = TestClient::put("http://example.com/api/packages/not-a-package/location")
            .json(&json!({ "status": "Delivered" }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
