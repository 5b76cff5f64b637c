//! Create Package Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    extensions::*,
    notifications::EmailStatusResponse,
    observability::record_dispatch,
    packages::{errors::into_status_error, models::CreatePackageRequest},
    state::State,
};

/// Package Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageCreatedResponse {
    pub success: bool,

    /// Public tracking ID, e.g. `ESP-0123456789`
    pub tracking_id: String,

    pub message: String,

    pub email_status: EmailStatusResponse,
}

/// Create Package Handler
///
/// Registers a package with a fresh tracking ID and emails the sender and
/// receiver.
#[endpoint(
    tags("packages"),
    summary = "Create Package",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Package created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::CONFLICT, description = "Tracking ID collision"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePackageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PackageCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_session_or_401()?;

    debug!(admin = %admin.admin_uuid, "creating package");

    let created = state
        .app
        .packages
        .create_package(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_dispatch(&created.notifications);

    let tracking_id = created.package.tracking_id;

    res.add_header(LOCATION, format!("/api/tracking/{tracking_id}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(PackageCreatedResponse {
        success: true,
        tracking_id: tracking_id.into_string(),
        message: "Package created successfully".to_string(),
        email_status: EmailStatusResponse::from_report(
            &created.notifications,
            "Email notifications sent successfully",
        ),
    }))
}

#[cfg(test)]
mod tests {
    use parceltrack_app::{
        domain::packages::{
            MockPackagesService, PackagesServiceError, TrackingId, ValidationError,
            data::CreatedPackage,
        },
        notifications::DispatchReport,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        notifications::tests::failed_report,
        test_helpers::{
            TEST_TRACKING_ID, make_event, make_package, packages_service,
            public_packages_service,
        },
    };

    use super::*;

    fn make_service(packages: MockPackagesService) -> Service {
        packages_service(packages, Router::with_path("api/packages").post(handler))
    }

    fn created(notifications: DispatchReport) -> Result<CreatedPackage, PackagesServiceError> {
        let tracking_id: TrackingId = TEST_TRACKING_ID
            .parse()
            .map_err(|_invalid| PackagesServiceError::InvalidData)?;
        let package = make_package(tracking_id);
        let initial_event = make_event(&package, 1, "Package Created", "Lagos");

        Ok(CreatedPackage {
            package,
            initial_event,
            notifications,
        })
    }

    #[tokio::test]
    async fn test_create_package_success() -> TestResult {
        let created = created(DispatchReport::default())?;

        let mut packages = MockPackagesService::new();

        packages
            .expect_create_package()
            .once()
            .withf(|draft| {
                draft.receiver_name.as_deref() == Some("Rae Receiver")
                    && draft.description.as_deref() == Some("Books")
                    && draft.quantity == Some(2)
                    && draft.weight.as_deref() == Some("2.5")
            })
            .return_once(move |_| Ok(created));

        let mut res = TestClient::post("http://example.com/api/packages")
            .json(&json!({
                "receiverName": "Rae Receiver",
                "receiverEmail": "r@x.com",
                "origin": "Lagos",
                "destination": "Accra",
                "packageDescription": "Books",
                "packageQuantity": 2,
                "weight": 2.5,
            }))
            .send(&make_service(packages))
            .await;

        let body: PackageCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/api/tracking/ESP-0123456789"));
        assert!(body.success, "create must report success");
        assert_eq!(body.tracking_id, TEST_TRACKING_ID);
        assert_eq!(body.message, "Package created successfully");
        assert!(body.email_status.success, "no emails failed");

        Ok(())
    }

    #[tokio::test]
    async fn test_email_failure_still_returns_201() -> TestResult {
        let created = created(failed_report("mailbox unavailable"))?;

        let mut packages = MockPackagesService::new();

        packages
            .expect_create_package()
            .once()
            .return_once(move |_| Ok(created));

        let mut res = TestClient::post("http://example.com/api/packages")
            .json(&json!({
                "receiverName": "Rae Receiver",
                "receiverEmail": "r@x.com",
                "origin": "Lagos",
                "destination": "Accra",
            }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: PackageCreatedResponse = res.take_json().await?;

        assert!(!body.email_status.success, "email failure must be reported");
        assert_eq!(
            body.email_status.error.as_deref(),
            Some("mailbox unavailable")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_receiver_returns_400() -> TestResult {
        let mut packages = MockPackagesService::new();

        packages
            .expect_create_package()
            .once()
            .return_once(|_| Err(ValidationError::MissingRequired("receiverName").into()));

        let res = TestClient::post("http://example.com/api/packages")
            .json(&json!({ "origin": "Lagos", "destination": "Accra" }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_tracking_id_collision_returns_409() -> TestResult {
        let mut packages = MockPackagesService::new();

        packages
            .expect_create_package()
            .once()
            .return_once(|_| Err(PackagesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/api/packages")
            .json(&json!({
                "receiverName": "Rae Receiver",
                "receiverEmail": "r@x.com",
                "origin": "Lagos",
                "destination": "Accra",
            }))
            .send(&make_service(packages))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_without_session_returns_401() -> TestResult {
        let packages = MockPackagesService::new();

        let res = TestClient::post("http://example.com/api/packages")
            .json(&json!({ "receiverName": "Rae Receiver" }))
            .send(&public_packages_service(
                packages,
                Router::with_path("api/packages").post(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
