//! Get Tracking Handler

use std::sync::Arc;

use parceltrack_app::domain::packages::records::TrackingView;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    packages::{LocationHistoryEntry, into_status_error},
    state::State,
};

/// Tracking Response
///
/// What anyone holding a tracking ID may see about a package.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackingResponse {
    /// Same as `trackingId`; the internal row key is never exposed
    pub id: String,
    pub tracking_id: String,
    pub sender_name: String,
    pub sender_email: String,
    pub receiver_name: String,
    pub receiver_email: String,
    pub package_description: String,
    pub origin: String,
    pub destination: String,

    /// Weight in kilograms
    pub weight: f64,

    pub status: String,
    pub created_at: String,
    pub updated_at: String,

    /// Timeline events, oldest first
    pub location_history: Vec<LocationHistoryEntry>,
}

impl From<TrackingView> for TrackingResponse {
    fn from(view: TrackingView) -> Self {
        let package = view.package;
        let tracking_id = package.tracking_id.into_string();

        TrackingResponse {
            id: tracking_id.clone(),
            tracking_id,
            sender_name: package.sender.name,
            sender_email: package.sender.email,
            receiver_name: package.receiver.name,
            receiver_email: package.receiver.email,
            package_description: package.description,
            origin: package.origin,
            destination: package.destination,
            weight: package.weight_kg,
            status: package.status,
            created_at: package.created_at.to_string(),
            updated_at: package.updated_at.to_string(),
            location_history: view
                .timeline
                .into_events()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Get Tracking Handler
///
/// Returns a package and its location history by tracking ID.
#[endpoint(
    tags("tracking"),
    summary = "Track Package",
    responses(
        (status_code = StatusCode::OK, description = "Package found"),
        (status_code = StatusCode::NOT_FOUND, description = "Package not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    tracking_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<TrackingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let view = state
        .app
        .packages
        .get_tracking(tracking_id.into_tracking_id()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(view.into()))
}
