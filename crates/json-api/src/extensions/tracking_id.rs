//! Tracking ID path parameter parsing.

use parceltrack_app::domain::packages::TrackingId;
use salvo::{oapi::extract::PathParam, prelude::StatusError};

pub(crate) trait TrackingIdParamExt {
    /// Parse the parameter, treating malformed IDs as unknown packages.
    fn into_tracking_id(self) -> Result<TrackingId, StatusError>;
}

impl TrackingIdParamExt for PathParam<String> {
    fn into_tracking_id(self) -> Result<TrackingId, StatusError> {
        self.into_inner()
            .parse::<TrackingId>()
            .map_err(|_malformed| StatusError::not_found().brief("Package not found"))
    }
}
