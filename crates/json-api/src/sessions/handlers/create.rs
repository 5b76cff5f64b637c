//! Sign In Handler

use std::sync::Arc;

use parceltrack_app::auth::{Credentials, IssuedSession};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, sessions::errors::into_status_error, state::State};

/// Sign In Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSessionRequest {
    pub email: String,
    pub access_key: String,
}

impl From<CreateSessionRequest> for Credentials {
    fn from(request: CreateSessionRequest) -> Self {
        Credentials {
            email: request.email,
            access_key: request.access_key,
        }
    }
}

/// Session Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionCreatedResponse {
    /// Bearer token for admin requests. Shown once.
    pub token: String,

    pub session_uuid: Uuid,

    pub expires_at: String,
}

impl From<IssuedSession> for SessionCreatedResponse {
    fn from(issued: IssuedSession) -> Self {
        SessionCreatedResponse {
            token: issued.token,
            session_uuid: issued.session.uuid.into_uuid(),
            expires_at: issued.session.expires_at.to_string(),
        }
    }
}

/// Sign In Handler
///
/// Exchanges an admin's email and access key for a bearer session token.
#[endpoint(
    tags("sessions"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::CREATED, description = "Session created"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSessionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .auth
        .sign_in(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(issued.into()))
}
