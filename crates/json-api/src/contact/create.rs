//! Submit Contact Form Handler

use std::sync::Arc;

use parceltrack_app::domain::contact::data::ContactDraft;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    contact::errors::into_status_error, extensions::*, notifications::EmailStatusResponse,
    observability::record_dispatch, state::State,
};

/// Contact Form Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl From<ContactRequest> for ContactDraft {
    fn from(request: ContactRequest) -> Self {
        ContactDraft {
            name: request.name,
            email: request.email,
            phone: request.phone,
            subject: request.subject,
            message: request.message,
        }
    }
}

/// Contact Submitted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContactSubmittedResponse {
    pub success: bool,
    pub message: String,
    pub email_status: EmailStatusResponse,
}

/// Submit Contact Form Handler
///
/// Stores a visitor's message, notifies the company inbox, and sends the
/// visitor a confirmation.
#[endpoint(
    tags("contact"),
    summary = "Submit Contact Form",
    responses(
        (status_code = StatusCode::OK, description = "Message stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Name, email, and message are required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ContactRequest>,
    depot: &mut Depot,
) -> Result<Json<ContactSubmittedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let submitted = state
        .app
        .contact
        .submit(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_dispatch(&submitted.notifications);

    Ok(Json(ContactSubmittedResponse {
        success: true,
        message: "Contact form submitted successfully".to_string(),
        email_status: EmailStatusResponse::from_report(
            &submitted.notifications,
            "Contact form notifications sent successfully",
        ),
    }))
}
