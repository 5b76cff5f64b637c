//! Email delivery status shared by responses that send notifications.

use parceltrack_app::notifications::DispatchReport;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Outcome of the emails sent while handling a request. Email failures never
/// fail the request itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct EmailStatusResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmailStatusResponse {
    pub(crate) fn from_report(report: &DispatchReport, success_message: &str) -> Self {
        match report.first_error() {
            None => Self {
                success: true,
                message: Some(success_message.to_string()),
                error: None,
            },
            Some(error) => Self {
                success: false,
                message: None,
                error: Some(error.to_string()),
            },
        }
    }
}
