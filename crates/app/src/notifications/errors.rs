//! Notification errors.

use thiserror::Error;

use crate::notifications::templates::TemplateKind;

/// Errors that can occur while sending an email.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The mail API returned a non-2xx response.
    #[error("unexpected response from mail API: {0}")]
    UnexpectedResponse(String),

    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to render email: {0}")]
    Render(#[from] askama::Error),

    #[error("{0:?} cannot be rendered from this content")]
    Unsupported(TemplateKind),
}
