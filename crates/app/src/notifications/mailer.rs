//! Mailers

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::notifications::errors::NotificationError;

/// Default Resend API endpoint.
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// A single outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one email. Returns the provider's message ID when it gives one.
    async fn send(&self, email: &OutgoingEmail) -> Result<Option<String>, NotificationError>;
}

/// Configuration for the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API base URL, e.g. `"https://api.resend.com"`.
    pub api_url: String,

    pub api_key: String,

    pub timeout: Duration,
}

/// HTTP client for the Resend email API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    config: ResendConfig,
    http: Client,
}

impl ResendMailer {
    /// Create a new mailer from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: ResendConfig) -> Result<Self, NotificationError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<Option<String>, NotificationError> {
        let url = format!("{}/emails", self.config.api_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(email)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotificationError::UnexpectedResponse(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        let parsed: SendResponse = response.json().await?;

        Ok(parsed.id)
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

/// Writes emails to the log instead of sending them. Used when no mail API
/// key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<Option<String>, NotificationError> {
        info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            "email not sent, no mail API configured"
        );

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "noreply@emilshipping.com".to_string(),
            to: "r@x.com".to_string(),
            subject: "Updated package status".to_string(),
            html: "<p>hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() -> TestResult {
        let id = LogMailer.send(&email()).await?;

        assert!(id.is_none(), "log mailer has no message id");

        Ok(())
    }

    #[test]
    fn outgoing_email_serialises_as_resend_payload() -> TestResult {
        let value = serde_json::to_value(email())?;

        assert_eq!(
            value,
            serde_json::json!({
                "from": "noreply@emilshipping.com",
                "to": "r@x.com",
                "subject": "Updated package status",
                "html": "<p>hi</p>",
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_api_is_an_http_error() -> TestResult {
        let mailer = ResendMailer::new(ResendConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            api_key: "re_test".to_string(),
            timeout: Duration::from_secs(2),
        })?;

        let result = mailer.send(&email()).await;

        assert!(
            matches!(result, Err(NotificationError::Http(_))),
            "connection failures surface as http errors"
        );

        Ok(())
    }
}
