//! Mail Config

use std::time::Duration;

use clap::Args;
use parceltrack_app::notifications::{
    DEFAULT_COMPANY_EMAIL, DEFAULT_COMPANY_NAME, DEFAULT_RESEND_API_URL, DEFAULT_TRACKING_URL,
    NotificationSettings, ResendConfig,
};

/// Outgoing email settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// Resend API key. Emails are only logged when unset.
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Resend API base URL.
    #[arg(long, env = "RESEND_API_URL", default_value = DEFAULT_RESEND_API_URL)]
    pub resend_api_url: String,

    /// Sender address and contact form inbox.
    #[arg(long, env = "COMPANY_EMAIL", default_value = DEFAULT_COMPANY_EMAIL)]
    pub company_email: String,

    /// Company name shown in emails.
    #[arg(long, env = "COMPANY_NAME", default_value = DEFAULT_COMPANY_NAME)]
    pub company_name: String,

    /// Public site base URL used for tracking links.
    #[arg(long, env = "TRACKING_URL", default_value = DEFAULT_TRACKING_URL)]
    pub tracking_url: String,

    /// Mail API request timeout in seconds.
    #[arg(long, env = "MAIL_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub mail_timeout_seconds: u64,
}

impl MailConfig {
    /// Resend client settings, when an API key is configured.
    #[must_use]
    pub fn resend(&self) -> Option<ResendConfig> {
        let api_key = self
            .resend_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())?;

        Some(ResendConfig {
            api_url: self.resend_api_url.clone(),
            api_key: api_key.to_string(),
            timeout: Duration::from_secs(self.mail_timeout_seconds),
        })
    }

    #[must_use]
    pub fn notification_settings(&self) -> NotificationSettings {
        NotificationSettings {
            from_address: self.company_email.clone(),
            company_address: self.company_email.clone(),
            tracking_url: self.tracking_url.trim_end_matches('/').to_string(),
            company_name: self.company_name.clone(),
        }
    }
}
