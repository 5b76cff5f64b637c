//! Admin Session Config

use clap::Args;

/// Admin session settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Minutes an admin session stays valid after sign-in.
    #[arg(
        long,
        env = "SESSION_TTL_MINUTES",
        default_value_t = 480_u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub session_ttl_minutes: u32,
}

impl SessionConfig {
    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        i64::from(self.session_ttl_minutes) * 60
    }
}
