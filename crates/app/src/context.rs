//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        contact::{ContactService, PgContactService},
        packages::{PackagesService, PgPackagesService},
    },
    notifications::{
        LogMailer, Mailer, NotificationDispatcher, NotificationError, NotificationSettings,
        ResendConfig, ResendMailer,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    #[error("failed to build mail client")]
    Mailer(#[source] NotificationError),
}

/// Settings needed to wire the application services.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,

    /// Apply pending migrations before serving.
    pub run_migrations: bool,

    /// Resend credentials. Emails are only logged when absent.
    pub resend: Option<ResendConfig>,

    pub notifications: NotificationSettings,

    pub session_ttl_seconds: i64,
}

#[derive(Clone)]
pub struct AppContext {
    pub packages: Arc<dyn PackagesService>,
    pub contact: Arc<dyn ContactService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    #[must_use]
    pub fn new(
        packages: Arc<dyn PackagesService>,
        contact: Arc<dyn ContactService>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            packages,
            contact,
            auth,
        }
    }

    /// Build application context from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to the database, migrating it, or
    /// building the mail client fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        let mailer: Arc<dyn Mailer> = match settings.resend {
            Some(config) => Arc::new(ResendMailer::new(config).map_err(AppInitError::Mailer)?),
            None => {
                warn!("no mail API key configured, emails will only be logged");

                Arc::new(LogMailer)
            }
        };

        let dispatcher = NotificationDispatcher::new(mailer, settings.notifications);
        let db = Db::new(pool.clone());

        Ok(Self::new(
            Arc::new(PgPackagesService::new(db.clone(), dispatcher.clone())),
            Arc::new(PgContactService::new(db, dispatcher)),
            Arc::new(PgAuthService::new(pool, settings.session_ttl_seconds)),
        ))
    }
}
