//! Depot helper extensions.

use std::any::Any;

use parceltrack_app::auth::AdminSession;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_admin_session(&mut self, session: AdminSession);

    fn admin_session_or_401(&self) -> Result<&AdminSession, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_admin_session(&mut self, session: AdminSession) {
        self.inject(session);
    }

    fn admin_session_or_401(&self) -> Result<&AdminSession, StatusError> {
        self.obtain::<AdminSession>()
            .map_err(|_missing| StatusError::unauthorized().brief("Admin session required"))
    }
}
