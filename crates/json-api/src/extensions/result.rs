//! Internal error mapping for handler results.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

pub(crate) trait ResultExt<T> {
    /// Log the error under `action` and answer 500.
    fn or_500(self, action: &'static str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, action: &'static str) -> Result<T, StatusError> {
        self.map_err(|source| {
            error!(action, %source, "handler failed");

            StatusError::internal_server_error()
        })
    }
}
