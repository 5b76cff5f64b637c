//! Shared handler state

use std::sync::Arc;

use parceltrack_app::context::AppContext;

/// Services every handler reaches through the depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
