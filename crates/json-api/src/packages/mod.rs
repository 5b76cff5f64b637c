//! Packages

mod errors;
pub(crate) mod handlers;
mod models;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
pub(crate) use models::LocationHistoryEntry;
