//! Package Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod stats;
pub(crate) mod update_location;
