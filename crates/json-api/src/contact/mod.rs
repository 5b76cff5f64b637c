//! Contact form

mod errors;
pub(crate) mod create;
