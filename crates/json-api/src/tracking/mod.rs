//! Public package tracking

pub(crate) mod get;
