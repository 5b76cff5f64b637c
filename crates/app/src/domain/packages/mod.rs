//! Packages
//!
//! Packages, their append-only timelines, and the status transitions that
//! decide which notifications go out.

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod status;
pub mod timeline;
pub mod tracking_id;
pub mod transitions;

pub use errors::{PackagesServiceError, ValidationError};
pub use service::*;
pub use tracking_id::{TrackingId, TrackingIdError};
