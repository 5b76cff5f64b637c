//! Extension traits

mod depot;
mod result;
mod tracking_id;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use tracking_id::TrackingIdParamExt as _;
