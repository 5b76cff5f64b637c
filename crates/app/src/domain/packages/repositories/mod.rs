//! Packages Repositories

mod events;
mod packages;

pub(crate) use events::{EventEntry, PgTimelineEventsRepository};
pub(crate) use packages::PgPackagesRepository;
