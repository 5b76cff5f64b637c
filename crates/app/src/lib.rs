//! Parcel tracking services: packages and their timelines, status
//! notifications, the contact form, and admin sessions.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod notifications;

#[cfg(test)]
mod test;

mod uuids;
