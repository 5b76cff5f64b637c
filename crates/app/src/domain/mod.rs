//! Parcel tracking domain

pub mod contact;
pub mod packages;
