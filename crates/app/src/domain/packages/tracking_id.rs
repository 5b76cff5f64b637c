//! Tracking IDs
//!
//! Tracking IDs are the public, shareable identity of a package: a fixed
//! prefix followed by ten decimal digits drawn uniformly from the whole
//! ten-digit space. The generator does not check for collisions; the
//! `packages.tracking_id` unique constraint rejects duplicates and the create
//! call fails with [`AlreadyExists`](super::PackagesServiceError::AlreadyExists).

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rand::Rng;
use thiserror::Error;

/// Prefix shared by every tracking ID.
pub const TRACKING_ID_PREFIX: &str = "ESP";

/// Number of digits following the prefix.
pub const TRACKING_ID_DIGITS: usize = 10;

const TRACKING_ID_SPACE: u64 = 10_000_000_000;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackingIdError {
    #[error("tracking id must be \"{TRACKING_ID_PREFIX}-\" followed by {TRACKING_ID_DIGITS} digits")]
    InvalidFormat,
}

/// Package tracking ID, e.g. `ESP-0123456789`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackingId(String);

impl TrackingId {
    /// Draw a tracking ID from the given random source.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let number = rng.gen_range(0..TRACKING_ID_SPACE);

        Self(format!("{TRACKING_ID_PREFIX}-{number:010}"))
    }

    /// Draw a tracking ID from the thread-local random source.
    #[must_use]
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for TrackingId {
    type Err = TrackingIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (prefix, digits) = value
            .trim()
            .split_once('-')
            .ok_or(TrackingIdError::InvalidFormat)?;

        if !prefix.eq_ignore_ascii_case(TRACKING_ID_PREFIX)
            || digits.len() != TRACKING_ID_DIGITS
            || !digits.bytes().all(|byte| byte.is_ascii_digit())
        {
            return Err(TrackingIdError::InvalidFormat);
        }

        Ok(Self(format!("{TRACKING_ID_PREFIX}-{digits}")))
    }
}

impl Display for TrackingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrackingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
