//! Package Records

use jiff::Timestamp;

use crate::{
    domain::packages::{timeline::Timeline, tracking_id::TrackingId},
    uuids::TypedUuid,
};

/// Package UUID
pub type PackageUuid = TypedUuid<PackageRecord>;

/// Timeline Event UUID
pub type TimelineEventUuid = TypedUuid<TimelineEventRecord>;

/// Contact details for one side of a shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

impl Party {
    /// The email address, or `None` when none was recorded.
    #[must_use]
    pub fn email_address(&self) -> Option<&str> {
        let email = self.email.trim();

        (!email.is_empty()).then_some(email)
    }
}

/// Package Record
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRecord {
    pub uuid: PackageUuid,
    pub tracking_id: TrackingId,
    pub sender: Party,
    pub receiver: Party,
    pub origin: String,
    pub destination: String,
    pub description: String,
    pub quantity: u32,
    pub weight_kg: f64,
    /// Total charges in minor currency units.
    pub total_charges: u64,
    /// Current status label, stored lower-cased.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Timeline Event Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEventRecord {
    pub uuid: TimelineEventUuid,
    pub package_uuid: PackageUuid,
    /// Insertion order, used to break timestamp ties.
    pub sequence: i64,
    /// Status label exactly as it was submitted.
    pub status: String,
    pub location: String,
    pub description: String,
    pub occurred_at: Timestamp,
}

/// Public tracking view: a package and its ordered history.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingView {
    pub package: PackageRecord,
    pub timeline: Timeline,
}
