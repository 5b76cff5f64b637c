//! Contact Message Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Contact Message UUID
pub type ContactMessageUuid = TypedUuid<ContactMessageRecord>;

/// Contact Message Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageRecord {
    pub uuid: ContactMessageUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub created_at: Timestamp,
}
