//! Package request and response bodies.

use parceltrack_app::domain::packages::{
    data::PackageDraft,
    records::{PackageRecord, TimelineEventRecord},
    status::PackageStatus,
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;

/// Create Package Request
///
/// Numeric fields accept either JSON numbers or free text such as `"2.5 kg"`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePackageRequest {
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub sender_address: Option<String>,
    pub sender_phone: Option<String>,
    pub receiver_name: Option<String>,
    pub receiver_email: Option<String>,
    pub receiver_address: Option<String>,
    pub receiver_phone: Option<String>,
    pub package_description: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,

    #[serde(default, deserialize_with = "lenient_quantity")]
    pub package_quantity: Option<u32>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub weight: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub total_charges: Option<String>,
}

impl From<CreatePackageRequest> for PackageDraft {
    fn from(request: CreatePackageRequest) -> Self {
        PackageDraft {
            sender_name: request.sender_name,
            sender_email: request.sender_email,
            sender_address: request.sender_address,
            sender_phone: request.sender_phone,
            receiver_name: request.receiver_name,
            receiver_email: request.receiver_email,
            receiver_address: request.receiver_address,
            receiver_phone: request.receiver_phone,
            origin: request.origin,
            destination: request.destination,
            description: request.package_description,
            quantity: request.package_quantity,
            weight: request.weight,
            total_charges: request.total_charges,
        }
    }
}

/// Admin view of a package.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageResponse {
    pub tracking_id: String,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_address: String,
    pub sender_phone: String,
    pub receiver_name: String,
    pub receiver_email: String,
    pub receiver_address: String,
    pub receiver_phone: String,
    pub package_description: String,
    pub origin: String,
    pub destination: String,
    pub package_quantity: u32,

    /// Weight in kilograms
    pub weight: f64,

    /// Total charges in minor currency units
    pub total_charges: u64,

    pub status: String,

    /// Broad stage the status falls into
    pub status_stage: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<PackageRecord> for PackageResponse {
    fn from(package: PackageRecord) -> Self {
        let status_stage = PackageStatus::from_label(&package.status).stage().as_str().to_string();

        PackageResponse {
            tracking_id: package.tracking_id.into_string(),
            sender_name: package.sender.name,
            sender_email: package.sender.email,
            sender_address: package.sender.address,
            sender_phone: package.sender.phone,
            receiver_name: package.receiver.name,
            receiver_email: package.receiver.email,
            receiver_address: package.receiver.address,
            receiver_phone: package.receiver.phone,
            package_description: package.description,
            origin: package.origin,
            destination: package.destination,
            package_quantity: package.quantity,
            weight: package.weight_kg,
            total_charges: package.total_charges,
            status: package.status,
            status_stage,
            created_at: package.created_at.to_string(),
            updated_at: package.updated_at.to_string(),
        }
    }
}

/// One entry in a package's location history.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocationHistoryEntry {
    pub location: String,
    pub status: String,
    pub description: String,
    pub timestamp: String,
}

impl From<TimelineEventRecord> for LocationHistoryEntry {
    fn from(event: TimelineEventRecord) -> Self {
        LocationHistoryEntry {
            location: event.location,
            status: event.status,
            description: event.description,
            timestamp: event.occurred_at.to_string(),
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected text or a number, got {other}"
        ))),
    }
}

/// Quantities that are missing, blank, or unreadable fall back to the default.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(text)) => text.trim().parse::<u32>().ok(),
        _ => None,
    };

    Ok(quantity)
}
