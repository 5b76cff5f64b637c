//! Packages Data

use crate::{
    domain::packages::{
        errors::ValidationError,
        records::{PackageRecord, Party, TimelineEventRecord},
        transitions::Transition,
    },
    notifications::DispatchReport,
};

const DEFAULT_SENDER_NAME: &str = "Unknown Sender";
const DEFAULT_DESCRIPTION: &str = "Package";
const DEFAULT_QUANTITY: u32 = 1;

/// Package details as submitted by staff, before defaults and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDraft {
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub sender_address: Option<String>,
    pub sender_phone: Option<String>,
    pub receiver_name: Option<String>,
    pub receiver_email: Option<String>,
    pub receiver_address: Option<String>,
    pub receiver_phone: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    /// Free text such as `"2.5 kg"`.
    pub weight: Option<String>,
    /// Free text such as `"$120.50"`.
    pub total_charges: Option<String>,
}

/// New Package Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPackage {
    pub sender: Party,
    pub receiver: Party,
    pub origin: String,
    pub destination: String,
    pub description: String,
    pub quantity: u32,
    pub weight_kg: f64,
    pub total_charges: u64,
}

impl TryFrom<PackageDraft> for NewPackage {
    type Error = ValidationError;

    fn try_from(draft: PackageDraft) -> Result<Self, Self::Error> {
        let receiver_name = required(draft.receiver_name, "receiverName")?;
        let receiver_email = required(draft.receiver_email, "receiverEmail")?;
        let origin = required(draft.origin, "origin")?;
        let destination = required(draft.destination, "destination")?;

        Ok(Self {
            sender: Party {
                name: present(draft.sender_name)
                    .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
                email: present(draft.sender_email).unwrap_or_default(),
                address: present(draft.sender_address).unwrap_or_default(),
                phone: present(draft.sender_phone).unwrap_or_default(),
            },
            receiver: Party {
                name: receiver_name,
                email: receiver_email,
                address: present(draft.receiver_address).unwrap_or_default(),
                phone: present(draft.receiver_phone).unwrap_or_default(),
            },
            origin,
            destination,
            description: present(draft.description)
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            quantity: draft
                .quantity
                .filter(|quantity| *quantity > 0)
                .unwrap_or(DEFAULT_QUANTITY),
            weight_kg: draft.weight.as_deref().map_or(0.0, parse_weight),
            total_charges: draft
                .total_charges
                .as_deref()
                .map(parse_minor_units)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// Requested status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Status label, stored verbatim on the event.
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// A freshly created package with its initial event.
#[derive(Debug, Clone)]
pub struct CreatedPackage {
    pub package: PackageRecord,
    pub initial_event: TimelineEventRecord,
    pub notifications: DispatchReport,
}

/// Result of a committed status update.
#[derive(Debug, Clone)]
pub struct StatusUpdateOutcome {
    pub package: PackageRecord,
    pub event: TimelineEventRecord,
    pub transition: Transition,
    pub notifications: DispatchReport,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    present(value).ok_or(ValidationError::MissingRequired(field))
}

/// Keep only the first `digits[.digits]` run after dropping every character
/// that is not a digit or a dot.
fn numeric_part(raw: &str) -> (String, String) {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.split_once('.') {
        Some((whole, rest)) => {
            let fraction = rest.split('.').next().unwrap_or_default();

            (whole.to_string(), fraction.to_string())
        }
        None => (cleaned, String::new()),
    }
}

/// Parse a free-text weight in kilograms; unparsable input reads as zero.
pub(crate) fn parse_weight(raw: &str) -> f64 {
    let (whole, fraction) = numeric_part(raw);

    let number = if fraction.is_empty() {
        whole
    } else {
        format!("{whole}.{fraction}")
    };

    number
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite())
        .unwrap_or_default()
}

/// Parse a free-text amount into minor units (hundredths), truncating any
/// further decimals; unparsable input reads as zero.
pub(crate) fn parse_minor_units(raw: &str) -> Result<u64, ValidationError> {
    let (whole, fraction) = numeric_part(raw);

    let whole = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .map_err(|_ignored| ValidationError::OutOfRange("totalCharges"))?
    };

    let cents = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(2)
        .filter_map(|c| c.to_digit(10))
        .fold(0_u64, |acc, digit| acc * 10 + u64::from(digit));

    whole
        .checked_mul(100)
        .and_then(|minor| minor.checked_add(cents))
        .filter(|minor| i64::try_from(*minor).is_ok())
        .ok_or(ValidationError::OutOfRange("totalCharges"))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn minimal_draft() -> PackageDraft {
        PackageDraft {
            receiver_name: Some("Rae Receiver".to_string()),
            receiver_email: Some("r@x.com".to_string()),
            origin: Some("Lagos".to_string()),
            destination: Some("Accra".to_string()),
            ..PackageDraft::default()
        }
    }

    #[test]
    fn defaults_fill_missing_optional_fields() -> TestResult {
        let package = NewPackage::try_from(minimal_draft())?;

        assert_eq!(package.sender.name, "Unknown Sender");
        assert_eq!(package.sender.email, "");
        assert_eq!(package.receiver.address, "");
        assert_eq!(package.description, "Package");
        assert_eq!(package.quantity, 1);
        assert!(package.weight_kg.abs() < f64::EPSILON, "weight defaults to zero");
        assert_eq!(package.total_charges, 0);

        Ok(())
    }

    #[test]
    fn required_fields_are_reported_by_name() {
        for (draft, field) in [
            (
                PackageDraft {
                    receiver_name: None,
                    ..minimal_draft()
                },
                "receiverName",
            ),
            (
                PackageDraft {
                    receiver_email: Some("   ".to_string()),
                    ..minimal_draft()
                },
                "receiverEmail",
            ),
            (
                PackageDraft {
                    origin: None,
                    ..minimal_draft()
                },
                "origin",
            ),
            (
                PackageDraft {
                    destination: Some(String::new()),
                    ..minimal_draft()
                },
                "destination",
            ),
        ] {
            assert_eq!(
                NewPackage::try_from(draft),
                Err(ValidationError::MissingRequired(field)),
                "expected {field} to be required"
            );
        }
    }

    #[test]
    fn zero_quantity_falls_back_to_one() -> TestResult {
        let package = NewPackage::try_from(PackageDraft {
            quantity: Some(0),
            ..minimal_draft()
        })?;

        assert_eq!(package.quantity, 1);

        Ok(())
    }

    #[test]
    fn weights_are_parsed_leniently() {
        let cases = [
            ("2.5 kg", 2.5),
            ("12kg", 12.0),
            ("1.2.3", 1.2),
            (".5", 0.5),
            ("heavy", 0.0),
            ("", 0.0),
        ];

        for (raw, expected) in cases {
            let parsed = parse_weight(raw);

            assert!(
                (parsed - expected).abs() < 1e-9,
                "expected {raw:?} to parse as {expected}, got {parsed}"
            );
        }
    }

    #[test]
    fn charges_are_parsed_into_minor_units() -> TestResult {
        assert_eq!(parse_minor_units("$120.50")?, 12_050);
        assert_eq!(parse_minor_units("120")?, 12_000);
        assert_eq!(parse_minor_units("1,250.5 USD")?, 125_050);
        assert_eq!(parse_minor_units("9.999")?, 999);
        assert_eq!(parse_minor_units("free")?, 0);

        Ok(())
    }

    #[test]
    fn oversized_charges_are_rejected() {
        assert_eq!(
            parse_minor_units("99999999999999999999999"),
            Err(ValidationError::OutOfRange("totalCharges"))
        );
    }
}
