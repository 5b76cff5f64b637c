//! Test Helpers

use crate::domain::packages::data::PackageDraft;

/// A complete package draft with sender and receiver email addresses.
pub(crate) fn package_draft() -> PackageDraft {
    PackageDraft {
        sender_name: Some("Sam Sender".to_string()),
        sender_email: Some("s@x.com".to_string()),
        sender_address: Some("12 Marina Road, Lagos".to_string()),
        sender_phone: Some("+234 800 000 0000".to_string()),
        receiver_name: Some("Rae Receiver".to_string()),
        receiver_email: Some("r@x.com".to_string()),
        receiver_address: Some("4 Ring Road, Accra".to_string()),
        receiver_phone: None,
        origin: Some("Lagos".to_string()),
        destination: Some("Accra".to_string()),
        description: Some("Books".to_string()),
        quantity: Some(2),
        weight: Some("2.5 kg".to_string()),
        total_charges: Some("45.00".to_string()),
    }
}
