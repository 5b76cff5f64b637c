//! Contact Data

use crate::{
    domain::contact::{errors::ContactServiceError, records::ContactMessageRecord},
    notifications::DispatchReport,
};

/// A contact form submission as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A validated contact message ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl TryFrom<ContactDraft> for NewContactMessage {
    type Error = ContactServiceError;

    fn try_from(draft: ContactDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(draft.name, "name")?,
            email: required(draft.email, "email")?,
            phone: trimmed(draft.phone),
            subject: trimmed(draft.subject),
            message: required(draft.message, "message")?,
        })
    }
}

/// A stored message and the emails sent about it.
#[derive(Debug, Clone)]
pub struct SubmittedContact {
    pub message: ContactMessageRecord,
    pub notifications: DispatchReport,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ContactServiceError> {
    let value = trimmed(value);

    if value.is_empty() {
        return Err(ContactServiceError::MissingRequired(field));
    }

    Ok(value)
}
