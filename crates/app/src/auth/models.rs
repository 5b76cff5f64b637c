//! Auth data models.

use std::fmt;

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Admin UUID
pub type AdminUuid = TypedUuid<Admin>;

/// Admin Session UUID
pub type SessionUuid = TypedUuid<AdminSession>;

/// A staff member allowed to manage packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub uuid: AdminUuid,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// Admin row including the stored access key verifier.
#[derive(Debug, Clone)]
pub(crate) struct AdminCredentials {
    pub admin: Admin,
    pub access_key_hash: String,
}

/// An authenticated admin session.
///
/// Created on sign-in, resolved from the bearer token on every admin request,
/// and ended by sign-out or expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub uuid: SessionUuid,
    pub admin_uuid: AdminUuid,
    pub admin_email: String,
    pub admin_name: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl AdminSession {
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// Session row including the stored token verifier.
#[derive(Debug, Clone)]
pub(crate) struct StoredSession {
    pub session: AdminSession,
    pub token_hash: String,
}

/// New admin details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub email: String,
    pub name: String,
}

/// Admin creation result with the one-time raw access key.
#[derive(Debug, Clone)]
pub struct IssuedAdmin {
    pub admin: Admin,
    pub access_key: String,
}

/// Session issuance result with the one-time raw bearer token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: AdminSession,
}

/// Sign-in request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub access_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("access_key", &"**redacted**")
            .finish()
    }
}
