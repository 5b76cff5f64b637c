//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::{
    AuthServiceError, TokenKind, TokenVersion, build_verifier_input, format_token,
    generate_token_secret, hash_verifier, parse_token,
    models::{AdminSession, AdminUuid, Credentials, IssuedAdmin, IssuedSession, NewAdmin, SessionUuid},
    repository::PgAuthRepository,
};

/// Default admin session lifetime.
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 8 * 60 * 60;

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    session_ttl_seconds: i64,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, session_ttl_seconds: i64) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            session_ttl_seconds,
        }
    }

    /// Create an admin and issue their access key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::AlreadyExists`] when the email is taken.
    pub async fn create_admin(&self, admin: NewAdmin) -> Result<IssuedAdmin, AuthServiceError> {
        let uuid = AdminUuid::new();
        let version = TokenVersion::V1;
        let secret = generate_token_secret();
        let access_key = format_token(TokenKind::AccessKey, uuid.into_uuid(), version, &secret);

        let access_key_hash = hash_verifier(&build_verifier_input(
            &uuid.into_uuid(),
            version,
            &uuid.into_uuid(),
            &secret,
        ));

        let created = self
            .repository
            .create_admin(uuid, admin.email.trim(), admin.name.trim(), &access_key_hash)
            .await?;

        info!(admin = %created.admin.uuid, "admin created");

        Ok(IssuedAdmin {
            admin: created.admin,
            access_key,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn sign_in(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let parsed = parse_token(&credentials.access_key)
            .map_err(|_invalid| AuthServiceError::InvalidCredentials)?;

        if parsed.kind != TokenKind::AccessKey {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let stored = self
            .repository
            .find_admin_by_email(credentials.email.trim())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let admin_uuid = stored.admin.uuid.into_uuid();

        let presented = hash_verifier(&build_verifier_input(
            &parsed.uuid,
            parsed.version,
            &admin_uuid,
            &parsed.secret,
        ));

        if parsed.uuid != admin_uuid || presented != stored.access_key_hash {
            warn!(admin = %stored.admin.uuid, "admin sign-in rejected");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let session_uuid = SessionUuid::new();
        let version = TokenVersion::V1;
        let secret = generate_token_secret();
        let token = format_token(TokenKind::Session, session_uuid.into_uuid(), version, &secret);

        let token_hash = hash_verifier(&build_verifier_input(
            &session_uuid.into_uuid(),
            version,
            &admin_uuid,
            &secret,
        ));

        let created = self
            .repository
            .create_session(
                session_uuid,
                stored.admin.uuid,
                &token_hash,
                self.session_ttl_seconds,
            )
            .await?;

        info!(admin = %stored.admin.uuid, session = %session_uuid, "admin signed in");

        Ok(IssuedSession {
            token,
            session: created.session,
        })
    }

    async fn authenticate(&self, bearer_token: &str) -> Result<AdminSession, AuthServiceError> {
        let parsed = parse_token(bearer_token).map_err(|_invalid| AuthServiceError::Unauthorized)?;

        if parsed.kind != TokenKind::Session {
            return Err(AuthServiceError::Unauthorized);
        }

        let stored = self
            .repository
            .find_active_session(parsed.uuid)
            .await?
            .ok_or(AuthServiceError::Unauthorized)?;

        let presented = hash_verifier(&build_verifier_input(
            &parsed.uuid,
            parsed.version,
            &stored.session.admin_uuid.into_uuid(),
            &parsed.secret,
        ));

        if presented != stored.token_hash || stored.session.is_expired_at(Timestamp::now()) {
            return Err(AuthServiceError::Unauthorized);
        }

        if let Err(error) = self.repository.touch_session(stored.session.uuid).await {
            warn!(session = %stored.session.uuid, %error, "failed to record session use");
        }

        Ok(stored.session)
    }

    async fn sign_out(&self, session: SessionUuid) -> Result<bool, AuthServiceError> {
        let revoked = self.repository.revoke_session(session).await?.is_some();

        if revoked {
            info!(session = %session, "admin signed out");
        }

        Ok(revoked)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange an admin's email and access key for a new session.
    async fn sign_in(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to its live session.
    async fn authenticate(&self, bearer_token: &str) -> Result<AdminSession, AuthServiceError>;

    /// Revoke a session. Returns `true` if it was still active.
    async fn sign_out(&self, session: SessionUuid) -> Result<bool, AuthServiceError>;
}
