//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::auth::models::{
    Admin, AdminCredentials, AdminSession, AdminUuid, SessionUuid, StoredSession,
};

const CREATE_ADMIN_SQL: &str = include_str!("sql/create_admin.sql");
const FIND_ADMIN_BY_EMAIL_SQL: &str = include_str!("sql/find_admin_by_email.sql");
const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const TOUCH_SESSION_SQL: &str = include_str!("sql/touch_session.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_admin(
        &self,
        uuid: AdminUuid,
        email: &str,
        name: &str,
        access_key_hash: &str,
    ) -> Result<AdminCredentials, sqlx::Error> {
        query_as::<Postgres, AdminCredentials>(CREATE_ADMIN_SQL)
            .bind(uuid.into_uuid())
            .bind(email)
            .bind(name)
            .bind(access_key_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminCredentials>, sqlx::Error> {
        query_as::<Postgres, AdminCredentials>(FIND_ADMIN_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_session(
        &self,
        uuid: SessionUuid,
        admin: AdminUuid,
        token_hash: &str,
        ttl_seconds: i64,
    ) -> Result<StoredSession, sqlx::Error> {
        query_as::<Postgres, StoredSession>(CREATE_SESSION_SQL)
            .bind(uuid.into_uuid())
            .bind(admin.into_uuid())
            .bind(token_hash)
            .bind(ttl_seconds)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_active_session(
        &self,
        uuid: Uuid,
    ) -> Result<Option<StoredSession>, sqlx::Error> {
        query_as::<Postgres, StoredSession>(FIND_ACTIVE_SESSION_SQL)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_session(&self, uuid: SessionUuid) -> Result<(), sqlx::Error> {
        query(TOUCH_SESSION_SQL)
            .bind(uuid.into_uuid())
            .execute(&self.pool)
            .await
            .map(|_result| ())
    }

    pub(crate) async fn revoke_session(
        &self,
        uuid: SessionUuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(REVOKE_SESSION_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AdminCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            admin: Admin {
                uuid: AdminUuid::from_uuid(row.try_get("uuid")?),
                email: row.try_get("email")?,
                name: row.try_get("name")?,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            },
            access_key_hash: row.try_get("access_key_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StoredSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            session: AdminSession {
                uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
                admin_uuid: AdminUuid::from_uuid(row.try_get("admin_uuid")?),
                admin_email: row.try_get("admin_email")?,
                admin_name: row.try_get("admin_name")?,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            },
            token_hash: row.try_get("token_hash")?,
        })
    }
}
