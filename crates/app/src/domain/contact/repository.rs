//! Contact Messages Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::contact::{
    data::NewContactMessage,
    records::{ContactMessageRecord, ContactMessageUuid},
};

const CREATE_CONTACT_MESSAGE_SQL: &str = include_str!("sql/create_contact_message.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgContactRepository;

impl PgContactRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_message(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        message: &NewContactMessage,
    ) -> Result<ContactMessageRecord, sqlx::Error> {
        query_as::<Postgres, ContactMessageRecord>(CREATE_CONTACT_MESSAGE_SQL)
            .bind(ContactMessageUuid::new().into_uuid())
            .bind(&message.name)
            .bind(&message.email)
            .bind(&message.phone)
            .bind(&message.subject)
            .bind(&message.message)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ContactMessageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ContactMessageUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
