//! Timeline Events Repository
//!
//! Events are append-only and leave only with their package.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::packages::records::{PackageUuid, TimelineEventRecord, TimelineEventUuid};

const APPEND_EVENT_SQL: &str = include_str!("sql/append_event.sql");
const LIST_EVENTS_SQL: &str = include_str!("sql/list_events.sql");

/// Event fields supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EventEntry<'a> {
    pub status: &'a str,
    pub location: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTimelineEventsRepository;

impl PgTimelineEventsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Append an event, stamped no earlier than the package's latest event.
    pub(crate) async fn append_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        package: PackageUuid,
        entry: EventEntry<'_>,
    ) -> Result<TimelineEventRecord, sqlx::Error> {
        query_as::<Postgres, TimelineEventRecord>(APPEND_EVENT_SQL)
            .bind(TimelineEventUuid::new().into_uuid())
            .bind(package.into_uuid())
            .bind(entry.status)
            .bind(entry.location)
            .bind(entry.description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_events(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        package: PackageUuid,
    ) -> Result<Vec<TimelineEventRecord>, sqlx::Error> {
        query_as::<Postgres, TimelineEventRecord>(LIST_EVENTS_SQL)
            .bind(package.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TimelineEventRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TimelineEventUuid::from_uuid(row.try_get("uuid")?),
            package_uuid: PackageUuid::from_uuid(row.try_get("package_uuid")?),
            sequence: row.try_get("sequence")?,
            status: row.try_get("status")?,
            location: row.try_get("location")?,
            description: row.try_get("description")?,
            occurred_at: row.try_get::<SqlxTimestamp, _>("occurred_at")?.to_jiff(),
        })
    }
}
