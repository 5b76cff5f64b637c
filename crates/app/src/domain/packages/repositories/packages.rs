//! Packages Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::packages::{
    data::NewPackage,
    records::{PackageRecord, PackageUuid, Party},
    tracking_id::TrackingId,
};

const CREATE_PACKAGE_SQL: &str = include_str!("sql/create_package.sql");
const GET_PACKAGE_SQL: &str = include_str!("sql/get_package.sql");
const LOCK_PACKAGE_SQL: &str = include_str!("sql/lock_package.sql");
const LIST_PACKAGES_SQL: &str = include_str!("sql/list_packages.sql");
const UPDATE_PACKAGE_STATUS_SQL: &str = include_str!("sql/update_package_status.sql");
const DELETE_PACKAGE_SQL: &str = include_str!("sql/delete_package.sql");
const LIST_STATUS_LABELS_SQL: &str = include_str!("sql/list_status_labels.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPackagesRepository;

impl PgPackagesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_package(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PackageUuid,
        tracking_id: &TrackingId,
        package: &NewPackage,
        status: &str,
    ) -> Result<PackageRecord, sqlx::Error> {
        let quantity = i32::try_from(package.quantity).map_err(|e| encode_error("quantity", e))?;

        let total_charges =
            i64::try_from(package.total_charges).map_err(|e| encode_error("total_charges", e))?;

        query_as::<Postgres, PackageRecord>(CREATE_PACKAGE_SQL)
            .bind(uuid.into_uuid())
            .bind(tracking_id.as_str())
            .bind(&package.sender.name)
            .bind(&package.sender.email)
            .bind(&package.sender.address)
            .bind(&package.sender.phone)
            .bind(&package.receiver.name)
            .bind(&package.receiver.email)
            .bind(&package.receiver.address)
            .bind(&package.receiver.phone)
            .bind(&package.origin)
            .bind(&package.destination)
            .bind(&package.description)
            .bind(quantity)
            .bind(package.weight_kg)
            .bind(total_charges)
            .bind(status)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_package(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tracking_id: &TrackingId,
    ) -> Result<PackageRecord, sqlx::Error> {
        query_as::<Postgres, PackageRecord>(GET_PACKAGE_SQL)
            .bind(tracking_id.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a package and hold its row lock until the transaction ends.
    pub(crate) async fn lock_package(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tracking_id: &TrackingId,
    ) -> Result<PackageRecord, sqlx::Error> {
        query_as::<Postgres, PackageRecord>(LOCK_PACKAGE_SQL)
            .bind(tracking_id.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_packages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PackageRecord>, sqlx::Error> {
        query_as::<Postgres, PackageRecord>(LIST_PACKAGES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        package: PackageUuid,
        status: &str,
    ) -> Result<PackageRecord, sqlx::Error> {
        query_as::<Postgres, PackageRecord>(UPDATE_PACKAGE_STATUS_SQL)
            .bind(package.into_uuid())
            .bind(status)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_package(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tracking_id: &TrackingId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PACKAGE_SQL)
            .bind(tracking_id.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_status_labels(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(LIST_STATUS_LABELS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

fn encode_error<E>(column: &str, error: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

impl<'r> FromRow<'r, PgRow> for PackageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let tracking_id = row
            .try_get::<String, _>("tracking_id")?
            .parse::<TrackingId>()
            .map_err(|e| encode_error("tracking_id", e))?;

        let quantity = u32::try_from(row.try_get::<i32, _>("quantity")?)
            .map_err(|e| encode_error("quantity", e))?;

        let total_charges = u64::try_from(row.try_get::<i64, _>("total_charges")?)
            .map_err(|e| encode_error("total_charges", e))?;

        Ok(Self {
            uuid: PackageUuid::from_uuid(row.try_get("uuid")?),
            tracking_id,
            sender: Party {
                name: row.try_get("sender_name")?,
                email: row.try_get("sender_email")?,
                address: row.try_get("sender_address")?,
                phone: row.try_get("sender_phone")?,
            },
            receiver: Party {
                name: row.try_get("receiver_name")?,
                email: row.try_get("receiver_email")?,
                address: row.try_get("receiver_address")?,
                phone: row.try_get("receiver_phone")?,
            },
            origin: row.try_get("origin")?,
            destination: row.try_get("destination")?,
            description: row.try_get("description")?,
            quantity,
            weight_kg: row.try_get("weight_kg")?,
            total_charges,
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
