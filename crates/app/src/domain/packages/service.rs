//! Packages service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::packages::{
        data::{CreatedPackage, NewPackage, PackageDraft, StatusUpdate, StatusUpdateOutcome},
        errors::PackagesServiceError,
        records::{PackageRecord, PackageUuid, TrackingView},
        repositories::{EventEntry, PgPackagesRepository, PgTimelineEventsRepository},
        status::{INITIAL_STATUS, StatusSummary},
        timeline::Timeline,
        tracking_id::TrackingId,
        transitions,
    },
    notifications::NotificationDispatcher,
};

const INITIAL_EVENT_STATUS: &str = "Package Created";
const INITIAL_EVENT_LOCATION: &str = "Emil Shipping Warehouse";
const INITIAL_EVENT_DESCRIPTION: &str = "Package has been created and is being processed";

#[derive(Debug, Clone)]
pub struct PgPackagesService {
    db: Db,
    packages: PgPackagesRepository,
    events: PgTimelineEventsRepository,
    dispatcher: NotificationDispatcher,
}

impl PgPackagesService {
    #[must_use]
    pub fn new(db: Db, dispatcher: NotificationDispatcher) -> Self {
        Self {
            db,
            packages: PgPackagesRepository::new(),
            events: PgTimelineEventsRepository::new(),
            dispatcher,
        }
    }

    /// Create a package under the given tracking ID.
    ///
    /// # Errors
    ///
    /// Returns [`PackagesServiceError::Validation`] for incomplete drafts and
    /// [`PackagesServiceError::AlreadyExists`] when the tracking ID is taken.
    pub async fn create_package_as(
        &self,
        draft: PackageDraft,
        tracking_id: TrackingId,
    ) -> Result<CreatedPackage, PackagesServiceError> {
        let package = NewPackage::try_from(draft)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .packages
            .create_package(
                &mut tx,
                PackageUuid::new(),
                &tracking_id,
                &package,
                INITIAL_STATUS,
            )
            .await?;

        let initial_event = self
            .events
            .append_event(
                &mut tx,
                created.uuid,
                EventEntry {
                    status: INITIAL_EVENT_STATUS,
                    location: INITIAL_EVENT_LOCATION,
                    description: INITIAL_EVENT_DESCRIPTION,
                },
            )
            .await?;

        tx.commit().await?;

        info!(tracking_id = %created.tracking_id, "package created");

        let notifications = self.dispatcher.notify_created(&created).await;

        Ok(CreatedPackage {
            package: created,
            initial_event,
            notifications,
        })
    }
}

#[async_trait]
impl PackagesService for PgPackagesService {
    async fn create_package(
        &self,
        draft: PackageDraft,
    ) -> Result<CreatedPackage, PackagesServiceError> {
        self.create_package_as(draft, TrackingId::random()).await
    }

    async fn get_tracking(
        &self,
        tracking_id: TrackingId,
    ) -> Result<TrackingView, PackagesServiceError> {
        let mut tx = self.db.begin().await?;

        let package = self.packages.get_package(&mut tx, &tracking_id).await?;
        let events = self.events.list_events(&mut tx, package.uuid).await?;

        tx.commit().await?;

        Ok(TrackingView {
            package,
            timeline: Timeline::from_events(events),
        })
    }

    async fn list_packages(&self) -> Result<Vec<PackageRecord>, PackagesServiceError> {
        let mut tx = self.db.begin().await?;

        let packages = self.packages.list_packages(&mut tx).await?;

        tx.commit().await?;

        Ok(packages)
    }

    async fn package_stats(&self) -> Result<StatusSummary, PackagesServiceError> {
        let mut tx = self.db.begin().await?;

        let labels = self.packages.list_status_labels(&mut tx).await?;

        tx.commit().await?;

        Ok(StatusSummary::from_labels(labels.iter().map(String::as_str)))
    }

    async fn update_status(
        &self,
        tracking_id: TrackingId,
        update: StatusUpdate,
    ) -> Result<StatusUpdateOutcome, PackagesServiceError> {
        transitions::canonicalise(&update.status)?;

        let mut tx = self.db.begin().await?;

        let package = self.packages.lock_package(&mut tx, &tracking_id).await?;

        let history = Timeline::from_events(self.events.list_events(&mut tx, package.uuid).await?);

        let transition = transitions::evaluate(&package.status, &history, &update.status)?;

        let event = self
            .events
            .append_event(
                &mut tx,
                package.uuid,
                EventEntry {
                    status: &update.status,
                    location: update.location.as_deref().unwrap_or_default(),
                    description: update.description.as_deref().unwrap_or_default(),
                },
            )
            .await?;

        let package = self
            .packages
            .update_status(&mut tx, package.uuid, &transition.canonical_status)
            .await?;

        tx.commit().await?;

        info!(
            tracking_id = %package.tracking_id,
            status = %transition.canonical_status,
            notification = transition.class.as_str(),
            "package status updated"
        );

        let notifications = self
            .dispatcher
            .notify_transition(transition.class, &package, &update.status)
            .await;

        Ok(StatusUpdateOutcome {
            package,
            event,
            transition,
            notifications,
        })
    }

    async fn delete_package(&self, tracking_id: TrackingId) -> Result<bool, PackagesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.packages.delete_package(&mut tx, &tracking_id).await?;

        tx.commit().await?;

        if rows_affected > 0 {
            info!(tracking_id = %tracking_id, "package deleted");
        }

        Ok(rows_affected > 0)
    }
}

#[automock]
#[async_trait]
pub trait PackagesService: Send + Sync {
    /// Creates a package with a fresh tracking ID and its initial event, then
    /// sends the creation emails.
    async fn create_package(
        &self,
        draft: PackageDraft,
    ) -> Result<CreatedPackage, PackagesServiceError>;

    /// Retrieves a package and its ordered timeline.
    async fn get_tracking(
        &self,
        tracking_id: TrackingId,
    ) -> Result<TrackingView, PackagesServiceError>;

    /// Retrieves all packages, newest first.
    async fn list_packages(&self) -> Result<Vec<PackageRecord>, PackagesServiceError>;

    /// Counts packages per status stage.
    async fn package_stats(&self) -> Result<StatusSummary, PackagesServiceError>;

    /// Appends a timeline event, updates the current status and sends the
    /// emails the transition calls for.
    async fn update_status(
        &self,
        tracking_id: TrackingId,
        update: StatusUpdate,
    ) -> Result<StatusUpdateOutcome, PackagesServiceError>;

    /// Hard-deletes a package and its timeline. Returns whether a package
    /// was removed; deleting an unknown ID is not an error.
    async fn delete_package(&self, tracking_id: TrackingId) -> Result<bool, PackagesServiceError>;
}
