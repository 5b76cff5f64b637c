//! Contact service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::contact::{
        data::{ContactDraft, NewContactMessage, SubmittedContact},
        errors::ContactServiceError,
        repository::PgContactRepository,
    },
    notifications::NotificationDispatcher,
};

#[derive(Debug, Clone)]
pub struct PgContactService {
    db: Db,
    repository: PgContactRepository,
    dispatcher: NotificationDispatcher,
}

impl PgContactService {
    #[must_use]
    pub fn new(db: Db, dispatcher: NotificationDispatcher) -> Self {
        Self {
            db,
            repository: PgContactRepository::new(),
            dispatcher,
        }
    }
}

#[async_trait]
impl ContactService for PgContactService {
    async fn submit(&self, draft: ContactDraft) -> Result<SubmittedContact, ContactServiceError> {
        let message = NewContactMessage::try_from(draft)?;

        let mut tx = self.db.begin().await?;

        let stored = self.repository.create_message(&mut tx, &message).await?;

        tx.commit().await?;

        info!(contact_message = %stored.uuid, "contact message stored");

        let notifications = self.dispatcher.notify_contact(&stored).await;

        Ok(SubmittedContact {
            message: stored,
            notifications,
        })
    }
}

#[automock]
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Store a contact form submission and send the company notice and
    /// visitor confirmation.
    async fn submit(&self, draft: ContactDraft) -> Result<SubmittedContact, ContactServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn draft() -> ContactDraft {
        ContactDraft {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            phone: Some("+233 555 0100".to_string()),
            subject: Some("Rates".to_string()),
            message: Some("Do you ship to Accra?".to_string()),
        }
    }

    #[tokio::test]
    async fn submit_stores_message_and_emails_company_and_visitor() -> TestResult {
        let ctx = TestContext::new().await;

        let submitted = ctx.contact.submit(draft()).await?;

        assert_eq!(submitted.message.name, "Ana");
        assert_eq!(submitted.message.subject, "Rates");
        assert_eq!(submitted.notifications.attempted(), 2);
        assert!(submitted.notifications.is_success(), "recording mailer never fails");

        let recipients: Vec<String> = ctx.mailer.sent().into_iter().map(|email| email.to).collect();

        assert_eq!(
            recipients,
            vec![
                "noreply@emilshipping.com".to_string(),
                "ana@example.com".to_string()
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn submit_rejects_missing_message_without_storing() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .contact
            .submit(ContactDraft {
                message: None,
                ..draft()
            })
            .await;

        assert!(
            matches!(result, Err(ContactServiceError::MissingRequired("message"))),
            "message is required"
        );
        assert!(ctx.mailer.sent().is_empty(), "no email for rejected submissions");

        let stored: i64 = sqlx::query_scalar("SELECT count(*) FROM contact_messages")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(stored, 0);

        Ok(())
    }
}
