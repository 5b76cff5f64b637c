//! Notification dispatch
//!
//! Planning (who gets which template) is pure and lives in the `plan_*`
//! functions. [`NotificationDispatcher`] renders and sends each planned email
//! once, independently, and records the outcome. Failures are logged and
//! reported; they never become errors for the caller.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use smallvec::SmallVec;
use tracing::{info, warn};

use crate::{
    domain::{
        contact::records::ContactMessageRecord,
        packages::{records::PackageRecord, transitions::NotificationClass},
    },
    notifications::{
        errors::NotificationError,
        mailer::{Mailer, OutgoingEmail},
        templates::{ContactEmail, EmailContent, PackageEmail, TemplateKind},
    },
};

/// Default sender and company inbox address.
pub const DEFAULT_COMPANY_EMAIL: &str = "noreply@emilshipping.com";

/// Default public site used for tracking links.
pub const DEFAULT_TRACKING_URL: &str = "https://emilshipping.com";

/// Default company name shown in emails.
pub const DEFAULT_COMPANY_NAME: &str = "Emil Shipping";

const FALLBACK_RECIPIENT_NAME: &str = "Valued Customer";
const FALLBACK_CONTACT_SUBJECT: &str = "General Inquiry";
const FALLBACK_CONTACT_PHONE: &str = "Not provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    /// `From` address on every email.
    pub from_address: String,

    /// Inbox that receives contact form notices.
    pub company_address: String,

    /// Public site base URL; package emails link to `{tracking_url}/track?id=...`.
    pub tracking_url: String,

    pub company_name: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            from_address: DEFAULT_COMPANY_EMAIL.to_string(),
            company_address: DEFAULT_COMPANY_EMAIL.to_string(),
            tracking_url: DEFAULT_TRACKING_URL.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
        }
    }
}

/// Who an email is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    Sender,
    Receiver,
    Company,
    Visitor,
}

/// One email the dispatcher intends to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEmail {
    pub kind: TemplateKind,
    pub recipient: Recipient,
    pub to: String,
}

pub type EmailPlan = SmallVec<[PlannedEmail; 2]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent { message_id: Option<String> },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub kind: TemplateKind,
    pub recipient: Recipient,
    pub to: String,
    pub outcome: DeliveryOutcome,
}

impl Delivery {
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Sent { .. })
    }
}

/// Per-recipient results of one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    deliveries: SmallVec<[Delivery; 2]>,
}

impl DispatchReport {
    #[must_use]
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Number of emails attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.deliveries.len()
    }

    /// True when every attempted email was sent, including when none were.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.deliveries.iter().all(Delivery::is_sent)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|delivery| !delivery.is_sent())
    }

    /// The first failure message, if any send failed.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.failures().find_map(|delivery| match &delivery.outcome {
            DeliveryOutcome::Failed { error } => Some(error.as_str()),
            DeliveryOutcome::Sent { .. } => None,
        })
    }

    fn record(&mut self, delivery: Delivery) {
        self.deliveries.push(delivery);
    }
}

impl FromIterator<Delivery> for DispatchReport {
    fn from_iter<I: IntoIterator<Item = Delivery>>(iter: I) -> Self {
        Self {
            deliveries: iter.into_iter().collect(),
        }
    }
}

/// Creation emails: sender (when an address is known) and receiver.
#[must_use]
pub fn plan_creation(package: &PackageRecord) -> EmailPlan {
    let mut plan = EmailPlan::new();

    if let Some(to) = package.sender.email_address() {
        plan.push(PlannedEmail {
            kind: TemplateKind::PackageCreatedSender,
            recipient: Recipient::Sender,
            to: to.to_string(),
        });
    }

    if let Some(to) = package.receiver.email_address() {
        plan.push(PlannedEmail {
            kind: TemplateKind::PackageCreatedReceiver,
            recipient: Recipient::Receiver,
            to: to.to_string(),
        });
    }

    plan
}

/// Status update emails for the given notification class.
#[must_use]
pub fn plan_transition(class: NotificationClass, package: &PackageRecord) -> EmailPlan {
    let mut plan = EmailPlan::new();

    match class {
        NotificationClass::FirstProcessing => {
            if let Some(to) = package.sender.email_address() {
                plan.push(PlannedEmail {
                    kind: TemplateKind::ProcessingConfirmation,
                    recipient: Recipient::Sender,
                    to: to.to_string(),
                });
            }

            if let Some(to) = package.receiver.email_address() {
                plan.push(PlannedEmail {
                    kind: TemplateKind::IncomingPackage,
                    recipient: Recipient::Receiver,
                    to: to.to_string(),
                });
            }
        }
        NotificationClass::RoutineUpdate => {
            if let Some(to) = package.receiver.email_address() {
                plan.push(PlannedEmail {
                    kind: TemplateKind::StatusUpdate,
                    recipient: Recipient::Receiver,
                    to: to.to_string(),
                });
            }
        }
    }

    plan
}

/// Contact form emails: a notice to the company inbox and a confirmation to
/// the visitor.
#[must_use]
pub fn plan_contact(message: &ContactMessageRecord, company_address: &str) -> EmailPlan {
    let mut plan = EmailPlan::new();

    plan.push(PlannedEmail {
        kind: TemplateKind::ContactCompanyNotice,
        recipient: Recipient::Company,
        to: company_address.to_string(),
    });

    plan.push(PlannedEmail {
        kind: TemplateKind::ContactConfirmation,
        recipient: Recipient::Visitor,
        to: message.email.clone(),
    });

    plan
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    settings: NotificationSettings,
}

impl Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("NotificationDispatcher")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl NotificationDispatcher {
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, settings: NotificationSettings) -> Self {
        Self { mailer, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    /// Send the creation emails for a new package.
    pub async fn notify_created(&self, package: &PackageRecord) -> DispatchReport {
        let content = self.package_email(package, "Package Created");

        self.deliver(plan_creation(package), &content, package.tracking_id.as_str())
            .await
    }

    /// Send the emails a committed status update calls for. `status_label`
    /// is the label as submitted, shown verbatim to the receiver.
    pub async fn notify_transition(
        &self,
        class: NotificationClass,
        package: &PackageRecord,
        status_label: &str,
    ) -> DispatchReport {
        let content = self.package_email(package, status_label);

        self.deliver(
            plan_transition(class, package),
            &content,
            package.tracking_id.as_str(),
        )
        .await
    }

    /// Send the contact form notice and confirmation.
    pub async fn notify_contact(&self, message: &ContactMessageRecord) -> DispatchReport {
        let content = ContactEmail {
            company_name: self.settings.company_name.clone(),
            name: message.name.clone(),
            email: message.email.clone(),
            phone: non_blank(&message.phone)
                .unwrap_or(FALLBACK_CONTACT_PHONE)
                .to_string(),
            subject: non_blank(&message.subject)
                .unwrap_or(FALLBACK_CONTACT_SUBJECT)
                .to_string(),
            message: message.message.clone(),
        };

        let reference = message.uuid.to_string();

        self.deliver(
            plan_contact(message, &self.settings.company_address),
            &content,
            &reference,
        )
        .await
    }

    fn package_email(&self, package: &PackageRecord, status_label: &str) -> PackageEmail {
        PackageEmail {
            company_name: self.settings.company_name.clone(),
            tracking_id: package.tracking_id.to_string(),
            sender_name: non_blank(&package.sender.name)
                .unwrap_or(FALLBACK_RECIPIENT_NAME)
                .to_string(),
            receiver_name: non_blank(&package.receiver.name)
                .unwrap_or(FALLBACK_RECIPIENT_NAME)
                .to_string(),
            origin: package.origin.clone(),
            destination: package.destination.clone(),
            description: package.description.clone(),
            weight_kg: package.weight_kg,
            status: status_label.to_string(),
            tracking_url: format!(
                "{}/track?id={}",
                self.settings.tracking_url.trim_end_matches('/'),
                package.tracking_id
            ),
        }
    }

    async fn deliver<C>(&self, plan: EmailPlan, content: &C, reference: &str) -> DispatchReport
    where
        C: EmailContent + Sync,
    {
        let mut report = DispatchReport::default();

        for planned in plan {
            let outcome = match self.send_one(&planned, content).await {
                Ok(message_id) => {
                    info!(
                        reference,
                        template = ?planned.kind,
                        recipient = ?planned.recipient,
                        to = %planned.to,
                        "notification sent"
                    );

                    DeliveryOutcome::Sent { message_id }
                }
                Err(error) => {
                    warn!(
                        reference,
                        template = ?planned.kind,
                        recipient = ?planned.recipient,
                        to = %planned.to,
                        error = %error,
                        "notification failed"
                    );

                    DeliveryOutcome::Failed {
                        error: error.to_string(),
                    }
                }
            };

            report.record(Delivery {
                kind: planned.kind,
                recipient: planned.recipient,
                to: planned.to,
                outcome,
            });
        }

        report
    }

    async fn send_one<C>(
        &self,
        planned: &PlannedEmail,
        content: &C,
    ) -> Result<Option<String>, NotificationError>
    where
        C: EmailContent + Sync,
    {
        let rendered = content.render_email(planned.kind)?;

        let email = OutgoingEmail {
            from: self.settings.from_address.clone(),
            to: planned.to.clone(),
            subject: rendered.subject,
            html: rendered.html,
        };

        self.mailer.send(&email).await
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then_some(trimmed)
}
