//! Email templates
//!
//! Bodies are askama templates under `templates/email`, each extending the
//! shared layout. Every value is HTML-escaped on output; subjects are plain
//! text.

use askama::Template;

use crate::notifications::errors::TemplateError;

/// Every email the service knows how to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    PackageCreatedSender,
    PackageCreatedReceiver,
    ProcessingConfirmation,
    IncomingPackage,
    StatusUpdate,
    ContactCompanyNotice,
    ContactConfirmation,
}

/// A rendered subject line and HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Something that can fill one or more email templates.
pub trait EmailContent {
    /// Render `kind` from this content.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Unsupported`] when `kind` needs another kind
    /// of content, or [`TemplateError::Render`] when askama fails.
    fn render_email(&self, kind: TemplateKind) -> Result<RenderedEmail, TemplateError>;
}

/// What package emails show about a package.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageEmail {
    pub company_name: String,
    pub tracking_id: String,
    pub sender_name: String,
    pub receiver_name: String,
    pub origin: String,
    pub destination: String,
    pub description: String,
    pub weight_kg: f64,

    /// Status label as staff typed it.
    pub status: String,

    /// Link to the public tracking page for this package.
    pub tracking_url: String,
}

/// What contact form emails show about a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub company_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "email/package_created_sender.html")]
struct PackageCreatedSenderHtml<'a> {
    company_name: &'a str,
    package: &'a PackageEmail,
}

#[derive(Template)]
#[template(path = "email/package_created_receiver.html")]
struct PackageCreatedReceiverHtml<'a> {
    company_name: &'a str,
    package: &'a PackageEmail,
}

#[derive(Template)]
#[template(path = "email/processing_confirmation.html")]
struct ProcessingConfirmationHtml<'a> {
    company_name: &'a str,
    package: &'a PackageEmail,
}

#[derive(Template)]
#[template(path = "email/incoming_package.html")]
struct IncomingPackageHtml<'a> {
    company_name: &'a str,
    package: &'a PackageEmail,
}

#[derive(Template)]
#[template(path = "email/status_update.html")]
struct StatusUpdateHtml<'a> {
    company_name: &'a str,
    package: &'a PackageEmail,
}

#[derive(Template)]
#[template(path = "email/contact_company_notice.html")]
struct ContactCompanyNoticeHtml<'a> {
    company_name: &'a str,
    contact: &'a ContactEmail,
}

#[derive(Template)]
#[template(path = "email/contact_confirmation.html")]
struct ContactConfirmationHtml<'a> {
    company_name: &'a str,
    contact: &'a ContactEmail,
}

impl EmailContent for PackageEmail {
    fn render_email(&self, kind: TemplateKind) -> Result<RenderedEmail, TemplateError> {
        let company_name = self.company_name.as_str();
        let package = self;

        let (subject, html) = match kind {
            TemplateKind::PackageCreatedSender => (
                format!(
                    "Package Created - Package Notification - Tracking ID: {}",
                    self.tracking_id
                ),
                PackageCreatedSenderHtml { company_name, package }.render()?,
            ),
            TemplateKind::PackageCreatedReceiver => (
                format!(
                    "Package Incoming - Package Notification - Tracking ID: {}",
                    self.tracking_id
                ),
                PackageCreatedReceiverHtml { company_name, package }.render()?,
            ),
            TemplateKind::ProcessingConfirmation => (
                "Confirmation that the package is processed".to_string(),
                ProcessingConfirmationHtml { company_name, package }.render()?,
            ),
            TemplateKind::IncomingPackage => (
                "Notification of incoming package".to_string(),
                IncomingPackageHtml { company_name, package }.render()?,
            ),
            TemplateKind::StatusUpdate => (
                "Updated package status".to_string(),
                StatusUpdateHtml { company_name, package }.render()?,
            ),
            TemplateKind::ContactCompanyNotice | TemplateKind::ContactConfirmation => {
                return Err(TemplateError::Unsupported(kind));
            }
        };

        Ok(RenderedEmail { subject, html })
    }
}

impl EmailContent for ContactEmail {
    fn render_email(&self, kind: TemplateKind) -> Result<RenderedEmail, TemplateError> {
        let company_name = self.company_name.as_str();
        let contact = self;

        let (subject, html) = match kind {
            TemplateKind::ContactCompanyNotice => (
                format!("New Contact Form: {} - {}", self.subject, self.name),
                ContactCompanyNoticeHtml { company_name, contact }.render()?,
            ),
            TemplateKind::ContactConfirmation => (
                format!("Thank you for contacting {company_name}"),
                ContactConfirmationHtml { company_name, contact }.render()?,
            ),
            TemplateKind::PackageCreatedSender
            | TemplateKind::PackageCreatedReceiver
            | TemplateKind::ProcessingConfirmation
            | TemplateKind::IncomingPackage
            | TemplateKind::StatusUpdate => return Err(TemplateError::Unsupported(kind)),
        };

        Ok(RenderedEmail { subject, html })
    }
}
