//! Email notifications

mod dispatcher;
mod errors;
mod mailer;
mod templates;

pub use dispatcher::*;
pub use errors::*;
pub use mailer::*;
pub use templates::{ContactEmail, EmailContent, PackageEmail, RenderedEmail, TemplateKind};
