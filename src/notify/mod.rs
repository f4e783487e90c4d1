//! Notification layer for announcing a newly observed release
//!
//! The [`Notifier`] renders the configured HTML template and hands the
//! result to a [`transport::MailTransport`]. Everything here is fatal on
//! failure: once a new release has been detected, silently skipping the
//! announcement would defeat the whole watcher.
//!
//! # Modules
//!
//! - [`mailer`]: SMTP transport implementation
//! - [`template`]: mail body rendering
//! - [`transport`]: delivery trait

pub mod mailer;
pub mod template;
pub mod transport;

use std::path::PathBuf;

use semver::Version;
use thiserror::Error;
use tracing::info;

use crate::config::NotifyConfig;
use crate::notify::template::{NotificationPayload, TemplateError};
use crate::notify::transport::{MailTransport, TransportError};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Renders and dispatches the new-release notification
pub struct Notifier<T> {
    transport: T,
    template: PathBuf,
    artifact: String,
    aligned_version: String,
}

impl<T: MailTransport> Notifier<T> {
    pub fn new(transport: T, notify: &NotifyConfig, artifact: &str) -> Self {
        Self {
            transport,
            template: notify.template.clone(),
            artifact: artifact.to_string(),
            aligned_version: notify.aligned_version.clone(),
        }
    }

    /// Announces `new_version` to the configured recipients.
    pub async fn notify(&self, new_version: &Version) -> Result<(), NotifyError> {
        let payload = NotificationPayload {
            new_version: new_version.to_string(),
            aligned_version: self.aligned_version.clone(),
        };
        let body = template::render_notification(&self.template, &payload)?;
        let subject = format!(
            "Action Required: {} new release ({})",
            self.artifact, new_version
        );

        self.transport.send(&subject, &body).await?;
        info!("Dispatched notification for {} {}", self.artifact, new_version);

        Ok(())
    }
}
