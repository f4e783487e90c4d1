//! Mail transport trait for dispatching rendered notifications

#[cfg(test)]
use mockall::automock;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid mail address {address}: {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("No recipients configured")]
    NoRecipients,

    #[error("Missing SMTP password: set {0}")]
    MissingPassword(&'static str),

    #[error("Malformed message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Trait for delivering one rendered notification mail
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    /// Delivers the mail to every configured recipient.
    ///
    /// Must only return `Ok` once the message has been accepted for
    /// delivery; the caller records the release as notified afterwards.
    async fn send(&self, subject: &str, html_body: &str) -> Result<(), TransportError>;
}
