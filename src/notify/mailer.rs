//! SMTP mail transport implementation

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::{SMTP_PASSWORD_ENV, SmtpConfig, TlsMode};
use crate::notify::transport::{MailTransport, TransportError};

/// Mail transport that delivers through a configured SMTP server.
///
/// The configuration is only validated when a mail actually has to go out,
/// so runs that find nothing new complete without any SMTP settings.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, subject: &str, html_body: &str) -> Result<Message, TransportError> {
        if self.config.recipients.is_empty() {
            return Err(TransportError::NoRecipients);
        }

        let mut builder = Message::builder()
            .from(parse_mailbox(&self.config.from)?)
            .subject(subject)
            .header(ContentType::TEXT_HTML);

        for recipient in &self.config.recipients {
            builder = builder.to(parse_mailbox(recipient)?);
        }

        Ok(builder.body(html_body.to_string())?)
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportError> {
        let mut builder = match self.config.tls {
            TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?,
            TlsMode::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            }
            TlsMode::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.host)
            }
        };

        if let Some(port) = self.config.port {
            builder = builder.port(port);
        }

        if let Some(username) = &self.config.username {
            let password = std::env::var(SMTP_PASSWORD_ENV)
                .map_err(|_| TransportError::MissingPassword(SMTP_PASSWORD_ENV))?;
            builder = builder.credentials(Credentials::new(username.clone(), password));
        }

        Ok(builder.build())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address.parse().map_err(|source| TransportError::Address {
        address: address.to_string(),
        source,
    })
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, subject: &str, html_body: &str) -> Result<(), TransportError> {
        let message = self.build_message(subject, html_body)?;
        let transport = self.build_transport()?;

        transport.send(message).await?;
        debug!(
            "Mail accepted by {} for {} recipients",
            self.config.host,
            self.config.recipients.len()
        );

        Ok(())
    }
}
