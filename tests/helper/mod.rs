//! Check cycle test utilities

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use release_watch::config::NotifyConfig;
use release_watch::notify::Notifier;
use release_watch::notify::transport::{MailTransport, TransportError};

/// One mail captured by [`RecordingTransport`]
#[derive(Debug, Clone)]
pub struct SentMail {
    pub subject: String,
    pub body: String,
}

/// Mail transport that records every dispatched mail instead of sending it
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<SentMail>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, subject: &str, html_body: &str) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(SentMail {
            subject: subject.to_string(),
            body: html_body.to_string(),
        });
        Ok(())
    }
}

/// Mail transport that refuses every dispatch
pub struct FailingTransport;

#[async_trait]
impl MailTransport for FailingTransport {
    async fn send(&self, _subject: &str, _html_body: &str) -> Result<(), TransportError> {
        Err(TransportError::NoRecipients)
    }
}

/// Create a notifier whose template lives in the given temp dir
pub fn create_test_notifier<T: MailTransport>(temp_dir: &TempDir, transport: T) -> Notifier<T> {
    let template = temp_dir.path().join("notification.html");
    std::fs::write(
        &template,
        "<p>New: {{ new_version }}, aligned: {{ aligned_version }}</p>",
    )
    .unwrap();

    Notifier::new(
        transport,
        &NotifyConfig {
            template,
            aligned_version: "1.27.0".to_string(),
        },
        "Kubernetes",
    )
}
