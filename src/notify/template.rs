//! Notification mail body rendering

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Cannot read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot render template {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
}

/// Values exposed to the notification template
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    /// The newly observed release version.
    pub new_version: String,
    /// The release the consuming project is currently aligned to.
    pub aligned_version: String,
}

/// Renders the HTML template at `path` with the payload values.
///
/// The file is read at dispatch time, so it only has to exist when a
/// notification actually goes out.
pub fn render_notification(
    path: &Path,
    payload: &NotificationPayload,
) -> Result<String, TemplateError> {
    let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Environment::new()
        .render_str(&source, payload)
        .map_err(|source| TemplateError::Render {
            path: path.to_path_buf(),
            source,
        })
}
