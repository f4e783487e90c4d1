//! Durable last-release record.
//!
//! One file, one bare version string. Absence is the expected first-run
//! state, and any read problem degrades to the sentinel: a lost record costs
//! one redundant notification. A failed *write* would instead re-notify on
//! every future run, so save errors are surfaced as fatal.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use semver::Version;
use thiserror::Error;
use tracing::{debug, warn};

use crate::version::ReleaseVersion;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot persist version record to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Storage seam for the last-notified version.
#[cfg_attr(test, automock)]
pub trait VersionStore: Send + Sync {
    /// The record from the previous completed run, or the sentinel when no
    /// prior record exists or it cannot be read. Never fails the run.
    fn load(&self) -> ReleaseVersion;

    /// Persist `version` as the new record. Failure is fatal to the run.
    fn save(&self, version: &Version) -> Result<(), StoreError>;
}

/// File-backed store holding the record as a bare UTF-8 version string.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VersionStore for FileStore {
    fn load(&self) -> ReleaseVersion {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No version record at {:?}, treating as first run", self.path);
                return ReleaseVersion::NONE;
            }
            Err(err) => {
                warn!("Failed to read version record {:?}: {}", self.path, err);
                return ReleaseVersion::NONE;
            }
        };

        match ReleaseVersion::parse(&raw) {
            Some(version) => version,
            None => {
                warn!(
                    "Version record {:?} holds unparseable contents {:?}",
                    self.path,
                    raw.trim()
                );
                ReleaseVersion::NONE
            }
        }
    }

    fn save(&self, version: &Version) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::Write {
                path: self.path.clone(),
                source: err,
            })?;
        }

        fs::write(&self.path, version.to_string()).map_err(|err| StoreError::Write {
            path: self.path.clone(),
            source: err,
        })
    }
}
