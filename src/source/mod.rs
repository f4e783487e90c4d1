//! Release source layer for observing the newest published version
//!
//! A source inspects one upstream publication channel and reports the
//! highest release version it can see. Fetch and extraction problems are
//! absorbed here: the rest of the run only ever sees an observation, and
//! "nothing observed" compares below every recorded version.
//!
//! # Modules
//!
//! - [`release_page`]: HTML releases-page source

pub mod release_page;

#[cfg(test)]
use mockall::automock;

use thiserror::Error;

use crate::version::ReleaseVersion;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    BadStatus(reqwest::StatusCode),
}

/// Trait for observing the newest release published on a channel
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Returns the highest release version currently visible on the
    /// channel, or the sentinel when the channel is unreachable or shows
    /// no parseable version. Never fails the run.
    async fn latest_release(&self) -> ReleaseVersion;
}
