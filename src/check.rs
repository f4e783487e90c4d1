//! One complete check cycle: observe, compare, announce, record

use semver::Version;
use thiserror::Error;
use tracing::{debug, info};

use crate::notify::transport::MailTransport;
use crate::notify::{Notifier, NotifyError};
use crate::source::ReleaseSource;
use crate::store::{StoreError, VersionStore};
use crate::version::ReleaseVersion;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// What a completed check cycle did
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Nothing newer than the record was observed.
    UpToDate {
        observed: ReleaseVersion,
        stored: ReleaseVersion,
    },
    /// A newer release was observed and the notification went out.
    Notified {
        previous: ReleaseVersion,
        new: Version,
    },
}

/// Runs one check cycle against the given source, store and notifier.
///
/// The notification is dispatched before the record is written. A crash in
/// between re-announces the same release on the next run; the opposite
/// order could lose the announcement for good.
pub async fn run_check<S, V, T>(
    source: &S,
    store: &V,
    notifier: &Notifier<T>,
) -> Result<Outcome, CheckError>
where
    S: ReleaseSource,
    V: VersionStore,
    T: MailTransport,
{
    let stored = store.load();
    let observed = source.latest_release().await;
    debug!("Observed {}, recorded {}", observed, stored);

    let Some(new_version) = observed.newer_than(&stored) else {
        info!("No new release (observed {}, recorded {})", observed, stored);
        return Ok(Outcome::UpToDate { observed, stored });
    };

    notifier.notify(new_version).await?;
    store.save(new_version)?;
    info!("Recorded {} as the last announced release", new_version);

    Ok(Outcome::Notified {
        new: new_version.clone(),
        previous: stored,
    })
}
