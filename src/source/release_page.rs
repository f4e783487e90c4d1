//! HTML releases-page source implementation

use std::time::Duration;

use regex::Regex;
use semver::Version;
use tracing::{debug, warn};

use crate::config::{FETCH_TIMEOUT_MS, USER_AGENT};
use crate::source::{ReleaseSource, SourceError};
use crate::version::ReleaseVersion;

/// Release source that scrapes a public releases page
pub struct ReleasePage {
    client: reqwest::Client,
    url: String,
    include_prerelease: bool,
    tag_re: Regex,
}

impl ReleasePage {
    /// Creates a new ReleasePage source for the given page URL
    pub fn new(url: &str, include_prerelease: bool) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
            url: url.to_string(),
            include_prerelease,
            tag_re: Regex::new(r"<[^>]*>").unwrap(),
        }
    }

    async fn fetch_page(&self) -> Result<String, SourceError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::BadStatus(status));
        }

        Ok(response.text().await?)
    }

    /// Scans the page text for the highest release version.
    ///
    /// Markup is reduced to whitespace-separated tokens first, so versions
    /// survive any change to the page layout as long as they stay in the
    /// visible text.
    fn extract_latest(&self, html: &str) -> ReleaseVersion {
        let text = self.tag_re.replace_all(html, " ");

        let latest = text
            .split_whitespace()
            .filter_map(|token| {
                parse_candidate(token.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            })
            .filter(|version| self.include_prerelease || version.pre.is_empty())
            .max();

        match latest {
            Some(version) => ReleaseVersion::new(version),
            None => {
                warn!("No release versions found on {}", self.url);
                ReleaseVersion::NONE
            }
        }
    }
}

/// Parses one page token as a release version candidate.
///
/// The whole page text is scanned, so only complete `major.minor.patch`
/// forms count. Bare integers and two-part numbers occur all over prose
/// and must never become candidates.
fn parse_candidate(token: &str) -> Option<Version> {
    let bare = token.strip_prefix('v').unwrap_or(token);
    Version::parse(bare).ok()
}

#[async_trait::async_trait]
impl ReleaseSource for ReleasePage {
    async fn latest_release(&self) -> ReleaseVersion {
        let html = match self.fetch_page().await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to fetch release page {}: {}", self.url, e);
                return ReleaseVersion::NONE;
            }
        };

        debug!("Fetched {} bytes from {}", html.len(), self.url);
        self.extract_latest(&html)
    }
}
