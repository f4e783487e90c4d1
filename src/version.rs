//! Version domain: lenient parsing and the "none observed" sentinel.

use std::fmt;

use semver::Version;

/// Parse a version string into a `semver::Version`, normalizing a leading
/// `v` and partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros, so a
/// hand-edited store record such as "1.27" still loads.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "v1.2" -> Version(1, 2, 0)
/// - "1.2.3-rc.1" -> Version(1, 2, 3, rc.1)
pub fn parse_version(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let parts: Vec<&str> = bare.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => bare.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// The latest release observed at a source, or the explicit "none observed"
/// sentinel.
///
/// The sentinel orders below every real version (`None < Some` under the
/// derived ordering), so a first run and a failed fetch both compare as
/// "behind everything" without a magic `0.0.0` default, and the comparison
/// step never needs a special case.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReleaseVersion(Option<Version>);

impl ReleaseVersion {
    /// Sentinel for "no version observed".
    pub const NONE: ReleaseVersion = ReleaseVersion(None);

    pub fn new(version: Version) -> Self {
        ReleaseVersion(Some(version))
    }

    /// Lenient constructor for stored records and operator-supplied input.
    /// Returns `None` for unparseable input, not the sentinel; callers
    /// decide whether that degrades or fails.
    pub fn parse(s: &str) -> Option<Self> {
        parse_version(s).map(ReleaseVersion::new)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn version(&self) -> Option<&Version> {
        self.0.as_ref()
    }

    /// The real version carried by `self` when it is strictly newer than
    /// `other`, `None` otherwise. The sentinel is never newer than anything,
    /// so a `Some` result always holds a real version.
    pub fn newer_than(&self, other: &ReleaseVersion) -> Option<&Version> {
        if self > other { self.0.as_ref() } else { None }
    }
}

impl From<Version> for ReleaseVersion {
    fn from(version: Version) -> Self {
        ReleaseVersion(Some(version))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(version) => version.fmt(f),
            None => f.write_str("none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some((1, 0, 0)))]
    #[case("1.2", Some((1, 2, 0)))]
    #[case("1.2.3", Some((1, 2, 3)))]
    #[case("v1.2.3", Some((1, 2, 3)))]
    #[case(" 1.2.3 ", Some((1, 2, 3)))]
    #[case("v1.28", Some((1, 28, 0)))]
    #[case("not-a-version", None)]
    #[case("", None)]
    #[case("1.2.3.4", None)]
    fn parse_version_normalizes_partial_and_prefixed_forms(
        #[case] input: &str,
        #[case] expected: Option<(u64, u64, u64)>,
    ) {
        let expected = expected.map(|(major, minor, patch)| Version::new(major, minor, patch));
        assert_eq!(parse_version(input), expected);
    }

    #[test]
    fn parse_version_keeps_prerelease_and_build_metadata() {
        let version = parse_version("1.28.0-beta.1+sha.5114f85").unwrap();
        assert_eq!(version.pre.as_str(), "beta.1");
        assert_eq!(version.build.as_str(), "sha.5114f85");
    }

    #[test]
    fn sentinel_orders_below_every_real_version() {
        let zero = ReleaseVersion::parse("0.0.0").unwrap();
        let prerelease = ReleaseVersion::parse("0.0.1-alpha").unwrap();

        assert!(ReleaseVersion::NONE < zero);
        assert!(ReleaseVersion::NONE < prerelease);
        assert_eq!(ReleaseVersion::NONE, ReleaseVersion::NONE);
    }

    #[test]
    fn ordering_follows_semver_precedence() {
        let stable = ReleaseVersion::parse("1.28.0").unwrap();
        let beta = ReleaseVersion::parse("1.28.0-beta").unwrap();
        let older = ReleaseVersion::parse("1.27.0").unwrap();

        assert!(beta < stable);
        assert!(older < beta);
    }

    #[rstest]
    #[case("1.28.0", "1.27.0", Some("1.28.0"))]
    #[case("1.27.0", "1.27.0", None)]
    #[case("1.26.3", "1.27.0", None)]
    fn newer_than_returns_version_only_on_strict_advance(
        #[case] observed: &str,
        #[case] stored: &str,
        #[case] expected: Option<&str>,
    ) {
        let observed = ReleaseVersion::parse(observed).unwrap();
        let stored = ReleaseVersion::parse(stored).unwrap();

        assert_eq!(
            observed.newer_than(&stored).map(Version::to_string),
            expected.map(str::to_string)
        );
    }

    #[test]
    fn newer_than_handles_the_sentinel_on_both_sides() {
        let real = ReleaseVersion::parse("1.29.1").unwrap();

        assert_eq!(
            real.newer_than(&ReleaseVersion::NONE).map(Version::to_string),
            Some("1.29.1".to_string())
        );
        assert_eq!(ReleaseVersion::NONE.newer_than(&real), None);
        assert_eq!(ReleaseVersion::NONE.newer_than(&ReleaseVersion::NONE), None);
    }

    #[test]
    fn display_renders_sentinel_as_none() {
        assert_eq!(ReleaseVersion::NONE.to_string(), "none");
        assert_eq!(ReleaseVersion::parse("1.2.3").unwrap().to_string(), "1.2.3");
    }
}
