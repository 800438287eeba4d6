//! Version identifier parsing - loose semantic versions plus `latest`
//!
//! Supports:
//! - The sentinel: `latest`
//! - Exact: `9.0.0`, including prerelease/build metadata
//! - Loose forms: `v9.0.0`, `=9.0.0`, surrounding whitespace
//!
//! Loose forms canonicalize through [`semver::Version`], so `v9.0.0` and
//! `9.0.0` name the same install directory and registry entry.

use std::fmt;

use semver::Version;

/// A parsed version request: either the `latest` sentinel or a concrete
/// semantic version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// Resolve against the registry's `latest` dist-tag.
    Latest,
    /// An exact, canonicalized version.
    Exact(Version),
}

impl VersionSpec {
    /// Parse a raw identifier. Returns `None` for anything that is neither
    /// `latest` nor a loose semantic version.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed == "latest" {
            return Some(Self::Latest);
        }
        Version::parse(strip_loose_prefix(trimmed))
            .ok()
            .map(Self::Exact)
    }

    /// The canonical identifier: `latest`, or the version's display form.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Exact(v) => write!(f, "{v}"),
        }
    }
}

/// node-semver "loose" tolerance: one leading `=` and/or `v` before the
/// version proper.
fn strip_loose_prefix(s: &str) -> &str {
    let s = s.strip_prefix('=').unwrap_or(s).trim_start();
    s.strip_prefix(['v', 'V']).unwrap_or(s)
}

/// Pick the highest version among a set of install directory names.
///
/// Names that parse as loose semantic versions are ordered by semver
/// precedence. If none parse, falls back to the lexicographically last name
/// so the choice stays deterministic even for a root full of stray
/// directories.
pub fn pick_highest(names: &[String]) -> Option<&str> {
    let best = names
        .iter()
        .filter_map(|n| {
            Version::parse(strip_loose_prefix(n.trim()))
                .ok()
                .map(|v| (v, n))
        })
        .max_by(|(a, _), (b, _)| a.cmp(b));

    match best {
        Some((_, name)) => Some(name.as_str()),
        None => names.iter().max().map(String::as_str),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact() {
        let spec = VersionSpec::parse("9.0.0").unwrap();
        assert_eq!(spec, VersionSpec::Exact(Version::new(9, 0, 0)));
        assert_eq!(spec.canonical(), "9.0.0");
    }

    #[test]
    fn test_parse_latest() {
        assert_eq!(VersionSpec::parse("latest"), Some(VersionSpec::Latest));
        assert_eq!(VersionSpec::parse(" latest "), Some(VersionSpec::Latest));
    }

    #[test]
    fn test_parse_loose_prefixes() {
        assert_eq!(VersionSpec::parse("v9.0.0").unwrap().canonical(), "9.0.0");
        assert_eq!(VersionSpec::parse("V9.0.0").unwrap().canonical(), "9.0.0");
        assert_eq!(VersionSpec::parse("=9.0.0").unwrap().canonical(), "9.0.0");
        assert_eq!(VersionSpec::parse("=v9.0.0").unwrap().canonical(), "9.0.0");
        assert_eq!(
            VersionSpec::parse("  1.2.3  ").unwrap().canonical(),
            "1.2.3"
        );
    }

    #[test]
    fn test_parse_prerelease_and_build() {
        assert_eq!(
            VersionSpec::parse("10.0.0-rc.1").unwrap().canonical(),
            "10.0.0-rc.1"
        );
        assert_eq!(
            VersionSpec::parse("1.2.3+nightly").unwrap().canonical(),
            "1.2.3+nightly"
        );
    }

    #[test]
    fn test_parse_invalid() {
        for raw in ["", "1", "1.2", "1.2.3.4", "banana", "latest!", "v", "9.0.x"] {
            assert_eq!(VersionSpec::parse(raw), None, "should reject {raw:?}");
        }
    }

    #[test]
    fn test_pick_highest_semver_order() {
        let names = vec![
            "1.2.0".to_string(),
            "1.10.0".to_string(),
            "1.3.0".to_string(),
        ];
        // 1.10.0 beats 1.3.0 numerically even though "1.3.0" sorts later as a string
        assert_eq!(pick_highest(&names), Some("1.10.0"));
    }

    #[test]
    fn test_pick_highest_prerelease_before_release() {
        let names = vec!["9.0.0-rc.1".to_string(), "9.0.0".to_string()];
        assert_eq!(pick_highest(&names), Some("9.0.0"));
    }

    #[test]
    fn test_pick_highest_skips_junk_when_possible() {
        let names = vec!["backup".to_string(), "1.2.0".to_string()];
        assert_eq!(pick_highest(&names), Some("1.2.0"));
    }

    #[test]
    fn test_pick_highest_all_junk_is_deterministic() {
        let names = vec!["alpha".to_string(), "zeta".to_string()];
        assert_eq!(pick_highest(&names), Some("zeta"));
    }

    #[test]
    fn test_pick_highest_empty() {
        assert_eq!(pick_highest(&[]), None);
    }
}
