//! Semantic version validation and increments.

use std::fmt;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;

use crate::error::VersionError;

// MAJOR.MINOR.PATCH with optional pre-release and build metadata.
static SEMVER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+(-[a-zA-Z0-9.-]+)?(\+[a-zA-Z0-9.-]+)?$")
        .expect("semver pattern is valid")
});

pub fn is_valid(version: &str) -> bool {
    SEMVER_REGEX.is_match(version)
}

/// Return `version` unchanged if it is a semantic version.
pub fn validate(version: &str) -> Result<&str, VersionError> {
    if is_valid(version) {
        Ok(version)
    } else {
        Err(VersionError::InvalidFormat(version.to_string()))
    }
}

/// Which component to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Bump {
    /// Breaking changes: X+1.0.0
    Major,
    /// New features: X.Y+1.0
    Minor,
    /// Bug fixes: X.Y.Z+1
    Patch,
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bump::Major => write!(f, "major"),
            Bump::Minor => write!(f, "minor"),
            Bump::Patch => write!(f, "patch"),
        }
    }
}

/// Increment a plain `MAJOR.MINOR.PATCH` version.
///
/// Versions with pre-release or build suffixes are rejected rather than
/// guessed at.
pub fn bump(version: &str, kind: Bump) -> Result<String, VersionError> {
    let not_incrementable = || VersionError::NotIncrementable(version.to_string());

    let parts: Vec<&str> = version.split('.').collect();
    let &[major, minor, patch] = parts.as_slice() else {
        return Err(not_incrementable());
    };

    let parse = |part: &str| {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_incrementable());
        }
        part.parse::<u64>().map_err(|_| not_incrementable())
    };
    let (mut major, mut minor, mut patch) = (parse(major)?, parse(minor)?, parse(patch)?);

    match kind {
        Bump::Major => {
            major = major.checked_add(1).ok_or_else(not_incrementable)?;
            minor = 0;
            patch = 0;
        }
        Bump::Minor => {
            minor = minor.checked_add(1).ok_or_else(not_incrementable)?;
            patch = 0;
        }
        Bump::Patch => {
            patch = patch.checked_add(1).ok_or_else(not_incrementable)?;
        }
    }

    Ok(format!("{major}.{minor}.{patch}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_semantic_versions() {
        for v in ["1.0.2", "0.0.0", "10.20.30", "1.0.0-beta.1", "1.0.0+build.5", "2.1.0-rc.1+sha.abc"] {
            assert!(is_valid(v), "{v}");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for v in ["", "1", "1.0", "v1.0.0", "1.0.0.0", "1.0.0-", "1.0.0 ", "a.b.c"] {
            assert!(!is_valid(v), "{v:?}");
        }
        assert!(matches!(validate("1.0"), Err(VersionError::InvalidFormat(_))));
    }

    #[test]
    fn bumps_each_component() {
        assert_eq!(bump("1.2.3", Bump::Major).unwrap(), "2.0.0");
        assert_eq!(bump("1.2.3", Bump::Minor).unwrap(), "1.3.0");
        assert_eq!(bump("1.2.3", Bump::Patch).unwrap(), "1.2.4");
        assert_eq!(bump("0.9.9", Bump::Patch).unwrap(), "0.9.10");
    }

    #[test]
    fn refuses_to_bump_non_plain_versions() {
        for v in ["1.0.0-beta", "1.0", "unknown", "1..0", "1.0.x"] {
            assert!(
                matches!(bump(v, Bump::Patch), Err(VersionError::NotIncrementable(_))),
                "{v}"
            );
        }
    }
}
