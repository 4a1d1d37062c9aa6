//! The project files that carry a version number, and how to read and
//! rewrite each of them.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::VersionError;

/// Shown when a file exists but has no readable version.
pub const UNKNOWN_VERSION: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    PackageJson,
    TauriConf,
    CargoToml,
}

impl Target {
    /// All targets, in the order they are reported and updated.
    pub const ALL: [Target; 3] = [Target::PackageJson, Target::TauriConf, Target::CargoToml];

    /// Location relative to the project root.
    pub fn relative_path(self) -> &'static str {
        match self {
            Target::PackageJson => "package.json",
            Target::TauriConf => "src-tauri/tauri.conf.json",
            Target::CargoToml => "src-tauri/Cargo.toml",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Target::PackageJson => "package.json",
            Target::TauriConf => "tauri.conf.json",
            Target::CargoToml => "Cargo.toml",
        }
    }

    pub fn path_in(self, root: &Path) -> PathBuf {
        root.join(self.relative_path())
    }

    /// Read this target's version. `Ok(None)` when the field is missing.
    pub fn read_version(self, root: &Path) -> Result<Option<String>, VersionError> {
        let path = self.path_in(root);
        let content = read(&path)?;
        match self {
            Target::PackageJson | Target::TauriConf => {
                let value = parse_json(&path, &content)?;
                Ok(value
                    .get("version")
                    .and_then(Value::as_str)
                    .map(str::to_string))
            }
            Target::CargoToml => {
                Ok(package_version_range(&content).map(|range| content[range].to_string()))
            }
        }
    }

    /// This target's contents with the version replaced by `version`.
    ///
    /// Nothing is written. `Ok(None)` when there is nothing to replace: a
    /// Cargo.toml whose `[package]` has no version of its own (for example
    /// `version.workspace = true`).
    pub fn updated_contents(self, root: &Path, version: &str) -> Result<Option<String>, VersionError> {
        let path = self.path_in(root);
        let content = read(&path)?;
        match self {
            Target::PackageJson | Target::TauriConf => {
                set_json_version(&path, &content, version).map(Some)
            }
            Target::CargoToml => Ok(package_version_range(&content).map(|range| {
                let mut updated = content.clone();
                updated.replace_range(range, version);
                updated
            })),
        }
    }
}

/// A target that exists on disk and the version found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentVersion {
    pub target: Target,
    pub version: Option<String>,
}

impl CurrentVersion {
    pub fn display_version(&self) -> &str {
        self.version.as_deref().unwrap_or(UNKNOWN_VERSION)
    }
}

/// Versions of every target present under `root`. Missing files are skipped.
pub fn current_versions(root: &Path) -> Result<Vec<CurrentVersion>, VersionError> {
    Target::ALL
        .into_iter()
        .filter(|target| target.path_in(root).is_file())
        .map(|target| -> Result<CurrentVersion, VersionError> {
            Ok(CurrentVersion {
                target,
                version: target.read_version(root)?,
            })
        })
        .collect()
}

/// True when all present targets report the same version.
pub fn is_consistent(versions: &[CurrentVersion]) -> bool {
    versions
        .windows(2)
        .all(|pair| pair[0].display_version() == pair[1].display_version())
}

/// Version increments start from package.json, or 1.0.0 without one.
pub fn base_version(versions: &[CurrentVersion]) -> String {
    versions
        .iter()
        .find(|v| v.target == Target::PackageJson)
        .map(|v| v.display_version().to_string())
        .unwrap_or_else(|| "1.0.0".to_string())
}

fn read(path: &Path) -> Result<String, VersionError> {
    fs::read_to_string(path).map_err(|source| VersionError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json(path: &Path, content: &str) -> Result<Value, VersionError> {
    serde_json::from_str(content).map_err(|source| VersionError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrite the top-level `version` key, keeping key order and the presence
/// of a trailing newline.
fn set_json_version(path: &Path, content: &str, version: &str) -> Result<String, VersionError> {
    let mut value = parse_json(path, content)?;
    let Some(object) = value.as_object_mut() else {
        return Err(VersionError::MissingVersion {
            path: path.to_path_buf(),
        });
    };
    object.insert("version".to_string(), Value::String(version.to_string()));

    let mut out = serde_json::to_string_pretty(&value).map_err(|source| VersionError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if content.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

// `version = "..."` at the start of a line, capturing the quoted value.
static VERSION_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*version\s*=\s*"([^"]*)""#).expect("version line pattern is valid")
});

/// Byte range of the version string inside the `[package]` table.
///
/// Only the first `version = "..."` line of `[package]` counts; dependency
/// tables are never looked at.
fn package_version_range(content: &str) -> Option<Range<usize>> {
    let mut in_package = false;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            in_package = is_package_header(trimmed);
            continue;
        }
        if !in_package {
            continue;
        }
        if let Some(value) = VERSION_LINE_REGEX.captures(line).and_then(|caps| caps.get(1)) {
            return Some(start + value.start()..start + value.end());
        }
    }

    None
}

fn is_package_header(trimmed: &str) -> bool {
    trimmed
        .strip_prefix("[package]")
        .is_some_and(|rest| rest.trim().is_empty() || rest.trim_start().starts_with('#'))
}
