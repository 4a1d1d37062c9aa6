//! Error types for file loading/saving and version synchronization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing a source file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read at all.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are neither valid UTF-8 nor valid GBK.
    #[error("cannot decode {path} as UTF-8 or GBK")]
    Decode { path: PathBuf },

    /// The rewritten text cannot be represented in the file's encoding.
    #[error("cannot encode {path} back to {encoding}")]
    Encode {
        path: PathBuf,
        encoding: &'static str,
    },

    /// The rewritten file could not be saved.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the version synchronizer.
#[derive(Debug, Error)]
pub enum VersionError {
    /// Not a semantic version.
    #[error("invalid version '{0}', expected a semantic version such as 1.0.2")]
    InvalidFormat(String),

    /// Only plain MAJOR.MINOR.PATCH versions can be bumped.
    #[error("cannot increment '{0}', expected MAJOR.MINOR.PATCH")]
    NotIncrementable(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON root is not an object, so there is nowhere to put a version.
    #[error("no version field to update in {path}")]
    MissingVersion { path: PathBuf },
}
