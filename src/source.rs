//! Loading and saving of source files.
//!
//! Files are read as UTF-8 and, failing that, as GBK. They are written back in
//! the encoding they were read with, through a temporary file in the same
//! directory that is renamed over the original.

use std::fs;
use std::io::Write;
use std::path::Path;

use encoding_rs::{Encoding, GBK, UTF_8};
use tempfile::NamedTempFile;

use crate::error::SourceError;

/// A decoded text file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub text: String,
    pub encoding: &'static Encoding,
}

/// Decode `bytes` as UTF-8, falling back to GBK.
pub fn decode(bytes: &[u8]) -> Option<(String, &'static Encoding)> {
    [UTF_8, GBK].into_iter().find_map(|encoding| {
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| (text.into_owned(), encoding))
    })
}

pub fn load(path: &Path) -> Result<SourceFile, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (text, encoding) = decode(&bytes).ok_or_else(|| SourceError::Decode {
        path: path.to_path_buf(),
    })?;

    Ok(SourceFile {
        text,
        encoding,
    })
}

/// Replace the contents of `path` with `text`, atomically.
pub fn store(path: &Path, text: &str, encoding: &'static Encoding) -> Result<(), SourceError> {
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(SourceError::Encode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }

    let write_err = |source| SourceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // The temp file is created owner-only; keep the original mode instead.
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}
