//! Client-side file checks that run before any network I/O.

use std::path::Path;

use crate::config::FileLimits;
use crate::error::ValidationError;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Metadata of a selected file. Only the name and size are inspected; the
/// contents are never read here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size_bytes: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Stat a file on disk without reading it.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, metadata.len()))
    }
}

/// Lower-cased extension including the leading dot: `Report.PDF` -> `.pdf`.
/// A name without a dot has no extension.
pub fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(format!(".{}", ext.to_lowercase()))
}

/// Accept or reject a file against the configured format allow-list and
/// size ceiling.
///
/// The size check compares `bytes / 1024²` with the ceiling using a strict
/// `>`: a file of exactly the ceiling passes, and "MB" in the message means
/// MiB.
pub fn validate(file: &FileMeta, limits: &FileLimits) -> Result<(), ValidationError> {
    let accepted = extension_of(&file.name).is_some_and(|ext| {
        limits
            .accepted_formats
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
    });
    if !accepted {
        return Err(ValidationError::UnsupportedFormat {
            accepted: limits.accepted_formats.clone(),
        });
    }

    let size_mb = file.size_bytes as f64 / BYTES_PER_MB as f64;
    if size_mb > limits.max_size_mb as f64 {
        return Err(ValidationError::TooLarge {
            max_mb: limits.max_size_mb,
        });
    }

    Ok(())
}
