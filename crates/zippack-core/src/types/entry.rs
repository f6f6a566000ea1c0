//! Pending archive entries and their eager validation.

use crate::PackError;
use crate::Result;
use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

/// Kind of filesystem source a [`PendingEntry`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A single regular file.
    File,
    /// A directory, expanded recursively at build time.
    Directory,
}

/// One registered source awaiting archival.
///
/// Entries are validated when registered, not when the archive is built:
/// a `PendingEntry` is only constructed for a source that existed and was
/// readable at registration time. Directory contents are deliberately not
/// captured here; the filesystem state at build time is what gets archived.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    kind: SourceKind,
    source: PathBuf,
    archive_name: Option<String>,
}

impl PendingEntry {
    /// Validates and creates a file entry.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::SourceNotFound`] if `source` does not exist or
    /// is not a regular file, and [`PackError::SourceNotReadable`] if it
    /// cannot be opened.
    pub(crate) fn file(source: &Path, archive_name: Option<String>) -> Result<Self> {
        if !source.is_file() {
            return Err(PackError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        if File::open(source).is_err() {
            return Err(PackError::SourceNotReadable {
                path: source.to_path_buf(),
            });
        }
        Ok(Self {
            kind: SourceKind::File,
            source: source.to_path_buf(),
            archive_name,
        })
    }

    /// Validates and creates a directory entry.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::SourceNotFound`] if `source` is not a
    /// directory, and [`PackError::SourceNotReadable`] if it cannot be
    /// listed.
    pub(crate) fn directory(source: &Path, archive_name: Option<String>) -> Result<Self> {
        if !source.is_dir() {
            return Err(PackError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        if fs::read_dir(source).is_err() {
            return Err(PackError::SourceNotReadable {
                path: source.to_path_buf(),
            });
        }
        Ok(Self {
            kind: SourceKind::Directory,
            source: source.to_path_buf(),
            archive_name,
        })
    }

    /// Returns the kind of this entry.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Returns the filesystem path this entry was registered with.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the caller-supplied in-archive name, if any.
    #[must_use]
    pub fn archive_name(&self) -> Option<&str> {
        self.archive_name.as_deref()
    }

    /// In-archive name for this entry: the caller override when given,
    /// otherwise the source's base name.
    pub(crate) fn effective_name(&self) -> String {
        self.archive_name.clone().unwrap_or_else(|| {
            self.source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }
}
