//! Error types for archive packaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while registering sources, building the archive,
/// or consuming it.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A registered source does not exist or is not of the expected kind.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The path that was registered.
        path: PathBuf,
    },

    /// A registered source exists but cannot be read.
    #[error("source not readable: {path}")]
    SourceNotReadable {
        /// The path that was registered.
        path: PathBuf,
    },

    /// `build()` was called with an empty entry list.
    #[error("no files or directories registered")]
    NoEntries,

    /// A working or destination directory is missing and could not be
    /// created.
    #[error("failed to create directory {path}: {source}")]
    DirCreateFailed {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A working or destination directory is not writable.
    #[error("directory is not writable: {path}")]
    DirNotWritable {
        /// The directory that failed the writability check.
        path: PathBuf,
    },

    /// The archive file could not be created in the working directory.
    #[error("failed to create archive {path}: {source}")]
    ArchiveOpen {
        /// The target archive path.
        path: PathBuf,
        /// The underlying codec error.
        #[source]
        source: zip::result::ZipError,
    },

    /// A source could not be written into the archive.
    #[error("failed to add {path} to archive: {source}")]
    ArchiveWrite {
        /// The source that failed to be archived.
        path: PathBuf,
        /// The underlying codec error.
        #[source]
        source: zip::result::ZipError,
    },

    /// The archive could not be finalized.
    #[error("failed to finish archive {path}: {source}")]
    ArchiveFinalize {
        /// The target archive path.
        path: PathBuf,
        /// The underlying codec error.
        #[source]
        source: zip::result::ZipError,
    },

    /// The built archive vanished before it could be delivered.
    #[error("archive file missing: {path}")]
    ArchiveMissing {
        /// The expected archive path.
        path: PathBuf,
    },

    /// Streaming the archive to the response was interrupted.
    #[error("failed to stream archive {path}: {source}")]
    Stream {
        /// The archive being streamed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The archive could not be copied to its destination.
    #[error("failed to copy archive {from} to {to}: {source}")]
    Copy {
        /// The temporary archive path.
        from: PathBuf,
        /// The destination path.
        to: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PackError {
    /// Returns `true` if this error was caused by invalid caller input:
    /// a missing or unreadable source, or an empty entry list.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use zippack_core::PackError;
    ///
    /// let err = PackError::SourceNotFound {
    ///     path: PathBuf::from("missing.txt"),
    /// };
    /// assert!(err.is_invalid_input());
    ///
    /// let err = PackError::NoEntries;
    /// assert!(err.is_invalid_input());
    /// ```
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::SourceNotReadable { .. } | Self::NoEntries
        )
    }

    /// Returns `true` if this error means a working or destination
    /// directory is unusable. These errors are fatal for the builder:
    /// retrying without fixing the environment cannot succeed.
    #[must_use]
    pub const fn is_environment(&self) -> bool {
        matches!(
            self,
            Self::DirCreateFailed { .. } | Self::DirNotWritable { .. }
        )
    }

    /// Returns the source path this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::SourceNotFound { path }
            | Self::SourceNotReadable { path }
            | Self::DirCreateFailed { path, .. }
            | Self::DirNotWritable { path }
            | Self::ArchiveOpen { path, .. }
            | Self::ArchiveWrite { path, .. }
            | Self::ArchiveFinalize { path, .. }
            | Self::ArchiveMissing { path }
            | Self::Stream { path, .. } => Some(path),
            Self::Copy { from, .. } => Some(from),
            Self::Io(_) | Self::NoEntries => None,
        }
    }
}
