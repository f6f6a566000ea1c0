//! Error conversion utilities for CLI.
//!
//! Converts zippack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use zippack_core::PackError;

/// Converts `PackError` to a user-friendly anyhow error with context.
pub fn convert_pack_error(err: PackError) -> anyhow::Error {
    match err {
        PackError::SourceNotFound { path } => {
            anyhow!(
                "Source does not exist: {}\n\
                 HINT: Check the path for typos; files and directories are both accepted.",
                path.display()
            )
        }
        PackError::SourceNotReadable { path } => {
            anyhow!(
                "Source cannot be read: {}\n\
                 HINT: Check the file permissions for the current user.",
                path.display()
            )
        }
        PackError::NoEntries => {
            anyhow!("Nothing to pack: no sources were registered.")
        }
        PackError::DirCreateFailed { path, source } => {
            anyhow!(
                "Cannot create directory '{}': {}\n\
                 HINT: Pick a directory the current user may write to.",
                path.display(),
                source
            )
        }
        PackError::DirNotWritable { path } => {
            anyhow!(
                "Directory is not writable: {}\n\
                 HINT: Pick a directory the current user may write to.",
                path.display()
            )
        }
        PackError::ArchiveWrite { path, source } => {
            anyhow!(
                "Failed to add '{}' to the archive: {}\n\
                 HINT: The source may have changed or disappeared since it was registered.",
                path.display(),
                source
            )
        }
        _ => anyhow::Error::from(err).context("Failed to create archive"),
    }
}
