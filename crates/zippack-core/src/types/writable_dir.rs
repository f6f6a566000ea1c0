//! Validated writable directory type.

use crate::PackError;
use crate::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// A directory validated to exist (created if missing) and be writable.
///
/// Used both for the working directory that holds the temporary archive and
/// for the destination directory of a persist operation. Once constructed,
/// a `WritableDir` holds an absolute canonical path to a directory that was
/// writable at validation time.
///
/// # Examples
///
/// ```no_run
/// use zippack_core::WritableDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let work = WritableDir::create("/tmp/zippack")?;
/// println!("working in {}", work.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritableDir(PathBuf);

impl WritableDir {
    /// Validates `path` as a writable directory, creating it (recursively)
    /// if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::DirCreateFailed`] if the directory is missing
    /// and cannot be created (or the path names a non-directory), and
    /// [`PackError::DirNotWritable`] if the directory exists but the
    /// current process may not write to it.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.is_dir() {
            fs::create_dir_all(&path).map_err(|source| PackError::DirCreateFailed {
                path: path.clone(),
                source,
            })?;
        }

        let canonical = path.canonicalize().map_err(|source| PackError::DirCreateFailed {
            path: path.clone(),
            source,
        })?;

        // Check effective write permission with access(2) rather than by
        // reading permission bits, so ACLs and ownership are honored.
        #[cfg(unix)]
        {
            use std::ffi::CString;
            use std::os::unix::ffi::OsStrExt;

            let path_cstring =
                CString::new(canonical.as_os_str().as_bytes()).map_err(|_| {
                    PackError::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "path contains null byte",
                    ))
                })?;

            // SAFETY: access() is safe to call with a valid C string.
            // The pointer is valid for the duration of the call, and the
            // call neither retains nor modifies the string.
            #[allow(unsafe_code)]
            let result = unsafe { libc::access(path_cstring.as_ptr(), libc::W_OK) };

            if result != 0 {
                return Err(PackError::DirNotWritable { path: canonical });
            }
        }

        Ok(Self(canonical))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a bare file name to this directory.
    ///
    /// Intended for names that have already been sanitized; the name is
    /// joined as-is.
    #[inline]
    #[must_use]
    pub fn join_name(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
