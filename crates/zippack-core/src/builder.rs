//! Fluent builder that assembles registered sources into a ZIP archive.

use crate::PackError;
use crate::Result;
use crate::naming::sanitize_archive_name;
use crate::types::PendingEntry;
use crate::types::SourceKind;
use crate::types::WritableDir;
use std::env;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Collects files and directories and packages them into one ZIP archive.
///
/// Sources are validated eagerly when registered and written out in
/// registration order when [`build`](Self::build) runs. The finished
/// archive is materialized as a temporary file in the working directory and
/// is consumed either by [`save_to`](Self::save_to) or by
/// [`download`](Self::download); until one of those runs, the temporary
/// file stays on disk.
///
/// The builder is synchronous and not meant for concurrent use: two builds
/// sharing a working directory and archive name race on the same temporary
/// path, and the last writer wins.
///
/// # Examples
///
/// ```no_run
/// use zippack_core::ZipBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut builder = ZipBuilder::new("backup")?;
/// builder
///     .add_file("config.ini")?
///     .add_file_as("docs/readme.txt", "docs/readme.txt")?
///     .add_dir_as("code", "src")?;
///
/// let saved = builder.save_to("/srv/backups")?;
/// println!("archive saved to {}", saved.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ZipBuilder {
    archive_name: String,
    work_dir: WritableDir,
    entries: Vec<PendingEntry>,
}

impl ZipBuilder {
    /// Creates a builder whose temporary archive lives in the system temp
    /// directory.
    ///
    /// The archive name is sanitized once here (see
    /// [`sanitize_archive_name`]) and reused by every build.
    ///
    /// # Errors
    ///
    /// Returns an environment error if the temp directory is unusable.
    pub fn new(archive_name: &str) -> Result<Self> {
        Self::with_work_dir(archive_name, env::temp_dir())
    }

    /// Creates a builder with an explicit working directory, created
    /// recursively if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::DirCreateFailed`] or
    /// [`PackError::DirNotWritable`] if the working directory cannot be
    /// used.
    pub fn with_work_dir(archive_name: &str, work_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            archive_name: sanitize_archive_name(archive_name),
            work_dir: WritableDir::create(work_dir)?,
            entries: Vec::new(),
        })
    }

    /// Returns the sanitized archive file name.
    #[must_use]
    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    /// Returns the working directory holding the temporary archive.
    #[must_use]
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Returns the number of registered entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Registers a file under its own base name.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::SourceNotFound`] or
    /// [`PackError::SourceNotReadable`] without mutating the entry list.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let entry = PendingEntry::file(path.as_ref(), None)?;
        self.entries.push(entry);
        Ok(self)
    }

    /// Registers a file under a caller-supplied in-archive path.
    ///
    /// # Errors
    ///
    /// Same as [`add_file`](Self::add_file).
    pub fn add_file_as<P: AsRef<Path>>(
        &mut self,
        path: P,
        archive_name: impl Into<String>,
    ) -> Result<&mut Self> {
        let entry = PendingEntry::file(path.as_ref(), Some(archive_name.into()))?;
        self.entries.push(entry);
        Ok(self)
    }

    /// Registers a directory under its own base name. The directory tree is
    /// walked at build time, not now.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::SourceNotFound`] or
    /// [`PackError::SourceNotReadable`] without mutating the entry list.
    pub fn add_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let entry = PendingEntry::directory(path.as_ref(), None)?;
        self.entries.push(entry);
        Ok(self)
    }

    /// Registers a directory under a caller-supplied in-archive base path.
    ///
    /// # Errors
    ///
    /// Same as [`add_dir`](Self::add_dir).
    pub fn add_dir_as<P: AsRef<Path>>(
        &mut self,
        path: P,
        archive_name: impl Into<String>,
    ) -> Result<&mut Self> {
        let entry = PendingEntry::directory(path.as_ref(), Some(archive_name.into()))?;
        self.entries.push(entry);
        Ok(self)
    }

    /// Empties the entry list. The builder stays usable.
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    /// Materializes the registered entries into the temporary archive and
    /// returns its path.
    ///
    /// May be called repeatedly; each call recreates the archive from the
    /// current filesystem state, overwriting any previous one. On failure
    /// the partially written file is removed before the error propagates,
    /// so a failed build never leaves an artifact behind.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::NoEntries`] for an empty entry list,
    /// [`PackError::ArchiveOpen`] if the target file cannot be created,
    /// [`PackError::ArchiveWrite`] if an entry cannot be added, and
    /// [`PackError::ArchiveFinalize`] if the archive cannot be closed.
    pub fn build(&self) -> Result<PathBuf> {
        if self.entries.is_empty() {
            return Err(PackError::NoEntries);
        }

        let target = self.work_dir.join_name(&self.archive_name);
        let file = File::create(&target).map_err(|e| PackError::ArchiveOpen {
            path: target.clone(),
            source: e.into(),
        })?;
        let mut zip = ZipWriter::new(file);

        if let Err(err) = self.write_entries(&mut zip) {
            // Release the handle before unlinking so no partial archive
            // survives a failed build.
            drop(zip);
            let _ = fs::remove_file(&target);
            return Err(err);
        }

        if let Err(source) = zip.finish() {
            let _ = fs::remove_file(&target);
            return Err(PackError::ArchiveFinalize {
                path: target,
                source,
            });
        }

        Ok(target)
    }

    /// Builds the archive and copies it into `dest`, creating the
    /// destination directory if missing. The temporary archive is deleted
    /// (best effort) after a successful copy. Returns the persisted path.
    ///
    /// The destination is validated before the build runs, so an unusable
    /// destination never costs a full archive pass.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::DirCreateFailed`] or
    /// [`PackError::DirNotWritable`] for an unusable destination, any
    /// [`build`](Self::build) error, and [`PackError::Copy`] if the copy
    /// itself fails.
    pub fn save_to(&self, dest: impl Into<PathBuf>) -> Result<PathBuf> {
        let dest = WritableDir::create(dest)?;

        let archive = self.build()?;
        let target = dest.join_name(&self.archive_name);

        fs::copy(&archive, &target).map_err(|source| PackError::Copy {
            from: archive.clone(),
            to: target.clone(),
            source,
        })?;

        // Best effort; the copy already succeeded.
        let _ = fs::remove_file(&archive);

        Ok(target)
    }

    fn write_entries<W: Write + Seek>(&self, zip: &mut ZipWriter<W>) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            let name = entry.effective_name();
            match entry.kind() {
                SourceKind::File => {
                    // In-archive paths are relative, never rooted.
                    let name = name.trim_start_matches(['/', '\\']);
                    let mut file =
                        File::open(entry.source()).map_err(|e| PackError::ArchiveWrite {
                            path: entry.source().to_path_buf(),
                            source: e.into(),
                        })?;
                    write_file_entry(zip, &mut file, entry.source(), name, options)?;
                }
                SourceKind::Directory => {
                    add_directory_tree(zip, entry.source(), &name, options)?;
                }
            }
        }

        Ok(())
    }
}

/// Streams one already-opened file into the archive under `name`.
fn write_file_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    file: &mut File,
    source: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options)
        .map_err(|source_err| PackError::ArchiveWrite {
            path: source.to_path_buf(),
            source: source_err,
        })?;
    io::copy(file, zip).map_err(|e| PackError::ArchiveWrite {
        path: source.to_path_buf(),
        source: e.into(),
    })?;
    Ok(())
}

/// Recursively adds `dir` and its descendants under the in-archive base
/// path `base`.
fn add_directory_tree<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    dir: &Path,
    base: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    // Exactly one trailing separator, no leading one.
    let base = format!("{}/", base.trim_matches(['/', '\\']));

    // Explicit directory entry, so empty directories stay represented.
    zip.add_directory(base.as_str(), options)
        .map_err(|source| PackError::ArchiveWrite {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut children: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| PackError::ArchiveWrite {
            path: dir.to_path_buf(),
            source: e.into(),
        })?
        .filter_map(|child| child.ok().map(|c| c.path()))
        .collect();
    // Enumeration order is filesystem-defined; sort for reproducible
    // archives.
    children.sort();

    for child in children {
        let child_name = child
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if child.is_dir() {
            add_directory_tree(zip, &child, &format!("{base}{child_name}"), options)?;
        } else {
            // Unreadable children are tolerated here, unlike single-file
            // registration; a write failure after a successful open still
            // aborts the build.
            let Ok(mut file) = File::open(&child) else {
                continue;
            };
            write_file_entry(zip, &mut file, &child, &format!("{base}{child_name}"), options)?;
        }
    }

    Ok(())
}
