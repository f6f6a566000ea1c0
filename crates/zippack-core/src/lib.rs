//! Collects files and directories into a ZIP archive for download or
//! persistence.
//!
//! `zippack-core` provides a small, synchronous builder: register files and
//! directories (validated eagerly), build a temporary ZIP archive in a
//! working directory, then either stream it to an HTTP-style response sink
//! as an attachment download or copy it into a destination directory.
//!
//! # Examples
//!
//! ```no_run
//! use zippack_core::ZipBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = ZipBuilder::new("backup")?;
//! builder.add_file("config.ini")?.add_dir_as("code", "src")?;
//!
//! let saved = builder.save_to("backups")?;
//! println!("saved {}", saved.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod delivery;
pub mod error;
pub mod naming;
pub mod types;

// Re-export main API types
pub use builder::ZipBuilder;
pub use delivery::ResponseSink;
pub use delivery::ZIP_MIME_TYPE;
pub use error::PackError;
pub use error::Result;
pub use naming::DEFAULT_ARCHIVE_NAME;
pub use naming::sanitize_archive_name;

// Re-export types module for easier access
pub use types::PendingEntry;
pub use types::SourceKind;
pub use types::WritableDir;
