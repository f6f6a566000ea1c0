//! Type-safe building blocks for archive packaging.
//!
//! Validation happens at construction: a [`PendingEntry`] only exists for a
//! source that was present and readable when it was registered, and a
//! [`WritableDir`] only exists for a directory that could be created and
//! written to.

pub mod entry;
pub mod writable_dir;

pub use entry::PendingEntry;
pub use entry::SourceKind;
pub use writable_dir::WritableDir;
