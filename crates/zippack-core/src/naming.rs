//! Archive file name sanitization.

use std::path::Path;

/// File name used when a caller-supplied name sanitizes to nothing.
pub const DEFAULT_ARCHIVE_NAME: &str = "archive.zip";

/// Canonical extension for the archives this crate produces.
pub const ZIP_EXTENSION: &str = "zip";

/// Sanitizes a caller-supplied archive file name.
///
/// Directory components are stripped, with both `/` and `\` treated as
/// separators regardless of platform, so path-traversal fragments never
/// reach the filesystem. An empty remainder (including `.` and `..`) falls
/// back to [`DEFAULT_ARCHIVE_NAME`], and the `.zip` extension is appended
/// unless already present (case-insensitive).
///
/// # Examples
///
/// ```
/// use zippack_core::sanitize_archive_name;
///
/// assert_eq!(sanitize_archive_name("report"), "report.zip");
/// assert_eq!(sanitize_archive_name("../../evil"), "evil.zip");
/// assert_eq!(sanitize_archive_name(""), "archive.zip");
/// ```
#[must_use]
pub fn sanitize_archive_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "." || base == ".." {
        return DEFAULT_ARCHIVE_NAME.to_string();
    }

    let has_zip_extension = Path::new(base)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ZIP_EXTENSION));

    if has_zip_extension {
        base.to_string()
    } else {
        format!("{base}.{ZIP_EXTENSION}")
    }
}
