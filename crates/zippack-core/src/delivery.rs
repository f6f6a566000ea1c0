//! Streaming the built archive to an HTTP-style response.

use crate::PackError;
use crate::Result;
use crate::builder::ZipBuilder;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;

/// MIME type emitted for ZIP downloads.
pub const ZIP_MIME_TYPE: &str = "application/zip";

/// Response-side collaborator for [`ZipBuilder::download`].
///
/// Implementations adapt whatever mechanism actually serves the request: a
/// web framework response object, a CGI-style stdout, a test buffer. The
/// builder drives the sink in a fixed order: [`discard_buffered`]
/// (once), [`header`] (several times), [`body`] (once), [`finish`] (once,
/// only after a successful stream).
///
/// [`discard_buffered`]: Self::discard_buffered
/// [`header`]: Self::header
/// [`body`]: Self::body
/// [`finish`]: Self::finish
pub trait ResponseSink {
    /// Discards any response output buffered before the download began, so
    /// the archive bytes are not preceded by stray output.
    fn discard_buffered(&mut self);

    /// Sets one response header.
    fn header(&mut self, name: &str, value: &str);

    /// Streams the archive body from `reader` to the client. Returns the
    /// number of bytes sent.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the stream is interrupted.
    fn body(&mut self, reader: &mut dyn Read) -> io::Result<u64>;

    /// Terminates the response. No further output may be written to this
    /// sink afterwards.
    fn finish(&mut self);
}

impl ZipBuilder {
    /// Builds the archive and streams it to `sink` as an attachment
    /// download, deleting the temporary file after a successful stream.
    ///
    /// Emits `Content-Type`, `Content-Disposition` (with the sanitized
    /// archive name), `Content-Length`, and cache-disabling headers before
    /// the body.
    ///
    /// This call is terminal for the request-handling path: once it
    /// returns `Ok`, the response has been finished and the caller must
    /// not emit further output. Treat it as the last action of the
    /// request, the way a handler would treat an explicit process exit.
    ///
    /// # Errors
    ///
    /// Returns any [`build`](Self::build) error,
    /// [`PackError::ArchiveMissing`] if the temporary file vanished
    /// between build and stream, and [`PackError::Stream`] if streaming
    /// was interrupted. Failure to delete the temporary file afterwards is
    /// ignored.
    pub fn download(&self, sink: &mut dyn ResponseSink) -> Result<()> {
        self.download_with(sink, true)
    }

    /// Same as [`download`](Self::download), with explicit control over
    /// whether the temporary archive is deleted after a successful stream.
    ///
    /// # Errors
    ///
    /// See [`download`](Self::download).
    pub fn download_with(&self, sink: &mut dyn ResponseSink, delete_after: bool) -> Result<()> {
        let archive = self.build()?;

        // Defensive: the file could vanish between build and stream.
        let size = match fs::metadata(&archive) {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(PackError::ArchiveMissing { path: archive }),
        };

        sink.discard_buffered();
        sink.header("Content-Type", ZIP_MIME_TYPE);
        sink.header(
            "Content-Disposition",
            &format!("attachment; filename=\"{}\"", self.archive_name()),
        );
        sink.header("Content-Length", &size.to_string());
        sink.header("Cache-Control", "no-cache, must-revalidate");
        sink.header("Pragma", "no-cache");
        sink.header("Expires", "0");

        let mut file = File::open(&archive).map_err(|source| PackError::Stream {
            path: archive.clone(),
            source,
        })?;
        sink.body(&mut file).map_err(|source| PackError::Stream {
            path: archive.clone(),
            source,
        })?;

        if delete_after {
            // Best effort; the client already has the bytes.
            let _ = fs::remove_file(&archive);
        }

        sink.finish();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Default)]
    struct MemorySink {
        discarded: bool,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
        finished: bool,
    }

    impl ResponseSink for MemorySink {
        fn discard_buffered(&mut self) {
            self.discarded = true;
        }

        fn header(&mut self, name: &str, value: &str) {
            self.headers.push((name.to_string(), value.to_string()));
        }

        fn body(&mut self, reader: &mut dyn Read) -> io::Result<u64> {
            io::copy(reader, &mut self.body)
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    impl MemorySink {
        fn header_value(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        }
    }

    fn builder_with_one_file(work: &TempDir, src: &TempDir) -> ZipBuilder {
        fs::write(src.path().join("readme.txt"), "hello").unwrap();
        let mut builder = ZipBuilder::with_work_dir("report", work.path()).unwrap();
        builder.add_file(src.path().join("readme.txt")).unwrap();
        builder
    }

    #[test]
    fn test_download_sets_headers() {
        let work = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        let builder = builder_with_one_file(&work, &src);

        let mut sink = MemorySink::default();
        builder.download(&mut sink).unwrap();

        assert!(sink.discarded);
        assert!(sink.finished);
        assert_eq!(sink.header_value("Content-Type"), Some(ZIP_MIME_TYPE));
        assert_eq!(
            sink.header_value("Content-Disposition"),
            Some(r#"attachment; filename="report.zip""#)
        );
        assert_eq!(
            sink.header_value("Content-Length"),
            Some(sink.body.len().to_string().as_str())
        );
        assert_eq!(
            sink.header_value("Cache-Control"),
            Some("no-cache, must-revalidate")
        );
        assert_eq!(sink.header_value("Pragma"), Some("no-cache"));
        assert_eq!(sink.header_value("Expires"), Some("0"));
    }

    #[test]
    fn test_download_streams_archive_bytes() {
        let work = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        let builder = builder_with_one_file(&work, &src);

        let mut sink = MemorySink::default();
        builder.download(&mut sink).unwrap();

        assert_eq!(&sink.body[0..4], b"PK\x03\x04");
    }

    #[test]
    fn test_download_deletes_temp_file_by_default() {
        let work = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        let builder = builder_with_one_file(&work, &src);

        let mut sink = MemorySink::default();
        builder.download(&mut sink).unwrap();

        assert!(!work.path().join("report.zip").exists());
    }

    #[test]
    fn test_download_can_keep_temp_file() {
        let work = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        let builder = builder_with_one_file(&work, &src);

        let mut sink = MemorySink::default();
        builder.download_with(&mut sink, false).unwrap();

        let kept = work.path().join("report.zip");
        assert!(kept.is_file());
        assert_eq!(fs::read(kept).unwrap(), sink.body);
    }

    #[test]
    fn test_download_stream_failure() {
        struct BrokenSink;

        impl ResponseSink for BrokenSink {
            fn discard_buffered(&mut self) {}
            fn header(&mut self, _name: &str, _value: &str) {}
            fn body(&mut self, _reader: &mut dyn Read) -> io::Result<u64> {
                Err(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "client went away",
                ))
            }
            fn finish(&mut self) {}
        }

        let work = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        let builder = builder_with_one_file(&work, &src);

        let result = builder.download(&mut BrokenSink);
        assert!(matches!(result, Err(PackError::Stream { .. })));

        // An interrupted stream does not delete the archive.
        assert!(work.path().join("report.zip").is_file());
    }
}
