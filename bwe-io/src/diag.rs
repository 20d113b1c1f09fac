//! File-backed diagnostic sink
//!
//! Writes one human-readable line per estimator event to
//! `<output_dir>/estimator_output.log`. The file is truncated on open and
//! flushed when the sink is dropped. Write failures are logged once and
//! otherwise ignored.

use bwe_protocol::diag::{DiagnosticEvent, DiagnosticSink, NullSink};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Log file name used inside the output directory
pub const DEFAULT_LOG_FILE_NAME: &str = "estimator_output.log";

/// Diagnostic sink appending lines to a file
pub struct FileSink {
    writer: BufWriter<File>,
    path: PathBuf,
    failed: bool,
}

impl FileSink {
    /// Create `dir` if needed and open `dir/file_name` for writing
    pub fn open(dir: impl AsRef<Path>, file_name: &str) -> io::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        let file = File::create(&path)?;
        tracing::info!(path = %path.display(), "diagnostic log opened");

        Ok(FileSink {
            writer: BufWriter::new(file),
            path,
            failed: false,
        })
    }

    /// Open a file sink, falling back to a [`NullSink`] when that fails
    pub fn open_or_null(dir: impl AsRef<Path>, file_name: &str) -> Box<dyn DiagnosticSink> {
        let dir = dir.as_ref();
        match Self::open(dir, file_name) {
            Ok(sink) => Box::new(sink),
            Err(e) => {
                tracing::warn!(
                    dir = %dir.display(),
                    error = %e,
                    "failed to open diagnostic log, diagnostics disabled"
                );
                Box::new(NullSink)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_event(&mut self, event: &DiagnosticEvent) -> io::Result<()> {
        writeln!(self.writer, "{}", event)?;
        if event.is_flush_point() {
            self.writer.flush()?;
        }
        Ok(())
    }
}

impl DiagnosticSink for FileSink {
    fn record(&mut self, event: &DiagnosticEvent) {
        if let Err(e) = self.write_event(event) {
            if !self.failed {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to write diagnostic log"
                );
                self.failed = true;
            }
        }
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::debug!(
                path = %self.path.display(),
                error = %e,
                "failed to flush diagnostic log on close"
            );
        }
    }
}
