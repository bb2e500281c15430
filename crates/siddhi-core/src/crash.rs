//! Crash reporting.
//!
//! A panic hook appends a report to a fixed file and then hands the panic
//! to whichever hook was installed before it. On the next launch the report
//! is read once and the file removed. Failing to write or read the report
//! is never an error.

use std::backtrace::Backtrace;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::config::StorageConfig;

/// Writes and collects crash reports at a fixed path.
#[derive(Debug, Clone)]
pub struct CrashReporter {
    path: PathBuf,
}

impl CrashReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.crash_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Registers the panic hook, chaining to the one already installed.
    pub fn install(&self) {
        let path = self.path.clone();
        let previous = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "Box<dyn Any>".to_string());
            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string());

            write_report(&path, &render_report(&message, &location));
            previous(info);
        }));
    }

    /// Appends a report for `message` without panicking.
    pub fn record(&self, message: &str) {
        write_report(&self.path, &render_report(message, "recorded"));
    }

    /// Returns the report left by the previous run and deletes it.
    ///
    /// Returns `None` if there is no report or it cannot be read.
    pub fn take_previous_report(&self) -> Option<String> {
        let report = match fs::read_to_string(&self.path) {
            Ok(report) => report,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No crash report read");
                return None;
            }
        };

        if let Err(e) = fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %e, "Could not remove crash report");
        }

        if report.trim().is_empty() {
            None
        } else {
            Some(report)
        }
    }
}

fn render_report(message: &str, location: &str) -> String {
    let thread = std::thread::current();
    format!(
        "=== {} ===\nthread '{}' panicked at {}:\n{}\n\n{}\n",
        Utc::now().to_rfc3339(),
        thread.name().unwrap_or("<unnamed>"),
        location,
        message,
        Backtrace::force_capture()
    )
}

/// Reporting must not disturb the panic in flight, so errors are dropped.
fn write_report(path: &Path, report: &str) {
    let _ = append_report(path, report);
}

fn append_report(path: &Path, report: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(report.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_then_take_once() {
        let temp = TempDir::new().unwrap();
        let reporter = CrashReporter::new(temp.path().join("nested").join("crash.log"));

        reporter.record("disk on fire");
        let report = reporter.take_previous_report().unwrap();
        assert!(report.contains("disk on fire"));
        assert!(!reporter.path().exists());
        assert!(reporter.take_previous_report().is_none());
    }

    #[test]
    fn test_reports_append() {
        let temp = TempDir::new().unwrap();
        let reporter = CrashReporter::new(temp.path().join("crash.log"));

        reporter.record("first");
        reporter.record("second");
        let report = reporter.take_previous_report().unwrap();
        assert!(report.contains("first"));
        assert!(report.contains("second"));
    }

    #[test]
    fn test_unwritable_path_is_ignored() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let reporter = CrashReporter::new(blocker.join("crash.log"));
        reporter.record("lost");
        assert!(reporter.take_previous_report().is_none());
    }
}
