use crate::error::Result;
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// A finished, fully rendered report together with its fixed output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: &'static str,
    pub text: String,
}

impl Report {
    pub fn new(file_name: &'static str, text: String) -> Self {
        Self { file_name, text }
    }

    /// Report lines, without terminators
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// Destination a rendered report is persisted to.
pub trait ReportSink {
    fn write_report(&self, file_name: &str, contents: &str) -> Result<()>;
}

/// Writes reports as files inside a directory, truncating previous runs.
pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn current_dir() -> Self {
        Self::new(".")
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }
}

impl ReportSink for FileSink {
    fn write_report(&self, file_name: &str, contents: &str) -> Result<()> {
        let path = self.path_for(file_name);
        let mut writer = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)?,
        );
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        info!("Wrote report to {}", path.display());
        Ok(())
    }
}

/// Keeps reports in memory; used by tests and dry runs.
#[derive(Default)]
pub struct InMemorySink {
    written: RefCell<Vec<(String, String)>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<String> {
        self.written
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, contents)| contents.clone())
    }
}

impl ReportSink for InMemorySink {
    fn write_report(&self, file_name: &str, contents: &str) -> Result<()> {
        self.written
            .borrow_mut()
            .push((file_name.to_string(), contents.to_string()));
        Ok(())
    }
}

/// Print the report on stdout, then persist it through `sink`.
///
/// A failed write is reported on stdout and logged; the run carries on.
/// Returns whether the report was persisted.
pub fn publish(report: &Report, sink: &dyn ReportSink) -> bool {
    if report.text.ends_with('\n') {
        print!("{}", report.text);
    } else {
        println!("{}", report.text);
    }

    match sink.write_report(report.file_name, &report.text) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to write {}: {}", report.file_name, e);
            println!("Error writing to file: {}", e);
            false
        }
    }
}

/// Left-justify `value` in a field of `width` characters.
pub fn pad(value: impl std::fmt::Display, width: usize) -> String {
    format!("{:<width$}", value.to_string(), width = width)
}

/// A line of `width` dashes
pub fn separator(width: usize) -> String {
    "-".repeat(width)
}
