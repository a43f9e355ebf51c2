use std::{fmt, path::Path, str::FromStr};

use chrono::{DateTime, Local};

use crate::error::ReportError;

/// Output shape of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    PlainText,
    Html,
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    /// Accepts the format names used in settings files and the menu numbers
    /// shown by the console prompt.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plaintext" | "plain" | "text" | "txt" | "1" => Ok(ReportFormat::PlainText),
            "html" | "2" => Ok(ReportFormat::Html),
            _ => Err(ReportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::PlainText => write!(f, "PlainText"),
            ReportFormat::Html => write!(f, "Html"),
        }
    }
}

/// Loads every accepted record of a source file.
pub trait RecordReader<T> {
    /// Reads the file at `path`.
    ///
    /// # Returns
    /// - `Ok(records)` with the accepted records in file order
    /// - `Err(ReportError::NotFound)` when `path` does not exist
    /// - `Err(ReportError::Io)` when the file cannot be read
    fn load(&self, path: &Path) -> Result<Vec<T>, ReportError>;
}

/// Renders a set of records into a report document.
pub trait ReportFormatter<T> {
    /// Timestamp for the next report.
    fn generated_at(&self) -> DateTime<Local> {
        Local::now()
    }

    fn format_at(
        &self,
        items: &[T],
        format: ReportFormat,
        generated_at: &DateTime<Local>,
    ) -> String;

    fn format(&self, items: &[T], format: ReportFormat) -> String {
        self.format_at(items, format, &self.generated_at())
    }
}
