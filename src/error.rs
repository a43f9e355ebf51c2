use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
/// Report error
pub enum ReportError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed row at line {line}: {content}")]
    MalformedRow { line: usize, content: String },

    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Mail error: {0}")]
    Mail(String),
}
