//! # Settings
//!
//! Settings come from a JSON file with two sections, `app` and `email`.
//! The PascalCase layout (`AppSettings`/`EmailSettings`, `CsvFilePath`, ...)
//! is accepted as well. Missing keys take their defaults, unknown keys are
//! rejected, then `BOOK_REPORT_*` environment variables override whatever
//! the file says.
//!
//! ```
//! use book_report_rs::config::Settings;
//!
//! let settings = Settings::from_json(r#"{
//!     "app": { "csv_file_path": "./data/books.csv", "default_output_format": "html" },
//!     "email": { "smtp_server": "smtp.example.com" }
//! }"#).unwrap();
//!
//! assert_eq!(settings.app.csv_file_path.to_str(), Some("./data/books.csv"));
//! assert_eq!(settings.email.smtp_port, 587);
//! ```

use std::{fs, path::Path, path::PathBuf, str::FromStr};

use log::debug;
use serde::Deserialize;

use crate::{core::item::ReportFormat, error::ReportError};

/// Prefix of every environment variable read by `Settings::apply_env`.
pub const ENV_PREFIX: &str = "BOOK_REPORT_";

/// Everything the binary needs to wire a report job.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[serde(alias = "AppSettings")]
    pub app: AppSettings,
    #[serde(alias = "EmailSettings")]
    pub email: EmailSettings,
}

/// Input and behavior of the report run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppSettings {
    #[serde(alias = "CsvFilePath")]
    pub csv_file_path: PathBuf,
    /// Format name; the user is asked when unset.
    #[serde(alias = "DefaultOutputFormat")]
    pub default_output_format: Option<String>,
    #[serde(alias = "AutoSendEmail")]
    pub auto_send_email: bool,
    /// Where to save the rendered report, if anywhere.
    #[serde(alias = "OutputPath")]
    pub output_path: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            csv_file_path: PathBuf::from("./books.csv"),
            default_output_format: None,
            auto_send_email: false,
            output_path: None,
        }
    }
}

impl AppSettings {
    /// Parses the configured format name.
    ///
    /// # Errors
    /// `ReportError::UnsupportedFormat` when the name is not a known format.
    pub fn default_format(&self) -> Result<Option<ReportFormat>, ReportError> {
        match self.default_output_format.as_deref() {
            None => Ok(None),
            Some(name) if name.trim().is_empty() => Ok(None),
            Some(name) => ReportFormat::from_str(name).map(Some),
        }
    }
}

/// SMTP coordinates. Validation happens when the transport is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailSettings {
    #[serde(alias = "SmtpServer")]
    pub smtp_server: String,
    #[serde(alias = "SmtpPort")]
    pub smtp_port: u16,
    #[serde(alias = "SenderEmail")]
    pub sender_email: String,
    #[serde(alias = "SenderPassword")]
    pub sender_password: String,
    #[serde(alias = "RecipientEmail")]
    pub recipient_email: String,
    #[serde(alias = "EnableTls", alias = "EnableSsl")]
    pub enable_tls: bool,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_server: String::new(),
            smtp_port: 587,
            sender_email: String::new(),
            sender_password: String::new(),
            recipient_email: String::new(),
            enable_tls: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        serde_json::from_str(json)
            .map_err(|e| ReportError::Configuration(format!("Invalid settings: {}", e)))
    }

    /// Reads settings from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ReportError::Configuration(format!(
                "Unable to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded settings from {}", path.display());
        Self::from_json(&json)
    }

    /// Applies `BOOK_REPORT_*` variables from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ReportError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by full variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(value) = var("CSV_FILE_PATH") {
            self.app.csv_file_path = PathBuf::from(value);
        }
        if let Some(value) = var("DEFAULT_OUTPUT_FORMAT") {
            self.app.default_output_format = Some(value);
        }
        if let Some(value) = var("AUTO_SEND_EMAIL") {
            self.app.auto_send_email = parse_bool("AUTO_SEND_EMAIL", &value)?;
        }
        if let Some(value) = var("OUTPUT_PATH") {
            self.app.output_path = Some(PathBuf::from(value));
        }
        if let Some(value) = var("SMTP_SERVER") {
            self.email.smtp_server = value;
        }
        if let Some(value) = var("SMTP_PORT") {
            self.email.smtp_port = value.trim().parse().map_err(|_| {
                ReportError::Configuration(format!(
                    "{}SMTP_PORT is not a port: {}",
                    ENV_PREFIX, value
                ))
            })?;
        }
        if let Some(value) = var("SENDER_EMAIL") {
            self.email.sender_email = value;
        }
        if let Some(value) = var("SENDER_PASSWORD") {
            self.email.sender_password = value;
        }
        if let Some(value) = var("RECIPIENT_EMAIL") {
            self.email.recipient_email = value;
        }
        if let Some(value) = var("ENABLE_TLS") {
            self.email.enable_tls = parse_bool("ENABLE_TLS", &value)?;
        }

        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ReportError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" => Ok(false),
        _ => Err(ReportError::Configuration(format!(
            "{}{} is not a boolean: {}",
            ENV_PREFIX, name, value
        ))),
    }
}
