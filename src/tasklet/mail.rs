//! # Mail Tasklet
//!
//! This module delivers rendered reports over SMTP.
//!
//! ## Features
//!
//! - Plain-text or HTML bodies
//! - Optional file attachment (sent without it when the file is unreadable)
//! - STARTTLS or unencrypted connections
//! - Settings validated when the transport is built, not when mail is sent
//!
//! ## Examples
//!
//! ```rust
//! use book_report_rs::core::mail::{EmailReport, MailTransport};
//! use book_report_rs::tasklet::mail::SmtpMailTransportBuilder;
//!
//! # fn example() -> Result<(), book_report_rs::ReportError> {
//! let transport = SmtpMailTransportBuilder::new()
//!     .host("smtp.example.com")
//!     .port(587)
//!     .sender("reports@example.com")
//!     .password("secret")
//!     .recipient("team@example.com")
//!     .tls(true)
//!     .build()?;
//!
//! let report = EmailReport {
//!     subject: "Book Report".to_string(),
//!     body: "No books found in the dataset.".to_string(),
//!     from: "reports@example.com".to_string(),
//!     to: "team@example.com".to_string(),
//!     ..Default::default()
//! };
//!
//! if !transport.send(&report) {
//!     eprintln!("delivery failed");
//! }
//! # Ok(())
//! # }
//! ```

use std::{fs, path::Path, time::Duration};

use lettre::{
    Message, SmtpTransport, Transport,
    message::{Attachment, Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use log::{error, info, warn};

use crate::{
    core::mail::{EmailReport, MailTransport},
    error::ReportError,
};

/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Sends reports through an SMTP relay.
///
/// The sender address doubles as the login name. The recipient given at
/// construction is used for reports whose `to` field is blank.
pub struct SmtpMailTransport {
    host: String,
    port: u16,
    sender: String,
    password: String,
    recipient: String,
    tls: bool,
    timeout: Duration,
}

impl SmtpMailTransport {
    /// Creates a transport, failing if any required setting is missing.
    pub fn new(
        host: &str,
        port: u16,
        sender: &str,
        password: &str,
        recipient: &str,
        tls: bool,
    ) -> Result<Self, ReportError> {
        for (value, name) in [
            (host, "SMTP server"),
            (sender, "Sender email"),
            (password, "Sender password"),
            (recipient, "Recipient email"),
        ] {
            if value.trim().is_empty() {
                return Err(ReportError::Configuration(format!(
                    "{} is not configured",
                    name
                )));
            }
        }

        if port == 0 {
            return Err(ReportError::Configuration(
                "SMTP port is not configured".to_string(),
            ));
        }

        Ok(Self {
            host: host.trim().to_string(),
            port,
            sender: sender.trim().to_string(),
            password: password.to_string(),
            recipient: recipient.trim().to_string(),
            tls,
            timeout: Duration::from_secs(30),
        })
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Recipient used when a report does not name one.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    fn build_message(&self, report: &EmailReport) -> Result<Message, ReportError> {
        let from = parse_mailbox(&report.from)?;
        let to = if report.to.trim().is_empty() {
            parse_mailbox(&self.recipient)?
        } else {
            parse_mailbox(&report.to)?
        };

        let content_type = if report.is_html {
            ContentType::TEXT_HTML
        } else {
            ContentType::TEXT_PLAIN
        };
        let body = SinglePart::builder()
            .header(content_type)
            .body(report.body.clone());

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(report.subject.clone());

        let message = match report.attachment.as_deref().and_then(read_attachment) {
            Some(attachment) => {
                builder.multipart(MultiPart::mixed().singlepart(body).singlepart(attachment))
            }
            None => builder.singlepart(body),
        };

        message.map_err(|e| ReportError::Mail(format!("Unable to build message: {}", e)))
    }

    fn build_mailer(&self) -> Result<SmtpTransport, ReportError> {
        let builder = if self.tls {
            SmtpTransport::starttls_relay(&self.host)
                .map_err(|e| ReportError::Mail(format!("Invalid SMTP relay: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.host)
        };

        Ok(builder
            .port(self.port)
            .credentials(Credentials::new(self.sender.clone(), self.password.clone()))
            .timeout(Some(self.timeout))
            .build())
    }

    fn deliver(&self, report: &EmailReport) -> Result<(), ReportError> {
        let message = self.build_message(report)?;
        let mailer = self.build_mailer()?;

        mailer
            .send(&message)
            .map_err(|e| ReportError::Mail(format!("SMTP delivery failed: {}", e)))?;

        Ok(())
    }
}

impl MailTransport for SmtpMailTransport {
    fn send(&self, report: &EmailReport) -> bool {
        info!(
            "Sending email to {} via {}:{}",
            report.to, self.host, self.port
        );

        match self.deliver(report) {
            Ok(()) => {
                info!("Email sent successfully to {}", report.to);
                true
            }
            Err(err) => {
                error!("Failed to send email to {}: {}", report.to, err);
                false
            }
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, ReportError> {
    address
        .trim()
        .parse()
        .map_err(|e| ReportError::Mail(format!("Invalid email address '{}': {}", address, e)))
}

fn read_attachment(path: &Path) -> Option<SinglePart> {
    match fs::read(path) {
        Ok(content) => {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "report.csv".to_string());
            let content_type =
                ContentType::parse("text/csv").unwrap_or(ContentType::TEXT_PLAIN);

            info!("Attached file: {}", path.display());
            Some(Attachment::new(filename).body(content, content_type))
        }
        Err(err) => {
            warn!(
                "Attachment file {} could not be read, sending without it: {}",
                path.display(),
                err
            );
            None
        }
    }
}

/// Builder for creating SmtpMailTransport instances with a fluent interface.
pub struct SmtpMailTransportBuilder {
    host: Option<String>,
    port: u16,
    sender: Option<String>,
    password: Option<String>,
    recipient: Option<String>,
    tls: bool,
    timeout: Duration,
}

impl Default for SmtpMailTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SmtpMailTransportBuilder {
    /// Creates a new builder with STARTTLS on port 587.
    pub fn new() -> Self {
        Self {
            host: None,
            port: DEFAULT_SMTP_PORT,
            sender: None,
            password: None,
            recipient: None,
            tls: true,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the SMTP server hostname.
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the SMTP server port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the sender address, also used as login.
    pub fn sender<S: Into<String>>(mut self, sender: S) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Sets the sender password.
    pub fn password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the default recipient address.
    pub fn recipient<S: Into<String>>(mut self, recipient: S) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Sets whether the connection is upgraded with STARTTLS.
    pub fn tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Sets the connection timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the SmtpMailTransport instance.
    pub fn build(self) -> Result<SmtpMailTransport, ReportError> {
        let host = self
            .host
            .ok_or_else(|| ReportError::Configuration("SMTP server is required".to_string()))?;
        let sender = self
            .sender
            .ok_or_else(|| ReportError::Configuration("Sender email is required".to_string()))?;
        let password = self.password.ok_or_else(|| {
            ReportError::Configuration("Sender password is required".to_string())
        })?;
        let recipient = self.recipient.ok_or_else(|| {
            ReportError::Configuration("Recipient email is required".to_string())
        })?;

        let mut transport =
            SmtpMailTransport::new(&host, self.port, &sender, &password, &recipient, self.tls)?;
        transport.set_timeout(self.timeout);

        Ok(transport)
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, time::Duration};

    use crate::{
        core::mail::{EmailReport, MailTransport},
        error::ReportError,
    };

    use super::SmtpMailTransportBuilder;

    fn complete_builder() -> SmtpMailTransportBuilder {
        SmtpMailTransportBuilder::new()
            .host("smtp.example.com")
            .sender("reports@example.com")
            .password("secret")
            .recipient("team@example.com")
    }

    fn report() -> EmailReport {
        EmailReport {
            subject: "Book Report - 2026-10-19".to_string(),
            body: "<p>hello</p>".to_string(),
            is_html: true,
            from: "reports@example.com".to_string(),
            to: "reader@example.com".to_string(),
            attachment: None,
        }
    }

    #[test]
    fn complete_settings_build() {
        let transport = complete_builder().build().unwrap();
        assert_eq!(transport.recipient(), "team@example.com");
    }

    #[test]
    fn missing_settings_fail_at_build() {
        let missing_host = SmtpMailTransportBuilder::new()
            .sender("reports@example.com")
            .password("secret")
            .recipient("team@example.com")
            .build();
        assert!(matches!(missing_host, Err(ReportError::Configuration(_))));

        let blank_password = complete_builder().password("  ").build();
        assert!(
            matches!(blank_password, Err(ReportError::Configuration(msg)) if msg.contains("password"))
        );

        let zero_port = complete_builder().port(0).build();
        assert!(matches!(zero_port, Err(ReportError::Configuration(_))));
    }

    #[test]
    fn html_message_with_attachment() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Title,Author,Year").unwrap();

        let transport = complete_builder().build().unwrap();
        let mut report = report();
        report.attachment = Some(file.path().to_path_buf());

        let message = transport.build_message(&report).unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).into_owned();

        assert!(formatted.contains("Subject: Book Report - 2026-10-19"));
        assert!(formatted.contains("text/html"));
        assert!(formatted.contains("multipart/mixed"));
        assert!(formatted.contains("text/csv"));
    }

    #[test]
    fn unreadable_attachment_is_left_out() {
        let transport = complete_builder().build().unwrap();
        let mut report = report();
        report.is_html = false;
        report.attachment = Some("/definitely/not/here/books.csv".into());

        let message = transport.build_message(&report).unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).into_owned();

        assert!(formatted.contains("text/plain"));
        assert!(!formatted.contains("multipart/mixed"));
    }

    #[test]
    fn blank_recipient_falls_back_to_configured_one() {
        let transport = complete_builder().build().unwrap();
        let mut report = report();
        report.to = String::new();

        let message = transport.build_message(&report).unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).into_owned();

        assert!(formatted.contains("To: team@example.com"));
    }

    #[test]
    fn delivery_failure_returns_false() {
        let mut report = report();
        report.to = "not an address".to_string();

        let transport = complete_builder()
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap();

        assert!(!transport.send(&report));
    }
}
