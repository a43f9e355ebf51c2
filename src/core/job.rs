use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};
use log::{error, info, warn};
use uuid::Uuid;

use crate::ReportError;

use super::{
    book::Book,
    build_name,
    console::Console,
    item::{RecordReader, ReportFormat, ReportFormatter},
    mail::{EmailReport, MailTransport},
};

/// Type alias for job execution results.
type JobResult<T> = Result<T, ReportError>;

/// Represents a job that can be executed.
///
/// A job reads the source file, renders the accepted records and, when asked
/// to, mails the result.
pub trait Job {
    /// Runs the job once.
    ///
    /// # Returns
    /// - `Ok(JobExecution)` when the report was produced, or when there was
    ///   nothing to report
    /// - `Err(ReportError)` when the source could not be loaded or the report
    ///   could not be saved
    fn run(&self) -> JobResult<JobExecution>;
}

/// Outcome of one job run.
///
/// A failed email delivery does not fail the run: it shows up as
/// `email_sent == Some(false)`.
#[derive(Debug)]
pub struct JobExecution {
    /// The time when the job started executing
    pub start: Instant,
    /// The time when the job finished executing
    pub end: Instant,
    /// The total duration of the job execution
    pub duration: Duration,
    /// Number of accepted records
    pub record_count: usize,
    /// Format of the rendered report, `None` when nothing was rendered
    pub format: Option<ReportFormat>,
    /// `None` when no email was requested
    pub email_sent: Option<bool>,
}

/// Answers that stop the run-again loop.
const QUIT_ANSWERS: [&str; 4] = ["n", "no", "q", "quit"];

/// Read, render and mail a book report.
///
/// Built through `ReportJobBuilder`. Every collaborator is borrowed so the
/// caller keeps ownership of readers, formatters and transports.
pub struct ReportJob<'a> {
    /// Unique identifier for this job instance
    id: Uuid,
    /// Human-readable name for the job
    name: String,
    reader: &'a dyn RecordReader<Book>,
    formatter: &'a dyn ReportFormatter<Book>,
    console: &'a dyn Console,
    transport: Option<&'a dyn MailTransport>,
    source: PathBuf,
    /// Skips the format menu when set
    default_format: Option<ReportFormat>,
    /// Skips the send confirmation when set
    auto_send: bool,
    sender: String,
    recipient: String,
    output_path: Option<PathBuf>,
}

impl Job for ReportJob<'_> {
    fn run(&self) -> JobResult<JobExecution> {
        let start = Instant::now();

        info!("Start of job: {}, id: {}", self.name, self.id);

        let books = self.reader.load(&self.source)?;

        if books.is_empty() {
            warn!("No valid books found in {}", self.source.display());
            self.console
                .show("No valid books found in the CSV file. Please check your data");
            return Ok(self.execution(start, 0, None, None));
        }

        let format = self.select_format();
        let send = self.wants_email();

        let generated_at = self.formatter.generated_at();
        let content = self.formatter.format_at(&books, format, &generated_at);

        match format {
            ReportFormat::PlainText => self.console.show(&format!("\n{}", content)),
            ReportFormat::Html => self.console.show("\nHtml report generated successfully"),
        }

        if let Some(output_path) = &self.output_path {
            fs::write(output_path, &content)?;
            info!("Report written to {}", output_path.display());
            self.console
                .show(&format!("Report saved to {}", output_path.display()));
        }

        let email_sent = if send {
            Some(self.send_report(content, format, &generated_at))
        } else {
            None
        };

        info!("End of job: {}, id: {}", self.name, self.id);

        Ok(self.execution(start, books.len(), Some(format), email_sent))
    }
}

impl ReportJob<'_> {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_id(&self) -> Uuid {
        self.id
    }

    /// Runs the job repeatedly until the user declines another run.
    ///
    /// Errors of a run are reported on the console and do not stop the loop.
    /// Returns the number of runs.
    pub fn run_until_quit(&self) -> usize {
        let mut runs = 0;

        loop {
            runs += 1;

            if let Err(err) = self.run() {
                error!("Job {} failed: {}", self.name, err);
                self.console.show(&format!("Application error: {}", err));
            }

            let answer = self.console.prompt("\nRun again? (y/n): ");
            let quit = match answer {
                None => true,
                Some(answer) => QUIT_ANSWERS.contains(&answer.trim().to_lowercase().as_str()),
            };

            if quit {
                info!("Leaving after {} run(s)", runs);
                return runs;
            }
        }
    }

    fn select_format(&self) -> ReportFormat {
        if let Some(format) = self.default_format {
            return format;
        }

        self.console.show("\nChoose output format:");
        self.console.show("1. Plain Text");
        self.console.show("2. HTML");

        match self.console.prompt("Enter choice (1 or 2): ") {
            Some(choice) if choice.trim() == "2" => ReportFormat::Html,
            _ => ReportFormat::PlainText,
        }
    }

    fn wants_email(&self) -> bool {
        if self.auto_send {
            return true;
        }

        let answer = self
            .console
            .prompt("\nDo you want to send this report via email? (y/n): ")
            .map(|answer| answer.trim().to_lowercase());

        matches!(answer.as_deref(), Some("y") | Some("yes"))
    }

    fn resolve_recipient(&self) -> String {
        let question = if self.recipient.is_empty() {
            "Recipient email: ".to_string()
        } else {
            format!("Recipient email (press Enter for {}): ", self.recipient)
        };

        match self.console.prompt(&question) {
            Some(answer) if !answer.trim().is_empty() => answer.trim().to_string(),
            _ => self.recipient.clone(),
        }
    }

    fn send_report(
        &self,
        content: String,
        format: ReportFormat,
        generated_at: &DateTime<Local>,
    ) -> bool {
        let Some(transport) = self.transport else {
            warn!("Email requested but no mail transport is configured");
            self.console
                .show("Email is not configured. Check the email settings.");
            return false;
        };

        let report = EmailReport {
            subject: format!("Book Report - {}", generated_at.format("%Y-%m-%d")),
            body: content,
            is_html: format == ReportFormat::Html,
            from: self.sender.clone(),
            to: self.resolve_recipient(),
            attachment: Some(self.source.clone()),
        };

        self.console.show("Sending email...");

        let sent = transport.send(&report);
        if sent {
            self.console.show("Email sent successfully!");
        } else {
            self.console
                .show("Failed to send email. Check logs for details.");
        }

        sent
    }

    fn execution(
        &self,
        start: Instant,
        record_count: usize,
        format: Option<ReportFormat>,
        email_sent: Option<bool>,
    ) -> JobExecution {
        JobExecution {
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            record_count,
            format,
            email_sent,
        }
    }
}

/// Builder for creating a report job.
///
/// # Example
///
/// ```rust
/// use book_report_rs::core::console::StdConsole;
/// use book_report_rs::core::item::ReportFormat;
/// use book_report_rs::core::job::ReportJobBuilder;
/// use book_report_rs::item::csv::csv_reader::BookCsvReaderBuilder;
/// use book_report_rs::item::report::BookReportFormatterBuilder;
///
/// let reader = BookCsvReaderBuilder::new().build();
/// let formatter = BookReportFormatterBuilder::new().build();
/// let console = StdConsole::default();
///
/// let job = ReportJobBuilder::new()
///     .name("weekly-books")
///     .reader(&reader)
///     .formatter(&formatter)
///     .console(&console)
///     .source("books.csv")
///     .default_format(Some(ReportFormat::PlainText))
///     .build()
///     .unwrap();
///
/// assert_eq!(job.get_name(), "weekly-books");
/// ```
#[derive(Default)]
pub struct ReportJobBuilder<'a> {
    /// Optional name for the job (generated randomly if not specified)
    name: Option<String>,
    reader: Option<&'a dyn RecordReader<Book>>,
    formatter: Option<&'a dyn ReportFormatter<Book>>,
    console: Option<&'a dyn Console>,
    transport: Option<&'a dyn MailTransport>,
    source: Option<PathBuf>,
    default_format: Option<ReportFormat>,
    auto_send: bool,
    sender: String,
    recipient: String,
    output_path: Option<PathBuf>,
}

impl<'a> ReportJobBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the job.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn reader(mut self, reader: &'a dyn RecordReader<Book>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn formatter(mut self, formatter: &'a dyn ReportFormatter<Book>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn console(mut self, console: &'a dyn Console) -> Self {
        self.console = Some(console);
        self
    }

    /// Sets the mail transport. Without one, email requests are answered
    /// with a "not configured" message.
    pub fn transport(mut self, transport: &'a dyn MailTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the CSV file to report on. It is also the email attachment.
    pub fn source<P: AsRef<Path>>(mut self, source: P) -> Self {
        self.source = Some(source.as_ref().to_path_buf());
        self
    }

    /// Sets the report format. `None` asks the user on every run.
    pub fn default_format(mut self, format: Option<ReportFormat>) -> Self {
        self.default_format = format;
        self
    }

    /// Sends every report without asking.
    pub fn auto_send(mut self, yes: bool) -> Self {
        self.auto_send = yes;
        self
    }

    pub fn sender<S: Into<String>>(mut self, sender: S) -> Self {
        self.sender = sender.into();
        self
    }

    /// Sets the recipient proposed when sending; the user may override it.
    pub fn recipient<S: Into<String>>(mut self, recipient: S) -> Self {
        self.recipient = recipient.into();
        self
    }

    /// Also writes every rendered report to `path`.
    pub fn output_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        self.output_path = path.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Builds the job.
    ///
    /// # Errors
    /// `ReportError::Configuration` when the reader, formatter, console or
    /// source is missing.
    pub fn build(self) -> JobResult<ReportJob<'a>> {
        let missing = |what: &str| ReportError::Configuration(format!("{} is required", what));

        Ok(ReportJob {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            reader: self.reader.ok_or_else(|| missing("Reader"))?,
            formatter: self.formatter.ok_or_else(|| missing("Formatter"))?,
            console: self.console.ok_or_else(|| missing("Console"))?,
            transport: self.transport,
            source: self.source.ok_or_else(|| missing("Source file"))?,
            default_format: self.default_format,
            auto_send: self.auto_send,
            sender: self.sender,
            recipient: self.recipient,
            output_path: self.output_path,
        })
    }
}
