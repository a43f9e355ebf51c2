use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use book_report_rs::{
    config::Settings,
    core::{
        console::StdConsole,
        item::ReportFormat,
        job::{Job, ReportJobBuilder},
        mail::MailTransport,
    },
    item::{csv::csv_reader::BookCsvReaderBuilder, report::BookReportFormatterBuilder},
    tasklet::mail::{SmtpMailTransport, SmtpMailTransportBuilder},
};

/// Command-line arguments for book-report
#[derive(Parser, Debug)]
#[command(name = "book-report")]
#[command(about = "Renders a CSV book catalog as a text or HTML report and mails it")]
#[command(version)]
struct Args {
    /// Settings file, skipped when it does not exist
    #[arg(short, long, default_value = "appsettings.json")]
    config: PathBuf,

    /// CSV file to report on, overrides the settings
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Report format (plaintext or html), overrides the settings
    #[arg(long)]
    format: Option<String>,

    /// Send the report without asking
    #[arg(long)]
    send: bool,

    /// Run once instead of offering to run again
    #[arg(long)]
    once: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = load_settings(&args)?;

    let default_format: Option<ReportFormat> = settings.app.default_format()?;

    let transport = build_transport(&settings)?;
    if settings.app.auto_send_email && transport.is_none() {
        anyhow::bail!("auto_send_email is enabled but the email settings are incomplete");
    }

    let reader = BookCsvReaderBuilder::new().build();
    let formatter = BookReportFormatterBuilder::new().build();
    let console = StdConsole::default();

    let mut builder = ReportJobBuilder::new()
        .name("book-report")
        .reader(&reader)
        .formatter(&formatter)
        .console(&console)
        .source(&settings.app.csv_file_path)
        .default_format(default_format)
        .auto_send(settings.app.auto_send_email)
        .sender(settings.email.sender_email.clone())
        .recipient(settings.email.recipient_email.clone())
        .output_path(settings.app.output_path.as_ref());

    if let Some(transport) = &transport {
        builder = builder.transport(transport as &dyn MailTransport);
    }

    let job = builder.build()?;

    if args.once {
        job.run()?;
    } else {
        job.run_until_quit();
    }

    info!("Book report finished");
    Ok(())
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = if args.config.exists() {
        Settings::from_path(&args.config)?
    } else {
        info!(
            "No settings file at {}, using defaults",
            args.config.display()
        );
        Settings::default()
    };

    settings
        .apply_env()
        .context("Invalid environment override")?;

    if let Some(file) = &args.file {
        settings.app.csv_file_path = file.clone();
    }
    if let Some(format) = &args.format {
        settings.app.default_output_format = Some(format.clone());
    }
    if args.send {
        settings.app.auto_send_email = true;
    }

    Ok(settings)
}

/// Builds the SMTP transport, or `None` when no SMTP server is configured.
fn build_transport(settings: &Settings) -> Result<Option<SmtpMailTransport>> {
    let email = &settings.email;

    if email.smtp_server.trim().is_empty() {
        warn!("No SMTP server configured, email delivery is disabled");
        return Ok(None);
    }

    let transport = SmtpMailTransportBuilder::new()
        .host(email.smtp_server.clone())
        .port(email.smtp_port)
        .sender(email.sender_email.clone())
        .password(email.sender_password.clone())
        .recipient(email.recipient_email.clone())
        .tls(email.enable_tls)
        .build()
        .context("Invalid email settings")?;

    Ok(Some(transport))
}
