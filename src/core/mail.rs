use std::path::PathBuf;

/// One outgoing message carrying a rendered report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailReport {
    pub subject: String,
    pub body: String,
    /// Whether `body` is an HTML document rather than plain text.
    pub is_html: bool,
    pub from: String,
    pub to: String,
    /// File to attach, usually the source CSV.
    pub attachment: Option<PathBuf>,
}

/// Delivers a composed report to its recipient.
///
/// Implementations must not panic or bubble up ordinary delivery failures
/// (network, authentication, rejected addresses): they log the cause and
/// return `false`.
pub trait MailTransport {
    fn send(&self, report: &EmailReport) -> bool;
}
