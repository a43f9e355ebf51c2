//! # Report rendering
//!
//! Turns the accepted books into a document, either a fixed-width text table
//! or a paginated HTML page with one column per extra field.
//!
//! ```
//! use book_report_rs::core::book::Book;
//! use book_report_rs::core::item::{ReportFormat, ReportFormatter};
//! use book_report_rs::item::report::BookReportFormatterBuilder;
//!
//! let formatter = BookReportFormatterBuilder::new().page_size(25).build();
//! let books = vec![Book::new("Dune", "Frank Herbert", 1965).with_extra_field("Genre", "SciFi")];
//!
//! let html = formatter.format(&books, ReportFormat::Html);
//! assert!(html.contains("<th>Genre</th>"));
//! assert!(html.contains("<td>SciFi</td>"));
//! ```

use chrono::{DateTime, Local};
use log::info;

use crate::core::{
    book::Book,
    item::{ReportFormat, ReportFormatter},
};

pub mod html;

pub mod plain_text;

/// Text shown in place of a table when there is nothing to report.
pub const EMPTY_REPORT: &str = "No books found in the dataset.";

/// Renders books as plain text or HTML.
pub struct BookReportFormatter {
    page_size: usize,
    /// Fixed report timestamp; the current time is used when unset.
    generated_at: Option<DateTime<Local>>,
}

impl ReportFormatter<Book> for BookReportFormatter {
    fn generated_at(&self) -> DateTime<Local> {
        self.generated_at.unwrap_or_else(Local::now)
    }

    fn format_at(
        &self,
        items: &[Book],
        format: ReportFormat,
        generated_at: &DateTime<Local>,
    ) -> String {
        info!("Formatting {} books as {}", items.len(), format);

        match format {
            ReportFormat::PlainText => plain_text::render(items, generated_at),
            ReportFormat::Html => html::render(items, self.page_size, generated_at),
        }
    }
}

/// A builder for configuring report rendering.
///
/// # Default Configuration
///
/// - HTML page size: 50 rows
/// - Timestamp: time of each `format` call
#[derive(Default)]
pub struct BookReportFormatterBuilder {
    page_size: Option<usize>,
    generated_at: Option<DateTime<Local>>,
}

impl BookReportFormatterBuilder {
    pub fn new() -> Self {
        Self {
            page_size: None,
            generated_at: None,
        }
    }

    /// Sets the number of rows per HTML page. Zero is treated as one.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Pins the date printed in reports.
    pub fn generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn build(self) -> BookReportFormatter {
        BookReportFormatter {
            page_size: self.page_size.unwrap_or(html::DEFAULT_PAGE_SIZE).max(1),
            generated_at: self.generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::BookReportFormatterBuilder;
    use crate::core::{
        book::Book,
        item::{ReportFormat, ReportFormatter},
    };

    #[test]
    fn dispatches_on_format() {
        let formatter = BookReportFormatterBuilder::new()
            .generated_at(Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
            .build();
        let books = vec![Book::new("Dune", "Frank Herbert", 1965)];

        let text = formatter.format(&books, ReportFormat::PlainText);
        assert!(text.starts_with("Book Report - 2026-01-02\n"));
        assert!(!text.contains('<'));

        let html = formatter.format(&books, ReportFormat::Html);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<td>Dune</td>"));
    }

    #[test]
    fn zero_page_size_still_renders_every_book() {
        let formatter = BookReportFormatterBuilder::new().page_size(0).build();
        let books = vec![
            Book::new("Dune", "Frank Herbert", 1965),
            Book::new("Hyperion", "Dan Simmons", 1989),
        ];

        let html = formatter.format(&books, ReportFormat::Html);
        assert_eq!(html.matches("<div class='page'>").count(), 2);
    }

    #[test]
    fn empty_set_uses_sentinel_in_both_formats() {
        let formatter = BookReportFormatterBuilder::new().build();

        assert_eq!(
            formatter.format(&[], ReportFormat::PlainText),
            "No books found in the dataset."
        );
        assert!(
            formatter
                .format(&[], ReportFormat::Html)
                .contains("<p>No books found in the dataset.</p>")
        );
    }
}
