use chrono::{DateTime, Local};

use crate::core::book::Book;

use super::EMPTY_REPORT;

const YEAR_WIDTH: usize = 6;

/// Renders books as a fixed-width text table.
///
/// Title and author columns are sized to their longest value (or header)
/// plus two characters of padding.
pub fn render(books: &[Book], generated_at: &DateTime<Local>) -> String {
    if books.is_empty() {
        return EMPTY_REPORT.to_string();
    }

    let title_width = column_width("Title", books.iter().map(|book| book.title.as_str()));
    let author_width = column_width("Author", books.iter().map(|book| book.author.as_str()));

    let mut report = String::new();
    report.push_str(&format!(
        "Book Report - {}\n\n",
        generated_at.format("%Y-%m-%d")
    ));
    report.push_str(&row("Title", "Author", "Year", title_width, author_width));
    report.push_str(&separator(title_width, author_width));

    for book in books {
        report.push_str(&row(
            &truncate(&book.title, title_width),
            &truncate(&book.author, author_width),
            &book.publication_year.to_string(),
            title_width,
            author_width,
        ));
    }

    report
}

/// Cuts `text` to `width` characters, the last three being `...`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|value| value.chars().count())
        .fold(header.chars().count(), usize::max)
        + 2
}

fn row(title: &str, author: &str, year: &str, title_width: usize, author_width: usize) -> String {
    format!(
        "| {:<tw$} | {:<aw$} | {:<yw$} |\n",
        title,
        author,
        year,
        tw = title_width,
        aw = author_width,
        yw = YEAR_WIDTH
    )
}

fn separator(title_width: usize, author_width: usize) -> String {
    format!(
        "|{}|{}|{}|\n",
        "-".repeat(title_width + 2),
        "-".repeat(author_width + 2),
        "-".repeat(YEAR_WIDTH + 2)
    )
}
