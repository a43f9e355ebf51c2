use thiserror::Error;

use crate::core::book::Book;

/// Number of positional columns every data row must provide.
pub const REQUIRED_FIELDS: usize = 3;

/// Structural problem with a single data row.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RowError {
    #[error("expected at least 3 fields, found {found}")]
    TooFewFields { found: usize },
}

/// Maps the tokenized fields of one data row to a `Book`.
///
/// Column 0 is the title, column 1 the author and column 2 the publication
/// year. Columns from index 3 on are stored in `Book::extra_fields` under the
/// header cell of the same index; columns past the end of the header are
/// dropped.
///
/// The parser does not apply the validity rules of `Book`: a row with a
/// blank title parses fine and is left to the caller to reject.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    trim_quotes: bool,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RecordParser {
    /// When `trim_quotes` is set, quote characters left around the title and
    /// author after tokenizing (e.g. from `"""Dune"""`) are stripped too.
    pub fn new(trim_quotes: bool) -> Self {
        Self { trim_quotes }
    }

    pub fn parse(&self, header: &[String], fields: &[String]) -> Result<Book, RowError> {
        if fields.len() < REQUIRED_FIELDS {
            return Err(RowError::TooFewFields {
                found: fields.len(),
            });
        }

        let mut book = Book::new(
            self.clean_text(&fields[0]),
            self.clean_text(&fields[1]),
            parse_year(&fields[2]),
        );

        for (name, value) in header.iter().zip(fields.iter()).skip(REQUIRED_FIELDS) {
            book.extra_fields
                .insert(name.clone(), value.trim().to_string());
        }

        Ok(book)
    }

    fn clean_text(&self, value: &str) -> String {
        if self.trim_quotes {
            value
                .trim_matches(|c: char| c == '"' || c.is_whitespace())
                .to_string()
        } else {
            value.trim().to_string()
        }
    }
}

/// Unparsable years become 0 so the row fails validation instead of the load.
fn parse_year(value: &str) -> i32 {
    value.trim().parse::<i32>().unwrap_or(0)
}
