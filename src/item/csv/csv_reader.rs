use std::{fs, io::ErrorKind, path::Path};

use log::{debug, info, warn};

use crate::{
    core::{book::Book, item::RecordReader},
    error::ReportError,
};

use super::{record_parser::RecordParser, tokenizer::CsvLineTokenizer};

/// Reads a whole CSV file of books and keeps the rows that make sense.
///
/// The first line is always the header. Every following non-blank line is
/// tokenized and mapped to a `Book`. A row that cannot be mapped (fewer than
/// three fields) or that maps to an invalid book is logged and skipped: one
/// bad row never aborts the load.
///
/// # Examples
///
/// ```
/// use book_report_rs::item::csv::csv_reader::BookCsvReaderBuilder;
///
/// let data = "\
/// Title,Author,Year,Genre
/// \"Dune\",\"Frank Herbert\",1965,SciFi
/// \"\",Anon,1999,Fantasy
/// ";
///
/// let reader = BookCsvReaderBuilder::new().build();
/// let books = reader.read_content(data);
///
/// assert_eq!(books.len(), 1);
/// assert_eq!(books[0].title, "Dune");
/// assert_eq!(books[0].extra_fields["Genre"], "SciFi");
/// ```
pub struct BookCsvReader {
    tokenizer: CsvLineTokenizer,
    parser: RecordParser,
}

impl BookCsvReader {
    /// Parses already loaded file content with the same rules as `load`.
    pub fn read_content(&self, content: &str) -> Vec<Book> {
        let mut books = Vec::new();
        let mut malformed_count = 0;
        let mut invalid_count = 0;

        for row in self.read_rows(content) {
            match row {
                Ok(book) => books.push(book),
                Err(err @ ReportError::MalformedRow { .. }) => {
                    malformed_count += 1;
                    warn!("Skipping malformed row: {}", err);
                }
                Err(err) => {
                    invalid_count += 1;
                    warn!("Skipping invalid book entry: {}", err);
                }
            }
        }

        info!(
            "Accepted {} books ({} malformed rows, {} invalid entries skipped)",
            books.len(),
            malformed_count,
            invalid_count
        );

        books
    }

    /// One result per non-blank data line, in file order.
    fn read_rows(&self, content: &str) -> Vec<Result<Book, ReportError>> {
        let mut lines = content.lines();

        let header: Vec<String> = match lines.next() {
            Some(line) => self
                .tokenizer
                .tokenize(line)
                .iter()
                .map(|name| name.trim().to_string())
                .collect(),
            None => {
                warn!("CSV content is empty");
                return Vec::new();
            }
        };
        debug!("CSV header: {:?}", header);

        // Header is line 1, data starts on line 2
        lines
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| self.read_row(&header, index + 2, line))
            .collect()
    }

    fn read_row(&self, header: &[String], line: usize, raw: &str) -> Result<Book, ReportError> {
        let fields = self.tokenizer.tokenize(raw);

        let book = self
            .parser
            .parse(header, &fields)
            .map_err(|_| ReportError::MalformedRow {
                line,
                content: raw.to_string(),
            })?;

        match book.invalid_reason() {
            None => Ok(book),
            Some(reason) => Err(ReportError::InvalidRecord {
                line,
                reason: format!("{} in {:?}", reason, book),
            }),
        }
    }
}

impl RecordReader<Book> for BookCsvReader {
    /// Loads the whole file at `path` into memory, then parses it.
    ///
    /// # Returns
    /// - `Ok(books)` with the accepted books in file order, possibly empty
    /// - `Err(ReportError::NotFound)` if `path` does not exist
    /// - `Err(ReportError::Io)` for any other failure to read `path` as UTF-8 text
    fn load(&self, path: &Path) -> Result<Vec<Book>, ReportError> {
        info!("Reading books from {}", path.display());
        let content = fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ReportError::NotFound(path.to_path_buf()),
            _ => ReportError::Io(err),
        })?;

        Ok(self.read_content(&content))
    }
}

/// A builder for configuring book CSV reading.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Quote trimming on title and author: enabled
#[derive(Default)]
pub struct BookCsvReaderBuilder {
    delimiter: Option<char>,
    trim_quotes: Option<bool>,
}

impl BookCsvReaderBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: None,
            trim_quotes: None,
        }
    }

    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Sets whether quote characters surrounding title and author are removed.
    pub fn trim_quotes(mut self, yes: bool) -> Self {
        self.trim_quotes = Some(yes);
        self
    }

    pub fn build(self) -> BookCsvReader {
        BookCsvReader {
            tokenizer: CsvLineTokenizer::new(self.delimiter.unwrap_or(',')),
            parser: RecordParser::new(self.trim_quotes.unwrap_or(true)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use crate::{core::item::RecordReader, error::ReportError};

    use super::BookCsvReaderBuilder;

    fn header() -> Vec<String> {
        vec!["Title".to_string(), "Author".to_string(), "Year".to_string()]
    }

    #[test]
    fn short_row_is_malformed_with_its_line_and_text() {
        let reader = BookCsvReaderBuilder::new().build();

        let result = reader.read_row(&header(), 3, "Short,Row");

        assert!(matches!(
            result,
            Err(ReportError::MalformedRow { line: 3, ref content }) if content == "Short,Row"
        ));
    }

    #[test]
    fn unparsable_year_is_an_invalid_record() {
        let reader = BookCsvReaderBuilder::new().build();

        let result = reader.read_row(&header(), 4, "Neuromancer,William Gibson,abc");

        assert!(matches!(result, Err(ReportError::InvalidRecord { line: 4, .. })));
    }

    #[test]
    fn row_errors_carry_file_line_numbers() {
        let data = "Title,Author,Year

Dune,Frank Herbert,1965
   

Only,Two
Blank,,1990";
        let rows = BookCsvReaderBuilder::new().build().read_rows(data);

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        assert!(matches!(
            rows[1],
            Err(ReportError::MalformedRow { line: 6, ref content }) if content == "Only,Two"
        ));
        assert!(matches!(rows[2], Err(ReportError::InvalidRecord { line: 7, .. })));
    }

    #[test]
    fn skips_malformed_and_invalid_rows() {
        let data = "Title,Author,Year
Dune,Frank Herbert,1965
Short,Row
Neuromancer,William Gibson,abc
Hyperion,Dan Simmons,1989";

        let books = BookCsvReaderBuilder::new().build().read_content(data);

        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Hyperion"]);
    }

    #[test]
    fn empty_and_header_only_content_yield_nothing() {
        let reader = BookCsvReaderBuilder::new().build();

        assert!(reader.read_content("").is_empty());
        assert!(reader.read_content("Title,Author,Year\n").is_empty());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let data = "Title,Author,Year\n\n   \nDune,Frank Herbert,1965\n\r\n";
        let books = BookCsvReaderBuilder::new().build().read_content(data);

        assert_eq!(books.len(), 1);
    }

    #[test]
    fn header_cells_are_trimmed() {
        let data = "Title,Author,Year, Genre \nDune,Frank Herbert,1965,SciFi";
        let books = BookCsvReaderBuilder::new().build().read_content(data);

        assert_eq!(books[0].extra_fields["Genre"], "SciFi");
    }

    #[test]
    fn semicolon_delimited_content() {
        let data = "Title;Author;Year\nDune;\"Herbert; Frank\";1965";
        let books = BookCsvReaderBuilder::new()
            .delimiter(';')
            .build()
            .read_content(data);

        assert_eq!(books[0].author, "Herbert; Frank");
    }

    #[test]
    fn missing_file_is_not_found() {
        let reader = BookCsvReaderBuilder::new().build();
        let result = reader.load(Path::new("/definitely/not/here/books.csv"));

        assert!(matches!(result, Err(ReportError::NotFound(_))));
    }

    #[test]
    fn path_below_a_regular_file_is_an_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "not a directory").unwrap();

        let result = BookCsvReaderBuilder::new().build().load(&file.join("books.csv"));

        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}
