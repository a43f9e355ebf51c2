//! CSV ingestion of book catalogs.
//!
//! Reading happens in three layers:
//!
//! 1. **CsvLineTokenizer** splits one line into fields, honoring double-quote
//!    enclosure and doubled-quote escaping.
//! 2. **RecordParser** maps the fields of a data row to a `Book`, using the
//!    header row to name the columns beyond the first three.
//! 3. **BookCsvReader** loads a whole file, treats its first line as the
//!    header and skips, with a warning, every row that is malformed or that
//!    fails the book validity rules.
//!
//! # Examples
//!
//! ```
//! use book_report_rs::item::csv::csv_reader::BookCsvReaderBuilder;
//!
//! let data = "\
//! Title,Author,Year
//! Dune,Frank Herbert,1965
//! Too,Short
//! Hyperion,Dan Simmons,1989
//! ";
//!
//! let books = BookCsvReaderBuilder::new().build().read_content(data);
//! assert_eq!(books.len(), 2);
//! ```

/// A module providing the book file reader.
pub mod csv_reader;

/// A module mapping tokenized rows to books.
pub mod record_parser;

/// A module splitting raw lines into fields.
pub mod tokenizer;
