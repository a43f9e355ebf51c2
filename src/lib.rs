#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # Book Report

 Reads a CSV catalog of books, renders it as a plain-text table or an HTML
 document, and optionally mails the report with the source file attached.

 ## Core Concepts

- **RecordReader:** Loads the accepted records of a source file. `BookCsvReader` tokenizes every line, maps it to a `Book` and skips, with a warning, any row that is malformed or invalid.
- **ReportFormatter:** Renders records in a `ReportFormat`. `BookReportFormatter` produces a fixed-width text table or a paginated HTML page.
- **MailTransport:** Delivers an `EmailReport`. `SmtpMailTransport` talks to an SMTP relay.
- **Console:** Asks the user questions and shows messages.
- **ReportJob:** Ties the above together for one run, or for a run-again loop.

 ## Features

| **Feature**   | **Description**                                   |
|---------------|---------------------------------------------------|
| mail          | Enables the SMTP `MailTransport` (on by default)  |
| full          | Enables all available features                    |

 ## Getting Started

```rust
# use book_report_rs::{
#     core::item::{ReportFormat, ReportFormatter},
#     item::csv::csv_reader::BookCsvReaderBuilder,
#     item::report::BookReportFormatterBuilder,
# };
let csv = "Title,Author,Year,Genre
\"Dune\",\"Frank Herbert\",1965,SciFi
\"\",Anon,1999,Fantasy
Hyperion,Dan Simmons";

let reader = BookCsvReaderBuilder::new().build();
let books = reader.read_content(csv);
assert_eq!(books.len(), 1);

let formatter = BookReportFormatterBuilder::new().build();
let report = formatter.format(&books, ReportFormat::PlainText);
assert!(report.contains("| Dune "));

let html = formatter.format(&books, ReportFormat::Html);
assert!(html.contains("<th>Genre</th>"));
assert!(html.contains("<td>SciFi</td>"));
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Settings file and environment overrides
pub mod config;

/// Core traits, records and the report job
pub mod core;

/// Error types for report operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Readers and formatters (CSV reader, plain-text and HTML reports)
pub mod item;

/// Single operations run after rendering (mail delivery)
pub mod tasklet;
