use std::collections::HashSet;

use chrono::{DateTime, Local};
use html_escape::encode_safe;

use crate::core::book::Book;

use super::EMPTY_REPORT;

/// Rows per page when the formatter is not told otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 50;

const BASE_COLUMNS: [&str; 3] = ["Title", "Author", "Publication Year"];

const STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; background-color: #f9f9f9; }
        .container { max-width: 1000px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { color: #333; text-align: center; margin-bottom: 30px; }
        table { border-collapse: collapse; width: 100%; margin: 20px 0; }
        th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }
        th { background-color: #4CAF50; color: white; font-weight: bold; }
        tr:nth-child(even) { background-color: #f2f2f2; }
        tr:hover { background-color: #f5f5f5; }
        .footer { text-align: center; margin-top: 30px; color: #666; font-size: 12px; }
";

/// Renders books as a standalone HTML document.
///
/// Books are split in pages of `page_size` rows, each page holding its own
/// table. All tables share the same columns: the base columns followed by
/// every extra field name seen in any book, in order of first appearance.
pub fn render(books: &[Book], page_size: usize, generated_at: &DateTime<Local>) -> String {
    if books.is_empty() {
        return wrap_document(&format!("<p>{}</p>\n", EMPTY_REPORT), generated_at);
    }

    let extra_columns = extra_columns(books);
    let mut content = String::new();

    for (index, page) in books.chunks(page_size.max(1)).enumerate() {
        content.push_str("<div class='page'>\n");
        content.push_str(&format!("<h2>Page {}</h2>\n", index + 1));
        content.push_str("<table><thead><tr>\n");

        for column in BASE_COLUMNS
            .iter()
            .copied()
            .chain(extra_columns.iter().map(String::as_str))
        {
            content.push_str(&cell("th", column));
        }

        content.push_str("</tr></thead><tbody>\n");

        for book in page {
            content.push_str("<tr>\n");
            content.push_str(&cell("td", &book.title));
            content.push_str(&cell("td", &book.author));
            content.push_str(&cell("td", &book.publication_year.to_string()));

            for column in &extra_columns {
                let value = book.extra_fields.get(column).map_or("", String::as_str);
                content.push_str(&cell("td", value));
            }

            content.push_str("</tr>\n");
        }

        content.push_str("</tbody></table>\n");
        content.push_str("</div>\n");
    }

    wrap_document(&content, generated_at)
}

fn extra_columns(books: &[Book]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();

    for name in books.iter().flat_map(|book| book.extra_fields.keys()) {
        if seen.insert(name.as_str()) {
            columns.push(name.clone());
        }
    }

    columns
}

fn cell(tag: &str, value: &str) -> String {
    format!("<{tag}>{}</{tag}>\n", encode_safe(value))
}

fn wrap_document(content: &str, generated_at: &DateTime<Local>) -> String {
    let date = generated_at.format("%Y-%m-%d");

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>Book Report - {}</title>\n", date));
    html.push_str("    <style>\n");
    html.push_str(STYLE);
    html.push_str("    </style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str("    <div class=\"container\">\n");
    html.push_str(&format!("        <h1>Book Report - {}</h1>\n", date));
    html.push_str(content);
    html.push_str("        <div class=\"footer\">\n");
    html.push_str(&format!(
        "            <p>Generated on {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    html.push_str("        </div>\n");
    html.push_str("    </div>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");

    html
}
