/// Splits one raw line into fields.
///
/// Fields may be enclosed in double quotes so they can contain the
/// delimiter, and a doubled quote inside a quoted section stands for one
/// literal quote. The dialect is forgiving: a quote that is never closed
/// simply runs to the end of the line, and a quote in the middle of a field
/// toggles quoting instead of being rejected.
///
/// # Examples
///
/// ```
/// use book_report_rs::item::csv::tokenizer::CsvLineTokenizer;
///
/// let tokenizer = CsvLineTokenizer::default();
/// let fields = tokenizer.tokenize(r#""a,b","c""d",e"#);
///
/// assert_eq!(fields, vec!["a,b", "c\"d", "e"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CsvLineTokenizer {
    delimiter: char,
}

impl Default for CsvLineTokenizer {
    fn default() -> Self {
        Self::new(',')
    }
}

impl CsvLineTokenizer {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Returns the fields of `line`; always at least one, even for an empty line.
    pub fn tokenize(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '"' {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            } else if ch == self.delimiter && !in_quotes {
                fields.push(std::mem::take(&mut current));
            } else {
                current.push(ch);
            }
        }

        fields.push(current);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::CsvLineTokenizer;

    fn tokenize(line: &str) -> Vec<String> {
        CsvLineTokenizer::default().tokenize(line)
    }

    #[test]
    fn unquoted_fields_round_trip() {
        let samples: [&[&str]; 4] = [
            &["Dune", "Frank Herbert", "1965"],
            &["a", "", "c", ""],
            &["  padded ", "x"],
            &["single"],
        ];

        for fields in samples {
            assert_eq!(tokenize(&fields.join(",")), fields);
        }
    }

    #[test]
    fn quoted_delimiter_and_escaped_quote() {
        assert_eq!(tokenize(r#""a,b","c""d""#), vec!["a,b", "c\"d"]);
    }

    #[test]
    fn empty_line_yields_one_empty_field() {
        assert_eq!(tokenize(""), vec![""]);
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        assert_eq!(tokenize(r#"x,"abc,def"#), vec!["x", "abc,def"]);
    }

    #[test]
    fn quote_inside_field_toggles_quoting() {
        assert_eq!(tokenize(r#"ab"c,d"e,f"#), vec!["abc,de", "f"]);
    }

    #[test]
    fn custom_delimiter() {
        let tokenizer = CsvLineTokenizer::new(';');
        assert_eq!(
            tokenizer.tokenize(r#"Dune;"Herbert; Frank";1965"#),
            vec!["Dune", "Herbert; Frank", "1965"]
        );
    }
}
