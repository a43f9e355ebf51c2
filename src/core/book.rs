use std::collections::BTreeMap;

/// One catalog entry read from the input file.
///
/// The first three columns of a row are positional (title, author,
/// publication year). Every further column that has a header cell lands in
/// `extra_fields`, keyed by that header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Zero when the year column could not be parsed.
    pub publication_year: i32,
    pub extra_fields: BTreeMap<String, String>,
}

impl Book {
    pub fn new<T: Into<String>, A: Into<String>>(
        title: T,
        author: A,
        publication_year: i32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
            extra_fields: BTreeMap::new(),
        }
    }

    /// Adds an extra column value, replacing any previous value for `name`.
    pub fn with_extra_field<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.extra_fields.insert(name.into(), value.into());
        self
    }

    /// Returns the first validity rule this book breaks, if any.
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("blank title")
        } else if self.author.trim().is_empty() {
            Some("blank author")
        } else if self.publication_year <= 0 {
            Some("non-positive publication year")
        } else {
            None
        }
    }

    /// A book is valid when title and author are not blank and the year is positive.
    pub fn is_valid(&self) -> bool {
        self.invalid_reason().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::Book;

    #[test]
    fn complete_book_is_valid() {
        assert!(Book::new("Dune", "Frank Herbert", 1965).is_valid());
    }

    #[test]
    fn blank_fields_and_bad_year_are_invalid() {
        assert_eq!(
            Book::new("  ", "Anon", 1999).invalid_reason(),
            Some("blank title")
        );
        assert_eq!(
            Book::new("Dune", "\t", 1965).invalid_reason(),
            Some("blank author")
        );
        assert_eq!(
            Book::new("Dune", "Frank Herbert", 0).invalid_reason(),
            Some("non-positive publication year")
        );
        assert!(!Book::new("Dune", "Frank Herbert", -12).is_valid());
    }

    #[test]
    fn extra_field_is_replaced_by_later_value() {
        let book = Book::new("Dune", "Frank Herbert", 1965)
            .with_extra_field("Genre", "SciFi")
            .with_extra_field("Genre", "Space opera");

        assert_eq!(book.extra_fields.len(), 1);
        assert_eq!(book.extra_fields["Genre"], "Space opera");
    }
}
