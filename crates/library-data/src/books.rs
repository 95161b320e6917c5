//! Book catalogue records and JSON loading.
//!
//! The catalogue fixture is a bare JSON array of book objects. Each book
//! carries two seed membership lists (`borrowed_by`, `favorited_by`) naming
//! the users whose ledgers start with that book when first created.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::io::read_dataset;
use crate::validation::validate_books;

/// A single catalogue entry as stored in the fixture file.
///
/// Display fields are opaque to the service; only `id` and the two seed
/// lists carry meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Unique positive identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Display author name.
    pub author: String,
    /// Cover image URL.
    #[serde(default)]
    pub image: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Users whose borrowed list is seeded with this book.
    #[serde(default)]
    pub borrowed_by: Vec<u64>,
    /// Users whose favourites list is seeded with this book.
    #[serde(default)]
    pub favorited_by: Vec<u64>,
}

/// Validated, ordered book catalogue.
///
/// ## Invariants
/// - Every `id` is positive and unique.
/// - Every title is non-blank.
/// - Seed lists never contain user id zero.
///
/// # Example
///
/// ```
/// use library_data::{BookDataset, DatasetError};
///
/// let json = r#"[
///     {"id": 1, "title": "Dune", "author": "Frank Herbert"},
///     {"id": 1, "title": "Emma", "author": "Jane Austen"}
/// ]"#;
///
/// let err = BookDataset::from_json(json).expect_err("duplicate ids");
/// assert_eq!(err, DatasetError::DuplicateBookId { id: 1 });
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDataset {
    books: Vec<BookRecord>,
}

impl BookDataset {
    /// Parses a catalogue from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ParseError`] for malformed JSON and the
    /// validation variants for structural problems.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let books: Vec<BookRecord> =
            serde_json::from_str(json).map_err(|e| DatasetError::ParseError {
                message: e.to_string(),
            })?;
        Self::from_records(books)
    }

    /// Loads a catalogue from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::IoError`] if the file cannot be read, or any
    /// error [`BookDataset::from_json`] can return.
    pub fn from_file(path: &Utf8Path) -> Result<Self, DatasetError> {
        let contents = read_dataset(path)?;
        Self::from_json(&contents)
    }

    /// Builds a catalogue from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found, in record order.
    pub fn from_records(books: Vec<BookRecord>) -> Result<Self, DatasetError> {
        validate_books(&books)?;
        Ok(Self { books })
    }

    /// Returns the records in fixture order.
    #[must_use]
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    /// Consumes the dataset, yielding its records.
    #[must_use]
    pub fn into_books(self) -> Vec<BookRecord> {
        self.books
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let dataset = BookDataset::from_json(r#"[{"id": 3, "title": "Emma", "author": "Austen"}]"#)
            .expect("valid catalogue");
        let book = &dataset.books()[0];
        assert!(book.image.is_empty());
        assert!(book.borrowed_by.is_empty());
        assert!(book.favorited_by.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let dataset = BookDataset::from_json(
            r#"[{"id": 3, "title": "Emma", "author": "Austen", "isFavorite": true}]"#,
        )
        .expect("legacy field tolerated");
        assert_eq!(dataset.books().len(), 1);
    }

    #[test]
    fn object_root_is_a_parse_error() {
        let result = BookDataset::from_json(r#"{"books": []}"#);
        assert!(matches!(result, Err(DatasetError::ParseError { .. })));
    }
}
