//! Error types for the library-data crate.
//!
//! Every failure carries enough context (path, index, or offending id) to
//! point at the broken fixture entry without re-reading the file.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while reading or validating a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset file at '{path}': {message}")]
    IoError {
        /// Path to the dataset file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The dataset JSON is malformed or missing required fields.
    #[error("invalid dataset JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// A book record uses zero as its identifier.
    #[error("book at index {index} has a non-positive id")]
    InvalidBookId {
        /// Position of the record in the dataset.
        index: usize,
    },

    /// Two book records share an identifier.
    #[error("duplicate book id {id}")]
    DuplicateBookId {
        /// The repeated identifier.
        id: u64,
    },

    /// A book record has an empty or whitespace-only title.
    #[error("book {id} has a blank title")]
    BlankTitle {
        /// Identifier of the offending book.
        id: u64,
    },

    /// A seed membership list references user id zero.
    #[error("book {book_id} lists a non-positive user id in its seed lists")]
    InvalidSeedMember {
        /// Identifier of the offending book.
        book_id: u64,
    },

    /// A user record uses zero as its identifier.
    #[error("user at index {index} has a non-positive id")]
    InvalidUserId {
        /// Position of the record in the roster.
        index: usize,
    },

    /// Two user records share an identifier.
    #[error("duplicate user id {id}")]
    DuplicateUserId {
        /// The repeated identifier.
        id: u64,
    },

    /// Two user records share a username.
    #[error("duplicate username '{username}'")]
    DuplicateUsername {
        /// The repeated username.
        username: String,
    },

    /// A user record has an empty or whitespace-only username.
    #[error("user {id} has a blank username")]
    BlankUsername {
        /// Identifier of the offending user.
        id: u64,
    },
}
