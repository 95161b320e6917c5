//! Static book catalogue and user roster fixtures for the bookshelf service.
//!
//! The service treats both datasets as fixed inputs loaded once at start-up.
//! This crate owns their JSON shape and the structural checks (unique,
//! positive identifiers; non-blank titles and usernames) so the backend can
//! convert validated records into domain types without re-checking them.
//!
//! The crate is deliberately independent of backend domain types.
//!
//! # Example
//!
//! ```
//! use library_data::BookDataset;
//!
//! let json = r#"[
//!     {"id": 1, "title": "Dune", "author": "Frank Herbert",
//!      "borrowed_by": [42], "favorited_by": []}
//! ]"#;
//!
//! let dataset = BookDataset::from_json(json).expect("valid catalogue");
//! assert_eq!(dataset.books().len(), 1);
//! assert_eq!(dataset.books()[0].borrowed_by, vec![42]);
//! ```

mod books;
mod error;
mod io;
mod users;
mod validation;

pub use books::{BookDataset, BookRecord};
pub use error::DatasetError;
pub use users::{RoleRecord, StatusRecord, UserRecord, UserRoster};
