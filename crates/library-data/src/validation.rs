//! Structural checks shared by the dataset loaders.

use std::collections::HashSet;

use crate::books::BookRecord;
use crate::error::DatasetError;
use crate::users::UserRecord;

/// Check book ids, titles, and seed members.
pub(crate) fn validate_books(books: &[BookRecord]) -> Result<(), DatasetError> {
    let mut seen = HashSet::with_capacity(books.len());
    for (index, book) in books.iter().enumerate() {
        if book.id == 0 {
            return Err(DatasetError::InvalidBookId { index });
        }
        if !seen.insert(book.id) {
            return Err(DatasetError::DuplicateBookId { id: book.id });
        }
        if book.title.trim().is_empty() {
            return Err(DatasetError::BlankTitle { id: book.id });
        }
        let mut members = book.borrowed_by.iter().chain(&book.favorited_by);
        if members.any(|&user_id| user_id == 0) {
            return Err(DatasetError::InvalidSeedMember { book_id: book.id });
        }
    }
    Ok(())
}

/// Check user ids and usernames.
pub(crate) fn validate_users(users: &[UserRecord]) -> Result<(), DatasetError> {
    let mut ids = HashSet::with_capacity(users.len());
    let mut usernames = HashSet::with_capacity(users.len());
    for (index, user) in users.iter().enumerate() {
        if user.id == 0 {
            return Err(DatasetError::InvalidUserId { index });
        }
        if !ids.insert(user.id) {
            return Err(DatasetError::DuplicateUserId { id: user.id });
        }
        if user.username.trim().is_empty() {
            return Err(DatasetError::BlankUsername { id: user.id });
        }
        if !usernames.insert(user.username.as_str()) {
            return Err(DatasetError::DuplicateUsername {
                username: user.username.clone(),
            });
        }
    }
    Ok(())
}
