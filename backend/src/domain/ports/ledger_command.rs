//! Driving port for ledger mutations.
//!
//! Inbound adapters call this port to borrow, return and favourite books.
//! Calls are synchronous; HTTP handlers run them on the blocking pool.

use crate::domain::{BookId, BorrowOutcome, Error, UserId};

/// Domain use-case port for changing a user's ledger.
///
/// `None` as the user means nobody is signed in; implementations answer with
/// the failure value (`false` or [`BorrowOutcome::NotLoggedIn`]) and write
/// nothing.
#[cfg_attr(test, mockall::automock)]
pub trait LedgerCommand: Send + Sync {
    /// Flip favourite membership of `book`.
    fn toggle_favorite(&self, user: Option<UserId>, book: BookId) -> Result<bool, Error>;

    /// Drop `book` from the favourites.
    fn remove_favorite(&self, user: Option<UserId>, book: BookId) -> Result<bool, Error>;

    /// Add `book` to the borrowed list.
    fn borrow_book(&self, user: Option<UserId>, book: BookId) -> Result<BorrowOutcome, Error>;

    /// Drop `book` from the borrowed list.
    fn return_book(&self, user: Option<UserId>, book: BookId) -> Result<bool, Error>;
}

/// Command port that accepts every signed-in mutation and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLedgerCommand;

impl LedgerCommand for FixtureLedgerCommand {
    fn toggle_favorite(&self, user: Option<UserId>, _book: BookId) -> Result<bool, Error> {
        Ok(user.is_some())
    }

    fn remove_favorite(&self, user: Option<UserId>, _book: BookId) -> Result<bool, Error> {
        Ok(user.is_some())
    }

    fn borrow_book(&self, user: Option<UserId>, _book: BookId) -> Result<BorrowOutcome, Error> {
        Ok(if user.is_some() {
            BorrowOutcome::Borrowed
        } else {
            BorrowOutcome::NotLoggedIn
        })
    }

    fn return_book(&self, user: Option<UserId>, _book: BookId) -> Result<bool, Error> {
        Ok(user.is_some())
    }
}
