//! Driving port for catalogue and ledger reads.

use crate::domain::{
    AnnotatedBook, BookId, BrowseRequest, CatalogPage, Error, ExtensionNotice, LoanReport,
    UserId, UserLedger,
};

/// Domain use-case port for read-only library views.
///
/// Reads may create a user's ledger on first access (seeding is a write),
/// but never change an existing one.
#[cfg_attr(test, mockall::automock)]
pub trait LibraryQuery: Send + Sync {
    /// Whether `book` exists in the catalogue.
    fn contains_book(&self, book: BookId) -> bool;

    /// Distinct author names for the search filter.
    fn authors(&self) -> Vec<String>;

    /// Raw ledger for `user`; `None` when nobody is signed in.
    fn ledger(&self, user: Option<UserId>) -> Result<Option<UserLedger>, Error>;

    /// One page of the filtered catalogue annotated for `user`.
    fn browse(&self, user: Option<UserId>, request: &BrowseRequest) -> Result<CatalogPage, Error>;

    /// Catalogue entries in `user`'s favourites.
    fn favorites(&self, user: UserId) -> Result<Vec<AnnotatedBook>, Error>;

    /// Borrowed entries with fresh due dates.
    fn loans(&self, user: UserId) -> Result<LoanReport, Error>;

    /// Announce an extended due date for a book `user` currently holds.
    fn extend_loan(&self, user: UserId, book: BookId) -> Result<ExtensionNotice, Error>;
}

/// Query port over an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLibraryQuery;

impl LibraryQuery for FixtureLibraryQuery {
    fn contains_book(&self, _book: BookId) -> bool {
        false
    }

    fn authors(&self) -> Vec<String> {
        Vec::new()
    }

    fn ledger(&self, _user: Option<UserId>) -> Result<Option<UserLedger>, Error> {
        Ok(None)
    }

    fn browse(&self, _user: Option<UserId>, request: &BrowseRequest) -> Result<CatalogPage, Error> {
        Ok(CatalogPage::empty(request.page))
    }

    fn favorites(&self, _user: UserId) -> Result<Vec<AnnotatedBook>, Error> {
        Ok(Vec::new())
    }

    fn loans(&self, _user: UserId) -> Result<LoanReport, Error> {
        Ok(LoanReport::default())
    }

    fn extend_loan(&self, _user: UserId, book: BookId) -> Result<ExtensionNotice, Error> {
        Err(Error::not_found(format!("book {book} is not on loan")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn fixture_query_is_empty() {
        let query = FixtureLibraryQuery;
        let user = UserId::new(1).expect("positive id");
        let page = query
            .browse(Some(user), &BrowseRequest::default())
            .expect("fixture browse");
        assert!(page.books.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(query.loans(user).expect("fixture loans").loans.is_empty());
    }

    #[rstest]
    fn fixture_extension_reports_not_found() {
        let user = UserId::new(1).expect("positive id");
        let book = BookId::new(2).expect("positive id");
        let err = FixtureLibraryQuery
            .extend_loan(user, book)
            .expect_err("nothing on loan");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
