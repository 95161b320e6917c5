//! Library domain service.
//!
//! Implements [`LedgerCommand`] and [`LibraryQuery`] on top of the
//! [`LedgerReconciler`], translating ledger failures into domain [`Error`]s.

use serde_json::json;
use tracing::error;

use crate::domain::ports::{KeyValueStore, LedgerCommand, LibraryQuery};
use crate::domain::{
    AnnotatedBook, BookId, BorrowOutcome, BrowseRequest, Catalog, CatalogEntry, CatalogPage,
    CatalogStats, Error, ExtensionNotice, LedgerError, LedgerReconciler, LoanPolicy, LoanReport, LoanView,
    PageWindow, UserId, UserLedger,
};

/// Library service implementing the ledger driving ports.
pub struct LibraryService<S: ?Sized> {
    reconciler: LedgerReconciler<S>,
    policy: LoanPolicy,
}

impl<S: ?Sized> Clone for LibraryService<S> {
    fn clone(&self) -> Self {
        Self {
            reconciler: self.reconciler.clone(),
            policy: self.policy.clone(),
        }
    }
}

impl<S> LibraryService<S>
where
    S: KeyValueStore + ?Sized,
{
    /// Create a service over `reconciler` using `policy` for due dates.
    pub fn new(reconciler: LedgerReconciler<S>, policy: LoanPolicy) -> Self {
        Self { reconciler, policy }
    }

    fn catalog(&self) -> &Catalog {
        self.reconciler.catalog()
    }

    fn map_ledger_error(err: LedgerError) -> Error {
        match err {
            LedgerError::Store { key, source } => {
                error!(%key, error = %source, "ledger store failure");
                Error::service_unavailable(format!("ledger store unavailable: {source}"))
            }
            LedgerError::Corrupted { key, message } => {
                error!(%key, %message, "persisted ledger is corrupted");
                Error::internal(format!("persisted ledger {key} is corrupted"))
                    .with_details(json!({ "code": "corrupted_ledger", "key": key }))
            }
            LedgerError::Encode { key, message } => {
                error!(%key, %message, "ledger encoding failed");
                Error::internal(format!("failed to encode ledger {key}: {message}"))
            }
        }
    }

    fn require_ledger(&self, user: UserId) -> Result<UserLedger, Error> {
        self.reconciler
            .load_ledger(Some(user))
            .map_err(Self::map_ledger_error)?
            .ok_or_else(|| Error::internal("ledger missing for signed-in user"))
    }

    /// Entries for `ids` in list order, skipping ids the catalogue no longer has.
    fn entries_for<'a>(
        &'a self,
        ids: impl Iterator<Item = BookId> + 'a,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        ids.filter_map(|id| self.catalog().get(id))
    }
}

impl<S> LedgerCommand for LibraryService<S>
where
    S: KeyValueStore + ?Sized,
{
    fn toggle_favorite(&self, user: Option<UserId>, book: BookId) -> Result<bool, Error> {
        self.reconciler
            .toggle_favorite(user, book)
            .map_err(Self::map_ledger_error)
    }

    fn remove_favorite(&self, user: Option<UserId>, book: BookId) -> Result<bool, Error> {
        self.reconciler
            .remove_favorite(user, book)
            .map_err(Self::map_ledger_error)
    }

    fn borrow_book(&self, user: Option<UserId>, book: BookId) -> Result<BorrowOutcome, Error> {
        self.reconciler
            .borrow_book(user, book)
            .map_err(Self::map_ledger_error)
    }

    fn return_book(&self, user: Option<UserId>, book: BookId) -> Result<bool, Error> {
        self.reconciler
            .return_book(user, book)
            .map_err(Self::map_ledger_error)
    }
}

impl<S> LibraryQuery for LibraryService<S>
where
    S: KeyValueStore + ?Sized,
{
    fn contains_book(&self, book: BookId) -> bool {
        self.catalog().contains(book)
    }

    fn authors(&self) -> Vec<String> {
        self.catalog().authors()
    }

    fn ledger(&self, user: Option<UserId>) -> Result<Option<UserLedger>, Error> {
        self.reconciler
            .load_ledger(user)
            .map_err(Self::map_ledger_error)
    }

    fn browse(&self, user: Option<UserId>, request: &BrowseRequest) -> Result<CatalogPage, Error> {
        let ledger = self.ledger(user)?;
        let matches: Vec<AnnotatedBook> = self
            .catalog()
            .search(&request.query)
            .map(|entry| AnnotatedBook::annotate(entry, ledger.as_ref()))
            .collect();

        let borrowed = matches.iter().filter(|book| book.is_borrowed).count();
        let stats = CatalogStats {
            total: matches.len(),
            available: matches.len() - borrowed,
            borrowed,
        };
        let window = PageWindow::new(matches.len(), request.page);
        let books = matches
            .get(window.range.clone())
            .map(<[AnnotatedBook]>::to_vec)
            .unwrap_or_default();

        Ok(CatalogPage {
            books,
            page: window.page,
            total_pages: window.total_pages,
            stats,
        })
    }

    fn favorites(&self, user: UserId) -> Result<Vec<AnnotatedBook>, Error> {
        let ledger = self.require_ledger(user)?;
        Ok(self
            .entries_for(ledger.favorited().iter())
            .map(|entry| AnnotatedBook::annotate(entry, Some(&ledger)))
            .collect())
    }

    fn loans(&self, user: UserId) -> Result<LoanReport, Error> {
        let ledger = self.require_ledger(user)?;
        let loans = self
            .entries_for(ledger.borrowed().iter())
            .map(|entry| LoanView::new(entry, &ledger, &self.policy))
            .collect();
        Ok(LoanReport::from_loans(loans))
    }

    fn extend_loan(&self, user: UserId, book: BookId) -> Result<ExtensionNotice, Error> {
        let ledger = self.require_ledger(user)?;
        let entry = self
            .catalog()
            .get(book)
            .filter(|_| ledger.is_borrowed(book))
            .ok_or_else(|| {
                Error::not_found(format!("book {book} is not on loan"))
                    .with_details(json!({ "bookId": book.get(), "code": "not_borrowed" }))
            })?;
        Ok(ExtensionNotice {
            book_id: book,
            title: entry.title().to_owned(),
            due_date: self.policy.extended_due_date(),
        })
    }
}
