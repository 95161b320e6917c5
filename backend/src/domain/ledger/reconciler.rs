//! Reconciles per-user ledgers with the catalogue and the key-value store.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{BookIdSet, BorrowOutcome, LedgerError, LedgerList, UserLedger};
use crate::domain::ports::KeyValueStore;
use crate::domain::{BookId, Catalog, UserId};

/// Owns ledger creation and mutation for every user.
///
/// Each operation is a synchronous read-modify-write against one user's
/// keys. Concurrent writers for the same user race with last-writer-wins
/// semantics; different users never share a key.
///
/// Operations take `Option<UserId>`: `None` stands for "nobody is signed in"
/// and always short-circuits without touching the store.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use bookshelf::domain::{BookId, Catalog, CatalogEntry, LedgerReconciler, UserId};
/// use bookshelf::outbound::storage::InMemoryKeyValueStore;
///
/// let user = UserId::new(42).unwrap();
/// let book = BookId::new(1).unwrap();
/// let catalog = Catalog::new(vec![
///     CatalogEntry::new(book, "Dune", "Frank Herbert").with_borrowed_seed([user]),
/// ])
/// .unwrap();
/// let reconciler = LedgerReconciler::new(
///     Arc::new(InMemoryKeyValueStore::default()),
///     Arc::new(catalog),
/// );
///
/// let ledger = reconciler.load_ledger(Some(user)).unwrap().unwrap();
/// assert!(ledger.is_borrowed(book));
/// assert!(reconciler.toggle_favorite(Some(user), book).unwrap());
/// ```
pub struct LedgerReconciler<S: ?Sized> {
    store: Arc<S>,
    catalog: Arc<Catalog>,
}

impl<S: ?Sized> Clone for LedgerReconciler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<S> LedgerReconciler<S>
where
    S: KeyValueStore + ?Sized,
{
    /// Create a reconciler over `store` seeded from `catalog`.
    pub fn new(store: Arc<S>, catalog: Arc<Catalog>) -> Self {
        Self { store, catalog }
    }

    /// Catalogue snapshot used for seeding.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Load `user`'s ledger, creating and persisting it on first access.
    ///
    /// Returns `Ok(None)` without touching the store when `user` is `None`.
    /// Each list is reconciled on its own: an existing list is returned
    /// verbatim, a missing one is derived from the catalogue seeds and
    /// written back before returning.
    pub fn load_ledger(&self, user: Option<UserId>) -> Result<Option<UserLedger>, LedgerError> {
        let Some(user) = user else {
            return Ok(None);
        };
        let borrowed = self.load_list(user, LedgerList::Borrowed)?;
        let favorited = self.load_list(user, LedgerList::Favorites)?;
        Ok(Some(UserLedger::new(user, borrowed, favorited)))
    }

    /// Flip `book`'s favourite membership.
    ///
    /// Returns `false` with no side effect when `user` is `None`.
    pub fn toggle_favorite(&self, user: Option<UserId>, book: BookId) -> Result<bool, LedgerError> {
        let Some(user) = user else {
            warn!(book_id = %book, "favourite toggle without a signed-in user");
            return Ok(false);
        };
        let mut favorited = self.load_list(user, LedgerList::Favorites)?;
        let now_favorite = favorited.toggle(book);
        self.write_list(user, LedgerList::Favorites, &favorited)?;
        info!(user_id = %user, book_id = %book, favorite = now_favorite, "favourite toggled");
        Ok(true)
    }

    /// Add `book` to the borrowed list.
    ///
    /// There is no borrow limit and no check against other users' ledgers.
    pub fn borrow_book(&self, user: Option<UserId>, book: BookId) -> Result<BorrowOutcome, LedgerError> {
        let Some(user) = user else {
            warn!(book_id = %book, "borrow without a signed-in user");
            return Ok(BorrowOutcome::NotLoggedIn);
        };
        let mut borrowed = self.load_list(user, LedgerList::Borrowed)?;
        if !borrowed.insert(book) {
            debug!(user_id = %user, book_id = %book, "book already borrowed");
            return Ok(BorrowOutcome::AlreadyBorrowed);
        }
        self.write_list(user, LedgerList::Borrowed, &borrowed)?;
        info!(user_id = %user, book_id = %book, "book borrowed");
        Ok(BorrowOutcome::Borrowed)
    }

    /// Remove `book` from the borrowed list; absent ids succeed as a no-op.
    pub fn return_book(&self, user: Option<UserId>, book: BookId) -> Result<bool, LedgerError> {
        self.remove_from(user, book, LedgerList::Borrowed)
    }

    /// Remove `book` from the favourites; absent ids succeed as a no-op.
    pub fn remove_favorite(&self, user: Option<UserId>, book: BookId) -> Result<bool, LedgerError> {
        self.remove_from(user, book, LedgerList::Favorites)
    }

    fn remove_from(
        &self,
        user: Option<UserId>,
        book: BookId,
        list: LedgerList,
    ) -> Result<bool, LedgerError> {
        let Some(user) = user else {
            warn!(book_id = %book, %list, "removal without a signed-in user");
            return Ok(false);
        };
        let mut ids = self.load_list(user, list)?;
        let removed = ids.remove(book);
        self.write_list(user, list, &ids)?;
        info!(user_id = %user, book_id = %book, %list, removed, "book removed from list");
        Ok(true)
    }

    fn load_list(&self, user: UserId, list: LedgerList) -> Result<BookIdSet, LedgerError> {
        let key = list.storage_key(user);
        if let Some(existing) = self.read_list(&key)? {
            return Ok(existing);
        }

        let seeded: BookIdSet = match list {
            LedgerList::Borrowed => self.catalog.borrowed_seed(user).collect(),
            LedgerList::Favorites => self.catalog.favorited_seed(user).collect(),
        };
        self.write_list(user, list, &seeded)?;
        debug!(user_id = %user, %list, count = seeded.len(), "ledger list seeded from catalogue");
        Ok(seeded)
    }

    fn read_list(&self, key: &str) -> Result<Option<BookIdSet>, LedgerError> {
        let Some(bytes) = self.store.get(key).map_err(|source| LedgerError::Store {
            key: key.to_owned(),
            source,
        })?
        else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| LedgerError::Corrupted {
                key: key.to_owned(),
                message: err.to_string(),
            })
    }

    fn write_list(&self, user: UserId, list: LedgerList, ids: &BookIdSet) -> Result<(), LedgerError> {
        let key = list.storage_key(user);
        let bytes = serde_json::to_vec(ids).map_err(|err| LedgerError::Encode {
            key: key.clone(),
            message: err.to_string(),
        })?;
        self.store
            .set(&key, &bytes)
            .map_err(|source| LedgerError::Store { key, source })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::CatalogEntry;
    use crate::domain::ports::{KeyValueStoreError, MockKeyValueStore};
    use crate::outbound::storage::InMemoryKeyValueStore;
    use rstest::{fixture, rstest};

    fn book(raw: u64) -> BookId {
        BookId::new(raw).expect("positive id")
    }

    fn user(raw: u64) -> UserId {
        UserId::new(raw).expect("positive id")
    }

    fn ids(set: &BookIdSet) -> Vec<u64> {
        set.iter().map(BookId::get).collect()
    }

    #[fixture]
    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                CatalogEntry::new(book(1), "Dune", "Frank Herbert").with_borrowed_seed([user(42)]),
                CatalogEntry::new(book(2), "Emma", "Jane Austen").with_favorited_seed([user(42)]),
                CatalogEntry::new(book(3), "Ulysses", "James Joyce"),
            ])
            .expect("unique ids"),
        )
    }

    #[fixture]
    fn store() -> Arc<InMemoryKeyValueStore> {
        Arc::new(InMemoryKeyValueStore::default())
    }

    #[rstest]
    fn absent_user_never_touches_the_store(catalog: Arc<Catalog>) {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get().never();
        mock.expect_set().never();
        let reconciler = LedgerReconciler::new(Arc::new(mock), catalog);

        assert_eq!(reconciler.load_ledger(None).expect("no error"), None);
        assert!(!reconciler.toggle_favorite(None, book(1)).expect("no error"));
        assert_eq!(
            reconciler.borrow_book(None, book(1)).expect("no error"),
            BorrowOutcome::NotLoggedIn
        );
        assert!(!reconciler.return_book(None, book(1)).expect("no error"));
        assert!(!reconciler.remove_favorite(None, book(1)).expect("no error"));
    }

    #[rstest]
    fn first_load_seeds_and_persists(catalog: Arc<Catalog>, store: Arc<InMemoryKeyValueStore>) {
        let reconciler = LedgerReconciler::new(Arc::clone(&store), catalog);
        let ledger = reconciler
            .load_ledger(Some(user(42)))
            .expect("load")
            .expect("ledger");

        assert_eq!(ids(ledger.borrowed()), vec![1]);
        assert_eq!(ids(ledger.favorited()), vec![2]);
        assert_eq!(store.get("borrowed_42").expect("read"), Some(b"[1]".to_vec()));
        assert_eq!(store.get("favorites_42").expect("read"), Some(b"[2]".to_vec()));
    }

    #[rstest]
    fn lists_are_seeded_independently(catalog: Arc<Catalog>, store: Arc<InMemoryKeyValueStore>) {
        store.set("favorites_42", b"[3]").expect("prime store");
        let reconciler = LedgerReconciler::new(Arc::clone(&store), catalog);
        let ledger = reconciler
            .load_ledger(Some(user(42)))
            .expect("load")
            .expect("ledger");

        assert_eq!(ids(ledger.borrowed()), vec![1]);
        assert_eq!(ids(ledger.favorited()), vec![3]);
    }

    #[rstest]
    fn corrupted_list_is_reported_not_reseeded(
        catalog: Arc<Catalog>,
        store: Arc<InMemoryKeyValueStore>,
    ) {
        store.set("borrowed_42", b"not json").expect("prime store");
        let reconciler = LedgerReconciler::new(Arc::clone(&store), catalog);
        let err = reconciler
            .borrow_book(Some(user(42)), book(3))
            .expect_err("corruption surfaces");

        assert!(matches!(err, LedgerError::Corrupted { ref key, .. } if key == "borrowed_42"));
        assert_eq!(store.get("borrowed_42").expect("read"), Some(b"not json".to_vec()));
    }

    #[rstest]
    fn already_borrowed_leaves_store_untouched(catalog: Arc<Catalog>) {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get()
            .withf(|key| key == "borrowed_42")
            .returning(|_| Ok(Some(b"[1]".to_vec())));
        mock.expect_set().never();
        let reconciler = LedgerReconciler::new(Arc::new(mock), catalog);

        let outcome = reconciler.borrow_book(Some(user(42)), book(1)).expect("borrow");
        assert_eq!(outcome, BorrowOutcome::AlreadyBorrowed);
    }

    #[rstest]
    fn store_failures_carry_the_key(catalog: Arc<Catalog>) {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get()
            .returning(|_| Err(KeyValueStoreError::unavailable("offline")));
        let reconciler = LedgerReconciler::new(Arc::new(mock), catalog);

        let err = reconciler
            .toggle_favorite(Some(user(5)), book(1))
            .expect_err("store offline");
        assert!(matches!(err, LedgerError::Store { ref key, .. } if key == "favorites_5"));
    }

    #[rstest]
    fn returning_an_absent_book_still_succeeds(
        catalog: Arc<Catalog>,
        store: Arc<InMemoryKeyValueStore>,
    ) {
        let reconciler = LedgerReconciler::new(Arc::clone(&store), catalog);
        assert!(reconciler.return_book(Some(user(42)), book(3)).expect("return"));
        assert_eq!(store.get("borrowed_42").expect("read"), Some(b"[1]".to_vec()));
    }
}
