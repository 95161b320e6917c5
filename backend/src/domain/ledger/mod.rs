//! Per-user borrow and favourite ledgers.
//!
//! A [`UserLedger`] is a projection of two persisted id lists. The lists are
//! created lazily from the catalogue's seed memberships the first time a user
//! is seen; after that the persisted copy is authoritative and the seeds are
//! ignored. [`LedgerReconciler`] owns that lifecycle and every mutation.
//!
//! Persisted layout, one JSON array of integers per key:
//!
//! | Key                 | Contents             |
//! | ------------------- | -------------------- |
//! | `borrowed_<userId>` | borrowed book ids    |
//! | `favorites_<userId>`| favourited book ids  |

mod reconciler;

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ports::KeyValueStoreError;
use super::{BookId, UserId};

pub use reconciler::LedgerReconciler;

/// The two lists tracked per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerList {
    /// Books the user currently holds.
    Borrowed,
    /// Books the user has marked as favourites.
    Favorites,
}

impl LedgerList {
    /// Key prefix used in the store.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Borrowed => "borrowed",
            Self::Favorites => "favorites",
        }
    }

    /// Store key holding this list for `user`.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::{LedgerList, UserId};
    ///
    /// let user = UserId::new(42).unwrap();
    /// assert_eq!(LedgerList::Borrowed.storage_key(user), "borrowed_42");
    /// assert_eq!(LedgerList::Favorites.storage_key(user), "favorites_42");
    /// ```
    pub fn storage_key(self, user: UserId) -> String {
        format!("{}_{user}", self.prefix())
    }
}

impl fmt::Display for LedgerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Duplicate-free list of book ids that keeps insertion order.
///
/// Order carries no meaning for membership, but keeping it stable means a
/// rewrite of an unchanged list produces identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<BookId>", into = "Vec<BookId>")]
pub struct BookIdSet(Vec<BookId>);

impl BookIdSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test.
    pub fn contains(&self, id: BookId) -> bool {
        self.0.contains(&id)
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: BookId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Remove `id` if present. Returns whether it was removed.
    pub fn remove(&mut self, id: BookId) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| *existing != id);
        self.0.len() != before
    }

    /// Flip membership of `id`. Returns the new membership.
    pub fn toggle(&mut self, id: BookId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.0.push(id);
            true
        }
    }

    /// Ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = BookId> + '_ {
        self.0.iter().copied()
    }

    /// Number of ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids as a slice.
    pub fn as_slice(&self) -> &[BookId] {
        &self.0
    }
}

impl From<Vec<BookId>> for BookIdSet {
    fn from(ids: Vec<BookId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<BookIdSet> for Vec<BookId> {
    fn from(set: BookIdSet) -> Self {
        set.0
    }
}

impl FromIterator<BookId> for BookIdSet {
    fn from_iter<T: IntoIterator<Item = BookId>>(iter: T) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// A user's borrowed and favourite lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserLedger {
    #[schema(value_type = u64, example = 42)]
    user_id: UserId,
    #[schema(value_type = Vec<u64>, example = json!([1, 4]))]
    borrowed: BookIdSet,
    #[schema(value_type = Vec<u64>, example = json!([2]))]
    favorited: BookIdSet,
}

impl UserLedger {
    /// Assemble a ledger from its two lists.
    pub fn new(user_id: UserId, borrowed: BookIdSet, favorited: BookIdSet) -> Self {
        Self {
            user_id,
            borrowed,
            favorited,
        }
    }

    /// Owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Borrowed ids.
    pub fn borrowed(&self) -> &BookIdSet {
        &self.borrowed
    }

    /// Favourite ids.
    pub fn favorited(&self) -> &BookIdSet {
        &self.favorited
    }

    /// Whether `id` is borrowed.
    pub fn is_borrowed(&self, id: BookId) -> bool {
        self.borrowed.contains(id)
    }

    /// Whether `id` is a favourite.
    pub fn is_favorite(&self, id: BookId) -> bool {
        self.favorited.contains(id)
    }
}

/// Result of a borrow attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowOutcome {
    /// The book was added to the borrowed list.
    Borrowed,
    /// No user was supplied; nothing was written.
    NotLoggedIn,
    /// The book was already borrowed; nothing was written.
    AlreadyBorrowed,
}

impl BorrowOutcome {
    /// Whether the borrow took effect.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Borrowed)
    }

    /// Failure reason, `None` on success.
    pub fn reason(self) -> Option<&'static str> {
        match self {
            Self::Borrowed => None,
            Self::NotLoggedIn => Some("not logged in"),
            Self::AlreadyBorrowed => Some("already borrowed"),
        }
    }
}

/// Failures surfaced by [`LedgerReconciler`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The store rejected a read or write.
    #[error("ledger store failure for {key}: {source}")]
    Store {
        /// Key being accessed.
        key: String,
        /// Adapter error.
        #[source]
        source: KeyValueStoreError,
    },
    /// A persisted list is not a JSON array of positive integers.
    #[error("persisted ledger {key} is corrupted: {message}")]
    Corrupted {
        /// Key holding the bad value.
        key: String,
        /// Parser message.
        message: String,
    },
    /// A list could not be encoded.
    #[error("failed to encode ledger {key}: {message}")]
    Encode {
        /// Key being written.
        key: String,
        /// Encoder message.
        message: String,
    },
}
