//! Static book catalogue.
//!
//! The catalogue is loaded once at start-up and shared read-only. Its seed
//! membership lists are consulted only when a user's ledger is first created.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::num::NonZeroU64;
use std::ops::Range;
use std::str::FromStr;

use library_data::BookRecord;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Number of entries shown per catalogue page.
pub const PAGE_SIZE: usize = 12;

/// Errors raised while building a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A book or seed user id was zero.
    #[error("catalogue id must be positive (book {book_id})")]
    InvalidId {
        /// Offending book id, or the book carrying a zero seed member.
        book_id: u64,
    },
    /// Two entries share an id.
    #[error("duplicate catalogue id {book_id}")]
    DuplicateId {
        /// Repeated book id.
        book_id: u64,
    },
}

/// Stable positive book identifier.
///
/// # Examples
/// ```
/// use bookshelf::domain::BookId;
///
/// let id: BookId = "21".parse().unwrap();
/// assert_eq!(id.get(), 21);
/// assert!(BookId::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct BookId(NonZeroU64);

/// Parse failure for [`BookId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("book id must be a positive integer")]
pub struct InvalidBookId;

impl BookId {
    /// Construct from a raw value, rejecting zero.
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(Self)
    }

    /// Raw integer value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or(InvalidBookId)
    }
}

impl From<BookId> for u64 {
    fn from(value: BookId) -> Self {
        value.get()
    }
}

impl TryFrom<u64> for BookId {
    type Error = InvalidBookId;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidBookId)
    }
}

/// One immutable catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    id: BookId,
    title: String,
    author: String,
    description: String,
    image: String,
    borrowed_by_seed: BTreeSet<UserId>,
    favorited_by_seed: BTreeSet<UserId>,
}

impl CatalogEntry {
    /// Create an entry with empty display extras and no seed members.
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            description: String::new(),
            image: String::new(),
            borrowed_by_seed: BTreeSet::new(),
            favorited_by_seed: BTreeSet::new(),
        }
    }

    /// Set the description text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the cover image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Users whose borrowed list starts with this book.
    pub fn with_borrowed_seed(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.borrowed_by_seed = users.into_iter().collect();
        self
    }

    /// Users whose favourites list starts with this book.
    pub fn with_favorited_seed(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.favorited_by_seed = users.into_iter().collect();
        self
    }

    /// Entry identifier.
    pub fn id(&self) -> BookId {
        self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Display author.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Cover image URL.
    pub fn image(&self) -> &str {
        self.image.as_str()
    }

    /// Whether `user` is seeded as a borrower.
    pub fn seeds_borrowed_for(&self, user: UserId) -> bool {
        self.borrowed_by_seed.contains(&user)
    }

    /// Whether `user` is seeded as a favouriter.
    pub fn seeds_favorite_for(&self, user: UserId) -> bool {
        self.favorited_by_seed.contains(&user)
    }
}

impl TryFrom<BookRecord> for CatalogEntry {
    type Error = CatalogError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let BookRecord {
            id,
            title,
            author,
            image,
            description,
            borrowed_by,
            favorited_by,
        } = record;
        let book_id = BookId::new(id).ok_or(CatalogError::InvalidId { book_id: id })?;
        let seeds = |raw: Vec<u64>| {
            raw.into_iter()
                .map(|user| UserId::new(user).map_err(|_| CatalogError::InvalidId { book_id: id }))
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self::new(book_id, title, author)
            .with_description(description)
            .with_image(image)
            .with_borrowed_seed(seeds(borrowed_by)?)
            .with_favorited_seed(seeds(favorited_by)?))
    }
}

/// Catalogue search filters.
///
/// An empty `title` matches every entry; an empty `author` matches every
/// author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive title substring.
    pub title: String,
    /// Exact author name.
    pub author: String,
}

impl CatalogQuery {
    fn matches(&self, entry: &CatalogEntry) -> bool {
        let title_ok = self.title.is_empty()
            || entry
                .title()
                .to_lowercase()
                .contains(&self.title.to_lowercase());
        let author_ok = self.author.is_empty() || entry.author() == self.author;
        title_ok && author_ok
    }
}

/// Position of one page within a filtered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Requested 1-based page number.
    pub page: usize,
    /// Number of pages available; zero for an empty result set.
    pub total_pages: usize,
    /// Index range of the page within the result set; empty when out of range.
    pub range: Range<usize>,
}

impl PageWindow {
    /// Compute the window for `page` over `total_items` entries.
    ///
    /// Page numbers below one are treated as the first page.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::PageWindow;
    ///
    /// let window = PageWindow::new(25, 3);
    /// assert_eq!(window.total_pages, 3);
    /// assert_eq!(window.range, 24..25);
    /// ```
    pub fn new(total_items: usize, page: usize) -> Self {
        let page = page.max(1);
        let total_pages = total_items.div_ceil(PAGE_SIZE);
        let start = (page - 1).saturating_mul(PAGE_SIZE).min(total_items);
        let end = start.saturating_add(PAGE_SIZE).min(total_items);
        Self {
            page,
            total_pages,
            range: start..end,
        }
    }
}

/// Immutable, ordered catalogue snapshot.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<BookId, usize>,
}

impl Catalog {
    /// Build a catalogue, rejecting duplicate ids.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.id(), position).is_some() {
                return Err(CatalogError::DuplicateId {
                    book_id: entry.id().get(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    /// Convert validated dataset records.
    pub fn from_records(records: Vec<BookRecord>) -> Result<Self, CatalogError> {
        let entries = records
            .into_iter()
            .map(CatalogEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// All entries in catalogue order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn get(&self, id: BookId) -> Option<&CatalogEntry> {
        self.index
            .get(&id)
            .and_then(|position| self.entries.get(*position))
    }

    /// Whether `id` names a catalogue entry.
    pub fn contains(&self, id: BookId) -> bool {
        self.index.contains_key(&id)
    }

    /// Entries matching `query`, in catalogue order.
    pub fn search<'a>(&'a self, query: &'a CatalogQuery) -> impl Iterator<Item = &'a CatalogEntry> {
        self.entries.iter().filter(move |entry| query.matches(entry))
    }

    /// Distinct author names, sorted.
    pub fn authors(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.author().to_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Ids seeded as borrowed by `user`, in catalogue order.
    pub fn borrowed_seed(&self, user: UserId) -> impl Iterator<Item = BookId> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.seeds_borrowed_for(user))
            .map(CatalogEntry::id)
    }

    /// Ids seeded as favourites by `user`, in catalogue order.
    pub fn favorited_seed(&self, user: UserId) -> impl Iterator<Item = BookId> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.seeds_favorite_for(user))
            .map(CatalogEntry::id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    fn book(id: u64, title: &str, author: &str) -> CatalogEntry {
        CatalogEntry::new(BookId::new(id).expect("positive id"), title, author)
    }

    fn user(id: u64) -> UserId {
        UserId::new(id).expect("positive id")
    }

    #[fixture]
    fn catalog() -> Catalog {
        Catalog::new(vec![
            book(1, "Dune", "Frank Herbert").with_borrowed_seed([user(42)]),
            book(2, "Emma", "Jane Austen").with_favorited_seed([user(42), user(7)]),
            book(3, "Dune Messiah", "Frank Herbert").with_borrowed_seed([user(7)]),
            book(4, "Persuasion", "Jane Austen"),
        ])
        .expect("unique ids")
    }

    #[rstest]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![book(5, "A", "X"), book(5, "B", "Y")]).expect_err("dup");
        assert_eq!(err, CatalogError::DuplicateId { book_id: 5 });
    }

    #[rstest]
    fn records_with_zero_seed_users_are_rejected() {
        let record = BookRecord {
            id: 9,
            title: "Nine".to_owned(),
            author: "N".to_owned(),
            image: String::new(),
            description: String::new(),
            borrowed_by: vec![0],
            favorited_by: Vec::new(),
        };
        let err = Catalog::from_records(vec![record]).expect_err("zero seed");
        assert_eq!(err, CatalogError::InvalidId { book_id: 9 });
    }

    #[rstest]
    #[case("dune", "", vec![1, 3])]
    #[case("DUNE", "Frank Herbert", vec![1, 3])]
    #[case("", "Jane Austen", vec![2, 4])]
    #[case("messiah", "Jane Austen", vec![])]
    #[case("", "", vec![1, 2, 3, 4])]
    fn search_filters_by_title_and_author(
        catalog: Catalog,
        #[case] title: &str,
        #[case] author: &str,
        #[case] expected: Vec<u64>,
    ) {
        let query = CatalogQuery {
            title: title.to_owned(),
            author: author.to_owned(),
        };
        let ids: Vec<u64> = catalog.search(&query).map(|e| e.id().get()).collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    fn authors_are_distinct_and_sorted(catalog: Catalog) {
        assert_eq!(catalog.authors(), vec!["Frank Herbert", "Jane Austen"]);
    }

    #[rstest]
    fn seeds_are_reported_per_list(catalog: Catalog) {
        let borrowed: Vec<u64> = catalog.borrowed_seed(user(7)).map(BookId::get).collect();
        let favorited: Vec<u64> = catalog.favorited_seed(user(7)).map(BookId::get).collect();
        assert_eq!(borrowed, vec![3]);
        assert_eq!(favorited, vec![2]);
    }

    #[rstest]
    fn lookup_by_id(catalog: Catalog) {
        let id = BookId::new(4).expect("positive id");
        assert_eq!(catalog.get(id).map(CatalogEntry::title), Some("Persuasion"));
        assert!(!catalog.contains(BookId::new(99).expect("positive id")));
    }

    #[rstest]
    #[case(0, 1, 0, 0..0)]
    #[case(12, 1, 1, 0..12)]
    #[case(13, 2, 2, 12..13)]
    #[case(13, 0, 2, 0..12)]
    #[case(13, 5, 2, 13..13)]
    fn page_windows(
        #[case] total: usize,
        #[case] page: usize,
        #[case] pages: usize,
        #[case] range: Range<usize>,
    ) {
        let window = PageWindow::new(total, page);
        assert_eq!(window.total_pages, pages);
        assert_eq!(window.range, range);
    }
}
