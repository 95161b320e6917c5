//! Read models served by [`crate::domain::ports::LibraryQuery`].
//!
//! These types are computed on every read and never persisted. They
//! serialise in camelCase for the HTTP adapter.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{BookId, CatalogEntry, CatalogQuery, LoanPolicy, UserLedger};

/// Catalogue entry annotated with the caller's ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedBook {
    /// Catalogue id.
    #[schema(value_type = u64, example = 7)]
    pub id: BookId,
    /// Display title.
    pub title: String,
    /// Display author.
    pub author: String,
    /// Description text.
    pub description: String,
    /// Cover image URL.
    pub image: String,
    /// Whether the caller has favourited this book.
    pub is_favorite: bool,
    /// Whether the caller currently holds this book.
    pub is_borrowed: bool,
}

impl AnnotatedBook {
    /// Annotate `entry` against `ledger`; an absent ledger marks nothing.
    pub fn annotate(entry: &CatalogEntry, ledger: Option<&UserLedger>) -> Self {
        let id = entry.id();
        Self {
            id,
            title: entry.title().to_owned(),
            author: entry.author().to_owned(),
            description: entry.description().to_owned(),
            image: entry.image().to_owned(),
            is_favorite: ledger.is_some_and(|l| l.is_favorite(id)),
            is_borrowed: ledger.is_some_and(|l| l.is_borrowed(id)),
        }
    }
}

/// Catalogue search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseRequest {
    /// Title and author filters.
    pub query: CatalogQuery,
    /// 1-based page number.
    pub page: usize,
}

impl Default for BrowseRequest {
    fn default() -> Self {
        Self {
            query: CatalogQuery::default(),
            page: 1,
        }
    }
}

/// Counts over the whole filtered result set, not just the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Matching entries.
    pub total: usize,
    /// Matching entries the caller does not hold.
    pub available: usize,
    /// Matching entries the caller holds.
    pub borrowed: usize,
}

/// One page of the annotated catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    /// Entries on this page.
    pub books: Vec<AnnotatedBook>,
    /// Requested page, 1-based.
    pub page: usize,
    /// Available pages.
    pub total_pages: usize,
    /// Counts over the filtered set.
    pub stats: CatalogStats,
}

impl CatalogPage {
    /// Page with no entries.
    pub fn empty(page: usize) -> Self {
        Self {
            books: Vec::new(),
            page: page.max(1),
            total_pages: 0,
            stats: CatalogStats::default(),
        }
    }
}

/// A borrowed book with its derived due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanView {
    /// The borrowed book.
    pub book: AnnotatedBook,
    /// Due date computed at read time.
    pub due_date: DateTime<Utc>,
    /// Whether the overdue rule flags this book.
    pub overdue: bool,
}

impl LoanView {
    /// Build the loan view for `entry` under `policy`.
    pub fn new(entry: &CatalogEntry, ledger: &UserLedger, policy: &LoanPolicy) -> Self {
        Self {
            book: AnnotatedBook::annotate(entry, Some(ledger)),
            due_date: policy.due_date(),
            overdue: LoanPolicy::is_overdue(entry.id()),
        }
    }
}

/// Loan counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    /// Books held.
    pub borrowed: usize,
    /// Books not flagged overdue.
    pub on_time: usize,
    /// Books flagged overdue.
    pub overdue: usize,
}

/// Every loan a user holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanReport {
    /// Loans in borrow order.
    pub loans: Vec<LoanView>,
    /// Counts across `loans`.
    pub summary: LoanSummary,
}

impl LoanReport {
    /// Collect loans and tally the summary.
    pub fn from_loans(loans: Vec<LoanView>) -> Self {
        let overdue = loans.iter().filter(|loan| loan.overdue).count();
        let summary = LoanSummary {
            borrowed: loans.len(),
            on_time: loans.len() - overdue,
            overdue,
        };
        Self { loans, summary }
    }
}

/// Announcement of an extended due date. Nothing is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionNotice {
    /// Book being extended.
    #[schema(value_type = u64, example = 7)]
    pub book_id: BookId,
    /// Title for display.
    pub title: String,
    /// New due date.
    pub due_date: DateTime<Utc>,
}
