//! Due-date and overdue rules for borrowed books.
//!
//! Nothing here is persisted: the due date is recomputed from the clock on
//! every read, so it always sits [`LOAN_PERIOD_DAYS`] days ahead.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use super::BookId;

/// Length of a loan, and of an extension.
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Every book whose id is a multiple of this is reported overdue.
const OVERDUE_MODULUS: u64 = 7;

/// Clock-driven loan rules.
#[derive(Clone)]
pub struct LoanPolicy {
    clock: Arc<dyn Clock + Send + Sync>,
}

impl LoanPolicy {
    /// Create a policy reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { clock }
    }

    /// Current instant according to the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Due date for a loan read now.
    pub fn due_date(&self) -> DateTime<Utc> {
        self.now() + TimeDelta::days(LOAN_PERIOD_DAYS)
    }

    /// Placeholder overdue rule: ids divisible by seven.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::{BookId, LoanPolicy};
    ///
    /// assert!(LoanPolicy::is_overdue(BookId::new(14).unwrap()));
    /// assert!(!LoanPolicy::is_overdue(BookId::new(15).unwrap()));
    /// ```
    pub fn is_overdue(book: BookId) -> bool {
        book.get() % OVERDUE_MODULUS == 0
    }

    /// New due date announced by an extension. Nothing is recorded.
    pub fn extended_due_date(&self) -> DateTime<Utc> {
        self.due_date()
    }
}
