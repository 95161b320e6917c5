//! Domain primitives, aggregates and services.
//!
//! Purpose: model the catalogue, the per-user borrow and favourite ledgers,
//! and the services that expose them through driving ports. Nothing here
//! knows about HTTP or the concrete key-value store.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Catalog, CatalogEntry, BookId: the static catalogue.
//! - LedgerReconciler, UserLedger, BorrowOutcome: ledger lifecycle.
//! - LibraryService, RosterDirectory: driving-port implementations.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod library;
pub mod library_service;
pub mod loan_policy;
pub mod ports;
pub mod roster;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::catalog::{
    BookId, Catalog, CatalogEntry, CatalogError, CatalogQuery, InvalidBookId, PAGE_SIZE,
    PageWindow,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ledger::{
    BookIdSet, BorrowOutcome, LedgerError, LedgerList, LedgerReconciler, UserLedger,
};
pub use self::library::{
    AnnotatedBook, BrowseRequest, CatalogPage, CatalogStats, ExtensionNotice, LoanReport,
    LoanSummary, LoanView,
};
pub use self::library_service::LibraryService;
pub use self::loan_policy::{LOAN_PERIOD_DAYS, LoanPolicy};
pub use self::roster::RosterDirectory;
pub use self::user::{AccountStatus, Role, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bookshelf::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("not logged in"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
