//! Catalogue browsing handlers.
//!
//! ```text
//! GET /api/v1/books?title=dune&author=Frank%20Herbert&page=2
//! GET /api/v1/books/authors
//! GET /api/v1/ledger
//! ```
//!
//! Browsing works signed out; entries are then simply not annotated.

use std::sync::Arc;

use actix_web::{get, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::ports::LibraryQuery;
use crate::domain::{
    BookId, BrowseRequest, CatalogPage, CatalogQuery, Error, UserId, UserLedger,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::blocking::run_blocking;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /api/v1/books`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BrowseParams {
    /// Case-insensitive title fragment.
    pub title: Option<String>,
    /// Exact author name.
    pub author: Option<String>,
    /// 1-based page number; defaults to 1.
    pub page: Option<usize>,
}

impl From<BrowseParams> for BrowseRequest {
    fn from(params: BrowseParams) -> Self {
        Self {
            query: CatalogQuery {
                title: params.title.unwrap_or_default().trim().to_owned(),
                author: params.author.unwrap_or_default(),
            },
            page: params.page.unwrap_or(1),
        }
    }
}

/// Parse a raw path segment as a book id without consulting the catalogue.
///
/// Removal routes use this so ids dropped from the catalogue can still be
/// cleared from a ledger.
pub(crate) fn book_id(raw: u64) -> Result<BookId, Error> {
    BookId::new(raw).ok_or_else(|| {
        Error::invalid_request("book id must be positive")
            .with_details(json!({ "field": "bookId", "code": "invalid_book_id" }))
    })
}

/// Validate a raw path segment as a catalogue id the service knows.
///
/// Runs before any ledger call so unknown ids never reach the store.
pub(crate) fn known_book(library: &dyn LibraryQuery, raw: u64) -> Result<BookId, Error> {
    let book = book_id(raw)?;
    if library.contains_book(book) {
        Ok(book)
    } else {
        Err(Error::not_found(format!("book {book} not found"))
            .with_details(json!({ "bookId": raw, "code": "unknown_book" })))
    }
}

/// Load the caller's ledger, answering `401` when nobody is signed in.
pub(crate) fn current_ledger(
    library: &dyn LibraryQuery,
    user: Option<UserId>,
) -> Result<UserLedger, Error> {
    library
        .ledger(user)?
        .ok_or_else(|| Error::unauthorized("not logged in"))
}

/// Browse the catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/books",
    params(BrowseParams),
    responses(
        (status = 200, description = "Annotated catalogue page", body = CatalogPage),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["books"],
    operation_id = "browseBooks",
    security([])
)]
#[get("/books")]
pub async fn browse_books(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<BrowseParams>,
) -> ApiResult<web::Json<CatalogPage>> {
    let user = session.user_id()?;
    let request = BrowseRequest::from(params.into_inner());
    let library = Arc::clone(&state.library);
    let page = run_blocking(move || library.browse(user, &request)).await?;
    Ok(web::Json(page))
}

/// Distinct authors for the search filter.
#[utoipa::path(
    get,
    path = "/api/v1/books/authors",
    responses((status = 200, description = "Sorted author names", body = [String])),
    tags = ["books"],
    operation_id = "listAuthors",
    security([])
)]
#[get("/books/authors")]
pub async fn list_authors(state: web::Data<HttpState>) -> web::Json<Vec<String>> {
    web::Json(state.library.authors())
}

/// The signed-in user's raw ledger.
#[utoipa::path(
    get,
    path = "/api/v1/ledger",
    responses(
        (status = 200, description = "Borrowed and favourite ids", body = UserLedger),
        (status = 401, description = "Not logged in", body = Error),
        (status = 503, description = "Ledger store unavailable", body = Error)
    ),
    tags = ["ledger"],
    operation_id = "getLedger"
)]
#[get("/ledger")]
pub async fn get_ledger(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserLedger>> {
    let user = session.require_user_id()?;
    let library = Arc::clone(&state.library);
    let ledger = run_blocking(move || current_ledger(library.as_ref(), Some(user))).await?;
    Ok(web::Json(ledger))
}
