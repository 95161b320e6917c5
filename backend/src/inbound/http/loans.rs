//! Loan handlers.
//!
//! ```text
//! GET    /api/v1/loans
//! POST   /api/v1/loans/{bookId}
//! DELETE /api/v1/loans/{bookId}
//! POST   /api/v1/loans/{bookId}/extend
//! ```

use std::sync::Arc;

use actix_web::{delete, get, post, web};
use serde_json::json;

use crate::domain::{BookId, BorrowOutcome, Error, ExtensionNotice, LoanReport, UserLedger};
use crate::inbound::http::ApiResult;
use crate::inbound::http::blocking::run_blocking;
use crate::inbound::http::books::{book_id, current_ledger, known_book};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

fn borrow_rejection(outcome: BorrowOutcome, book: BookId) -> Error {
    match outcome {
        BorrowOutcome::AlreadyBorrowed => Error::conflict("already borrowed")
            .with_details(json!({ "bookId": book.get(), "code": "already_borrowed" })),
        BorrowOutcome::NotLoggedIn | BorrowOutcome::Borrowed => {
            Error::unauthorized("not logged in")
        }
    }
}

/// The signed-in user's loans with due dates.
#[utoipa::path(
    get,
    path = "/api/v1/loans",
    responses(
        (status = 200, description = "Loans and summary", body = LoanReport),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["loans"],
    operation_id = "listLoans"
)]
#[get("/loans")]
pub async fn list_loans(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LoanReport>> {
    let user = session.require_user_id()?;
    let library = Arc::clone(&state.library);
    let report = run_blocking(move || library.loans(user)).await?;
    Ok(web::Json(report))
}

/// Borrow a book and return the updated ledger.
#[utoipa::path(
    post,
    path = "/api/v1/loans/{bookId}",
    params(("bookId" = u64, Path, description = "Catalogue id")),
    responses(
        (status = 200, description = "Updated ledger", body = UserLedger),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown book", body = Error),
        (status = 409, description = "Already borrowed", body = Error)
    ),
    tags = ["loans"],
    operation_id = "borrowBook"
)]
#[post("/loans/{book_id}")]
pub async fn borrow_book(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<UserLedger>> {
    let book = known_book(state.library.as_ref(), path.into_inner())?;
    let user = session.user_id()?;
    let ledger = Arc::clone(&state.ledger);
    let library = Arc::clone(&state.library);
    let updated = run_blocking(move || {
        let outcome = ledger.borrow_book(user, book)?;
        if !outcome.is_success() {
            return Err(borrow_rejection(outcome, book));
        }
        current_ledger(library.as_ref(), user)
    })
    .await?;
    Ok(web::Json(updated))
}

/// Return a book and answer with the updated ledger.
#[utoipa::path(
    delete,
    path = "/api/v1/loans/{bookId}",
    params(("bookId" = u64, Path, description = "Catalogue id")),
    responses(
        (status = 200, description = "Updated ledger", body = UserLedger),
        (status = 401, description = "Not logged in", body = Error),
        (status = 400, description = "Invalid book id", body = Error)
    ),
    tags = ["loans"],
    operation_id = "returnBook"
)]
#[delete("/loans/{book_id}")]
pub async fn return_book(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<UserLedger>> {
    let book = book_id(path.into_inner())?;
    let user = session.user_id()?;
    let ledger = Arc::clone(&state.ledger);
    let library = Arc::clone(&state.library);
    let updated = run_blocking(move || {
        if !ledger.return_book(user, book)? {
            return Err(Error::unauthorized("not logged in"));
        }
        current_ledger(library.as_ref(), user)
    })
    .await?;
    Ok(web::Json(updated))
}

/// Announce an extended due date. Nothing is stored.
#[utoipa::path(
    post,
    path = "/api/v1/loans/{bookId}/extend",
    params(("bookId" = u64, Path, description = "Catalogue id")),
    responses(
        (status = 200, description = "New due date", body = ExtensionNotice),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown book or not on loan", body = Error)
    ),
    tags = ["loans"],
    operation_id = "extendLoan"
)]
#[post("/loans/{book_id}/extend")]
pub async fn extend_loan(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<ExtensionNotice>> {
    let book = known_book(state.library.as_ref(), path.into_inner())?;
    let user = session.require_user_id()?;
    let library = Arc::clone(&state.library);
    let notice = run_blocking(move || library.extend_loan(user, book)).await?;
    Ok(web::Json(notice))
}
