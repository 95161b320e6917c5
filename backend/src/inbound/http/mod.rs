//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate requests into calls on the driving ports held by
//! [`state::HttpState`]; the synchronous ledger ports run on the blocking pool.

use actix_web::web;

pub mod blocking;
pub mod books;
pub mod error;
pub mod favorites;
pub mod health;
pub mod loans;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Register every `/api/v1` endpoint on `cfg`.
///
/// The caller owns the scope and its session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bookshelf::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(books::list_authors)
        .service(books::browse_books)
        .service(books::get_ledger)
        .service(favorites::list_favorites)
        .service(favorites::toggle_favorite)
        .service(favorites::remove_favorite)
        .service(loans::list_loans)
        .service(loans::extend_loan)
        .service(loans::borrow_book)
        .service(loans::return_book);
}
