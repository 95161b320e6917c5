//! Favourite list handlers.
//!
//! ```text
//! GET    /api/v1/favorites
//! POST   /api/v1/favorites/{bookId}/toggle
//! DELETE /api/v1/favorites/{bookId}
//! ```

use std::sync::Arc;

use actix_web::{delete, get, post, web};

use crate::domain::{AnnotatedBook, Error, UserLedger};
use crate::inbound::http::ApiResult;
use crate::inbound::http::blocking::run_blocking;
use crate::inbound::http::books::{book_id, current_ledger, known_book};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

fn not_logged_in() -> Error {
    Error::unauthorized("not logged in")
}

/// Catalogue entries the signed-in user has favourited.
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "Favourite books", body = [AnnotatedBook]),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites"
)]
#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AnnotatedBook>>> {
    let user = session.require_user_id()?;
    let library = Arc::clone(&state.library);
    let books = run_blocking(move || library.favorites(user)).await?;
    Ok(web::Json(books))
}

/// Flip a book's favourite flag and return the updated ledger.
#[utoipa::path(
    post,
    path = "/api/v1/favorites/{bookId}/toggle",
    params(("bookId" = u64, Path, description = "Catalogue id")),
    responses(
        (status = 200, description = "Updated ledger", body = UserLedger),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown book", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "toggleFavorite"
)]
#[post("/favorites/{book_id}/toggle")]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<UserLedger>> {
    let book = known_book(state.library.as_ref(), path.into_inner())?;
    let user = session.user_id()?;
    let ledger = Arc::clone(&state.ledger);
    let library = Arc::clone(&state.library);
    let updated = run_blocking(move || {
        if !ledger.toggle_favorite(user, book)? {
            return Err(not_logged_in());
        }
        current_ledger(library.as_ref(), user)
    })
    .await?;
    Ok(web::Json(updated))
}

/// Remove a book from the favourites and return the updated ledger.
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{bookId}",
    params(("bookId" = u64, Path, description = "Catalogue id")),
    responses(
        (status = 200, description = "Updated ledger", body = UserLedger),
        (status = 401, description = "Not logged in", body = Error),
        (status = 400, description = "Invalid book id", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "removeFavorite"
)]
#[delete("/favorites/{book_id}")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<UserLedger>> {
    let book = book_id(path.into_inner())?;
    let user = session.user_id()?;
    let ledger = Arc::clone(&state.ledger);
    let library = Arc::clone(&state.library);
    let updated = run_blocking(move || {
        if !ledger.remove_favorite(user, book)? {
            return Err(not_logged_in());
        }
        current_ledger(library.as_ref(), user)
    })
    .await?;
    Ok(web::Json(updated))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        FixtureLoginService, FixtureUserProfileQuery, MockLedgerCommand, MockLibraryQuery,
    };
    use crate::domain::{BookId, BookIdSet, UserId};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn ledger_with_favourite(user: UserId, book: u64) -> UserLedger {
        let favourites: BookIdSet = [BookId::new(book).expect("positive id")]
            .into_iter()
            .collect();
        UserLedger::new(user, BookIdSet::new(), favourites)
    }

    async fn call(
        ledger: MockLedgerCommand,
        library: MockLibraryQuery,
        request: actix_test::TestRequest,
        signed_in: bool,
    ) -> (StatusCode, Value) {
        let state = HttpState::new(HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            profile: Arc::new(FixtureUserProfileQuery),
            ledger: Arc::new(ledger),
            library: Arc::new(library),
        });
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api/v1")
                    .wrap(test_session_middleware())
                    .route(
                        "/sign-in",
                        web::get().to(|session: SessionContext| async move {
                            session.persist_user(UserId::new(7).expect("fixture id"))?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        }),
                    )
                    .service(list_favorites)
                    .service(toggle_favorite)
                    .service(remove_favorite),
            ),
        )
        .await;
        let request = if signed_in {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::get().uri("/api/v1/sign-in").to_request(),
            )
            .await;
            request.cookie(session_cookie(&res))
        } else {
            request
        };
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn toggle_returns_updated_ledger() {
        let mut ledger = MockLedgerCommand::new();
        ledger
            .expect_toggle_favorite()
            .withf(|user, book| user.map(UserId::get) == Some(7) && book.get() == 3)
            .times(1)
            .returning(|_, _| Ok(true));
        let mut library = MockLibraryQuery::new();
        library.expect_contains_book().returning(|_| true);
        library.expect_ledger().returning(|user| {
            Ok(user.map(|id| ledger_with_favourite(id, 3)))
        });

        let (status, body) = call(
            ledger,
            library,
            actix_test::TestRequest::post().uri("/api/v1/favorites/3/toggle"),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["favorited"], serde_json::json!([3]));
    }

    #[actix_web::test]
    async fn toggle_without_session_is_unauthorised() {
        let mut ledger = MockLedgerCommand::new();
        ledger
            .expect_toggle_favorite()
            .withf(|user, _| user.is_none())
            .returning(|_, _| Ok(false));
        let mut library = MockLibraryQuery::new();
        library.expect_contains_book().returning(|_| true);

        let (status, body) = call(
            ledger,
            library,
            actix_test::TestRequest::post().uri("/api/v1/favorites/3/toggle"),
            false,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "not logged in");
    }

    #[actix_web::test]
    async fn unknown_book_never_reaches_the_ledger() {
        let mut ledger = MockLedgerCommand::new();
        ledger.expect_toggle_favorite().never();
        let mut library = MockLibraryQuery::new();
        library.expect_contains_book().returning(|_| false);

        let (status, body) = call(
            ledger,
            library,
            actix_test::TestRequest::post().uri("/api/v1/favorites/404/toggle"),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["details"]["code"], "unknown_book");
    }

    #[actix_web::test]
    async fn removal_skips_the_catalogue_check() {
        let mut ledger = MockLedgerCommand::new();
        ledger
            .expect_remove_favorite()
            .withf(|user, book| user.map(UserId::get) == Some(7) && book.get() == 404)
            .times(1)
            .returning(|_, _| Ok(true));
        let mut library = MockLibraryQuery::new();
        library.expect_contains_book().never();
        library.expect_ledger().returning(|user| {
            Ok(user.map(|id| UserLedger::new(id, BookIdSet::new(), BookIdSet::new())))
        });

        let (status, body) = call(
            ledger,
            library,
            actix_test::TestRequest::delete().uri("/api/v1/favorites/404"),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["favorited"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn list_requires_session() {
        let (status, _) = call(
            MockLedgerCommand::new(),
            MockLibraryQuery::new(),
            actix_test::TestRequest::get().uri("/api/v1/favorites"),
            false,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
