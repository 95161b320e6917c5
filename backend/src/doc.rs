//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler in the HTTP adapter, the wire DTOs
//! and the session cookie security scheme. Swagger UI serves it in debug
//! builds and `openapi-dump` writes it out for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AccountStatus, AnnotatedBook, CatalogPage, CatalogStats, Error, ErrorCode, ExtensionNotice,
    LoanReport, LoanSummary, LoanView, Role, User, UserLedger,
};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bookshelf API",
        description = "Library catalogue browsing with per-user borrow and favourite ledgers."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::books::browse_books,
        crate::inbound::http::books::list_authors,
        crate::inbound::http::books::get_ledger,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::toggle_favorite,
        crate::inbound::http::favorites::remove_favorite,
        crate::inbound::http::loans::list_loans,
        crate::inbound::http::loans::borrow_book,
        crate::inbound::http::loans::return_book,
        crate::inbound::http::loans::extend_loan,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Role,
        AccountStatus,
        LoginRequest,
        UserLedger,
        AnnotatedBook,
        CatalogPage,
        CatalogStats,
        LoanView,
        LoanSummary,
        LoanReport,
        ExtensionNotice
    )),
    tags(
        (name = "users", description = "Sign-in and profile"),
        (name = "books", description = "Catalogue browsing"),
        (name = "ledger", description = "Raw per-user ledger"),
        (name = "favorites", description = "Favourite list"),
        (name = "loans", description = "Borrowing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
