//! Bridge from async handlers to the synchronous ledger ports.
//!
//! Ledger calls may hit the filesystem, so they run on Actix's blocking
//! thread pool rather than on the reactor.

use actix_web::web;
use tracing::error;

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Run `work` on the blocking pool and flatten its result.
///
/// A cancelled or panicked job becomes an internal error.
pub async fn run_blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    web::block(work).await.unwrap_or_else(|err| {
        error!(error = %err, "blocking ledger call failed");
        Err(Error::internal("blocking task failed"))
    })
}
