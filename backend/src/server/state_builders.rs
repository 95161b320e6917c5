//! Helpers for assembling HTTP state from server configuration.

use std::sync::Arc;

use bookshelf::domain::ports::KeyValueStore;
use bookshelf::domain::{LedgerReconciler, LibraryService, LoanPolicy};
use bookshelf::inbound::http::state::{HttpState, HttpStatePorts};
use bookshelf::outbound::storage::{DirectoryKeyValueStore, InMemoryKeyValueStore};
use mockable::DefaultClock;
use tracing::{info, warn};

use super::ServerConfig;

/// Open the configured ledger store.
///
/// # Errors
/// Returns [`std::io::Error`] when the ledger directory cannot be opened.
fn build_ledger_store(config: &ServerConfig) -> std::io::Result<Arc<dyn KeyValueStore>> {
    match &config.ledger_dir {
        Some(dir) => {
            let store = DirectoryKeyValueStore::open(dir).map_err(|error| {
                std::io::Error::other(format!("failed to open ledger directory {dir}: {error}"))
            })?;
            info!(path = %dir, "ledgers persisted to directory");
            Ok(Arc::new(store))
        }
        None => {
            warn!("no ledger directory configured; ledgers are lost on restart");
            Ok(Arc::new(InMemoryKeyValueStore::default()))
        }
    }
}

/// Wire the library service and roster into the handler ports.
///
/// # Errors
/// Propagates failures from [`build_ledger_store`].
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let store = build_ledger_store(config)?;
    let reconciler = LedgerReconciler::new(store, Arc::clone(&config.catalog));
    let library = Arc::new(LibraryService::new(
        reconciler,
        LoanPolicy::new(Arc::new(DefaultClock)),
    ));
    Ok(HttpState::new(HttpStatePorts {
        login: config.roster.clone(),
        profile: config.roster.clone(),
        ledger: library.clone(),
        library,
    }))
}
