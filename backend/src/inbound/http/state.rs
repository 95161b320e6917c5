//! Shared HTTP adapter state.
//!
//! Handlers receive [`HttpState`] through `web::Data` and only see domain
//! ports, so endpoint tests can swap in fixtures or mocks without touching
//! the filesystem.

use std::sync::Arc;

use crate::domain::ports::{LedgerCommand, LibraryQuery, LoginService, UserProfileQuery};

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Credential check.
    pub login: Arc<dyn LoginService>,
    /// Current-user profile lookup.
    pub profile: Arc<dyn UserProfileQuery>,
    /// Ledger mutations.
    pub ledger: Arc<dyn LedgerCommand>,
    /// Catalogue and ledger reads.
    pub library: Arc<dyn LibraryQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check.
    pub login: Arc<dyn LoginService>,
    /// Current-user profile lookup.
    pub profile: Arc<dyn UserProfileQuery>,
    /// Ledger mutations.
    pub ledger: Arc<dyn LedgerCommand>,
    /// Catalogue and ledger reads.
    pub library: Arc<dyn LibraryQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bookshelf::domain::ports::{
    ///     FixtureLedgerCommand, FixtureLibraryQuery, FixtureLoginService,
    ///     FixtureUserProfileQuery,
    /// };
    /// use bookshelf::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     profile: Arc::new(FixtureUserProfileQuery),
    ///     ledger: Arc::new(FixtureLedgerCommand),
    ///     library: Arc::new(FixtureLibraryQuery),
    /// });
    /// let _library = Arc::clone(&state.library);
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            profile,
            ledger,
            library,
        } = ports;
        Self {
            login,
            profile,
            ledger,
            library,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
