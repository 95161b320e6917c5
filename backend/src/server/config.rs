//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use bookshelf::domain::{Catalog, RosterDirectory};
use camino::Utf8PathBuf;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) roster: Arc<RosterDirectory>,
    pub(crate) ledger_dir: Option<Utf8PathBuf>,
}

impl ServerConfig {
    /// Construct a configuration with an empty catalogue and roster.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            catalog: Arc::new(Catalog::default()),
            roster: Arc::new(RosterDirectory::default()),
            ledger_dir: None,
        }
    }

    /// Serve `catalog` and authenticate against `roster`.
    #[must_use]
    pub fn with_library(mut self, catalog: Catalog, roster: RosterDirectory) -> Self {
        self.catalog = Arc::new(catalog);
        self.roster = Arc::new(roster);
        self
    }

    /// Persist ledgers as files under `dir`; `None` keeps them in memory.
    #[must_use]
    pub fn with_ledger_dir(mut self, dir: Option<Utf8PathBuf>) -> Self {
        self.ledger_dir = dir;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "read by the bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
