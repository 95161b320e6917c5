//! Driving port for sign-in.
//!
//! Inbound adapters call this port to turn credentials into a [`UserId`]
//! without knowing where the roster lives, so handler tests can swap in a
//! double instead of loading fixture files.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development authenticator: `admin` / `password` signs in as user 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

/// User id returned by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: u64 = 1;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == "admin" && credentials.password_matches("password") {
            UserId::new(FIXTURE_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
