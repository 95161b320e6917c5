//! Login credentials accepted by the authentication port.
//!
//! Handlers parse request bodies into [`LoginCredentials`] before calling a
//! [`crate::domain::ports::LoginService`], so blank input never reaches the
//! roster lookup.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Reasons a login payload is rejected before authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Username and password pair.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept exactly as supplied; it is wiped from
///   memory when the value is dropped.
///
/// # Examples
/// ```
/// use bookshelf::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "lovelace").unwrap();
/// assert_eq!(creds.username(), "ada");
/// assert!(creds.password_matches("lovelace"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form values.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for roster lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Compare the supplied password against a stored one in constant time.
    pub fn password_matches(&self, stored: &str) -> bool {
        self.password.as_bytes().ct_eq(stored.as_bytes()).into()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
