//! User roster records and JSON loading.

use std::fmt;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::io::read_dataset;
use crate::validation::validate_users;

/// Role recorded for a roster user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleRecord {
    /// Library administrator.
    Admin,
    /// Regular patron.
    User,
}

/// Account status recorded for a roster user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusRecord {
    /// The account may sign in.
    #[default]
    Active,
    /// The account is disabled.
    Inactive,
}

/// A roster user as stored in the fixture file.
///
/// The password is demo fixture data compared verbatim by the backend login
/// service; it is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique positive identifier, also the ledger key.
    pub id: u64,
    /// Unique login name.
    pub username: String,
    /// Plain demo password.
    pub password: String,
    /// Account role.
    pub role: RoleRecord,
    /// Contact e-mail address.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Account status.
    #[serde(default)]
    pub status: StatusRecord,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("status", &self.status)
            .finish()
    }
}

/// Validated user roster.
///
/// ## Invariants
/// - Every `id` is positive and unique.
/// - Every username is non-blank and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRoster {
    users: Vec<UserRecord>,
}

impl UserRoster {
    /// Parses a roster from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ParseError`] for malformed JSON and the
    /// validation variants for structural problems.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let users: Vec<UserRecord> =
            serde_json::from_str(json).map_err(|e| DatasetError::ParseError {
                message: e.to_string(),
            })?;
        Self::from_records(users)
    }

    /// Loads a roster from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::IoError`] if the file cannot be read, or any
    /// error [`UserRoster::from_json`] can return.
    pub fn from_file(path: &Utf8Path) -> Result<Self, DatasetError> {
        let contents = read_dataset(path)?;
        Self::from_json(&contents)
    }

    /// Builds a roster from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found, in record order.
    pub fn from_records(users: Vec<UserRecord>) -> Result<Self, DatasetError> {
        validate_users(&users)?;
        Ok(Self { users })
    }

    /// Returns the records in fixture order.
    #[must_use]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    /// Finds a user by exact username.
    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.username == username)
    }

    /// Finds a user by identifier.
    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == id)
    }
}
