//! User identity and profile model.
//!
//! The ledger only ever needs a user's identifier; the remaining profile
//! fields exist for `GET /users/me` and the login flow.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned when building user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// User id was zero.
    ZeroId,
    /// User id text was not a positive integer.
    InvalidId,
    /// Username was blank once trimmed.
    EmptyUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroId => write!(f, "user id must be positive"),
            Self::InvalidId => write!(f, "user id must be a positive integer"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable positive user identifier.
///
/// The ledger keys (`borrowed_<id>`, `favorites_<id>`) embed the decimal
/// form of this value.
///
/// # Examples
/// ```
/// use bookshelf::domain::UserId;
///
/// let id = UserId::new(42).unwrap();
/// assert_eq!(id.get(), 42);
/// assert!(UserId::new(0).is_err());
/// assert_eq!("42".parse::<UserId>().unwrap(), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(NonZeroU64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: u64) -> Result<Self, UserValidationError> {
        NonZeroU64::new(id)
            .map(Self)
            .ok_or(UserValidationError::ZeroId)
    }

    /// Raw integer value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s.parse().map_err(|_| UserValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl From<UserId> for u64 {
    fn from(value: UserId) -> Self {
        value.get()
    }
}

impl TryFrom<u64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Role assigned in the roster. The ledger never inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Library administrator.
    Admin,
    /// Regular member.
    User,
}

/// Whether the account may sign in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// The account can authenticate.
    #[default]
    Active,
    /// The account is disabled.
    Inactive,
}

/// Public user profile. Never carries the password.
///
/// ## Invariants
/// - `username` is non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = u64, example = 42)]
    id: UserId,
    #[schema(example = "ada")]
    username: String,
    role: Role,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[schema(example = "ada@example.org")]
    email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    phone: String,
    status: AccountStatus,
}

impl User {
    /// Build a profile with the mandatory fields; contact details start empty.
    pub fn try_new(
        id: UserId,
        username: impl Into<String>,
        role: Role,
    ) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self {
            id,
            username,
            role,
            email: String::new(),
            phone: String::new(),
            status: AccountStatus::Active,
        })
    }

    /// Attach contact details.
    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.email = email.into();
        self.phone = phone.into();
        self
    }

    /// Override the account status.
    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Roster role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Contact email, empty when unknown.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Contact phone, empty when unknown.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Account status.
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    /// Whether the account may authenticate.
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}
