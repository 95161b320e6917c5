//! Roster-backed authentication and profile lookups.
//!
//! The roster is the static `users.json` fixture. [`RosterDirectory`] keeps
//! it in memory and answers both [`LoginService`] and [`UserProfileQuery`].

use std::collections::HashMap;

use async_trait::async_trait;
use library_data::{RoleRecord, StatusRecord, UserRecord, UserRoster};
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, UserProfileQuery};
use crate::domain::{
    AccountStatus, Error, LoginCredentials, Role, User, UserId, UserValidationError,
};

struct Account {
    profile: User,
    password: Zeroizing<String>,
}

/// In-memory roster of accounts.
#[derive(Default)]
pub struct RosterDirectory {
    by_username: HashMap<String, UserId>,
    accounts: HashMap<UserId, Account>,
}

impl RosterDirectory {
    /// Convert a validated roster.
    pub fn from_roster(roster: &UserRoster) -> Result<Self, UserValidationError> {
        let mut by_username = HashMap::new();
        let mut accounts = HashMap::new();
        for record in roster.users() {
            let account = Self::account_from(record)?;
            let id = account.profile.id();
            by_username.insert(account.profile.username().to_owned(), id);
            accounts.insert(id, account);
        }
        Ok(Self {
            by_username,
            accounts,
        })
    }

    fn account_from(record: &UserRecord) -> Result<Account, UserValidationError> {
        let role = match record.role {
            RoleRecord::Admin => Role::Admin,
            RoleRecord::User => Role::User,
        };
        let status = match record.status {
            StatusRecord::Active => AccountStatus::Active,
            StatusRecord::Inactive => AccountStatus::Inactive,
        };
        let profile = User::try_new(UserId::new(record.id)?, record.username.as_str(), role)?
            .with_contact(record.email.as_str(), record.phone.as_str())
            .with_status(status);
        Ok(Account {
            profile,
            password: Zeroizing::new(record.password.clone()),
        })
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl LoginService for RosterDirectory {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .by_username
            .get(credentials.username())
            .and_then(|id| self.accounts.get(id))
            .filter(|account| credentials.password_matches(account.password.as_str()));
        let Some(account) = account else {
            warn!(username = credentials.username(), "rejected sign-in");
            return Err(Error::unauthorized("invalid credentials"));
        };
        if !account.profile.is_active() {
            warn!(user_id = %account.profile.id(), "sign-in for inactive account");
            return Err(Error::unauthorized("account is inactive"));
        }
        info!(user_id = %account.profile.id(), "user signed in");
        Ok(account.profile.id())
    }
}

#[async_trait]
impl UserProfileQuery for RosterDirectory {
    async fn fetch_profile(&self, user_id: UserId) -> Result<User, Error> {
        self.accounts
            .get(&user_id)
            .map(|account| account.profile.clone())
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}
