//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod key_value_store;
mod ledger_command;
mod library_query;
mod login_service;
mod user_profile_query;

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
#[cfg(test)]
pub use ledger_command::MockLedgerCommand;
pub use ledger_command::{FixtureLedgerCommand, LedgerCommand};
#[cfg(test)]
pub use library_query::MockLibraryQuery;
pub use library_query::{FixtureLibraryQuery, LibraryQuery};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::{FixtureUserProfileQuery, UserProfileQuery};
