//! Driving port for the signed-in user's profile.

use async_trait::async_trait;

use crate::domain::{Error, Role, User, UserId};

/// Domain use-case port for reading the current user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile for the authenticated user.
    async fn fetch_profile(&self, user_id: UserId) -> Result<User, Error>;
}

/// Profile query that answers every id with a demo administrator.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileQuery;

#[async_trait]
impl UserProfileQuery for FixtureUserProfileQuery {
    async fn fetch_profile(&self, user_id: UserId) -> Result<User, Error> {
        User::try_new(user_id, "admin", Role::Admin)
            .map_err(|err| Error::internal(format!("invalid fixture profile: {err}")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_profile_query_echoes_requested_id() {
        let user_id = UserId::new(11).expect("positive id");
        let user = FixtureUserProfileQuery
            .fetch_profile(user_id)
            .await
            .expect("profile response");
        assert_eq!(user.id(), user_id);
        assert_eq!(user.username(), "admin");
    }
}
