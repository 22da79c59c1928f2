use async_trait::async_trait;
use studentdesk_models::users::{FederatedProfile, NewLocalUser, User, UserCredentials};

use crate::error::StoreError;

/// Identity Store for operator accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_google_id(&self, subject: &str) -> Result<Option<User>, StoreError>;

    /// Credentials of the local account named `username`, if any.
    async fn find_credentials(&self, username: &str)
    -> Result<Option<UserCredentials>, StoreError>;

    /// Returns the user linked to `profile.subject`, creating it on first sight.
    ///
    /// Concurrent calls for the same subject yield the same user. Display name
    /// and email are taken from the first login and never overwritten.
    async fn find_or_create_federated(&self, profile: &FederatedProfile)
    -> Result<User, StoreError>;

    /// Inserts a local account; a taken username is [`StoreError::Conflict`].
    async fn create_local(&self, user: NewLocalUser) -> Result<User, StoreError>;
}
