//! Operator identity models.
//!
//! A [`User`] is either a local account (has a `username` and a password
//! hash) or was created on first federated login (has a `google_id`). The
//! password hash never leaves the store layer except through
//! [`UserCredentials`], which is not serializable.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Federated subject id (`sub` claim of the identity token)
    pub google_id: Option<String>,
    /// Local login name
    pub username: Option<String>,
    pub display_name: String,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Identity attributes extracted from a verified federated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedProfile {
    pub subject: String,
    pub display_name: String,
    pub email: String,
}

/// Stored credential for a local login.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub username: String,
    pub password_hash: Option<String>,
}

/// A local account to be inserted by the operator CLI.
#[derive(Debug, Clone)]
pub struct NewLocalUser {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
}
