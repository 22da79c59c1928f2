//! Local login accounts.

use studentdesk_core::{AppError, hash_password};
use studentdesk_db::UserStore;
use studentdesk_models::users::{NewLocalUser, User};

/// Hashes `password` and stores a new local account.
///
/// A taken username is reported as a validation error.
pub async fn create_local_user(
    store: &dyn UserStore,
    username: &str,
    display_name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::validation(anyhow::anyhow!("username is required")));
    }
    if password.is_empty() {
        return Err(AppError::validation(anyhow::anyhow!("password is required")));
    }

    let password_hash = hash_password(password)?;

    let user = store
        .create_local(NewLocalUser {
            username: username.to_string(),
            display_name: display_name.trim().to_string(),
            email: email.trim().to_string(),
            password_hash,
        })
        .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studentdesk_core::{ErrorKind, verify_password};
    use studentdesk_db::MemoryUserStore;

    #[tokio::test]
    async fn test_create_local_user_stores_bcrypt_hash() {
        let store = MemoryUserStore::default();
        let user = create_local_user(&store, " admin ", "Admin", "admin@example.com", "s3cret")
            .await
            .unwrap();
        assert_eq!(user.username.as_deref(), Some("admin"));

        let credentials = store.find_credentials("admin").await.unwrap().unwrap();
        let hash = credentials.password_hash.unwrap();
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = MemoryUserStore::default();
        create_local_user(&store, "admin", "Admin", "a@example.com", "pw")
            .await
            .unwrap();

        let err = create_local_user(&store, "admin", "Other", "b@example.com", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_empty_password_is_rejected() {
        let store = MemoryUserStore::default();
        let err = create_local_user(&store, "admin", "Admin", "a@example.com", "")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
