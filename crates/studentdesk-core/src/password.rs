use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against a stored bcrypt hash.
///
/// A malformed stored hash is reported as a mismatch rather than an error so
/// that a corrupt credential row cannot be distinguished from a wrong
/// password by the caller.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    match verify(password, hash) {
        Ok(valid) => Ok(valid),
        Err(bcrypt::BcryptError::InvalidHash(_)) | Err(bcrypt::BcryptError::InvalidPrefix(_)) => {
            tracing::warn!("Stored password hash is malformed");
            Ok(false)
        }
        Err(e) => Err(AppError::internal_error(format!(
            "Failed to verify password: {}",
            e
        ))),
    }
}
