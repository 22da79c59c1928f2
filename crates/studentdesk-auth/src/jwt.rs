//! Session token utilities.
//!
//! Session tokens are HS256 JWTs signed with `JWT_SECRET`. They carry only the
//! user id (`sub`), `iat` and `exp`; no role or permission data, since any
//! valid session grants full access to the student API.
//!
//! The `_at` variants take the current time as a parameter so expiry can be
//! tested without waiting. A token is valid while `now < exp`, with no leeway.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use studentdesk_config::JwtConfig;
use studentdesk_core::AppError;

use crate::claims::SessionClaims;

/// Issues a session token for `user_id`, valid for
/// [`JwtConfig::session_token_expiry`] seconds from now.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_session_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_session_token_at(user_id, Utc::now().timestamp(), jwt_config)
}

/// Issues a session token as if the current time were `issued_at`.
///
/// # Errors
///
/// Returns an internal error if the configured lifetime is not positive or
/// the expiry does not fit in a timestamp.
pub fn create_session_token_at(
    user_id: Uuid,
    issued_at: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let exp = Some(jwt_config.session_token_expiry)
        .filter(|expiry| *expiry > 0)
        .and_then(|expiry| issued_at.checked_add(expiry))
        .ok_or_else(|| AppError::internal_error("Invalid session token lifetime"))?;

    let claims = SessionClaims {
        sub: user_id.to_string(),
        iat: issued_at,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a session token's signature and expiry.
///
/// # Errors
///
/// Returns an `InvalidToken` error if the token is malformed, was signed with
/// another secret, or has expired.
pub fn verify_session_token(token: &str, jwt_config: &JwtConfig) -> Result<SessionClaims, AppError> {
    verify_session_token_at(token, Utc::now().timestamp(), jwt_config)
}

/// Verifies a session token as if the current time were `now`.
pub fn verify_session_token_at(
    token: &str,
    now: i64,
    jwt_config: &JwtConfig,
) -> Result<SessionClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against `now` rather than the system clock.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::invalid_token("Invalid or expired token"))?;

    if now >= claims.exp {
        return Err(AppError::invalid_token("Invalid or expired token"));
    }

    Ok(claims)
}
