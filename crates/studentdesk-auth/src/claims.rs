//! Claim structures for the two token types the API handles.

use serde::{Deserialize, Serialize};
use studentdesk_core::AppError;
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims of a session token issued by this server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds); the token is valid while `now < exp`
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::invalid_token("Invalid user ID in token"))
    }
}

/// The subset of Google ID token claims the API reads.
///
/// `iss`, `aud` and `exp` are checked by the decoder before these are used.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleIdClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parses_subject() {
        let id = Uuid::new_v4();
        let claims = SessionClaims {
            sub: id.to_string(),
            iat: 0,
            exp: 3600,
        };
        assert_eq!(claims.user_id().unwrap(), id);
    }

    #[test]
    fn test_user_id_rejects_non_uuid_subject() {
        let claims = SessionClaims {
            sub: "not-a-uuid".to_string(),
            iat: 0,
            exp: 3600,
        };
        assert!(claims.user_id().is_err());
    }

    #[test]
    fn test_google_claims_tolerate_missing_profile_fields() {
        let claims: GoogleIdClaims = serde_json::from_value(serde_json::json!({
            "sub": "1234",
            "iss": "https://accounts.google.com",
            "aud": "client",
            "exp": 1
        }))
        .unwrap();
        assert_eq!(claims.sub, "1234");
        assert!(claims.email.is_none());
        assert!(claims.name.is_none());
    }
}
