use crate::env_parse;

pub const DEFAULT_SESSION_TOKEN_EXPIRY: i64 = 3600;
/// Upper bound for `JWT_EXPIRY`: 30 days.
pub const MAX_SESSION_TOKEN_EXPIRY: i64 = 30 * 24 * 3600;

/// Session-token signing configuration.
///
/// - `JWT_SECRET`: HMAC secret (development placeholder when unset)
/// - `JWT_EXPIRY`: session lifetime in seconds (default: 3600, one hour).
///   Zero or negative values fall back to the default; values above
///   [`MAX_SESSION_TOKEN_EXPIRY`] are clamped to it.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub session_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            session_token_expiry: session_token_expiry(env_parse("JWT_EXPIRY")),
        }
    }
}

fn session_token_expiry(configured: Option<i64>) -> i64 {
    match configured {
        Some(secs) if secs > 0 => secs.min(MAX_SESSION_TOKEN_EXPIRY),
        _ => DEFAULT_SESSION_TOKEN_EXPIRY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_expiry_defaults_to_one_hour() {
        assert_eq!(session_token_expiry(None), 3600);
    }

    #[test]
    fn test_session_token_expiry_keeps_sane_values() {
        assert_eq!(session_token_expiry(Some(900)), 900);
    }

    #[test]
    fn test_non_positive_session_token_expiry_falls_back() {
        assert_eq!(session_token_expiry(Some(0)), DEFAULT_SESSION_TOKEN_EXPIRY);
        assert_eq!(session_token_expiry(Some(-60)), DEFAULT_SESSION_TOKEN_EXPIRY);
    }

    #[test]
    fn test_huge_session_token_expiry_is_clamped() {
        assert_eq!(session_token_expiry(Some(i64::MAX)), MAX_SESSION_TOKEN_EXPIRY);
    }
}
