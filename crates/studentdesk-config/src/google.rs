//! Federated login settings.
//!
//! ID tokens issued by Google are accepted when they are signed by a key from
//! the configured JWKS endpoint, name one of the trusted issuers, and carry
//! the configured client id as audience.
//!
//! # Environment Variables
//!
//! - `GOOGLE_CLIENT_ID`: OAuth client id used as the expected audience.
//!   Federated login rejects every token while this is empty.
//! - `GOOGLE_ISSUERS`: comma-separated trusted issuers
//!   (default: `accounts.google.com,https://accounts.google.com`)
//! - `GOOGLE_JWKS_URL`: key set location
//!   (default: `https://www.googleapis.com/oauth2/v3/certs`)
//! - `GOOGLE_JWKS_CACHE_TTL`: seconds a fetched key set stays fresh (default: 3600)
//! - `GOOGLE_JWKS_MIN_REFRESH`: minimum seconds between two fetches triggered
//!   by an unknown key id (default: 60)

use crate::{env_list, env_parse};

pub const DEFAULT_GOOGLE_ISSUERS: &str = "accounts.google.com,https://accounts.google.com";
pub const DEFAULT_GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoogleAuthConfig {
    pub client_id: String,
    pub issuers: Vec<String>,
    pub jwks_url: String,
    pub jwks_cache_ttl_secs: u64,
    pub jwks_min_refresh_secs: u64,
}

impl GoogleAuthConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            issuers: env_list("GOOGLE_ISSUERS", DEFAULT_GOOGLE_ISSUERS),
            jwks_url: std::env::var("GOOGLE_JWKS_URL")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_JWKS_URL.to_string()),
            jwks_cache_ttl_secs: env_parse("GOOGLE_JWKS_CACHE_TTL").unwrap_or(3600),
            jwks_min_refresh_secs: env_parse("GOOGLE_JWKS_MIN_REFRESH").unwrap_or(60),
        }
    }

    /// Whether an audience has been configured.
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty()
    }
}

impl Default for GoogleAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            issuers: DEFAULT_GOOGLE_ISSUERS
                .split(',')
                .map(str::to_string)
                .collect(),
            jwks_url: DEFAULT_GOOGLE_JWKS_URL.to_string(),
            jwks_cache_ttl_secs: 3600,
            jwks_min_refresh_secs: 60,
        }
    }
}
