//! # studentdesk Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`server`]: listen address
//! - [`database`]: datastore connection settings
//! - [`jwt`]: session-token signing configuration
//! - [`google`]: federated login (Google Identity) verification settings
//! - [`cors`]: allowed browser origins
//!
//! Every `from_env` constructor falls back to a development default when a
//! variable is unset or unparsable; only `DATABASE_URL` has no default.
//!
//! # Example
//!
//! ```ignore
//! use studentdesk_config::{JwtConfig, GoogleAuthConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let google_config = GoogleAuthConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod google;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::{DatabaseConfig, StoreBackend};
pub use google::GoogleAuthConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads and parses an environment variable, returning `None` when it is
/// unset or does not parse.
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Splits a comma-separated variable into trimmed, non-empty entries.
pub(crate) fn env_list(key: &str, default: &str) -> Vec<String> {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
