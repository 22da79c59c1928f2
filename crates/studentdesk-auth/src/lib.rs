//! # studentdesk Auth
//!
//! Token handling for the studentdesk API.
//!
//! This crate provides:
//!
//! - [`claims`]: claim structures for session tokens and Google ID tokens
//! - [`jwt`]: session token issuing and verification (HS256, server secret)
//! - [`google`]: Google ID token verification against the provider's key set
//!
//! # Token Types
//!
//! - **Session Token** ([`SessionClaims`]): issued by this server after a
//!   successful login, carries the user id and expires after `JWT_EXPIRY`
//!   seconds (one hour by default)
//! - **Google ID Token** ([`GoogleIdClaims`]): issued by Google to the
//!   browser, exchanged once at `/auth/google-login`
//!
//! # Example
//!
//! ```ignore
//! use studentdesk_auth::{create_session_token, verify_session_token};
//! use studentdesk_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_session_token(user_id, &config)?;
//! let claims = verify_session_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

pub mod claims;
pub mod google;
pub mod jwt;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types at crate root
pub use claims::{GoogleIdClaims, SessionClaims};
pub use google::{FederatedError, GoogleIdentityVerifier, IdentityVerifier, KeySource};
pub use jwt::{
    create_session_token, create_session_token_at, verify_session_token, verify_session_token_at,
};
