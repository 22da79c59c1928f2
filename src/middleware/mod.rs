//! Request authentication.
//!
//! - [`auth::require_auth`]: route layer that rejects requests without a valid
//!   session token
//! - [`auth::AuthUser`]: extractor for the authenticated user id
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies signature and expiry and stores an `AuthUser`
//!    in the request extensions
//! 3. Handlers take `AuthUser` as an argument to read the user id
//!
//! A missing header or a non-Bearer scheme is `Unauthenticated`; a bad
//! signature or an expired token is `InvalidToken`. Both answer 401.

pub mod auth;
