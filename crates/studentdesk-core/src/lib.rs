//! # studentdesk Core
//!
//! Core types and utilities shared by every studentdesk crate.
//!
//! - [`errors`]: the application error taxonomy with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use studentdesk_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("correct horse battery staple")?;
//! if !verify_password("guess", &hash)? {
//!     return Err(AppError::invalid_credentials());
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use password::{hash_password, verify_password};
