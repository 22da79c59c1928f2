//! # studentdesk Models
//!
//! Domain models and DTOs for the studentdesk API: database entities,
//! request/response bodies, and their validation rules.
//!
//! # Modules
//!
//! - [`auth`]: login requests and the session-token response
//! - [`students`]: student records, create/update DTOs, list filters
//! - [`users`]: operator identities (local and federated)
//! - [`serde`]: lenient deserializers for browser form input
//!
//! # Example
//!
//! ```ignore
//! use studentdesk_models::students::{CreateStudentDto, NewStudent, StudentStatus};
//!
//! let dto: CreateStudentDto = serde_json::from_str(body)?;
//! let new_student = NewStudent::from(dto);
//! assert_eq!(new_student.status, StudentStatus::Active);
//! ```

pub mod auth;
pub mod serde;
pub mod students;
pub mod users;

pub use auth::{GoogleLoginRequest, LoginRequest, TokenResponse};
pub use students::{
    CreateStudentDto, DeleteStudentResponse, NewStudent, Student, StudentChanges,
    StudentFilterParams, StudentStatus, UpdateStudentDto,
};
pub use users::{FederatedProfile, NewLocalUser, User, UserCredentials};
