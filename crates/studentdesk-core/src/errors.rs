//! Application error type and its HTTP mapping.
//!
//! Every failure that reaches a handler is an [`AppError`]: an [`ErrorKind`]
//! from the fixed taxonomy, the HTTP status derived from it, and the
//! underlying [`anyhow::Error`] for context.
//!
//! Client errors are rendered as `{"error": "<message>"}`. Server errors
//! (`StoreUnavailable`, `Internal`) are logged with their full cause chain and
//! rendered with a generic message so that connection strings and driver
//! details never leave the process.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure categories surfaced by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed required field.
    Validation,
    /// No bearer token on a protected request.
    Unauthenticated,
    /// Bearer token present but its signature or expiry check failed.
    InvalidToken,
    /// Local login rejected.
    InvalidCredentials,
    /// Federated identity token rejected.
    FederatedVerificationFailed,
    /// Unknown record id.
    NotFound,
    /// The datastore could not be reached.
    StoreUnavailable,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated
            | ErrorKind::InvalidToken
            | ErrorKind::InvalidCredentials
            | ErrorKind::FederatedVerificationFailed => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::StoreUnavailable | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            status: kind.status(),
            error: err.into(),
        }
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, anyhow::anyhow!(message.into()))
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, anyhow::anyhow!(message.into()))
    }

    /// Local login failure. The message is identical for unknown users and
    /// wrong passwords.
    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorKind::InvalidCredentials,
            anyhow::anyhow!("Invalid username or password"),
        )
    }

    pub fn federated_verification_failed<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::FederatedVerificationFailed, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn store_unavailable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::StoreUnavailable, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }

    /// Message sent to the client.
    pub fn public_message(&self) -> String {
        match self.kind {
            ErrorKind::FederatedVerificationFailed => "Google authentication failed".to_string(),
            ErrorKind::StoreUnavailable => "Service temporarily unavailable".to_string(),
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(kind = ?self.kind, error = ?self.error, "Request failed");
        } else if self.kind == ErrorKind::FederatedVerificationFailed {
            tracing::warn!(error = %self.error, "Federated verification failed");
        }

        let body = Json(json!({
            "error": self.public_message()
        }));

        (self.status, body).into_response()
    }
}
