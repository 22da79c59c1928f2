use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::Json;
use axum::extract::State;
use studentdesk_core::{AppError, ErrorResponse};
use studentdesk_models::auth::{GoogleLoginRequest, LoginRequest, TokenResponse};
use tracing::instrument;

use super::service::AuthService;

/// Login with a local username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::login_user(state.users.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Exchange a Google ID token for a session token
#[utoipa::path(
    post,
    path = "/auth/google-login",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Google authentication failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn google_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<GoogleLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::google_login(
        state.users.as_ref(),
        state.identity_verifier.as_ref(),
        dto,
        &state.jwt_config,
    )
    .await?;
    Ok(Json(response))
}
