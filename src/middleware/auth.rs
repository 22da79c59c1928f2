use axum::{
    RequestPartsExt,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use studentdesk_auth::verify_session_token;
use studentdesk_config::JwtConfig;
use studentdesk_core::AppError;
use uuid::Uuid;

use crate::state::AppState;

/// The operator a request was authenticated as.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Reads the bearer token from `parts` and verifies it.
async fn authenticate(parts: &mut Parts, jwt_config: &JwtConfig) -> Result<AuthUser, AppError> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|rejection| {
            if rejection.is_missing() {
                AppError::unauthenticated("Missing authorization header")
            } else {
                AppError::unauthenticated("Invalid authorization header format")
            }
        })?;

    let user_id = verify_session_token(bearer.token(), jwt_config)?.user_id()?;

    Ok(AuthUser { user_id })
}

/// Uses the identity attached by [`require_auth`] when present, otherwise
/// verifies the header itself.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        authenticate(parts, &state.jwt_config).await
    }
}

/// Rejects the request unless it carries a valid session token, and attaches
/// the resulting [`AuthUser`] to its extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let user = authenticate(&mut parts, &state.jwt_config).await?;

    tracing::debug!(user_id = %user.user_id, "Request authenticated");
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
