use studentdesk_auth::{IdentityVerifier, create_session_token};
use studentdesk_config::JwtConfig;
use studentdesk_core::{AppError, verify_password};
use studentdesk_db::UserStore;
use studentdesk_models::auth::{GoogleLoginRequest, LoginRequest, TokenResponse};
use studentdesk_observability::{track_login_failure, track_login_success, track_session_issued};
use tracing::instrument;
use uuid::Uuid;

pub struct AuthService;

impl AuthService {
    /// Checks a username and password against the stored bcrypt hash.
    ///
    /// Unknown users, accounts without a local password and wrong passwords
    /// all yield the same `InvalidCredentials` error.
    #[instrument(skip(users, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login_user(
        users: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let Some(credentials) = users.find_credentials(&dto.username).await? else {
            track_login_failure("local", "unknown_user");
            return Err(AppError::invalid_credentials());
        };

        let Some(password_hash) = credentials.password_hash.as_deref() else {
            track_login_failure("local", "no_local_password");
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(&dto.password, password_hash)? {
            track_login_failure("local", "wrong_password");
            return Err(AppError::invalid_credentials());
        }

        track_login_success("local");
        tracing::info!(user_id = %credentials.user_id, "Local login succeeded");

        Self::issue_session(credentials.user_id, jwt_config)
    }

    /// Verifies a Google ID token, finds or creates the matching user and
    /// issues a session token for it.
    #[instrument(skip(users, verifier, dto, jwt_config))]
    pub async fn google_login(
        users: &dyn UserStore,
        verifier: &dyn IdentityVerifier,
        dto: GoogleLoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let profile = match verifier.verify(&dto.token).await {
            Ok(profile) => profile,
            Err(e) => {
                track_login_failure("google", "verification_failed");
                return Err(e.into());
            }
        };

        let user = users.find_or_create_federated(&profile).await?;

        track_login_success("google");
        tracing::info!(user_id = %user.id, subject = %profile.subject, "Google login succeeded");

        Self::issue_session(user.id, jwt_config)
    }

    fn issue_session(user_id: Uuid, jwt_config: &JwtConfig) -> Result<TokenResponse, AppError> {
        let token = create_session_token(user_id, jwt_config)?;
        track_session_issued();
        Ok(TokenResponse { token })
    }
}
