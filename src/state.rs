use std::sync::Arc;

use studentdesk_auth::{GoogleIdentityVerifier, IdentityVerifier};
use studentdesk_config::{CorsConfig, DatabaseConfig, GoogleAuthConfig, JwtConfig};
use studentdesk_db::{StudentStore, UserStore, init_stores};
use studentdesk_observability::{PrometheusHandle, init_metrics};

#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentStore>,
    pub users: Arc<dyn UserStore>,
    pub jwt_config: JwtConfig,
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pub cors_config: CorsConfig,
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_expiry", &self.jwt_config.session_token_expiry)
            .field("cors_config", &self.cors_config)
            .field("metrics_enabled", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

/// Builds the state from environment variables.
///
/// # Errors
///
/// Fails when `DATABASE_URL` is missing or cannot be parsed. An unreachable
/// database is not an error here.
pub async fn init_app_state() -> Result<AppState, String> {
    let database_config = DatabaseConfig::from_env()?;
    let stores = init_stores(&database_config)
        .await
        .map_err(|e| e.to_string())?;

    let google_config = GoogleAuthConfig::from_env();
    if !google_config.is_configured() {
        tracing::warn!("GOOGLE_CLIENT_ID is not set; Google login will reject every token");
    }

    Ok(AppState {
        students: stores.students,
        users: stores.users,
        jwt_config: JwtConfig::from_env(),
        identity_verifier: Arc::new(GoogleIdentityVerifier::new(&google_config)),
        cors_config: CorsConfig::from_env(),
        metrics: init_metrics(),
    })
}
