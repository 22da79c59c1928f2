//! Google ID token verification.
//!
//! A token is accepted when all of the following hold:
//!
//! - the header names `RS256` and a `kid` present in Google's key set
//! - the signature verifies against that key
//! - `iss` is one of the configured issuers
//! - `aud` equals the configured client id
//! - `exp` has not passed
//!
//! The key set is fetched over HTTPS and cached for `GOOGLE_JWKS_CACHE_TTL`
//! seconds. A token whose `kid` is not in the cached set triggers one refetch,
//! which covers Google rotating its keys between two cache refreshes, but no
//! more often than every `GOOGLE_JWKS_MIN_REFRESH` seconds. Fetches happen
//! under the cache's write lock, so concurrent callers share one request.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

use studentdesk_config::GoogleAuthConfig;
use studentdesk_core::AppError;
use studentdesk_models::users::FederatedProfile;

use crate::claims::GoogleIdClaims;

#[derive(Debug, Error)]
pub enum FederatedError {
    #[error("federated login is not configured (GOOGLE_CLIENT_ID is empty)")]
    NotConfigured,

    #[error("malformed identity token: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),

    #[error("unsupported signing algorithm {0:?}")]
    UnsupportedAlgorithm(Algorithm),

    #[error("no signing key matches kid {0:?}")]
    UnknownKey(Option<String>),

    #[error("identity token rejected: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),

    #[error("failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),
}

impl From<FederatedError> for AppError {
    fn from(err: FederatedError) -> Self {
        AppError::federated_verification_failed(err)
    }
}

/// Verifies an externally issued identity token and extracts the profile.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<FederatedProfile, FederatedError>;
}

/// Where signing keys come from.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// JWKS document fetched over HTTP(S).
    Remote(String),
    /// Fixed key set, never refreshed.
    Static(JwkSet),
}

#[derive(Debug)]
struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct GoogleIdentityVerifier {
    client_id: String,
    issuers: Vec<String>,
    source: KeySource,
    cache_ttl: Duration,
    min_refresh: Duration,
    http: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleIdentityVerifier {
    pub fn new(config: &GoogleAuthConfig) -> Self {
        Self::with_key_source(config, KeySource::Remote(config.jwks_url.clone()))
    }

    pub fn with_key_source(config: &GoogleAuthConfig, source: KeySource) -> Self {
        Self {
            client_id: config.client_id.trim().to_string(),
            issuers: config.issuers.clone(),
            source,
            cache_ttl: Duration::from_secs(config.jwks_cache_ttl_secs),
            min_refresh: Duration::from_secs(config.jwks_min_refresh_secs),
            http: reqwest::Client::new(),
            cache: RwLock::new(None),
        }
    }

    /// Overrides the minimum interval between refetches for an unknown `kid`.
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh = interval;
        self
    }

    async fn fetch_keys(&self) -> Result<JwkSet, FederatedError> {
        match &self.source {
            KeySource::Static(keys) => Ok(keys.clone()),
            KeySource::Remote(url) => {
                tracing::debug!(url = %url, "Fetching identity provider key set");
                let keys = self
                    .http
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<JwkSet>()
                    .await?;
                Ok(keys)
            }
        }
    }

    /// Looks up `kid` in the cached key set, fetching it first if the cache is
    /// empty or stale. An unknown `kid` refetches only when the cached set is
    /// older than the minimum refresh interval.
    async fn find_key(&self, kid: Option<&str>) -> Result<Jwk, FederatedError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < self.cache_ttl {
                    if let Some(jwk) = lookup_key(&cached.keys, kid) {
                        return Ok(jwk);
                    }
                }
            }
        }

        let mut cache = self.cache.write().await;
        // Another caller may have refreshed while this one waited for the lock.
        if let Some(cached) = cache.as_ref() {
            let age = cached.fetched_at.elapsed();
            if age < self.cache_ttl {
                if let Some(jwk) = lookup_key(&cached.keys, kid) {
                    return Ok(jwk);
                }
                if age < self.min_refresh {
                    return Err(FederatedError::UnknownKey(kid.map(str::to_string)));
                }
            }
        }

        let keys = self.fetch_keys().await?;
        let jwk = lookup_key(&keys, kid);
        *cache = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        jwk.ok_or_else(|| FederatedError::UnknownKey(kid.map(str::to_string)))
    }
}

fn lookup_key(keys: &JwkSet, kid: Option<&str>) -> Option<Jwk> {
    match kid {
        Some(kid) => keys.find(kid).cloned(),
        // Tokens without a kid are only accepted against a single-key set.
        None if keys.keys.len() == 1 => keys.keys.first().cloned(),
        None => None,
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    #[instrument(skip(self, token))]
    async fn verify(&self, token: &str) -> Result<FederatedProfile, FederatedError> {
        if self.client_id.is_empty() {
            return Err(FederatedError::NotConfigured);
        }

        let header = decode_header(token).map_err(FederatedError::Malformed)?;
        if header.alg != Algorithm::RS256 {
            return Err(FederatedError::UnsupportedAlgorithm(header.alg));
        }

        let jwk = self.find_key(header.kid.as_deref()).await?;
        let key = DecodingKey::from_jwk(&jwk).map_err(FederatedError::Rejected)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&self.issuers);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        let claims = decode::<GoogleIdClaims>(token, &key, &validation)
            .map_err(FederatedError::Rejected)?
            .claims;

        let email = claims.email.unwrap_or_default();
        let display_name = claims
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| {
                if email.is_empty() {
                    claims.sub.clone()
                } else {
                    email.clone()
                }
            });

        Ok(FederatedProfile {
            subject: claims.sub,
            display_name,
            email,
        })
    }
}
