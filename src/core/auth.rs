//! Authorization system for orderdesk
//!
//! Requests carry an opaque API token in the `Authorization` header
//! (`Token <key>`, `Bearer <key>` is accepted too). An [`AuthProvider`]
//! resolves the header into an [`AuthContext`]; the [`require_auth`]
//! middleware checks it against an [`AuthPolicy`] and stores it in the
//! request extensions for handlers.

use crate::core::error::{OrderDeskError, RequestError};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use rand::RngCore;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Number of random bytes in an API token (hex-encoded to 40 characters)
const TOKEN_BYTES: usize = 20;

/// Authentication failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication credentials were not provided")]
    MissingCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed")]
    PasswordHash,

    #[error("token lookup failed: {0}")]
    Lookup(String),
}

impl From<AuthError> for OrderDeskError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::PasswordHash => OrderDeskError::Internal("password hashing failed".to_string()),
            AuthError::Lookup(message) => OrderDeskError::Internal(message),
            other => OrderDeskError::Request(RequestError::Unauthorized {
                message: other.to_string(),
            }),
        }
    }
}

/// Authorization context extracted from a request
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// Authenticated user and the token they presented
    User {
        user_id: Uuid,
        username: String,
        token_id: Uuid,
    },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::User { .. })
    }
}

/// Authorization policy for a group of routes
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// Custom policy function
    Custom(fn(&AuthContext) -> bool),
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => context.is_authenticated(),
            AuthPolicy::Custom(f) => f(context),
        }
    }

    /// Parse policy from string (for YAML config)
    pub fn parse_policy(s: &str) -> Self {
        match s {
            "public" => AuthPolicy::Public,
            _ => AuthPolicy::Authenticated,
        }
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from the request headers.
    ///
    /// A request without credentials yields `Anonymous`; credentials that
    /// do not resolve yield an error.
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError>;
}

/// Provider that treats every request as anonymous (auth disabled)
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn extract_context(&self, _headers: &HeaderMap) -> Result<AuthContext, AuthError> {
        Ok(AuthContext::Anonymous)
    }
}

/// Read the token key from an `Authorization: Token <key>` or
/// `Authorization: Bearer <key>` header
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    (scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer")).then_some(key)
}

/// Generate a new random API token key (40 hex characters)
pub fn generate_token_key() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// State for the [`require_auth`] middleware
#[derive(Clone)]
pub struct AuthState {
    pub provider: Arc<dyn AuthProvider>,
    pub policy: AuthPolicy,
}

impl AuthState {
    pub fn new(provider: Arc<dyn AuthProvider>, policy: AuthPolicy) -> Self {
        Self { provider, policy }
    }
}

/// Middleware resolving the request's [`AuthContext`] and enforcing the
/// configured policy.
///
/// Install with `axum::middleware::from_fn_with_state(auth_state, require_auth)`.
pub async fn require_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, OrderDeskError> {
    let context = match auth.provider.extract_context(req.headers()).await {
        Ok(context) => context,
        Err(err) => {
            tracing::warn!(path = %req.uri().path(), error = %err, "authentication failed");
            return Err(err.into());
        }
    };

    if !auth.policy.check(&context) {
        tracing::debug!(path = %req.uri().path(), "request rejected by auth policy");
        return Err(AuthError::MissingCredentials.into());
    }

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// Extractor for the authenticated user of the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
    pub token_id: Uuid,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = OrderDeskError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthContext>() {
            Some(AuthContext::User {
                user_id,
                username,
                token_id,
            }) => Ok(CurrentUser {
                user_id: *user_id,
                username: username.clone(),
                token_id: *token_id,
            }),
            _ => Err(AuthError::MissingCredentials.into()),
        }
    }
}
