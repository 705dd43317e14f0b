//! Token-backed [`AuthProvider`]

use crate::core::auth::{AuthContext, AuthError, AuthProvider, token_from_headers};
use crate::store::EntityStore;
use async_trait::async_trait;
use axum::http::HeaderMap;

/// Resolves `Authorization: Token <key>` headers against the token store
#[derive(Clone)]
pub struct TokenAuthProvider {
    store: EntityStore,
}

impl TokenAuthProvider {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
        let Some(key) = token_from_headers(headers) else {
            return Ok(AuthContext::Anonymous);
        };

        let token = self
            .store
            .tokens
            .search("key", key)
            .await
            .map_err(|e| AuthError::Lookup(e.to_string()))?
            .into_iter()
            .next()
            .ok_or(AuthError::InvalidToken)?;

        let user = self
            .store
            .users
            .get(&token.user)
            .await
            .map_err(|e| AuthError::Lookup(e.to_string()))?
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthContext::User {
            user_id: user.id,
            username: user.username,
            token_id: token.id,
        })
    }
}
