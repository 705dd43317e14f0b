//! Routes for users and their API tokens

use super::handlers::{login, logout, me, register};
use super::provider::TokenAuthProvider;
use crate::core::auth::{AuthPolicy, AuthState, require_auth};
use crate::server::{AppState, EntityDescriptor};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

/// Descriptor for the session routes of the User entity
///
/// `/auth/me` and `/auth/logout` always need a token, whether or not the
/// server enforces authentication globally.
pub struct UserDescriptor {
    pub state: AppState,
}

impl UserDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn plural(&self) -> &str {
        "users"
    }

    fn build_routes(&self) -> Router {
        let auth = AuthState::new(
            Arc::new(TokenAuthProvider::new(self.state.store.clone())),
            AuthPolicy::Authenticated,
        );

        Router::new()
            .route("/auth/me", get(me))
            .route("/auth/logout", post(logout))
            .route_layer(middleware::from_fn_with_state(auth, require_auth))
            .with_state(self.state.clone())
    }
}

/// Registration and login, reachable without credentials
pub fn public_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .with_state(state)
}
