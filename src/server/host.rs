//! Server host: everything needed to expose the API
//!
//! The builder collects modules, routes and the auth setup into a
//! `ServerHost`; an exposure turns the host into a router.

use crate::core::auth::AuthState;
use crate::server::entity_registry::EntityRegistry;
use axum::Router;

/// Host context containing all server state
pub struct ServerHost {
    /// Service name reported by the health endpoints
    pub service_name: String,

    /// Entity registry for the protected routes
    pub entity_registry: EntityRegistry,

    /// Routes reachable without credentials
    pub public_routes: Vec<Router>,

    /// Extra routes placed behind authentication
    pub custom_routes: Vec<Router>,

    /// Global authentication; `None` leaves the protected routes open
    pub auth: Option<AuthState>,

    /// Add a permissive CORS layer
    pub cors: bool,
}

impl ServerHost {
    pub fn new(service_name: impl Into<String>, entity_registry: EntityRegistry) -> Self {
        Self {
            service_name: service_name.into(),
            entity_registry,
            public_routes: Vec::new(),
            custom_routes: Vec::new(),
            auth: None,
            cors: false,
        }
    }

    /// Get entity types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }

    pub fn requires_auth(&self) -> bool {
        self.auth.is_some()
    }
}
