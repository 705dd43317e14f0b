//! Module system for orderdesk
//!
//! A module groups entity descriptors and contributes them to the
//! [`EntityRegistry`] of a [`ServerBuilder`](crate::server::ServerBuilder).

use crate::server::entity_registry::EntityRegistry;
use axum::Router;

/// Trait for an application module
pub trait Module: Send + Sync {
    /// Unique module name
    fn name(&self) -> &str;

    /// Module version
    fn version(&self) -> &str {
        "1.0.0"
    }

    /// List of entity types managed by this module
    fn entity_types(&self) -> Vec<&str>;

    /// Register entities with the entity registry
    ///
    /// Routes registered here sit behind the server's authentication layer
    /// when one is configured.
    fn register_entities(&self, registry: &mut EntityRegistry);

    /// Routes that never require credentials (registration, login)
    fn public_routes(&self) -> Option<Router> {
        None
    }
}
