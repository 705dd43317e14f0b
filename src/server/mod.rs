//! Server module for building HTTP servers with auto-registered routes
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD and report routes for all entities declared in modules
//! - Public routes (health, registration, login)
//! - The authentication, trace and CORS layers

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;
pub mod state;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use host::ServerHost;
pub use state::AppState;
