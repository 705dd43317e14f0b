//! REST API exposure
//!
//! Consumes a [`ServerHost`] and produces the Axum `Router`.

use super::super::host::ServerHost;
use crate::core::auth::require_auth;
use axum::{Json, Router, extract::State, middleware, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes and the public routes, always open
    /// - Entity and custom routes, behind the host's auth layer if any
    /// - A request trace layer, plus CORS when enabled
    pub fn build_router(host: ServerHost) -> Router {
        let ServerHost {
            service_name,
            entity_registry,
            public_routes,
            custom_routes,
            auth,
            cors,
        } = host;

        let mut protected = entity_registry.build_routes();
        for custom_router in custom_routes {
            protected = protected.merge(custom_router);
        }
        if let Some(auth) = auth {
            protected = protected.route_layer(middleware::from_fn_with_state(auth, require_auth));
        }

        let mut app = Self::health_routes(service_name).merge(protected);
        for public_router in public_routes {
            app = app.merge(public_router);
        }

        app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .option_layer(cors.then(CorsLayer::permissive)),
        )
    }

    /// Build health check routes
    fn health_routes(service_name: String) -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
            .with_state(service_name)
    }

    /// Health check endpoint handler
    async fn health_check(State(service): State<String>) -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": service
        }))
    }
}
